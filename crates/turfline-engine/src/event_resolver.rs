//! Fuzzy resolution of recognized event titles against the event database.
//!
//! Recognition output is noisy: casing drifts, punctuation drops out, spacing
//! varies. Resolution therefore runs two passes per tier — exact match on the
//! trimmed title, then a match on the normalized form (lowercase alphanumeric
//! only) — and walks the tiers in priority order: the active character's own
//! events, then the common pool, then every support card. Character data wins
//! over shared data so a character-specific variant of a shared event name is
//! never shadowed.

use tracing::debug;
use turfline_kb::{EventDatabase, EventMap, EventRecord};

/// Reduces a title to lowercase alphanumeric characters.
///
/// This is the equivalence recognition noise is forgiven under:
/// `"Crane Your Neck?"` and `"crane your neck?"` normalize identically.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// How a resolved event was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MatchKind {
    #[display("exact")]
    Exact,
    #[display("normalized")]
    Normalized,
}

/// Which tier a resolved event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MatchTier<'db> {
    #[display("character")]
    Character,
    #[display("common")]
    Common,
    #[display("support card {card:?}")]
    Support { card: &'db str },
}

/// Outcome of resolving a recognized event title.
#[derive(Debug, Clone, PartialEq)]
pub enum EventMatch<'db> {
    Known {
        event: &'db EventRecord,
        tier: MatchTier<'db>,
        kind: MatchKind,
    },
    /// Nothing in any tier matched; carries the trimmed input for logging.
    Unknown { text: String },
}

impl EventMatch<'_> {
    /// The resolved event's canonical name, or the raw text when unknown.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            EventMatch::Known { event, .. } => &event.name,
            EventMatch::Unknown { text } => text,
        }
    }
}

fn find_in<'db>(events: &'db EventMap, title: &str) -> Option<(&'db EventRecord, MatchKind)> {
    if let Some(event) = events.get(title) {
        return Some((event, MatchKind::Exact));
    }
    let needle = normalize(title);
    if needle.is_empty() {
        // An all-punctuation title would match any event whose name also
        // normalizes to nothing; refuse rather than guess.
        return None;
    }
    events
        .iter()
        .find(|event| normalize(&event.name) == needle)
        .map(|event| (event, MatchKind::Normalized))
}

/// Resolves a recognized title to an event, walking the tiers in priority
/// order. The support tier runs a full exact pass over every card before any
/// normalized comparison, so an exact name under a later card beats a
/// normalized hit under an earlier one.
#[must_use]
pub fn resolve<'db>(
    db: &'db EventDatabase,
    text: &str,
    active_character: Option<&str>,
) -> EventMatch<'db> {
    let title = text.trim();

    if let Some(events) = active_character.and_then(|id| db.character_events(id)) {
        if let Some((event, kind)) = find_in(events, title) {
            debug!(event = %event.name, %kind, tier = "character", "resolved event");
            return EventMatch::Known {
                event,
                tier: MatchTier::Character,
                kind,
            };
        }
    }

    if let Some((event, kind)) = find_in(&db.common, title) {
        debug!(event = %event.name, %kind, tier = "common", "resolved event");
        return EventMatch::Known {
            event,
            tier: MatchTier::Common,
            kind,
        };
    }

    for (card, events) in db.support.iter() {
        if let Some(event) = events.get(title) {
            debug!(event = %event.name, card, "resolved event");
            return EventMatch::Known {
                event,
                tier: MatchTier::Support { card },
                kind: MatchKind::Exact,
            };
        }
    }
    let needle = normalize(title);
    if !needle.is_empty() {
        for (card, events) in db.support.iter() {
            let hit = events.iter().find(|event| normalize(&event.name) == needle);
            if let Some(event) = hit {
                debug!(event = %event.name, card, "resolved event");
                return EventMatch::Known {
                    event,
                    tier: MatchTier::Support { card },
                    kind: MatchKind::Normalized,
                };
            }
        }
    }

    EventMatch::Unknown {
        text: title.to_owned(),
    }
}
