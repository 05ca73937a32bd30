//! JSON loading for the knowledge-base files.
//!
//! Every loader reads a whole file, deserializes it, and validates what can
//! be validated up front. Probability sums that do not add up to 1 are only
//! logged: the event data is community-maintained and a slightly-off sum
//! should not take the whole session down.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::event::{EventMap, SupportDeck};
use crate::profile::{CharacterRoster, ProfileError};
use crate::weights::EffectWeights;

/// A knowledge-base file that could not be loaded.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum LoadError {
    #[display("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[from]
    Profile(ProfileError),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_owned(),
        source,
    })
}

/// Tolerance for outcome probability sums before a warning is logged.
const CHANCE_SUM_TOLERANCE: f32 = 0.01;

/// Logs every probabilistic choice whose outcome chances do not sum to 1.
/// Returns the number of offending choices.
fn audit_chances(tier: &str, events: &EventMap) -> usize {
    let mut flagged = 0;
    for event in events.iter() {
        for (index, choice) in event.choices.iter().enumerate() {
            let Some(sum) = choice.chance_sum() else {
                continue;
            };
            if (sum - 1.0).abs() > CHANCE_SUM_TOLERANCE {
                warn!(
                    tier,
                    event = %event.name,
                    choice = index + 1,
                    sum,
                    "outcome chances do not sum to 1, scoring will be skewed"
                );
                flagged += 1;
            }
        }
    }
    flagged
}

/// Loads the common event tier.
pub fn load_common_events(path: &Path) -> Result<EventMap, LoadError> {
    let events: EventMap = read_json(path)?;
    audit_chances("common", &events);
    Ok(events)
}

/// Loads the character-specific event tier.
pub fn load_character_events(path: &Path) -> Result<BTreeMap<String, EventMap>, LoadError> {
    let tiers: BTreeMap<String, EventMap> = read_json(path)?;
    for (character, events) in &tiers {
        audit_chances(character, events);
    }
    Ok(tiers)
}

/// Loads the support-card event tier.
pub fn load_support_events(path: &Path) -> Result<SupportDeck, LoadError> {
    let deck: SupportDeck = read_json(path)?;
    for (card, events) in deck.iter() {
        audit_chances(card, events);
    }
    Ok(deck)
}

/// Loads a character roster and validates every profile in it.
pub fn load_roster(path: &Path) -> Result<CharacterRoster, LoadError> {
    let roster: CharacterRoster = read_json(path)?;
    for (character, profile) in roster.iter() {
        profile.validate(character)?;
    }
    Ok(roster)
}

/// Loads an effect-weight table; fields absent from the file keep their
/// built-in values.
pub fn load_weights(path: &Path) -> Result<EffectWeights, LoadError> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("turfline-kb-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_common_events() {
        let path = write_temp(
            "common.json",
            r#"{"Extra Training": [{"effects": {"spd": 5}}, {"effects": {"energy": 10}}]}"#,
        );
        let events = load_common_events(&path).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events.get("Extra Training").unwrap().choices.len(), 2);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_common_events(Path::new("/nonexistent/events.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/events.json"));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let path = write_temp("broken.json", "{not json");
        let err = load_common_events(&path).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_roster_validation_propagates() {
        let path = write_temp(
            "roster.json",
            r#"{"bad": {
                "running_style": "leader",
                "stat_bonus": {"spd": -1.0, "sta": 1.0, "pwr": 1.0, "guts": 1.0, "wit": 1.0},
                "preferred_distance": "mile"
            }}"#,
        );
        let err = load_roster(&path).unwrap_err();
        assert!(matches!(err, LoadError::Profile(_)));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_audit_flags_bad_chance_sums() {
        let json = r#"{
            "Coin Toss": [
                {"random_outcomes": [
                    {"effects": {"spd": 10}, "chance": 0.5},
                    {"effects": {"sta": 10}, "chance": 0.3}
                ]},
                {"effects": {"wit": 5}}
            ]
        }"#;
        let events: EventMap = serde_json::from_str(json).unwrap();
        assert_eq!(audit_chances("test", &events), 1);
    }

    #[test]
    fn test_partial_weights_file_merges_over_builtin() {
        let path = write_temp("weights.json", r#"{"heal_status": 9.0}"#);
        let weights = load_weights(&path).unwrap();
        assert_eq!(weights.heal_status, 9.0);
        assert_eq!(weights.mood, 2.5);
        fs::remove_file(path).unwrap();
    }
}
