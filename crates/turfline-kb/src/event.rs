//! The event database and the effect data model.
//!
//! Events live in three tiers that the resolver consults in priority order:
//! character-specific, common, then support-card. Event names inside a tier
//! keep their definition order because normalized matching breaks ties by
//! first occurrence, so the tiers deserialize into order-preserving maps
//! instead of sorted ones.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{Stat, StatMap, StatusTag};

/// A random-stat effect: `count` randomly chosen stats each gain `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomStats {
    pub count: u32,
    pub value: f32,
}

/// The parsed outcome of one choice.
///
/// On the wire this is a flat object: the five stat keys sit next to the
/// scalar effects (`{"spd": 10, "energy": -5, "status": "tired"}`). A stat
/// that is absent is distinct from a stat that is zero, which matters for
/// combo detection, so stat deltas are `Option` per key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectRecord {
    #[serde(flatten)]
    pub stats: StatMap<Option<f32>>,
    pub energy: Option<f32>,
    pub skill_points: Option<f32>,
    pub bond: Option<f32>,
    pub last_trained_stat: Option<f32>,
    pub mood: Option<f32>,
    pub motivation: Option<f32>,
    pub status: Option<StatusTag>,
    pub heal_status: Option<f32>,
    pub random_stats: Option<RandomStats>,
}

impl EffectRecord {
    /// The stat deltas present in this record, in stat order.
    pub fn trained_stats(&self) -> impl Iterator<Item = (Stat, f32)> + '_ {
        self.stats
            .iter()
            .filter_map(|(stat, delta)| delta.map(|d| (stat, d)))
    }

    /// Whether the record carries no effect at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One outcome of a probabilistic choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomOutcome {
    pub effects: EffectRecord,
    /// Probability in `(0, 1]`; outcomes of one choice should sum to 1.
    pub chance: f32,
}

/// A selectable option within an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Guaranteed { effects: EffectRecord },
    Random { random_outcomes: Vec<RandomOutcome> },
}

impl Choice {
    /// Sum of outcome probabilities, or `None` for a guaranteed choice.
    #[must_use]
    pub fn chance_sum(&self) -> Option<f32> {
        match self {
            Choice::Guaranteed { .. } => None,
            Choice::Random { random_outcomes } => {
                Some(random_outcomes.iter().map(|o| o.chance).sum())
            }
        }
    }
}

/// A named event and its ordered choices.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub name: String,
    pub choices: Vec<Choice>,
}

/// An ordered event-name to choice-list map for one tier.
///
/// Serializes as a JSON object; deserialization keeps the document's key
/// order. Exact lookup returns the first record with a matching name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventMap {
    events: Vec<EventRecord>,
}

impl EventMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, choices: Vec<Choice>) {
        self.events.push(EventRecord {
            name: name.into(),
            choices,
        });
    }

    /// Looks up an event by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EventRecord> {
        self.events.iter().find(|event| event.name == name)
    }

    /// Events in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<(String, Vec<Choice>)> for EventMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Choice>)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, choices) in iter {
            map.push(name, choices);
        }
        map
    }
}

impl Serialize for EventMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.events.len()))?;
        for event in &self.events {
            map.serialize_entry(&event.name, &event.choices)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EventMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EventMapVisitor;

        impl<'de> Visitor<'de> for EventMapVisitor {
            type Value = EventMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from event name to choice list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = EventMap::new();
                while let Some((name, choices)) = access.next_entry::<String, Vec<Choice>>()? {
                    map.push(name, choices);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EventMapVisitor)
    }
}

/// The support-card tier: an ordered map of card name to that card's events.
///
/// Card order is the document order, which decides ties when the same event
/// name appears under more than one card.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SupportDeck {
    cards: Vec<(String, EventMap)>,
}

impl SupportDeck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, card: impl Into<String>, events: EventMap) {
        self.cards.push((card.into(), events));
    }

    /// Cards in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventMap)> {
        self.cards.iter().map(|(card, events)| (card.as_str(), events))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Serialize for SupportDeck {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cards.len()))?;
        for (card, events) in &self.cards {
            map.serialize_entry(card, events)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SupportDeck {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SupportDeckVisitor;

        impl<'de> Visitor<'de> for SupportDeckVisitor {
            type Value = SupportDeck;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from support-card name to event map")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut deck = SupportDeck::new();
                while let Some((card, events)) = access.next_entry::<String, EventMap>()? {
                    deck.push(card, events);
                }
                Ok(deck)
            }
        }

        deserializer.deserialize_map(SupportDeckVisitor)
    }
}

/// The assembled event knowledge base, all three tiers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventDatabase {
    /// Character-specific events, looked up by character identifier.
    pub character: BTreeMap<String, EventMap>,
    pub common: EventMap,
    pub support: SupportDeck,
}

impl EventDatabase {
    /// Events for one character, if that character has a tier entry.
    #[must_use]
    pub fn character_events(&self, character: &str) -> Option<&EventMap> {
        self.character.get(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StatusKind;

    #[test]
    fn test_effect_record_flat_wire_format() {
        let json = r#"{"spd": 10, "pwr": 5, "energy": -15, "status": "tired"}"#;
        let record: EffectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.stats.spd, Some(10.0));
        assert_eq!(record.stats.pwr, Some(5.0));
        assert_eq!(record.stats.sta, None);
        assert_eq!(record.energy, Some(-15.0));
        assert_eq!(record.status, Some(StatusTag::Known(StatusKind::Tired)));

        let trained: Vec<_> = record.trained_stats().collect();
        assert_eq!(trained, vec![(Stat::Spd, 10.0), (Stat::Pwr, 5.0)]);
    }

    #[test]
    fn test_zero_delta_is_distinct_from_absent() {
        let record: EffectRecord = serde_json::from_str(r#"{"guts": 0}"#).unwrap();
        assert_eq!(record.trained_stats().count(), 1);
        assert!(!record.is_empty());
        assert!(EffectRecord::default().is_empty());
    }

    #[test]
    fn test_choice_variants() {
        let guaranteed: Choice = serde_json::from_str(r#"{"effects": {"wit": 10}}"#).unwrap();
        assert!(matches!(guaranteed, Choice::Guaranteed { .. }));
        assert_eq!(guaranteed.chance_sum(), None);

        let random: Choice = serde_json::from_str(
            r#"{"random_outcomes": [
                {"effects": {"spd": 20}, "chance": 0.3},
                {"effects": {"energy": -10}, "chance": 0.7}
            ]}"#,
        )
        .unwrap();
        let Choice::Random { random_outcomes } = &random else {
            panic!("expected random choice");
        };
        assert_eq!(random_outcomes.len(), 2);
        assert!((random.chance_sum().unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_event_map_preserves_definition_order() {
        let json = r#"{
            "Zebra Event": [{"effects": {"spd": 5}}],
            "Alpha Event": [{"effects": {"sta": 5}}]
        }"#;
        let map: EventMap = serde_json::from_str(json).unwrap();
        let names: Vec<_> = map.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Zebra Event", "Alpha Event"]);
        assert!(map.get("Alpha Event").is_some());
        assert!(map.get("alpha event").is_none(), "exact lookup is case-sensitive");
    }

    #[test]
    fn test_support_deck_preserves_card_order() {
        let json = r#"{
            "Kitasan Black": {"Shared Event": [{"effects": {"spd": 5}}]},
            "Admire Vega": {"Shared Event": [{"effects": {"sta": 5}}]}
        }"#;
        let deck: SupportDeck = serde_json::from_str(json).unwrap();
        let cards: Vec<_> = deck.iter().map(|(card, _)| card).collect();
        assert_eq!(cards, ["Kitasan Black", "Admire Vega"]);
    }

    #[test]
    fn test_random_stats_effect() {
        let record: EffectRecord =
            serde_json::from_str(r#"{"random_stats": {"count": 2, "value": 5}}"#).unwrap();
        let random = record.random_stats.unwrap();
        assert_eq!(random.count, 2);
        assert_eq!(random.value, 5.0);
        assert_eq!(record.trained_stats().count(), 0);
    }
}
