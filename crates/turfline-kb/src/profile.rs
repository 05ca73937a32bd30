//! Character growth profiles and the fixed bonus tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{AptitudeRank, DistanceClass, RunningStyle, StatMap, SurfaceMap};

/// Growth profile of a single trainable character.
///
/// Profiles are immutable reference data: loaded (or taken from the built-in
/// roster) at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub running_style: RunningStyle,
    pub stat_bonus: StatMap<f32>,
    pub preferred_distance: DistanceClass,
    #[serde(default)]
    pub surface_aptitude: SurfaceMap<AptitudeRank>,
}

impl CharacterProfile {
    /// The balanced profile used when no character is supplied or the
    /// identifier is unknown: runner style, neutral growth, rank B on both
    /// surfaces.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            running_style: RunningStyle::Runner,
            stat_bonus: StatMap::uniform(1.0),
            preferred_distance: DistanceClass::Mile,
            surface_aptitude: SurfaceMap {
                turf: AptitudeRank::B,
                dirt: AptitudeRank::B,
            },
        }
    }

    /// Checks the profile's invariants: every growth multiplier must be a
    /// finite positive number.
    pub fn validate(&self, character: &str) -> Result<(), ProfileError> {
        for (stat, &bonus) in self.stat_bonus.iter() {
            if !bonus.is_finite() || bonus <= 0.0 {
                return Err(ProfileError {
                    character: character.to_owned(),
                    reason: format!("stat bonus for {stat} must be a positive number, got {bonus}"),
                });
            }
        }
        Ok(())
    }
}

/// A profile that violates the knowledge-base invariants.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid profile for {character}: {reason}")]
pub struct ProfileError {
    #[error(not(source))]
    pub character: String,
    #[error(not(source))]
    pub reason: String,
}

impl RunningStyle {
    /// Per-stat training multiplier table for this running style.
    #[must_use]
    pub fn stat_bonus(self) -> StatMap<f32> {
        let table = |spd, sta, pwr, guts, wit| StatMap {
            spd,
            sta,
            pwr,
            guts,
            wit,
        };
        match self {
            // Leaders need speed and a good start, at the cost of stamina focus.
            RunningStyle::Leader => table(1.2, 0.9, 1.1, 1.0, 1.0),
            // Runners and betweeners train evenly with a positioning edge.
            RunningStyle::Runner | RunningStyle::Betweener => table(1.1, 1.1, 1.0, 1.0, 1.1),
            // Chasers trade early speed for stamina and guts in the final surge.
            RunningStyle::Chaser => table(0.9, 1.2, 1.0, 1.2, 1.0),
        }
    }
}

/// The character knowledge base: identifier to growth profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterRoster {
    characters: BTreeMap<String, CharacterProfile>,
}

impl CharacterRoster {
    /// An empty roster.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            characters: BTreeMap::new(),
        }
    }

    /// The built-in roster shipped with the engine.
    #[must_use]
    pub fn builtin() -> Self {
        let profile = |running_style,
                       bonus: [f32; 5],
                       preferred_distance,
                       turf,
                       dirt| CharacterProfile {
            running_style,
            stat_bonus: StatMap {
                spd: bonus[0],
                sta: bonus[1],
                pwr: bonus[2],
                guts: bonus[3],
                wit: bonus[4],
            },
            preferred_distance,
            surface_aptitude: SurfaceMap { turf, dirt },
        };

        use AptitudeRank::{A, B, C, S};
        use DistanceClass::{Long, Mile};
        use RunningStyle::{Betweener, Chaser, Leader, Runner};

        let mut roster = Self::empty();
        let entries = [
            (
                "silence_suzuka",
                profile(Leader, [1.3, 1.0, 1.1, 0.9, 1.0], Mile, A, B),
            ),
            (
                "special_week",
                profile(Betweener, [1.1, 1.2, 1.1, 1.0, 0.9], Mile, A, B),
            ),
            (
                "tokai_teio",
                profile(Leader, [1.2, 1.0, 1.2, 1.0, 0.9], Mile, A, A),
            ),
            (
                "oguri_cap",
                profile(Runner, [1.2, 1.1, 1.0, 1.0, 1.0], Mile, A, A),
            ),
            (
                "gold_ship",
                profile(Chaser, [1.0, 1.2, 0.9, 1.2, 1.0], Long, A, C),
            ),
            (
                "mejiro_mcqueen",
                profile(Leader, [1.2, 1.0, 1.1, 1.0, 1.0], Mile, S, B),
            ),
            (
                "t.m._opera_o",
                profile(Chaser, [1.0, 1.3, 1.1, 1.0, 0.9], Long, A, A),
            ),
        ];
        for (id, p) in entries {
            roster.characters.insert(id.to_owned(), p);
        }
        roster
    }

    /// Looks up a character's profile by identifier.
    #[must_use]
    pub fn get(&self, character: &str) -> Option<&CharacterProfile> {
        self.characters.get(character)
    }

    /// Adds or replaces a profile after validating it.
    pub fn insert(
        &mut self,
        character: impl Into<String>,
        profile: CharacterProfile,
    ) -> Result<(), ProfileError> {
        let character = character.into();
        profile.validate(&character)?;
        self.characters.insert(character, profile);
        Ok(())
    }

    /// Merges another roster into this one, replacing matching identifiers.
    pub fn merge(&mut self, other: CharacterRoster) -> Result<(), ProfileError> {
        for (id, profile) in other.characters {
            self.insert(id, profile)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CharacterProfile)> {
        self.characters.iter().map(|(id, p)| (id.as_str(), p))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl Default for CharacterRoster {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stat;

    #[test]
    fn test_builtin_roster_contents() {
        let roster = CharacterRoster::builtin();
        assert_eq!(roster.len(), 7);

        let suzuka = roster.get("silence_suzuka").unwrap();
        assert_eq!(suzuka.running_style, RunningStyle::Leader);
        assert_eq!(suzuka.stat_bonus[Stat::Spd], 1.3);
        assert_eq!(suzuka.surface_aptitude.turf, AptitudeRank::A);

        let mcqueen = roster.get("mejiro_mcqueen").unwrap();
        assert_eq!(mcqueen.surface_aptitude.turf, AptitudeRank::S);
    }

    #[test]
    fn test_builtin_profiles_are_valid() {
        let roster = CharacterRoster::builtin();
        for (id, profile) in roster.iter() {
            profile.validate(id).unwrap();
        }
    }

    #[test]
    fn test_fallback_profile_is_neutral() {
        let fallback = CharacterProfile::fallback();
        assert_eq!(fallback.running_style, RunningStyle::Runner);
        for (_, &bonus) in fallback.stat_bonus.iter() {
            assert_eq!(bonus, 1.0);
        }
        assert_eq!(fallback.surface_aptitude.turf, AptitudeRank::B);
        assert_eq!(fallback.surface_aptitude.dirt, AptitudeRank::B);
    }

    #[test]
    fn test_validation_rejects_non_positive_bonus() {
        let mut profile = CharacterProfile::fallback();
        profile.stat_bonus.pwr = 0.0;
        let err = profile.validate("broken").unwrap_err();
        assert!(err.to_string().contains("broken"));

        profile.stat_bonus.pwr = f32::NAN;
        assert!(profile.validate("broken").is_err());
    }

    #[test]
    fn test_insert_validates() {
        let mut roster = CharacterRoster::empty();
        let mut profile = CharacterProfile::fallback();
        profile.stat_bonus.spd = -1.0;
        assert!(roster.insert("bad", profile).is_err());
        assert!(roster.is_empty());
    }

    #[test]
    fn test_style_tables_cover_all_stats() {
        for style in [
            RunningStyle::Leader,
            RunningStyle::Runner,
            RunningStyle::Betweener,
            RunningStyle::Chaser,
        ] {
            for (stat, &bonus) in style.stat_bonus().iter() {
                assert!(bonus > 0.0, "{style} bonus for {stat} must be positive");
            }
        }
    }

    #[test]
    fn test_profile_deserialize_defaults_aptitude_to_b() {
        let json = r#"{
            "running_style": "leader",
            "stat_bonus": {"spd": 1.2, "sta": 1.0, "pwr": 1.1, "guts": 1.0, "wit": 1.0},
            "preferred_distance": "mile"
        }"#;
        let profile: CharacterProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.surface_aptitude.turf, AptitudeRank::B);
        assert_eq!(profile.surface_aptitude.dirt, AptitudeRank::B);
    }
}
