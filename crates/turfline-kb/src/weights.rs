//! The effect-weight tables driving choice scoring.
//!
//! [`EffectWeights::default()`] is the complete built-in table. A tuned table
//! can be loaded from JSON; any field left out keeps its built-in value, and a
//! user-supplied stat table may leave individual entries unset, in which case
//! the scorer falls back to an unweighted contribution for that stat.

use serde::{Deserialize, Serialize};

use crate::types::{
    DistanceClass, DistanceMap, PhaseMap, Stat, StatMap, StatusKind, Surface, SurfaceMap,
};

/// A complementary stat pair that earns a multiplicative combo bonus when both
/// stats are trained by the same choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ComboPair {
    #[display("Speed+Power")]
    SpdPwr,
    #[display("Stamina+Guts")]
    StaGuts,
    #[display("Speed+Wisdom")]
    SpdWit,
    #[display("Stamina+Wisdom")]
    StaWit,
}

impl ComboPair {
    /// All combo pairs, in the order they are checked.
    pub const ALL: [ComboPair; 4] = [
        ComboPair::SpdPwr,
        ComboPair::StaGuts,
        ComboPair::SpdWit,
        ComboPair::StaWit,
    ];

    /// The two stats that trigger this combo.
    #[must_use]
    pub fn stats(self) -> (Stat, Stat) {
        match self {
            ComboPair::SpdPwr => (Stat::Spd, Stat::Pwr),
            ComboPair::StaGuts => (Stat::Sta, Stat::Guts),
            ComboPair::SpdWit => (Stat::Spd, Stat::Wit),
            ComboPair::StaWit => (Stat::Sta, Stat::Wit),
        }
    }
}

/// Combo bonus multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComboWeights {
    pub spd_pwr: f32,
    pub sta_guts: f32,
    pub spd_wit: f32,
    pub sta_wit: f32,
}

impl ComboWeights {
    #[must_use]
    pub fn get(&self, pair: ComboPair) -> f32 {
        match pair {
            ComboPair::SpdPwr => self.spd_pwr,
            ComboPair::StaGuts => self.sta_guts,
            ComboPair::SpdWit => self.spd_wit,
            ComboPair::StaWit => self.sta_wit,
        }
    }
}

impl Default for ComboWeights {
    fn default() -> Self {
        Self {
            spd_pwr: 1.2,
            sta_guts: 1.2,
            spd_wit: 1.1,
            sta_wit: 1.1,
        }
    }
}

/// Point values for known status effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusWeights {
    pub practice_perfect: f32,
    pub practice_poor: f32,
    pub heal_negative: f32,
    pub hot_topic: f32,
    pub overload: f32,
    pub tired: f32,
    pub good_mood: f32,
    pub good_feeling: f32,
}

impl StatusWeights {
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> f32 {
        match kind {
            StatusKind::PracticePerfect => self.practice_perfect,
            StatusKind::PracticePoor => self.practice_poor,
            StatusKind::HealNegative => self.heal_negative,
            StatusKind::HotTopic => self.hot_topic,
            StatusKind::Overload => self.overload,
            StatusKind::Tired => self.tired,
            StatusKind::GoodMood => self.good_mood,
            StatusKind::GoodFeeling => self.good_feeling,
        }
    }
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            practice_perfect: 15.0,
            practice_poor: -8.0,
            heal_negative: 12.0,
            hot_topic: 5.0,
            overload: -7.0,
            tired: -5.0,
            good_mood: 3.0,
            good_feeling: 4.0,
        }
    }
}

/// Stat weight entries by surface and race distance class.
///
/// Entries are optional so a partially specified user table is representable;
/// a missing entry makes the scorer fall back to the raw stat value.
pub type StatWeightTable = SurfaceMap<DistanceMap<StatMap<Option<f32>>>>;

/// The full effect-weight knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectWeights {
    /// Mood affects training success.
    pub mood: f32,
    /// Motivation affects training success.
    pub motivation: f32,
    /// Weight of the heal flag set by "Heal negative status" lines.
    pub heal_status: f32,
    /// Skill-point weight per training phase: stats first, skills late.
    pub skill_points: PhaseMap<f32>,
    /// Bond weight per training phase: bond matters most early.
    pub bond: PhaseMap<f32>,
    pub status: StatusWeights,
    pub stat_combo: ComboWeights,
    pub stats: StatWeightTable,
}

impl EffectWeights {
    /// Base weight for a stat under the given surface and race distance, if
    /// the table has an entry for it.
    #[must_use]
    pub fn stat_weight(
        &self,
        surface: Surface,
        distance: DistanceClass,
        stat: Stat,
    ) -> Option<f32> {
        self.stats[surface][distance][stat]
    }

    #[must_use]
    pub fn status_points(&self, kind: StatusKind) -> f32 {
        self.status.get(kind)
    }

    #[must_use]
    pub fn combo_multiplier(&self, pair: ComboPair) -> f32 {
        self.stat_combo.get(pair)
    }

    /// Mean of the stat weights present for the given surface and distance,
    /// used to price random-stat effects by expected value.
    #[must_use]
    pub fn mean_stat_weight(&self, surface: Surface, distance: DistanceClass) -> Option<f32> {
        let bucket = &self.stats[surface][distance];
        let mut sum = 0.0;
        let mut count = 0u32;
        for (_, entry) in bucket.iter() {
            if let Some(weight) = entry {
                sum += weight;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        #[expect(clippy::cast_precision_loss, reason = "count is at most 5")]
        let mean = sum / count as f32;
        Some(mean)
    }
}

impl Default for EffectWeights {
    fn default() -> Self {
        let bucket = |spd, sta, pwr, guts, wit| StatMap {
            spd: Some(spd),
            sta: Some(sta),
            pwr: Some(pwr),
            guts: Some(guts),
            wit: Some(wit),
        };
        Self {
            mood: 2.5,
            motivation: 2.5,
            heal_status: 7.0,
            skill_points: PhaseMap {
                early: 0.8,
                mid: 1.5,
                late: 2.0,
            },
            bond: PhaseMap {
                early: 1.0,
                mid: 0.7,
                late: 0.5,
            },
            status: StatusWeights::default(),
            stat_combo: ComboWeights::default(),
            stats: SurfaceMap {
                turf: DistanceMap {
                    sprint: bucket(4.0, 2.0, 3.5, 2.5, 3.0),
                    mile: bucket(3.5, 3.5, 3.0, 2.5, 3.5),
                    // Stamina dominates long turf races.
                    long: bucket(2.5, 4.5, 2.5, 3.0, 3.5),
                },
                dirt: DistanceMap {
                    // Power and guts matter more on dirt.
                    sprint: bucket(4.0, 2.0, 4.0, 3.0, 2.0),
                    mile: bucket(3.5, 3.0, 3.5, 3.5, 2.5),
                    long: bucket(2.5, 4.0, 3.0, 4.0, 2.5),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TrainingPhase;

    #[test]
    fn test_default_table_is_total() {
        let weights = EffectWeights::default();
        for surface in [Surface::Turf, Surface::Dirt] {
            for distance in [DistanceClass::Sprint, DistanceClass::Mile, DistanceClass::Long] {
                for stat in Stat::ALL {
                    assert!(
                        weights.stat_weight(surface, distance, stat).is_some(),
                        "missing built-in weight for {surface}/{distance}/{stat}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_default_constants() {
        let weights = EffectWeights::default();
        assert_eq!(
            weights.stat_weight(Surface::Turf, DistanceClass::Mile, Stat::Spd),
            Some(3.5)
        );
        assert_eq!(
            weights.stat_weight(Surface::Dirt, DistanceClass::Long, Stat::Guts),
            Some(4.0)
        );
        assert_eq!(weights.skill_points[TrainingPhase::Mid], 1.5);
        assert_eq!(weights.bond[TrainingPhase::Early], 1.0);
        assert_eq!(weights.status_points(StatusKind::PracticePoor), -8.0);
        assert_eq!(weights.combo_multiplier(ComboPair::SpdPwr), 1.2);
        assert_eq!(weights.heal_status, 7.0);
    }

    #[test]
    fn test_partial_override_keeps_builtin_fields() {
        let weights: EffectWeights = serde_json::from_str(r#"{"mood": 4.0}"#).unwrap();
        assert_eq!(weights.mood, 4.0);
        assert_eq!(weights.motivation, 2.5);
        assert_eq!(
            weights.stat_weight(Surface::Turf, DistanceClass::Mile, Stat::Wit),
            Some(3.5)
        );
    }

    #[test]
    fn test_partial_stat_table_leaves_gaps() {
        let json = r#"{"stats": {"turf": {"mile": {"spd": 9.0}}}}"#;
        let weights: EffectWeights = serde_json::from_str(json).unwrap();
        assert_eq!(
            weights.stat_weight(Surface::Turf, DistanceClass::Mile, Stat::Spd),
            Some(9.0)
        );
        // Entries the override left unset are gaps, not built-in values.
        assert_eq!(
            weights.stat_weight(Surface::Turf, DistanceClass::Mile, Stat::Sta),
            None
        );
    }

    #[test]
    fn test_mean_stat_weight() {
        let weights = EffectWeights::default();
        let mean = weights
            .mean_stat_weight(Surface::Turf, DistanceClass::Mile)
            .unwrap();
        assert!((mean - 3.2).abs() < 1e-6, "got {mean}");

        let empty: EffectWeights =
            serde_json::from_str(r#"{"stats": {"turf": {"mile": {}}}}"#).unwrap();
        assert_eq!(
            empty.mean_stat_weight(Surface::Turf, DistanceClass::Mile),
            None
        );
    }
}
