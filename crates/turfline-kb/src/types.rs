//! Closed key enumerations and the small total maps built over them.
//!
//! Each table axis is a closed enum and each table is a struct with one
//! field per key, so a table is total by construction and an invalid key is
//! unrepresentable rather than a lookup-time surprise. Serde keeps the
//! canonical snake_case wire names.

use serde::{Deserialize, Serialize};

/// One of the five trainable stats.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    #[display("spd")]
    Spd,
    #[display("sta")]
    Sta,
    #[display("pwr")]
    Pwr,
    #[display("guts")]
    Guts,
    #[display("wit")]
    Wit,
}

impl Stat {
    /// All stats in canonical order. Iteration over effect records follows
    /// this order so scoring is deterministic.
    pub const ALL: [Stat; 5] = [Stat::Spd, Stat::Sta, Stat::Pwr, Stat::Guts, Stat::Wit];
}

/// Race surface.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    #[display("turf")]
    Turf,
    #[display("dirt")]
    Dirt,
}

/// Race distance class used to select the stat weight table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum DistanceClass {
    /// 1000-1400m.
    #[display("sprint")]
    Sprint,
    /// 1600-2000m.
    #[display("mile")]
    Mile,
    /// 2200m and above.
    #[display("long")]
    Long,
}

/// Career phase, affects skill-point and bond weighting.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum TrainingPhase {
    #[display("early")]
    Early,
    #[display("mid")]
    Mid,
    #[display("late")]
    Late,
}

/// Preferred running style of a character.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "lowercase")]
pub enum RunningStyle {
    #[display("leader")]
    Leader,
    #[display("runner")]
    Runner,
    #[display("betweener")]
    Betweener,
    #[display("chaser")]
    Chaser,
}

/// Surface aptitude rank, S (best) through D (worst).
///
/// Defaults to `B` so a profile that omits a surface degrades to the neutral
/// multiplier instead of failing.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum AptitudeRank {
    S,
    A,
    #[default]
    B,
    C,
    D,
}

impl AptitudeRank {
    /// Training multiplier for this rank, strictly decreasing S > A > B > C > D.
    #[must_use]
    pub fn multiplier(self) -> f32 {
        match self {
            AptitudeRank::S => 1.3,
            AptitudeRank::A => 1.2,
            AptitudeRank::B => 1.0,
            AptitudeRank::C => 0.8,
            AptitudeRank::D => 0.6,
        }
    }
}

/// Status effects with a known point value in the weight table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    #[display("practice_perfect")]
    PracticePerfect,
    #[display("practice_poor")]
    PracticePoor,
    #[display("heal_negative")]
    HealNegative,
    #[display("hot_topic")]
    HotTopic,
    #[display("overload")]
    Overload,
    #[display("tired")]
    Tired,
    #[display("good_mood")]
    GoodMood,
    #[display("good_feeling")]
    GoodFeeling,
}

/// A status name outside the known weight table.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown status name {name:?}")]
pub struct UnknownStatus {
    #[error(not(source))]
    pub name: String,
}

impl std::str::FromStr for StatusKind {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "practice_perfect" => StatusKind::PracticePerfect,
            "practice_poor" => StatusKind::PracticePoor,
            "heal_negative" => StatusKind::HealNegative,
            "hot_topic" => StatusKind::HotTopic,
            "overload" => StatusKind::Overload,
            "tired" => StatusKind::Tired,
            "good_mood" => StatusKind::GoodMood,
            "good_feeling" => StatusKind::GoodFeeling,
            _ => {
                return Err(UnknownStatus {
                    name: s.to_owned(),
                });
            }
        })
    }
}

/// A status tag attached to an effect record.
///
/// Recognized UI text can carry arbitrary status names; only the known kinds
/// contribute to the score, the rest are kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(untagged)]
pub enum StatusTag {
    Known(StatusKind),
    Other(String),
}

impl StatusTag {
    /// Classifies a raw status name, falling back to [`StatusTag::Other`] for
    /// names outside the weight table.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw.parse::<StatusKind>() {
            Ok(kind) => StatusTag::Known(kind),
            Err(_) => StatusTag::Other(raw.to_owned()),
        }
    }

    /// Returns the known status kind, if any.
    #[must_use]
    pub fn known(&self) -> Option<StatusKind> {
        match self {
            StatusTag::Known(kind) => Some(*kind),
            StatusTag::Other(_) => None,
        }
    }
}

impl From<StatusKind> for StatusTag {
    fn from(kind: StatusKind) -> Self {
        StatusTag::Known(kind)
    }
}

/// A total map keyed by [`Stat`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de> + Default"))]
pub struct StatMap<T> {
    #[serde(default)]
    pub spd: T,
    #[serde(default)]
    pub sta: T,
    #[serde(default)]
    pub pwr: T,
    #[serde(default)]
    pub guts: T,
    #[serde(default)]
    pub wit: T,
}

impl<T> StatMap<T> {
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Stat) -> T,
    {
        Self {
            spd: f(Stat::Spd),
            sta: f(Stat::Sta),
            pwr: f(Stat::Pwr),
            guts: f(Stat::Guts),
            wit: f(Stat::Wit),
        }
    }

    #[must_use]
    pub fn get(&self, stat: Stat) -> &T {
        match stat {
            Stat::Spd => &self.spd,
            Stat::Sta => &self.sta,
            Stat::Pwr => &self.pwr,
            Stat::Guts => &self.guts,
            Stat::Wit => &self.wit,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut T {
        match stat {
            Stat::Spd => &mut self.spd,
            Stat::Sta => &mut self.sta,
            Stat::Pwr => &mut self.pwr,
            Stat::Guts => &mut self.guts,
            Stat::Wit => &mut self.wit,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, &T)> {
        Stat::ALL.iter().map(move |&stat| (stat, self.get(stat)))
    }
}

impl StatMap<f32> {
    /// A map with every stat set to the same multiplier.
    #[must_use]
    pub fn uniform(value: f32) -> Self {
        Self::from_fn(|_| value)
    }
}

impl<T> std::ops::Index<Stat> for StatMap<T> {
    type Output = T;

    fn index(&self, stat: Stat) -> &T {
        self.get(stat)
    }
}

impl<T> std::ops::IndexMut<Stat> for StatMap<T> {
    fn index_mut(&mut self, stat: Stat) -> &mut T {
        self.get_mut(stat)
    }
}

/// A total map keyed by [`Surface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de> + Default"))]
pub struct SurfaceMap<T> {
    #[serde(default)]
    pub turf: T,
    #[serde(default)]
    pub dirt: T,
}

impl<T> SurfaceMap<T> {
    #[must_use]
    pub fn get(&self, surface: Surface) -> &T {
        match surface {
            Surface::Turf => &self.turf,
            Surface::Dirt => &self.dirt,
        }
    }
}

impl<T> std::ops::Index<Surface> for SurfaceMap<T> {
    type Output = T;

    fn index(&self, surface: Surface) -> &T {
        self.get(surface)
    }
}

/// A total map keyed by [`DistanceClass`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de> + Default"))]
pub struct DistanceMap<T> {
    #[serde(default)]
    pub sprint: T,
    #[serde(default)]
    pub mile: T,
    #[serde(default)]
    pub long: T,
}

impl<T> DistanceMap<T> {
    #[must_use]
    pub fn get(&self, distance: DistanceClass) -> &T {
        match distance {
            DistanceClass::Sprint => &self.sprint,
            DistanceClass::Mile => &self.mile,
            DistanceClass::Long => &self.long,
        }
    }
}

impl<T> std::ops::Index<DistanceClass> for DistanceMap<T> {
    type Output = T;

    fn index(&self, distance: DistanceClass) -> &T {
        self.get(distance)
    }
}

/// A total map keyed by [`TrainingPhase`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de> + Default"))]
pub struct PhaseMap<T> {
    #[serde(default)]
    pub early: T,
    #[serde(default)]
    pub mid: T,
    #[serde(default)]
    pub late: T,
}

impl<T> PhaseMap<T> {
    #[must_use]
    pub fn get(&self, phase: TrainingPhase) -> &T {
        match phase {
            TrainingPhase::Early => &self.early,
            TrainingPhase::Mid => &self.mid,
            TrainingPhase::Late => &self.late,
        }
    }
}

impl<T> std::ops::Index<TrainingPhase> for PhaseMap<T> {
    type Output = T;

    fn index(&self, phase: TrainingPhase) -> &T {
        self.get(phase)
    }
}
