//! Multi-factor scoring of parsed effects.
//!
//! # How It Works
//!
//! A score is the sum of every effect's weighted contribution, then combo
//! bonuses on top:
//!
//! - Each trained stat contributes `value * stat_weight * growth * style *
//!   surface`, where the stat weight comes from the surface/distance table,
//!   growth from the character profile, style from the running-style table,
//!   and surface from the aptitude rank. A missing weight-table entry
//!   degrades to the raw value, logged, never fatal.
//! - Skill points and bond scale with the training phase; status tags map to
//!   fixed point values; mood, motivation, and the heal flag use scalar
//!   weights. Random-stat effects are priced at their expected value using
//!   the mean stat weight for the context.
//! - When two or more stats are trained, every matching combo pair
//!   multiplies the entire accumulated total, compounding across pairs.
//!
//! Energy and last-trained-stat deltas are carried in the record for
//! downstream policies but do not contribute points here.

use std::fmt;

use arrayvec::ArrayVec;
use tracing::{debug, warn};
use turfline_kb::{
    CharacterProfile, CharacterRoster, Choice, ComboPair, DistanceClass, EffectRecord,
    EffectWeights, Stat, Surface, TrainingPhase,
};

/// The turn context a choice is scored under.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    pub character: Option<&'a str>,
    pub phase: TrainingPhase,
    pub distance: DistanceClass,
    pub surface: Surface,
}

/// One trained stat's contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatContribution {
    pub stat: Stat,
    pub value: f32,
    /// `None` when the weight table had no entry and the raw value was used.
    pub weight: Option<f32>,
    pub growth: f32,
    pub style: f32,
    pub points: f32,
}

/// A non-stat effect's contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatContribution {
    pub label: &'static str,
    pub points: f32,
}

/// Itemized view of one scored record. The `total` equals what
/// [`ChoiceScorer::score`] returns for the same inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub surface_bonus: f32,
    pub stats: ArrayVec<StatContribution, 5>,
    pub flat: ArrayVec<FlatContribution, 7>,
    pub combos: ArrayVec<(ComboPair, f32), 4>,
    pub missing_weights: ArrayVec<Stat, 5>,
    pub total: f32,
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.stats {
            match s.weight {
                Some(weight) => writeln!(
                    f,
                    "  {}: {:+} -> {:.2} (weight {weight}, growth {}, style {}, surface {})",
                    s.stat, s.value, s.points, s.growth, s.style, self.surface_bonus
                )?,
                None => writeln!(
                    f,
                    "  {}: {:+} -> {:.2} (no weight entry, raw value)",
                    s.stat, s.value, s.points
                )?,
            }
        }
        for flat in &self.flat {
            writeln!(f, "  {}: {:.2}", flat.label, flat.points)?;
        }
        for (pair, multiplier) in &self.combos {
            writeln!(f, "  combo {pair}: x{multiplier}")?;
        }
        write!(f, "  total: {:.2}", self.total)
    }
}

/// Scores choices against a roster and a weight table.
///
/// Holds only shared references to immutable knowledge-base data, so one
/// scorer can serve any number of concurrent turns.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceScorer<'kb> {
    roster: &'kb CharacterRoster,
    weights: &'kb EffectWeights,
}

impl<'kb> ChoiceScorer<'kb> {
    #[must_use]
    pub fn new(roster: &'kb CharacterRoster, weights: &'kb EffectWeights) -> Self {
        Self { roster, weights }
    }

    /// Scores one effect record.
    #[must_use]
    pub fn score(&self, effects: &EffectRecord, ctx: &ScoreContext) -> f32 {
        self.analyze(effects, ctx).total
    }

    /// Scores one effect record with the itemized breakdown.
    #[must_use]
    pub fn analyze(&self, effects: &EffectRecord, ctx: &ScoreContext) -> ScoreBreakdown {
        let fallback;
        let profile: &CharacterProfile = match ctx.character {
            Some(id) => match self.roster.get(id) {
                Some(profile) => profile,
                None => {
                    warn!(character = id, "unknown character, using fallback profile");
                    fallback = CharacterProfile::fallback();
                    &fallback
                }
            },
            None => {
                fallback = CharacterProfile::fallback();
                &fallback
            }
        };
        let style_bonus = profile.running_style.stat_bonus();
        let surface_bonus = profile.surface_aptitude[ctx.surface].multiplier();

        let mut breakdown = ScoreBreakdown {
            surface_bonus,
            stats: ArrayVec::new(),
            flat: ArrayVec::new(),
            combos: ArrayVec::new(),
            missing_weights: ArrayVec::new(),
            total: 0.0,
        };

        for (stat, value) in effects.trained_stats() {
            let weight = self.weights.stat_weight(ctx.surface, ctx.distance, stat);
            let points = match weight {
                Some(weight) => {
                    value * weight * profile.stat_bonus[stat] * style_bonus[stat] * surface_bonus
                }
                None => {
                    warn!(%stat, surface = %ctx.surface, distance = %ctx.distance,
                        "no stat weight entry, adding raw value");
                    breakdown.missing_weights.push(stat);
                    value
                }
            };
            breakdown.stats.push(StatContribution {
                stat,
                value,
                weight,
                growth: profile.stat_bonus[stat],
                style: style_bonus[stat],
                points,
            });
            breakdown.total += points;
        }

        let mut flat = |label, points: f32| {
            breakdown.flat.push(FlatContribution { label, points });
            breakdown.total += points;
        };
        if let Some(value) = effects.skill_points {
            flat("skill_points", value * self.weights.skill_points[ctx.phase]);
        }
        if let Some(value) = effects.bond {
            flat("bond", value * self.weights.bond[ctx.phase]);
        }
        if let Some(tag) = &effects.status {
            match tag.known() {
                Some(kind) => flat("status", self.weights.status_points(kind)),
                None => debug!(status = %tag, "status tag has no point value"),
            }
        }
        if let Some(value) = effects.heal_status {
            flat("heal", value * self.weights.heal_status);
        }
        if let Some(value) = effects.mood {
            flat("mood", value * self.weights.mood);
        }
        if let Some(value) = effects.motivation {
            flat("motivation", value * self.weights.motivation);
        }
        if let Some(random) = effects.random_stats {
            let mean = self
                .weights
                .mean_stat_weight(ctx.surface, ctx.distance)
                .unwrap_or(1.0);
            #[expect(clippy::cast_precision_loss, reason = "count is a small stat count")]
            flat("random_stats", random.count as f32 * random.value * mean);
        }

        if effects.trained_stats().count() >= 2 {
            for pair in ComboPair::ALL {
                let (a, b) = pair.stats();
                if effects.stats[a].is_some() && effects.stats[b].is_some() {
                    let multiplier = self.weights.combo_multiplier(pair);
                    breakdown.total *= multiplier;
                    breakdown.combos.push((pair, multiplier));
                }
            }
        }

        breakdown
    }

    /// Scores one choice; probabilistic choices score at their expected
    /// value over the declared outcomes.
    #[must_use]
    pub fn score_choice(&self, choice: &Choice, ctx: &ScoreContext) -> f32 {
        match choice {
            Choice::Guaranteed { effects } => self.score(effects, ctx),
            Choice::Random { random_outcomes } => random_outcomes
                .iter()
                .map(|outcome| outcome.chance * self.score(&outcome.effects, ctx))
                .sum(),
        }
    }
}
