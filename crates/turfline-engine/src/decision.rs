//! Choice selection and the uniform unknown-event policy.
//!
//! Selection is deterministic: the first choice with the strictly greatest
//! score wins, so equal scores keep the earliest option. An unresolved event
//! always falls back to choice 1 with a warning — an unattended session must
//! keep moving, and the first choice is the least surprising default.

use tracing::{debug, warn};
use turfline_kb::{Choice, EffectRecord};

use crate::event_resolver::EventMatch;
use crate::scorer::{ChoiceScorer, ScoreContext};

/// A 1-based choice selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub score: f32,
}

/// Scores every choice and returns the first strictly-best one.
/// `None` only when `choices` is empty.
#[must_use]
pub fn select_best(
    scorer: &ChoiceScorer,
    choices: &[Choice],
    ctx: &ScoreContext,
) -> Option<Selection> {
    let mut best: Option<Selection> = None;
    let mut best_score = f32::NEG_INFINITY;
    for (position, choice) in choices.iter().enumerate() {
        let score = scorer.score_choice(choice, ctx);
        debug!(choice = position + 1, score, "scored choice");
        if score > best_score {
            best_score = score;
            best = Some(Selection {
                index: position + 1,
                score,
            });
        }
    }
    best
}

/// Decides an event: the best-scoring choice of a resolved event, or choice 1
/// when the event is unknown or carries no choices.
#[must_use]
pub fn decide_event(scorer: &ChoiceScorer, m: &EventMatch, ctx: &ScoreContext) -> Selection {
    match m {
        EventMatch::Known { event, .. } => match select_best(scorer, &event.choices, ctx) {
            Some(selection) => selection,
            None => {
                warn!(event = %event.name, "event has no choices, defaulting to choice 1");
                Selection {
                    index: 1,
                    score: 0.0,
                }
            }
        },
        EventMatch::Unknown { text } => {
            warn!(event = %text, "unknown event, defaulting to choice 1");
            Selection {
                index: 1,
                score: 0.0,
            }
        }
    }
}

/// One selectable training menu entry with its parsed effects.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrainingOption {
    pub name: String,
    pub effects: EffectRecord,
}

/// Outcome of a training turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainingDecision<'a> {
    Train { option: &'a TrainingOption, score: f32 },
    /// No option scored above the viability floor.
    Rest,
}

/// Picks the best training option, or [`TrainingDecision::Rest`] when no
/// option strictly beats `min_score`. Ties keep the earliest option.
#[must_use]
pub fn decide_training<'a>(
    scorer: &ChoiceScorer,
    options: &'a [TrainingOption],
    ctx: &ScoreContext,
    min_score: f32,
) -> TrainingDecision<'a> {
    let mut best: Option<(&TrainingOption, f32)> = None;
    for option in options {
        let score = scorer.score(&option.effects, ctx);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((option, score));
        }
    }
    match best {
        Some((option, score)) if score > min_score => TrainingDecision::Train { option, score },
        _ => TrainingDecision::Rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turfline_kb::{
        CharacterRoster, DistanceClass, EffectWeights, EventRecord, Surface, TrainingPhase,
    };

    use crate::event_resolver::{MatchKind, MatchTier};

    fn ctx() -> ScoreContext<'static> {
        ScoreContext {
            character: None,
            phase: TrainingPhase::Mid,
            distance: DistanceClass::Mile,
            surface: Surface::Turf,
        }
    }

    fn choices(json: &str) -> Vec<Choice> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_select_best_picks_highest_score() {
        let roster = CharacterRoster::builtin();
        let weights = EffectWeights::default();
        let scorer = ChoiceScorer::new(&roster, &weights);
        let choices = choices(
            r#"[
                {"effects": {"skill_points": 1}},
                {"effects": {"spd": 10}},
                {"effects": {"status": "practice_poor"}}
            ]"#,
        );
        let selection = select_best(&scorer, &choices, &ctx()).unwrap();
        assert_eq!(selection.index, 2);
    }

    #[test]
    fn test_ties_keep_the_earliest_choice() {
        let roster = CharacterRoster::builtin();
        let weights = EffectWeights::default();
        let scorer = ChoiceScorer::new(&roster, &weights);
        let choices = choices(
            r#"[
                {"effects": {"skill_points": 10}},
                {"effects": {"skill_points": 10}}
            ]"#,
        );
        let selection = select_best(&scorer, &choices, &ctx()).unwrap();
        assert_eq!(selection.index, 1);
    }

    #[test]
    fn test_all_negative_scores_still_select() {
        let roster = CharacterRoster::builtin();
        let weights = EffectWeights::default();
        let scorer = ChoiceScorer::new(&roster, &weights);
        let choices = choices(
            r#"[
                {"effects": {"status": "practice_poor"}},
                {"effects": {"status": "tired"}}
            ]"#,
        );
        let selection = select_best(&scorer, &choices, &ctx()).unwrap();
        assert_eq!(selection.index, 2, "tired (-5) beats practice_poor (-8)");
    }

    #[test]
    fn test_unknown_event_defaults_to_choice_one() {
        let roster = CharacterRoster::builtin();
        let weights = EffectWeights::default();
        let scorer = ChoiceScorer::new(&roster, &weights);
        let m = EventMatch::Unknown {
            text: "Never Seen Before".to_owned(),
        };
        let selection = decide_event(&scorer, &m, &ctx());
        assert_eq!(selection.index, 1);
    }

    #[test]
    fn test_known_event_without_choices_defaults_to_choice_one() {
        let roster = CharacterRoster::builtin();
        let weights = EffectWeights::default();
        let scorer = ChoiceScorer::new(&roster, &weights);
        let event = EventRecord {
            name: "Empty".to_owned(),
            choices: Vec::new(),
        };
        let m = EventMatch::Known {
            event: &event,
            tier: MatchTier::Common,
            kind: MatchKind::Exact,
        };
        assert_eq!(decide_event(&scorer, &m, &ctx()).index, 1);
    }

    #[test]
    fn test_training_rests_when_nothing_is_viable() {
        let roster = CharacterRoster::builtin();
        let weights = EffectWeights::default();
        let scorer = ChoiceScorer::new(&roster, &weights);
        let options = vec![TrainingOption {
            name: "wit".to_owned(),
            effects: serde_json::from_str(r#"{"status": "tired"}"#).unwrap(),
        }];
        let decision = decide_training(&scorer, &options, &ctx(), 0.0);
        assert_eq!(decision, TrainingDecision::Rest);

        let decision = decide_training(&scorer, &[], &ctx(), 0.0);
        assert_eq!(decision, TrainingDecision::Rest);
    }

    #[test]
    fn test_training_picks_best_option() {
        let roster = CharacterRoster::builtin();
        let weights = EffectWeights::default();
        let scorer = ChoiceScorer::new(&roster, &weights);
        let options = vec![
            TrainingOption {
                name: "spd".to_owned(),
                effects: serde_json::from_str(r#"{"spd": 10}"#).unwrap(),
            },
            TrainingOption {
                name: "sta".to_owned(),
                effects: serde_json::from_str(r#"{"sta": 9}"#).unwrap(),
            },
        ];
        let decision = decide_training(&scorer, &options, &ctx(), 0.0);
        let TrainingDecision::Train { option, .. } = decision else {
            panic!("expected a training pick");
        };
        assert_eq!(option.name, "spd");
    }
}
