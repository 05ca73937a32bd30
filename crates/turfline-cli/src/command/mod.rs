use std::path::PathBuf;

use clap::{Parser, Subcommand};
use turfline_engine::ScoreContext;
use turfline_kb::{CharacterRoster, DistanceClass, EffectWeights, Surface, TrainingPhase};

use self::{
    best_training::BestTrainingArg, pick_event::PickEventArg, score_effects::ScoreEffectsArg,
};
use crate::data;

mod best_training;
mod pick_event;
mod score_effects;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Resolve an event title and pick the best choice
    PickEvent(#[clap(flatten)] PickEventArg),
    /// Score a block of recognized effect text
    ScoreEffects(#[clap(flatten)] ScoreEffectsArg),
    /// Pick the best option from a training menu
    BestTraining(#[clap(flatten)] BestTrainingArg),
}

/// Turn context and knowledge-base flags shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ContextArg {
    /// Active character identifier
    #[arg(long)]
    character: Option<String>,
    /// Training phase
    #[arg(long, default_value = "mid")]
    phase: TrainingPhase,
    /// Target race distance class
    #[arg(long, default_value = "mile")]
    distance: DistanceClass,
    /// Race surface
    #[arg(long, default_value = "turf")]
    surface: Surface,
    /// Character roster JSON, merged over the built-in roster
    #[arg(long)]
    roster: Option<PathBuf>,
    /// Tuned weight model JSON
    #[arg(long)]
    weights: Option<PathBuf>,
}

impl ContextArg {
    pub(crate) fn knowledge_base(&self) -> anyhow::Result<(CharacterRoster, EffectWeights)> {
        let roster = data::load_roster(self.roster.as_deref())?;
        let weights = data::load_weights(self.weights.as_deref())?;
        Ok((roster, weights))
    }

    pub(crate) fn score_context(&self) -> ScoreContext<'_> {
        ScoreContext {
            character: self.character.as_deref(),
            phase: self.phase,
            distance: self.distance,
            surface: self.surface,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::PickEvent(arg) => pick_event::run(&arg)?,
        Mode::ScoreEffects(arg) => score_effects::run(&arg)?,
        Mode::BestTraining(arg) => best_training::run(&arg)?,
    }
    Ok(())
}
