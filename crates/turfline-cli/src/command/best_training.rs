use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use tracing::info;
use turfline_engine::{ChoiceScorer, TrainingDecision, TrainingOption, decide_training};

use crate::command::ContextArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BestTrainingArg {
    /// Training menu JSON: an ordered array of {"name", "effects"} entries
    options: PathBuf,
    /// Viability floor; rest when no option strictly beats it
    #[arg(long, default_value_t = 0.0)]
    min_score: f32,
    #[clap(flatten)]
    context: ContextArg,
}

pub(crate) fn run(arg: &BestTrainingArg) -> anyhow::Result<()> {
    let file = File::open(&arg.options)
        .with_context(|| format!("failed to open {}", arg.options.display()))?;
    let options: Vec<TrainingOption> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", arg.options.display()))?;

    let (roster, weights) = arg.context.knowledge_base()?;
    let scorer = ChoiceScorer::new(&roster, &weights);
    let ctx = arg.context.score_context();

    match decide_training(&scorer, &options, &ctx, arg.min_score) {
        TrainingDecision::Train { option, score } => {
            info!(option = %option.name, score, "selected training");
            println!("{}", option.name);
        }
        TrainingDecision::Rest => {
            info!("no viable training option");
            println!("rest");
        }
    }
    Ok(())
}
