use std::{io::Read, path::PathBuf};

use anyhow::Context;
use turfline_engine::{ChoiceScorer, parse_text};

use crate::command::ContextArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreEffectsArg {
    /// Effect text file; reads stdin when absent
    #[arg(long)]
    input: Option<PathBuf>,
    /// Print the itemized breakdown instead of just the total
    #[arg(long)]
    breakdown: bool,
    #[clap(flatten)]
    context: ContextArg,
}

pub(crate) fn run(arg: &ScoreEffectsArg) -> anyhow::Result<()> {
    let text = match &arg.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read effect text from stdin")?;
            text
        }
    };
    let record = parse_text(&text);

    let (roster, weights) = arg.context.knowledge_base()?;
    let scorer = ChoiceScorer::new(&roster, &weights);
    let breakdown = scorer.analyze(&record, &arg.context.score_context());
    if arg.breakdown {
        println!("{breakdown}");
    } else {
        println!("{:.2}", breakdown.total);
    }
    Ok(())
}
