use std::path::PathBuf;

use tracing::info;
use turfline_engine::{ChoiceScorer, EventMatch, decide_event, resolve};
use turfline_kb::Choice;

use crate::command::ContextArg;
use crate::data;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PickEventArg {
    /// Recognized event title
    title: String,
    /// Character-tier event JSON
    #[arg(long)]
    character_events: Option<PathBuf>,
    /// Common-tier event JSON
    #[arg(long)]
    common_events: Option<PathBuf>,
    /// Support-card-tier event JSON
    #[arg(long)]
    support_events: Option<PathBuf>,
    /// Print the winning choice's score breakdown to stderr
    #[arg(long)]
    breakdown: bool,
    #[clap(flatten)]
    context: ContextArg,
}

pub(crate) fn run(arg: &PickEventArg) -> anyhow::Result<()> {
    let db = data::load_event_database(
        arg.character_events.as_deref(),
        arg.common_events.as_deref(),
        arg.support_events.as_deref(),
    )?;
    let (roster, weights) = arg.context.knowledge_base()?;
    let scorer = ChoiceScorer::new(&roster, &weights);
    let ctx = arg.context.score_context();

    let m = resolve(&db, &arg.title, ctx.character);
    if let EventMatch::Known { event, tier, kind } = &m {
        info!(event = %event.name, %tier, %kind, "resolved event");
    }
    let selection = decide_event(&scorer, &m, &ctx);
    info!(score = selection.score, event = m.name(), "selected choice");
    if arg.breakdown {
        if let EventMatch::Known { event, .. } = &m {
            if let Some(Choice::Guaranteed { effects }) = event.choices.get(selection.index - 1) {
                eprintln!("{}", scorer.analyze(effects, &ctx));
            }
        }
    }
    println!("{}", selection.index);
    Ok(())
}
