use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use turfline_kb::{CharacterRoster, EffectWeights, EventDatabase};

/// A tuned weight table with its provenance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeightModel {
    pub name: String,
    pub tuned_at: DateTime<Utc>,
    pub weights: EffectWeights,
}

fn read_json<T>(path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Loads a weight model, or the built-in table when no path is given.
pub fn load_weights(path: Option<&Path>) -> anyhow::Result<EffectWeights> {
    match path {
        Some(path) => {
            let model: WeightModel = read_json(path)?;
            info!(model = %model.name, tuned_at = %model.tuned_at, "loaded weight model");
            Ok(model.weights)
        }
        None => Ok(EffectWeights::default()),
    }
}

/// Loads the built-in roster, with an optional user roster merged over it.
pub fn load_roster(path: Option<&Path>) -> anyhow::Result<CharacterRoster> {
    let mut roster = CharacterRoster::builtin();
    if let Some(path) = path {
        let user = turfline_kb::load_roster(path)
            .with_context(|| format!("failed to load roster {}", path.display()))?;
        roster.merge(user)?;
    }
    Ok(roster)
}

/// Assembles the event database from the tier files that were given. Tiers
/// without a file stay empty; resolution then simply never matches there.
pub fn load_event_database(
    character: Option<&Path>,
    common: Option<&Path>,
    support: Option<&Path>,
) -> anyhow::Result<EventDatabase> {
    let mut db = EventDatabase::default();
    if let Some(path) = character {
        db.character = turfline_kb::load_character_events(path)
            .with_context(|| format!("failed to load character events {}", path.display()))?;
    }
    if let Some(path) = common {
        db.common = turfline_kb::load_common_events(path)
            .with_context(|| format!("failed to load common events {}", path.display()))?;
    }
    if let Some(path) = support {
        db.support = turfline_kb::load_support_events(path)
            .with_context(|| format!("failed to load support events {}", path.display()))?;
    }
    Ok(db)
}
