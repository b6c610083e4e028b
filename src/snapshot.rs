use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::model::{FixtureStatus, LiveStat, Pick, PlayerId, RoleBook, lenient_u32};
use crate::rules::ScoringRules;
use crate::squad::{SquadScore, score_squad, score_squad_detailed};

/// Everything the engine needs about one gameweek, owned and immutable once
/// built. Shared read-only across parallel squad computations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameweekSnapshot {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub event: u32,
    /// Live stats keyed by player. Decoded from the upstream element array.
    #[serde(default, rename = "elements", deserialize_with = "live_by_element")]
    pub live: HashMap<PlayerId, LiveStat>,
    /// Fixture status keyed by player, via the match they play in.
    #[serde(default)]
    pub fixtures: HashMap<PlayerId, FixtureStatus>,
    #[serde(default)]
    pub roles: RoleBook,
}

impl GameweekSnapshot {
    pub fn score(&self, picks: &[Pick], rules: &ScoringRules) -> u32 {
        score_squad(picks, &self.live, &self.fixtures, &self.roles, rules)
    }

    pub fn score_detailed(&self, picks: &[Pick], rules: &ScoringRules) -> SquadScore {
        score_squad_detailed(picks, &self.live, &self.fixtures, &self.roles, rules)
    }
}

fn live_by_element<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<PlayerId, LiveStat>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut live = HashMap::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in rows {
        // Rows without a usable id cannot be attributed to anyone.
        match serde_json::from_value::<LiveStat>(row) {
            Ok(stat) if stat.element != 0 => {
                // Later rows win if the feed repeats a player.
                live.insert(stat.element, stat);
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "live stat rows without a player id dropped");
    }
    Ok(live)
}

pub fn parse_snapshot_json(raw: &str) -> Result<GameweekSnapshot> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow::anyhow!("empty gameweek snapshot"));
    }
    serde_json::from_str(trimmed).context("invalid gameweek snapshot json")
}

pub fn load_snapshot(path: &Path) -> Result<GameweekSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    parse_snapshot_json(&raw)
}
