use std::env;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPTAIN_MULTIPLIER: u32 = 2;
// Triple captain is the largest multiplier any rule variant uses.
const MAX_CAPTAIN_MULTIPLIER: u32 = 3;

/// Tunable scoring behavior for one gameweek calculation.
///
/// Every field is independently overridable; fields missing from a JSON
/// document fall back to [`ScoringRules::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringRules {
    /// Replace non-playing starters with playing bench players.
    pub autosubs: bool,
    /// Apply bonus-point adjustments at all.
    pub bonus: bool,
    /// Only trust bonus once 60 minutes have elapsed in a live match.
    pub bonus_reliable_at_60: bool,
    pub captain_multiplier: u32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            autosubs: true,
            bonus: true,
            bonus_reliable_at_60: true,
            captain_multiplier: DEFAULT_CAPTAIN_MULTIPLIER,
        }
    }
}

impl ScoringRules {
    /// Defaults overlaid with `GW_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(self) -> Self {
        Self {
            autosubs: env_flag("GW_AUTOSUBS").unwrap_or(self.autosubs),
            bonus: env_flag("GW_BONUS").unwrap_or(self.bonus),
            bonus_reliable_at_60: env_flag("GW_BONUS_RELIABLE_AT_60")
                .unwrap_or(self.bonus_reliable_at_60),
            captain_multiplier: env::var("GW_CAPTAIN_MULTIPLIER")
                .ok()
                .and_then(|val| parse_multiplier(&val))
                .unwrap_or(self.captain_multiplier),
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = env::var(key).ok()?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(parse_flag(&raw))
}

fn parse_flag(raw: &str) -> bool {
    !matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

fn parse_multiplier(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .map(|m| m.clamp(1, MAX_CAPTAIN_MULTIPLIER))
}
