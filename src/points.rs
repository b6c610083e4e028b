use crate::bonus::{BONUS_RELIABLE_MINUTE, resolve_bonus};
use crate::model::{FixtureStatus, LiveStat, Pick};
use crate::rules::ScoringRules;

/// Whether the upstream total still carries bonus that has not been finalized.
pub fn strips_provisional_bonus(stat: &LiveStat, rules: &ScoringRules) -> bool {
    rules.bonus && rules.bonus_reliable_at_60 && stat.minutes < BONUS_RELIABLE_MINUTE
}

/// Base fantasy points for one player, net of unreliable bonus. Never negative.
pub fn base_points(stat: &LiveStat, rules: &ScoringRules) -> u32 {
    let mut points = i64::from(stat.total_points);
    if strips_provisional_bonus(stat, rules) {
        points -= i64::from(stat.bonus);
    }
    points.clamp(0, i64::from(u32::MAX)) as u32
}

/// Base points and the bonus to credit on top of them.
///
/// Resolved bonus is only added back when `base_points` removed it; otherwise
/// the upstream total already carries it once.
pub fn finalized_points(
    stat: &LiveStat,
    fixture: &FixtureStatus,
    rules: &ScoringRules,
) -> (u32, u32) {
    let base = base_points(stat, rules);
    let bonus = if strips_provisional_bonus(stat, rules) {
        resolve_bonus(stat.bonus, fixture, rules)
    } else {
        0
    };
    (base, bonus)
}

pub fn apply_captaincy(pick: &Pick, points: u32, rules: &ScoringRules) -> u32 {
    if pick.is_captain {
        points.saturating_mul(rules.captain_multiplier)
    } else {
        points
    }
}
