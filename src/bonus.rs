use crate::model::{FixtureStatus, MatchState};
use crate::rules::ScoringRules;

/// Minute from which a live match's bonus ranking is treated as settled.
pub const BONUS_RELIABLE_MINUTE: u32 = 60;

/// Bonus that may be credited as final, given how far the fixture has progressed.
///
/// The bps ranking keeps moving while a match is live, so bonus announced
/// before the reliability minute is withheld unless the rules opt out of gating.
pub fn resolve_bonus(raw_bonus: i32, fixture: &FixtureStatus, rules: &ScoringRules) -> u32 {
    if !rules.bonus {
        return 0;
    }
    let bonus = raw_bonus.max(0) as u32;
    match fixture.state {
        MatchState::Finished => bonus,
        MatchState::Live
            if !rules.bonus_reliable_at_60 || fixture.elapsed >= BONUS_RELIABLE_MINUTE =>
        {
            bonus
        }
        MatchState::Live | MatchState::NotStarted => 0,
    }
}
