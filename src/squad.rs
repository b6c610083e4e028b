use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::trace;

use crate::autosub::{Substitution, run_autosubs};
use crate::model::{FixtureStatus, LiveStat, Pick, PlayerId, RoleBook};
use crate::points::{apply_captaincy, finalized_points};
use crate::rules::ScoringRules;
use crate::snapshot::GameweekSnapshot;

/// Contribution of one realized starter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerScore {
    pub element: PlayerId,
    pub position: u8,
    pub base: u32,
    pub bonus: u32,
    pub is_captain: bool,
    /// Finalized points after captaincy.
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SquadScore {
    pub total: u32,
    pub players: Vec<PlayerScore>,
    pub substitutions: Vec<Substitution>,
}

/// Gameweek total for one squad.
pub fn score_squad(
    picks: &[Pick],
    live: &HashMap<PlayerId, LiveStat>,
    fixtures: &HashMap<PlayerId, FixtureStatus>,
    roles: &RoleBook,
    rules: &ScoringRules,
) -> u32 {
    score_squad_detailed(picks, live, fixtures, roles, rules).total
}

/// Same total as [`score_squad`], with a per-starter breakdown and the
/// substitutions that produced the realized eleven.
pub fn score_squad_detailed(
    picks: &[Pick],
    live: &HashMap<PlayerId, LiveStat>,
    fixtures: &HashMap<PlayerId, FixtureStatus>,
    roles: &RoleBook,
    rules: &ScoringRules,
) -> SquadScore {
    let outcome = run_autosubs(picks, live, roles, rules);
    let mut players = Vec::new();
    let mut total = 0u32;

    for pick in outcome.lineup.iter().filter(|p| p.is_starter()) {
        let Some(stat) = live.get(&pick.element) else {
            continue;
        };
        // Players whose match is unknown are scored as if it has not kicked off.
        let fixture = fixtures.get(&pick.element).copied().unwrap_or_default();
        let (base, bonus) = finalized_points(stat, &fixture, rules);
        let points = apply_captaincy(pick, base.saturating_add(bonus), rules);
        trace!(
            element = pick.element,
            position = pick.position,
            base,
            bonus,
            points,
            "player scored"
        );
        total = total.saturating_add(points);
        players.push(PlayerScore {
            element: pick.element,
            position: pick.position,
            base,
            bonus,
            is_captain: pick.is_captain,
            points,
        });
    }

    SquadScore {
        total,
        players,
        substitutions: outcome.substitutions,
    }
}

/// Scores many squads against one gameweek in parallel. Output order matches
/// `squads`.
pub fn score_squads(
    squads: &[Vec<Pick>],
    snapshot: &GameweekSnapshot,
    rules: &ScoringRules,
) -> Vec<u32> {
    squads
        .par_iter()
        .map(|picks| snapshot.score(picks, rules))
        .collect()
}

/// Parallel variant of [`score_squad_detailed`].
pub fn score_squads_detailed(
    squads: &[Vec<Pick>],
    snapshot: &GameweekSnapshot,
    rules: &ScoringRules,
) -> Vec<SquadScore> {
    squads
        .par_iter()
        .map(|picks| snapshot.score_detailed(picks, rules))
        .collect()
}
