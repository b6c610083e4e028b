use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::formation::{FormationBounds, FormationTracker, RoleCounts};
use crate::model::{LiveStat, Pick, PlayerId, RoleBook};
use crate::rules::ScoringRules;

/// One automatic substitution: the bench player took over `position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    pub position: u8,
    pub bench_position: u8,
    pub element_out: PlayerId,
    pub element_in: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSubOutcome {
    /// Realized squad, sorted by position. Every input position is still
    /// occupied by exactly one player.
    pub lineup: Vec<Pick>,
    pub substitutions: Vec<Substitution>,
}

/// Realized squad after replacing non-playing starters from the bench.
pub fn apply_autosubs(
    picks: &[Pick],
    live: &HashMap<PlayerId, LiveStat>,
    roles: &RoleBook,
    rules: &ScoringRules,
) -> Vec<Pick> {
    run_autosubs(picks, live, roles, rules).lineup
}

pub fn run_autosubs(
    picks: &[Pick],
    live: &HashMap<PlayerId, LiveStat>,
    roles: &RoleBook,
    rules: &ScoringRules,
) -> AutoSubOutcome {
    if !rules.autosubs {
        return AutoSubOutcome {
            lineup: picks.to_vec(),
            substitutions: Vec::new(),
        };
    }

    let mut starters: Vec<&Pick> = picks.iter().filter(|p| p.is_starter()).collect();
    starters.sort_by_key(|p| p.position);
    let mut bench: Vec<&Pick> = picks.iter().filter(|p| p.is_bench()).collect();
    bench.sort_by_key(|p| p.position);
    // Picks without a usable slot ride along untouched.
    let unplaced = picks.iter().filter(|p| !p.is_starter() && !p.is_bench());

    let mut tracker = FormationTracker::new(
        RoleCounts::from_roles(starters.iter().map(|p| roles.role_of(p.element))),
        FormationBounds::from_role_book(roles),
    );
    let mut consumed = vec![false; bench.len()];
    let mut lineup: Vec<Pick> = Vec::with_capacity(picks.len());
    let mut substitutions = Vec::new();

    for starter in starters {
        if minutes_played(live, starter.element) > 0 {
            lineup.push(starter.clone());
            continue;
        }

        let out_role = roles.role_of(starter.element);
        let mut replacement = None;
        for (idx, candidate) in bench.iter().enumerate() {
            if consumed[idx] || minutes_played(live, candidate.element) == 0 {
                continue;
            }
            let in_role = roles.role_of(candidate.element);
            if tracker.try_substitute(out_role, in_role) {
                replacement = Some(idx);
                break;
            }
            debug!(
                position = starter.position,
                element_out = starter.element,
                element_in = candidate.element,
                ?out_role,
                ?in_role,
                "substitution rejected by formation"
            );
        }

        let Some(idx) = replacement else {
            debug!(
                position = starter.position,
                element = starter.element,
                "no eligible bench player, starter kept"
            );
            lineup.push(starter.clone());
            continue;
        };

        consumed[idx] = true;
        let sub = bench[idx];
        debug!(
            position = starter.position,
            element_out = starter.element,
            element_in = sub.element,
            "autosub"
        );
        // Captaincy travels with the vacated slot; the starter drops into
        // the bench slot the substitute left.
        lineup.push(Pick {
            element: sub.element,
            position: starter.position,
            is_captain: starter.is_captain,
            is_vice_captain: starter.is_vice_captain,
            multiplier: starter.multiplier,
        });
        lineup.push(Pick {
            element: starter.element,
            position: sub.position,
            is_captain: sub.is_captain,
            is_vice_captain: sub.is_vice_captain,
            multiplier: sub.multiplier,
        });
        substitutions.push(Substitution {
            position: starter.position,
            bench_position: sub.position,
            element_out: starter.element,
            element_in: sub.element,
        });
    }

    for (idx, pick) in bench.iter().enumerate() {
        if !consumed[idx] {
            lineup.push((*pick).clone());
        }
    }
    lineup.extend(unplaced.cloned());

    lineup.sort_by_key(|p| p.position);
    AutoSubOutcome {
        lineup,
        substitutions,
    }
}

fn minutes_played(live: &HashMap<PlayerId, LiveStat>, element: PlayerId) -> u32 {
    live.get(&element).map(|s| s.minutes).unwrap_or(0)
}
