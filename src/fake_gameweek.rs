use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::{FixtureStatus, LiveStat, MatchState, Pick, PlayerId, Role, RoleBook};
use crate::snapshot::GameweekSnapshot;

const TEAMS: u32 = 20;
const PLAYERS_PER_TEAM: u32 = 16;

// (defenders, midfielders, forwards) behind one goalkeeper.
const FORMATIONS: [(usize, usize, usize); 7] = [
    (3, 4, 3),
    (3, 5, 2),
    (4, 4, 2),
    (4, 3, 3),
    (4, 5, 1),
    (5, 3, 2),
    (5, 4, 1),
];

/// A synthetic gameweek plus squads drawn from its player pool.
#[derive(Debug, Clone)]
pub struct FakeGameweek {
    pub snapshot: GameweekSnapshot,
    pub squads: Vec<Vec<Pick>>,
}

/// Deterministic for a given seed. Squads always have 2 goalkeepers,
/// 5 defenders, 5 midfielders and 3 forwards and start in a legal formation.
pub fn fake_gameweek(seed: u64, squad_count: usize) -> FakeGameweek {
    let mut rng = StdRng::seed_from_u64(seed);

    let fixtures_by_team = seed_fixtures(&mut rng);
    let mut roles = RoleBook::default();
    let mut pool: HashMap<Role, Vec<PlayerId>> = HashMap::new();
    let mut live = HashMap::new();
    let mut fixtures = HashMap::new();

    for team in 0..TEAMS {
        let fixture = fixtures_by_team[team as usize];
        for slot in 0..PLAYERS_PER_TEAM {
            let id = team * 100 + slot + 1;
            let role = match slot {
                0 | 1 => Role::Goalkeeper,
                2..=6 => Role::Defender,
                7..=11 => Role::Midfielder,
                _ => Role::Forward,
            };
            roles.insert(id, role);
            pool.entry(role).or_default().push(id);
            fixtures.insert(id, fixture);
            // A few players never show up in the live feed at all.
            if rng.gen_bool(0.05) {
                continue;
            }
            live.insert(id, fake_stat(&mut rng, id, &fixture));
        }
    }

    let squads = (0..squad_count)
        .map(|_| fake_squad(&mut rng, &pool))
        .collect();

    FakeGameweek {
        snapshot: GameweekSnapshot {
            event: rng.gen_range(1..=38),
            live,
            fixtures,
            roles,
        },
        squads,
    }
}

fn seed_fixtures(rng: &mut StdRng) -> Vec<FixtureStatus> {
    let mut out = Vec::with_capacity(TEAMS as usize);
    for _ in 0..TEAMS / 2 {
        let status = match rng.gen_range(0..3) {
            0 => FixtureStatus::not_started(),
            1 => FixtureStatus::live(rng.gen_range(1..=90)),
            _ => FixtureStatus::finished(),
        };
        out.push(status);
        out.push(status);
    }
    out
}

fn fake_stat(rng: &mut StdRng, element: PlayerId, fixture: &FixtureStatus) -> LiveStat {
    let minutes = match fixture.state {
        MatchState::NotStarted => 0,
        _ if rng.gen_bool(0.25) => 0,
        MatchState::Live => rng.gen_range(1..=fixture.elapsed.max(1)),
        MatchState::Finished => rng.gen_range(1..=90),
    };
    if minutes == 0 {
        return LiveStat {
            element,
            ..LiveStat::default()
        };
    }

    let goals_scored = if rng.gen_bool(0.15) { 1 } else { 0 };
    let assists = if rng.gen_bool(0.12) { 1 } else { 0 };
    let yellow_cards = if rng.gen_bool(0.1) { 1 } else { 0 };
    let bonus = if rng.gen_bool(0.2) { rng.gen_range(1..=3) } else { 0 };
    let appearance = if minutes >= 60 { 2 } else { 1 };
    let total_points = appearance + goals_scored * 5 + assists * 3 - yellow_cards + bonus
        + rng.gen_range(-2..=2);

    LiveStat {
        element,
        minutes,
        goals_scored,
        assists,
        yellow_cards,
        bonus,
        bps: rng.gen_range(-5..=45),
        starts: 1,
        influence: rng.gen_range(0.0..60.0),
        creativity: rng.gen_range(0.0..60.0),
        threat: rng.gen_range(0.0..60.0),
        total_points,
        ..LiveStat::default()
    }
}

fn fake_squad(rng: &mut StdRng, pool: &HashMap<Role, Vec<PlayerId>>) -> Vec<Pick> {
    let mut draw = |role: Role, n: usize| -> Vec<PlayerId> {
        let mut ids = pool.get(&role).cloned().unwrap_or_default();
        ids.shuffle(rng);
        ids.truncate(n);
        ids
    };
    let gks = draw(Role::Goalkeeper, 2);
    let defs = draw(Role::Defender, 5);
    let mids = draw(Role::Midfielder, 5);
    let fwds = draw(Role::Forward, 3);

    let (d, m, f) = FORMATIONS[rng.gen_range(0..FORMATIONS.len())];

    let mut starters: Vec<PlayerId> = Vec::with_capacity(11);
    starters.extend(gks.iter().take(1));
    starters.extend(defs.iter().take(d));
    starters.extend(mids.iter().take(m));
    starters.extend(fwds.iter().take(f));

    let mut outfield_bench: Vec<PlayerId> = defs
        .iter()
        .skip(d)
        .chain(mids.iter().skip(m))
        .chain(fwds.iter().skip(f))
        .copied()
        .collect();
    outfield_bench.shuffle(rng);

    let mut picks: Vec<Pick> = starters
        .iter()
        .enumerate()
        .map(|(idx, id)| Pick::new(*id, idx as u8 + 1))
        .collect();
    picks.extend(gks.iter().skip(1).map(|id| Pick::new(*id, 12)));
    picks.extend(
        outfield_bench
            .iter()
            .enumerate()
            .map(|(idx, id)| Pick::new(*id, idx as u8 + 13)),
    );

    let captain = rng.gen_range(0..starters.len());
    let vice = (captain + 1 + rng.gen_range(0..starters.len() - 1)) % starters.len();
    picks[captain].is_captain = true;
    picks[captain].multiplier = 2;
    picks[vice].is_vice_captain = true;
    picks
}
