use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gw_live::autosub::Substitution;
use gw_live::model::{Pick, SQUAD_SIZE};
use gw_live::squad::score_squads_detailed;
use gw_live::{GameweekSnapshot, ScoringRules};

#[derive(Debug, Deserialize)]
struct ReplayFile {
    #[serde(default)]
    rules: Option<ScoringRules>,
    gameweek: GameweekSnapshot,
    #[serde(default)]
    squads: Vec<ReplaySquad>,
}

#[derive(Debug, Deserialize)]
struct ReplaySquad {
    name: String,
    picks: Vec<Pick>,
}

#[derive(Debug, Serialize)]
struct ReplayReport<'a> {
    generated_at: String,
    event: u32,
    rules: ScoringRules,
    rows: Vec<ReplayRow<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplayRow<'a> {
    name: &'a str,
    total: u32,
    substitutions: Vec<Substitution>,
}

fn parse_replay(raw: &str) -> Result<ReplayFile> {
    serde_json::from_str(raw).context("invalid replay json")
}

/// A rules block in the file wins outright; fields it omits take the
/// defaults, not the `GW_*` environment.
fn resolve_rules(from_file: Option<ScoringRules>) -> ScoringRules {
    from_file.unwrap_or_else(ScoringRules::from_env)
}

/// Highest total first, ties by name.
fn rank_rows(rows: &mut [ReplayRow<'_>]) {
    rows.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(b.name)));
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut path = None;
    let mut as_json = false;
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            as_json = true;
        } else {
            path = Some(PathBuf::from(arg));
        }
    }
    let path = path.unwrap_or_else(|| PathBuf::from("tests/fixtures/gameweek_replay.json"));

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read replay file {}", path.display()))?;
    let replay = parse_replay(&raw)?;
    let rules = resolve_rules(replay.rules);

    for squad in &replay.squads {
        if squad.picks.len() != SQUAD_SIZE {
            warn!(
                squad = %squad.name,
                picks = squad.picks.len(),
                "squad does not have {SQUAD_SIZE} picks"
            );
        }
    }

    let picks: Vec<Vec<Pick>> = replay.squads.iter().map(|s| s.picks.clone()).collect();
    let scores = score_squads_detailed(&picks, &replay.gameweek, &rules);
    info!(
        event = replay.gameweek.event,
        squads = scores.len(),
        "replay scored"
    );

    let mut rows: Vec<ReplayRow> = replay
        .squads
        .iter()
        .zip(scores)
        .map(|(squad, score)| ReplayRow {
            name: &squad.name,
            total: score.total,
            substitutions: score.substitutions,
        })
        .collect();
    rank_rows(&mut rows);

    if as_json {
        let report = ReplayReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            event: replay.gameweek.event,
            rules,
            rows,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for row in &rows {
            println!("{}\t{}", row.name, row.total);
        }
    }

    Ok(())
}
