pub mod autosub;
pub mod bonus;
pub mod fake_gameweek;
pub mod formation;
pub mod model;
pub mod points;
pub mod rules;
pub mod snapshot;
pub mod squad;

pub use model::{
    ElementType, FixtureStatus, LiveStat, MatchState, Pick, PlayerId, Role, RoleBook,
};
pub use rules::ScoringRules;
pub use snapshot::GameweekSnapshot;
pub use squad::{SquadScore, score_squad, score_squad_detailed, score_squads};
