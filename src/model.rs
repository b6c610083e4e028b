use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type PlayerId = u32;

pub const STARTING_SLOTS: u8 = 11;
pub const SQUAD_SIZE: usize = 15;
/// Slot given to picks whose upstream position is missing or out of range.
pub const INVALID_POSITION: u8 = u8::MAX;

/// One player's match performance for a gameweek, as published by the live
/// endpoint. Numeric fields decode leniently: numbers, numeric strings and
/// nulls are all accepted and anything unparseable becomes zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveStat {
    #[serde(alias = "id", deserialize_with = "lenient_u32")]
    pub element: PlayerId,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub minutes: u32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub goals_scored: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub assists: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub clean_sheets: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub goals_conceded: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub own_goals: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub penalties_saved: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub penalties_missed: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub yellow_cards: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub red_cards: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub saves: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub bonus: i32,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub bps: i32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub influence: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub creativity: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub threat: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ict_index: f64,
    #[serde(default, deserialize_with = "lenient_i32")]
    pub starts: i32,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub expected_goals: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub expected_assists: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub expected_goal_involvements: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub expected_goals_conceded: f64,
    /// Upstream total, provisionally including any bonus already announced.
    #[serde(default, deserialize_with = "lenient_i32")]
    pub total_points: i32,
}

/// One slot in a manager's squad for a gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    #[serde(deserialize_with = "lenient_u32")]
    pub element: PlayerId,
    /// 1-11 start in formation order, 12-15 are the bench in priority order.
    #[serde(default = "invalid_position", deserialize_with = "lenient_position")]
    pub position: u8,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
    #[serde(default = "default_multiplier", deserialize_with = "lenient_u32")]
    pub multiplier: u32,
}

fn default_multiplier() -> u32 {
    1
}

fn invalid_position() -> u8 {
    INVALID_POSITION
}

impl Pick {
    pub fn new(element: PlayerId, position: u8) -> Self {
        Self {
            element,
            position,
            is_captain: false,
            is_vice_captain: false,
            multiplier: if (1..=STARTING_SLOTS).contains(&position) { 1 } else { 0 },
        }
    }

    pub fn is_starter(&self) -> bool {
        (1..=STARTING_SLOTS).contains(&self.position)
    }

    pub fn is_bench(&self) -> bool {
        (STARTING_SLOTS + 1..=SQUAD_SIZE as u8).contains(&self.position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Goalkeeper,
        Role::Defender,
        Role::Midfielder,
        Role::Forward,
    ];

    pub fn from_element_type(id: u8) -> Option<Role> {
        match id {
            1 => Some(Role::Goalkeeper),
            2 => Some(Role::Defender),
            3 => Some(Role::Midfielder),
            4 => Some(Role::Forward),
            _ => None,
        }
    }

    pub fn element_type_id(self) -> u8 {
        self.index() as u8 + 1
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Role::Goalkeeper => 0,
            Role::Defender => 1,
            Role::Midfielder => 2,
            Role::Forward => 3,
        }
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::Goalkeeper => "Goalkeeper",
        Role::Defender => "Defender",
        Role::Midfielder => "Midfielder",
        Role::Forward => "Forward",
    }
}

/// Static reference record for a position class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementType {
    #[serde(deserialize_with = "lenient_u8")]
    pub id: u8,
    #[serde(default, alias = "name")]
    pub singular_name: String,
    #[serde(deserialize_with = "lenient_u8")]
    pub squad_min_play: u8,
    #[serde(deserialize_with = "lenient_u8")]
    pub squad_max_play: u8,
}

impl ElementType {
    pub fn new(role: Role, squad_min_play: u8, squad_max_play: u8) -> Self {
        Self {
            id: role.element_type_id(),
            singular_name: role_label(role).to_string(),
            squad_min_play,
            squad_max_play,
        }
    }

    pub fn defaults_for(role: Role) -> Self {
        match role {
            Role::Goalkeeper => Self::new(role, 1, 1),
            Role::Defender => Self::new(role, 3, 5),
            Role::Midfielder => Self::new(role, 2, 5),
            Role::Forward => Self::new(role, 1, 3),
        }
    }

    pub fn role(&self) -> Option<Role> {
        Role::from_element_type(self.id)
    }
}

/// Role reference data: the element type table plus each player's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleBook {
    #[serde(default = "default_element_types")]
    pub element_types: Vec<ElementType>,
    /// Player id -> element type id. Unreadable ids decode as 0, which
    /// `role_of` treats as unknown.
    #[serde(default, deserialize_with = "lenient_type_map")]
    pub elements: HashMap<PlayerId, u8>,
}

fn default_element_types() -> Vec<ElementType> {
    Role::ALL.iter().map(|r| ElementType::defaults_for(*r)).collect()
}

impl Default for RoleBook {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl RoleBook {
    pub fn new(elements: HashMap<PlayerId, u8>) -> Self {
        Self {
            element_types: default_element_types(),
            elements,
        }
    }

    pub fn insert(&mut self, player: PlayerId, role: Role) {
        self.elements.insert(player, role.element_type_id());
    }

    /// Players without a usable record fall back to midfielder.
    pub fn role_of(&self, player: PlayerId) -> Role {
        self.elements
            .get(&player)
            .and_then(|id| Role::from_element_type(*id))
            .unwrap_or(Role::Midfielder)
    }

    /// Bounds for `role`, using the standard bounds when the table omits it.
    pub fn element_type(&self, role: Role) -> ElementType {
        self.element_types
            .iter()
            .find(|et| et.role() == Some(role))
            .cloned()
            .unwrap_or_else(|| ElementType::defaults_for(role))
    }
}

/// Match lifecycle. Variants are ordered; a fixture only ever moves forward.
/// Unrecognised upstream states (postponed, suspended, null) decode as
/// `NotStarted`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    #[default]
    NotStarted,
    Live,
    Finished,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureStatus {
    #[serde(default, deserialize_with = "lenient_state")]
    pub state: MatchState,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub elapsed: u32,
}

impl FixtureStatus {
    pub fn not_started() -> Self {
        Self::default()
    }

    pub fn live(elapsed: u32) -> Self {
        Self {
            state: MatchState::Live,
            elapsed,
        }
    }

    pub fn finished() -> Self {
        Self {
            state: MatchState::Finished,
            elapsed: 90,
        }
    }
}

fn lenient_state<'de, D>(deserializer: D) -> Result<MatchState, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    let state = v
        .as_ref()
        .and_then(Value::as_str)
        .map(|s| s.trim().to_ascii_lowercase());
    Ok(match state.as_deref() {
        Some("live") => MatchState::Live,
        Some("finished") => MatchState::Finished,
        _ => MatchState::NotStarted,
    })
}

fn lenient_type_map<'de, D>(deserializer: D) -> Result<HashMap<PlayerId, u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<HashMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(player, type_id)| {
            let player = player.trim().parse::<PlayerId>().ok()?;
            let type_id = as_u32_any(&type_id)
                .and_then(|n| u8::try_from(n).ok())
                .unwrap_or(0);
            Some((player, type_id))
        })
        .collect())
}

fn lenient_position<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref()
        .and_then(as_u32_any)
        .and_then(|n| u8::try_from(n).ok())
        .filter(|n| (1..=SQUAD_SIZE as u8).contains(n))
        .unwrap_or(INVALID_POSITION))
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(as_i32_any).unwrap_or(0))
}

pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref().and_then(as_u32_any).unwrap_or(0))
}

fn lenient_u8<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let n = lenient_u32(deserializer)?;
    Ok(u8::try_from(n).unwrap_or(0))
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(v.as_ref()
        .and_then(as_f64_any)
        .filter(|n| n.is_finite())
        .unwrap_or(0.0))
}

fn as_i64_any(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    if let Some(f) = v.as_f64() {
        return Some(f.trunc() as i64);
    }
    let s = v.as_str()?.trim();
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

fn as_i32_any(v: &Value) -> Option<i32> {
    let n = as_i64_any(v)?;
    i32::try_from(n).ok()
}

fn as_u32_any(v: &Value) -> Option<u32> {
    let n = as_i64_any(v)?;
    u32::try_from(n).ok()
}

fn as_f64_any(v: &Value) -> Option<f64> {
    if let Some(n) = v.as_f64() {
        return Some(n);
    }
    v.as_str()?.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_stat_tolerates_strings_nulls_and_garbage() {
        let raw = r#"{
            "id": "42",
            "minutes": 67,
            "goals_scored": "1",
            "bonus": null,
            "saves": "n/a",
            "influence": "31.4",
            "expected_goals": "0.45",
            "total_points": -1
        }"#;
        let stat: LiveStat = serde_json::from_str(raw).unwrap();
        assert_eq!(stat.element, 42);
        assert_eq!(stat.minutes, 67);
        assert_eq!(stat.goals_scored, 1);
        assert_eq!(stat.bonus, 0);
        assert_eq!(stat.saves, 0);
        assert!((stat.influence - 31.4).abs() < 1e-9);
        assert!((stat.expected_goals - 0.45).abs() < 1e-9);
        assert_eq!(stat.total_points, -1);
        assert_eq!(stat.assists, 0);
    }

    #[test]
    fn negative_minutes_decode_as_zero() {
        let stat: LiveStat = serde_json::from_str(r#"{"element": 1, "minutes": -5}"#).unwrap();
        assert_eq!(stat.minutes, 0);
    }

    #[test]
    fn pick_multiplier_defaults_to_one() {
        let pick: Pick = serde_json::from_str(r#"{"element": 7, "position": 3}"#).unwrap();
        assert_eq!(pick.multiplier, 1);
        assert!(!pick.is_captain);
        assert!(pick.is_starter());
    }

    #[test]
    fn unreadable_positions_never_start() {
        for raw in [
            r#"{"element": 7, "position": "gk"}"#,
            r#"{"element": 7, "position": 0}"#,
            r#"{"element": 7, "position": 16}"#,
            r#"{"element": 7, "position": null}"#,
            r#"{"element": 7}"#,
        ] {
            let pick: Pick = serde_json::from_str(raw).unwrap();
            assert_eq!(pick.position, INVALID_POSITION, "{raw}");
            assert!(!pick.is_starter());
            assert!(!pick.is_bench());
        }
        let pick: Pick = serde_json::from_str(r#"{"element": 7, "position": "12"}"#).unwrap();
        assert!(pick.is_bench());
    }

    #[test]
    fn unknown_players_are_midfielders() {
        let mut book = RoleBook::default();
        book.insert(1, Role::Goalkeeper);
        book.elements.insert(2, 9);
        assert_eq!(book.role_of(1), Role::Goalkeeper);
        assert_eq!(book.role_of(2), Role::Midfielder);
        assert_eq!(book.role_of(3), Role::Midfielder);
    }

    #[test]
    fn missing_element_types_use_standard_bounds() {
        let book = RoleBook::default();
        let mid = book.element_type(Role::Midfielder);
        assert_eq!((mid.squad_min_play, mid.squad_max_play), (2, 5));
        let gk = book.element_type(Role::Goalkeeper);
        assert_eq!((gk.squad_min_play, gk.squad_max_play), (1, 1));
    }

    #[test]
    fn match_state_only_orders_forward() {
        assert!(MatchState::NotStarted < MatchState::Live);
        assert!(MatchState::Live < MatchState::Finished);
        let fx: FixtureStatus =
            serde_json::from_str(r#"{"state": "live", "elapsed": "55"}"#).unwrap();
        assert_eq!(fx, FixtureStatus::live(55));
    }

    #[test]
    fn unrecognised_fixture_states_have_not_started() {
        for raw in [
            r#"{"state": "postponed", "elapsed": 0}"#,
            r#"{"state": null}"#,
            r#"{"state": 3}"#,
        ] {
            let fx: FixtureStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(fx.state, MatchState::NotStarted, "{raw}");
        }
        let fx: FixtureStatus = serde_json::from_str(r#"{"state": " Finished "}"#).unwrap();
        assert_eq!(fx.state, MatchState::Finished);
    }
}
