use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single seat, identified by table column, table row and seat index
/// within the table. Serializes to/from the wire key form `"x,y,s"`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub seat: u32,
}

impl Position {
    pub fn new(x: u32, y: u32, seat: u32) -> Self {
        Self { x, y, seat }
    }

    pub fn key(&self) -> String {
        format!("{},{},{}", self.x, self.y, self.seat)
    }

    pub fn parse_key(key: &str) -> Option<Self> {
        let mut parts = key.split(',');
        let x = parts.next()?.trim().parse().ok()?;
        let y = parts.next()?.trim().parse().ok()?;
        let seat = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self { x, y, seat })
    }

    /// Parses a bare `"x,y"` table key (no seat component).
    pub fn parse_table_key(key: &str) -> Option<(u32, u32)> {
        let mut parts = key.split(',');
        let x = parts.next()?.trim().parse().ok()?;
        let y = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((x, y))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Distance metric used by `FarApart` and by the row-sum objective.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[default]
    Grid,
    Px,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, Eq, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenderWire {
    Feminine,
    Masculine,
    #[default]
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct StudentWire {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
}

/// A constraint descriptor as it arrives over the wire: a `type` tag plus
/// a loosely-shaped payload. The registry (in `seating-core`) is
/// responsible for normalizing the payload's shape before building a
/// live constraint from it — see the tag list in the module docs there.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct ConstraintWire {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: serde_json::Value,
}

/// Pixel geometry used to derive `px` coordinates from grid coordinates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Geometry {
    pub table_pitch_x: f64,
    pub table_pitch_y: f64,
    pub seat_pitch_x: f64,
    pub seat_offset_x: f64,
    pub seat_offset_y: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            table_pitch_x: 1.0,
            table_pitch_y: 1.0,
            seat_pitch_x: 1.0,
            seat_offset_x: 0.0,
            seat_offset_y: 0.0,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_time_budget_ms() -> u64 {
    60_000
}

fn default_num_workers() -> u32 {
    8
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct SolveOptions {
    #[serde(default = "default_true")]
    pub prefer_alone: bool,
    #[serde(default = "default_true")]
    pub prefer_mixage: bool,
    #[serde(default = "default_time_budget_ms")]
    pub time_budget_ms: u64,
    #[serde(default = "default_true")]
    pub lock_placements: bool,
    #[serde(default)]
    pub random_seed: Option<u64>,
    #[serde(default)]
    pub vary_each_run: bool,
    #[serde(default)]
    pub shuffle_students: bool,
    #[serde(default = "default_true")]
    pub tiebreak_random: bool,
    #[serde(default)]
    pub visual_row_order: Option<Vec<i64>>,
    #[serde(default)]
    pub visual_row_map: Option<HashMap<String, i64>>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub table_offsets: Option<HashMap<String, (f64, f64)>>,
    #[serde(default = "default_num_workers")]
    pub num_workers: u32,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            prefer_alone: true,
            prefer_mixage: true,
            time_budget_ms: default_time_budget_ms(),
            lock_placements: true,
            random_seed: None,
            vary_each_run: false,
            shuffle_students: false,
            tiebreak_random: true,
            visual_row_order: None,
            visual_row_map: None,
            geometry: None,
            table_offsets: None,
            num_workers: default_num_workers(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct SolveRequest {
    pub schema: Vec<Vec<i64>>,
    pub students: Vec<StudentWire>,
    #[serde(default)]
    pub constraints_wire: Vec<ConstraintWire>,
    #[serde(default)]
    pub forbidden_keys: Vec<String>,
    #[serde(default)]
    pub placements: HashMap<String, String>,
    #[serde(default)]
    pub options: SolveOptions,
}

/// The effective options actually used for a solve, echoed back so a
/// caller can confirm seeding/randomization behavior without re-deriving
/// defaults (§6 "effective option echo").
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct OptionsEcho {
    pub solver: String,
    pub time_budget_ms: u64,
    pub random_seed: Option<u64>,
    pub shuffle_students: bool,
    pub tiebreak_random: bool,
    pub num_workers: u32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, Default)]
pub struct Objectives {
    pub nb_isolated: u32,
    pub nb_same: u32,
    pub sum_y: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct SolveReport {
    pub status: String,
    pub assignment: HashMap<String, String>,
    pub options_echo: OptionsEcho,
    pub objectives: Objectives,
}

impl SolveReport {
    pub fn status_success() -> String {
        "SUCCESS".to_string()
    }
}
