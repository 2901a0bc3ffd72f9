use std::collections::{HashMap, HashSet};

use seating_types::{ConstraintWire, Metric, Position, StudentWire};
use serde_json::Value;

use crate::constraint::ConstraintKind;
use crate::error::ConfigError;

fn field_str(fields: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = fields.get(key) {
            if let Some(s) = v.as_str() {
                return Some(s.to_string());
            }
            if let Some(n) = v.as_i64() {
                return Some(n.to_string());
            }
        }
    }
    None
}

fn field_u32(fields: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        if let Some(v) = fields.get(key) {
            if let Some(n) = v.as_u64() {
                return Some(n as u32);
            }
            if let Some(s) = v.as_str() {
                if let Ok(n) = s.parse() {
                    return Some(n);
                }
            }
        }
    }
    None
}

fn field_f64(fields: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(v) = fields.get(key) {
            if let Some(n) = v.as_f64() {
                return Some(n);
            }
            if let Some(s) = v.as_str() {
                if let Ok(n) = s.parse() {
                    return Some(n);
                }
            }
        }
    }
    None
}

fn field_metric(fields: &Value) -> Metric {
    match fields.get("metric").and_then(|v| v.as_str()) {
        Some("px") => Metric::Px,
        _ => Metric::Grid,
    }
}

/// Accepts either a combined `"key": "x,y,s"` field or separate
/// `x`/`y`/`seat` (or `s`) integer fields — the same shape tolerance
/// the original UI layer offers its callers.
fn field_position(fields: &Value) -> Option<Position> {
    if let Some(key) = fields.get("key").and_then(|v| v.as_str()) {
        return Position::parse_key(key);
    }
    let x = field_u32(fields, &["x"])?;
    let y = field_u32(fields, &["y"])?;
    let seat = field_u32(fields, &["seat", "s"])?;
    Some(Position::new(x, y, seat))
}

struct Roster {
    id_to_name: HashMap<String, String>,
}

impl Roster {
    fn build(students: &[StudentWire]) -> Self {
        Self {
            id_to_name: students.iter().map(|s| (s.id.clone(), s.name.clone())).collect(),
        }
    }

    fn resolve(&self, id: &str) -> Result<String, ConfigError> {
        self.id_to_name
            .get(id)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownStudentId(id.to_string()))
    }
}

fn translate_one(fields: &Value, kind: &str, roster: &Roster) -> Result<ConstraintKind, ConfigError> {
    match kind {
        "front_rows" | "back_rows" => {
            let student_id = field_str(fields, &["student", "student_id", "eleve"])
                .ok_or_else(|| ConfigError::MalformedKey(format!("{kind}: missing student")))?;
            let student = roster.resolve(&student_id)?;
            let k = field_u32(fields, &["k"])
                .ok_or_else(|| ConfigError::MalformedKey(format!("{kind}: missing k")))?;
            let metric = field_metric(fields);
            Ok(if kind == "front_rows" {
                ConstraintKind::FrontRows { student, k, metric }
            } else {
                ConstraintKind::BackRows { student, k, metric }
            })
        }
        "solo_table" => {
            let student_id = field_str(fields, &["student", "student_id", "eleve"])
                .ok_or_else(|| ConfigError::MalformedKey("solo_table: missing student".into()))?;
            Ok(ConstraintKind::SoloAtTable {
                student: roster.resolve(&student_id)?,
            })
        }
        "empty_neighbor" => {
            let student_id = field_str(fields, &["student", "student_id", "eleve"])
                .ok_or_else(|| ConfigError::MalformedKey("empty_neighbor: missing student".into()))?;
            Ok(ConstraintKind::EmptyNeighbor {
                student: roster.resolve(&student_id)?,
            })
        }
        "no_adjacent" => {
            let student_id = field_str(fields, &["student", "student_id", "eleve"])
                .ok_or_else(|| ConfigError::MalformedKey("no_adjacent: missing student".into()))?;
            Ok(ConstraintKind::NoAdjacentNeighbor {
                student: roster.resolve(&student_id)?,
            })
        }
        "exact_seat" => {
            let student_id = field_str(fields, &["student", "student_id", "eleve"])
                .ok_or_else(|| ConfigError::MalformedKey("exact_seat: missing student".into()))?;
            let pos = field_position(fields)
                .ok_or_else(|| ConfigError::MalformedKey("exact_seat: missing position".into()))?;
            Ok(ConstraintKind::ExactSeat {
                student: roster.resolve(&student_id)?,
                pos,
            })
        }
        "far_apart" => {
            let a_id = field_str(fields, &["a", "a_id"])
                .ok_or_else(|| ConfigError::MalformedKey("far_apart: missing a".into()))?;
            let b_id = field_str(fields, &["b", "b_id"])
                .ok_or_else(|| ConfigError::MalformedKey("far_apart: missing b".into()))?;
            let d = field_f64(fields, &["d"])
                .ok_or_else(|| ConfigError::MalformedKey("far_apart: missing d".into()))?;
            Ok(ConstraintKind::FarApart {
                a: roster.resolve(&a_id)?,
                b: roster.resolve(&b_id)?,
                d,
                metric: field_metric(fields),
            })
        }
        "same_table" | "adjacent" => {
            let a_id = field_str(fields, &["a", "a_id"])
                .ok_or_else(|| ConfigError::MalformedKey(format!("{kind}: missing a")))?;
            let b_id = field_str(fields, &["b", "b_id"])
                .ok_or_else(|| ConfigError::MalformedKey(format!("{kind}: missing b")))?;
            let a = roster.resolve(&a_id)?;
            let b = roster.resolve(&b_id)?;
            Ok(if kind == "same_table" {
                ConstraintKind::SameTable { a, b }
            } else {
                ConstraintKind::Adjacent { a, b }
            })
        }
        "forbid_table" => {
            let x = field_u32(fields, &["x"])
                .ok_or_else(|| ConfigError::MalformedKey("forbid_table: missing x".into()))?;
            let y = field_u32(fields, &["y"])
                .ok_or_else(|| ConfigError::MalformedKey("forbid_table: missing y".into()))?;
            Ok(ConstraintKind::ForbidTable { x, y })
        }
        "forbid_seat" => {
            let pos = field_position(fields)
                .ok_or_else(|| ConfigError::MalformedKey("forbid_seat: missing position".into()))?;
            Ok(ConstraintKind::ForbidSeat { pos })
        }
        other => Err(ConfigError::UnknownConstraintType(other.to_string())),
    }
}

/// Translates wire descriptors into live constraints: resolves student
/// ids through the roster, normalizes shape differences, skips internal
/// markers (`type` starting with `_`, or empty), then appends the
/// `ForbidSeat`/`ExactSeat` injections for forbidden keys and existing
/// placements not already represented.
pub fn translate(
    students: &[StudentWire],
    constraints_wire: &[ConstraintWire],
    forbidden_keys: &[String],
    placements: &HashMap<String, String>,
    lock_placements: bool,
) -> Result<Vec<ConstraintKind>, ConfigError> {
    let roster = Roster::build(students);
    let mut out = Vec::new();

    tracing::debug!(
        descriptors = constraints_wire.len(),
        forbidden_keys = forbidden_keys.len(),
        lock_placements,
        "translating constraint wire into the live constraint set"
    );

    for desc in constraints_wire {
        if desc.kind.is_empty() || desc.kind.starts_with('_') {
            continue;
        }
        out.push(translate_one(&desc.fields, &desc.kind, &roster)?);
    }

    let mut forbidden_seats: HashSet<Position> = out
        .iter()
        .filter_map(|c| match c {
            ConstraintKind::ForbidSeat { pos } => Some(*pos),
            _ => None,
        })
        .collect();
    for key in forbidden_keys {
        let pos = Position::parse_key(key).ok_or_else(|| ConfigError::MalformedKey(key.clone()))?;
        if forbidden_seats.insert(pos) {
            out.push(ConstraintKind::ForbidSeat { pos });
        }
    }

    if lock_placements {
        let mut already_pinned: HashSet<String> = out
            .iter()
            .filter_map(|c| match c {
                ConstraintKind::ExactSeat { student, .. } => Some(student.clone()),
                _ => None,
            })
            .collect();
        let mut ordered_placements: Vec<(&String, &String)> = placements.iter().collect();
        ordered_placements.sort_by(|a, b| a.0.cmp(b.0));
        for (key, student_id) in ordered_placements {
            let pos = Position::parse_key(key).ok_or_else(|| ConfigError::MalformedKey(key.clone()))?;
            let name = roster.resolve(student_id)?;
            if already_pinned.contains(&name) {
                continue;
            }
            already_pinned.insert(name.clone());
            out.push(ConstraintKind::ExactSeat { student: name, pos });
        }
    }

    tracing::debug!(constraints = out.len(), "constraint translation complete");
    Ok(out)
}

#[cfg(test)]
mod tests;
