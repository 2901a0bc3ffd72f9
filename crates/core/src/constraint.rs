use std::collections::HashSet;

use seating_types::{Metric, Position};

use crate::domain::Assignment;
use crate::precompute::Precomputed;

/// The eleven constraint kinds, each a case of one tagged variant rather
/// than a class hierarchy. `involved`/`allowed`/`satisfied`/`serialize`
/// dispatch on the variant; the CP-SAT contribution lives in
/// `seating-solver`, which matches on the same variants to decide
/// between an explicit linear encoding and a domain absorption.
#[derive(Clone, Debug, PartialEq)]
pub enum ConstraintKind {
    FrontRows { student: String, k: u32, metric: Metric },
    BackRows { student: String, k: u32, metric: Metric },
    SoloAtTable { student: String },
    EmptyNeighbor { student: String },
    NoAdjacentNeighbor { student: String },
    ExactSeat { student: String, pos: Position },
    FarApart { a: String, b: String, d: f64, metric: Metric },
    SameTable { a: String, b: String },
    Adjacent { a: String, b: String },
    ForbidTable { x: u32, y: u32 },
    ForbidSeat { pos: Position },
}

impl ConstraintKind {
    /// The wire tag this variant round-trips through, used by both the
    /// translator and `serialize`.
    pub fn tag(&self) -> &'static str {
        match self {
            ConstraintKind::FrontRows { .. } => "front_rows",
            ConstraintKind::BackRows { .. } => "back_rows",
            ConstraintKind::SoloAtTable { .. } => "solo_table",
            ConstraintKind::EmptyNeighbor { .. } => "empty_neighbor",
            ConstraintKind::NoAdjacentNeighbor { .. } => "no_adjacent",
            ConstraintKind::ExactSeat { .. } => "exact_seat",
            ConstraintKind::FarApart { .. } => "far_apart",
            ConstraintKind::SameTable { .. } => "same_table",
            ConstraintKind::Adjacent { .. } => "adjacent",
            ConstraintKind::ForbidTable { .. } => "forbid_table",
            ConstraintKind::ForbidSeat { .. } => "forbid_seat",
        }
    }

    /// Students named by this constraint: zero (structural), one
    /// (unary) or two (binary).
    pub fn involved(&self) -> Vec<&str> {
        match self {
            ConstraintKind::FrontRows { student, .. }
            | ConstraintKind::BackRows { student, .. }
            | ConstraintKind::SoloAtTable { student }
            | ConstraintKind::EmptyNeighbor { student }
            | ConstraintKind::NoAdjacentNeighbor { student }
            | ConstraintKind::ExactSeat { student, .. } => vec![student.as_str()],
            ConstraintKind::FarApart { a, b, .. }
            | ConstraintKind::SameTable { a, b }
            | ConstraintKind::Adjacent { a, b } => vec![a.as_str(), b.as_str()],
            ConstraintKind::ForbidTable { .. } | ConstraintKind::ForbidSeat { .. } => vec![],
        }
    }

    /// Which students this constraint's `allowed` filter should be
    /// applied to while building domains: a structural constraint
    /// applies to every student in the roster; a unary domain-absorbed
    /// constraint applies only to its own student; everything else
    /// contributes no domain filter at all.
    pub fn domain_subjects(&self, roster: &[String]) -> Option<Vec<String>> {
        match self {
            ConstraintKind::FrontRows { student, .. }
            | ConstraintKind::BackRows { student, .. }
            | ConstraintKind::ExactSeat { student, .. } => Some(vec![student.clone()]),
            ConstraintKind::ForbidTable { .. } | ConstraintKind::ForbidSeat { .. } => {
                Some(roster.to_vec())
            }
            _ => None,
        }
    }

    /// The subset of seats this constraint, in isolation, permits for
    /// `student`; `None` means it has no opinion. Only `FrontRows`,
    /// `BackRows`, `ExactSeat`, `ForbidTable` and `ForbidSeat` restrict
    /// the allowed-seat domain — the rest become explicit model
    /// constraints instead.
    pub fn allowed(&self, student: &str, pc: &Precomputed) -> Option<HashSet<Position>> {
        match self {
            ConstraintKind::FrontRows { student: s, k, metric } if s == student => {
                let order = pc.row_order(*metric);
                Some(
                    pc.seats
                        .iter()
                        .copied()
                        .filter(|p| order.in_front(p.x, p.y, *k))
                        .collect(),
                )
            }
            ConstraintKind::BackRows { student: s, k, metric } if s == student => {
                let order = pc.row_order(*metric);
                Some(
                    pc.seats
                        .iter()
                        .copied()
                        .filter(|p| order.in_back(p.x, p.y, *k))
                        .collect(),
                )
            }
            ConstraintKind::ExactSeat { student: s, pos } if s == student => {
                let mut set = HashSet::new();
                set.insert(*pos);
                Some(set)
            }
            ConstraintKind::ForbidTable { x, y } => Some(
                pc.seats
                    .iter()
                    .copied()
                    .filter(|p| !(p.x == *x && p.y == *y))
                    .collect(),
            ),
            ConstraintKind::ForbidSeat { pos } => {
                Some(pc.seats.iter().copied().filter(|p| p != pos).collect())
            }
            _ => None,
        }
    }

    /// Holds on a partial assignment (vacuously if not all of this
    /// constraint's students are placed yet); must hold on the final
    /// complete assignment.
    pub fn satisfied(&self, assignment: &Assignment, pc: &Precomputed) -> bool {
        match self {
            ConstraintKind::FrontRows { student, k, metric } => {
                let Some(pos) = assignment.get(student) else { return true };
                pc.row_order(*metric).in_front(pos.x, pos.y, *k)
            }
            ConstraintKind::BackRows { student, k, metric } => {
                let Some(pos) = assignment.get(student) else { return true };
                pc.row_order(*metric).in_back(pos.x, pos.y, *k)
            }
            ConstraintKind::SoloAtTable { student } => {
                let Some(pos) = assignment.get(student) else { return true };
                !assignment
                    .iter()
                    .any(|(other, p)| other != student && p.x == pos.x && p.y == pos.y)
            }
            // Real check deferred to the final validator, which inspects
            // table occupancy directly against capacity.
            ConstraintKind::EmptyNeighbor { .. } => true,
            ConstraintKind::NoAdjacentNeighbor { student } => {
                let Some(pos) = assignment.get(student) else { return true };
                !assignment.iter().any(|(other, p)| {
                    other != student
                        && p.x == pos.x
                        && p.y == pos.y
                        && (p.seat as i64 - pos.seat as i64).abs() == 1
                })
            }
            ConstraintKind::ExactSeat { student, pos } => {
                assignment.get(student).map(|p| p == pos).unwrap_or(true)
            }
            ConstraintKind::FarApart { a, b, d, metric } => {
                match (assignment.get(a), assignment.get(b)) {
                    (Some(&pa), Some(&pb)) => pc.distance(pa, pb, *metric) >= *d,
                    _ => true,
                }
            }
            ConstraintKind::SameTable { a, b } => match (assignment.get(a), assignment.get(b)) {
                (Some(pa), Some(pb)) => pa.x == pb.x && pa.y == pb.y,
                _ => true,
            },
            ConstraintKind::Adjacent { a, b } => match (assignment.get(a), assignment.get(b)) {
                (Some(pa), Some(pb)) => {
                    pa.x == pb.x && pa.y == pb.y && (pa.seat as i64 - pb.seat as i64).abs() == 1
                }
                _ => true,
            },
            ConstraintKind::ForbidTable { x, y } => {
                !assignment.values().any(|p| p.x == *x && p.y == *y)
            }
            ConstraintKind::ForbidSeat { pos } => !assignment.values().any(|p| p == pos),
        }
    }

    /// A deterministic, data-only representation for wire and logging.
    pub fn serialize(&self) -> serde_json::Value {
        match self {
            ConstraintKind::FrontRows { student, k, metric } => serde_json::json!({
                "type": self.tag(), "student": student, "k": k, "metric": metric_tag(*metric)
            }),
            ConstraintKind::BackRows { student, k, metric } => serde_json::json!({
                "type": self.tag(), "student": student, "k": k, "metric": metric_tag(*metric)
            }),
            ConstraintKind::SoloAtTable { student } => {
                serde_json::json!({ "type": self.tag(), "student": student })
            }
            ConstraintKind::EmptyNeighbor { student } => {
                serde_json::json!({ "type": self.tag(), "student": student })
            }
            ConstraintKind::NoAdjacentNeighbor { student } => {
                serde_json::json!({ "type": self.tag(), "student": student })
            }
            ConstraintKind::ExactSeat { student, pos } => serde_json::json!({
                "type": self.tag(), "student": student, "key": pos.key()
            }),
            ConstraintKind::FarApart { a, b, d, metric } => serde_json::json!({
                "type": self.tag(), "a": a, "b": b, "d": d, "metric": metric_tag(*metric)
            }),
            ConstraintKind::SameTable { a, b } => {
                serde_json::json!({ "type": self.tag(), "a": a, "b": b })
            }
            ConstraintKind::Adjacent { a, b } => {
                serde_json::json!({ "type": self.tag(), "a": a, "b": b })
            }
            ConstraintKind::ForbidTable { x, y } => {
                serde_json::json!({ "type": self.tag(), "x": x, "y": y })
            }
            ConstraintKind::ForbidSeat { pos } => {
                serde_json::json!({ "type": self.tag(), "key": pos.key() })
            }
        }
    }
}

fn metric_tag(metric: Metric) -> &'static str {
    match metric {
        Metric::Grid => "grid",
        Metric::Px => "px",
    }
}

#[cfg(test)]
mod tests;
