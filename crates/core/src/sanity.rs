use std::collections::{HashMap, HashSet};

use seating_types::Position;

use crate::constraint::ConstraintKind;
use crate::domain::Room;
use crate::error::ConfigError;

/// Cheap pre-flight rejections that must be caught before any model is
/// built: not enough seats for the roster, two exact-seat locks
/// colliding on the same seat, or an exact-seat lock landing on a table
/// or seat the constraint set forbids outright.
pub fn preflight(room: &Room, student_count: usize, constraints: &[ConstraintKind]) -> Result<(), ConfigError> {
    let seat_count: usize = room.tables().iter().map(|t| t.capacity as usize).sum();
    tracing::debug!(student_count, seat_count, "running pre-flight checks");
    if student_count > seat_count {
        return Err(ConfigError::NotEnoughSeats {
            students: student_count,
            seats: seat_count,
        });
    }

    let forbidden_tables: HashSet<(u32, u32)> = constraints
        .iter()
        .filter_map(|c| match c {
            ConstraintKind::ForbidTable { x, y } => Some((*x, *y)),
            _ => None,
        })
        .collect();
    let forbidden_seats: HashSet<Position> = constraints
        .iter()
        .filter_map(|c| match c {
            ConstraintKind::ForbidSeat { pos } => Some(*pos),
            _ => None,
        })
        .collect();

    let mut seen_exact_seats: HashMap<Position, String> = HashMap::new();
    for c in constraints {
        let ConstraintKind::ExactSeat { student, pos } = c else {
            continue;
        };
        if let Some(existing) = seen_exact_seats.get(pos) {
            if existing != student {
                return Err(ConfigError::DuplicateExactSeat(pos.key()));
            }
        }
        seen_exact_seats.insert(*pos, student.clone());

        if forbidden_tables.contains(&(pos.x, pos.y)) {
            return Err(ConfigError::ExactSeatOnForbiddenTable(pos.key()));
        }
        if forbidden_seats.contains(pos) {
            return Err(ConfigError::ExactSeatOnForbiddenSeat(pos.key()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
