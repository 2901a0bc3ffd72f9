use crate::constraint::ConstraintKind;
use crate::domain::{Assignment, Student};
use crate::precompute::Precomputed;

/// A redundant post-solve re-check over every constraint kind. The
/// model is the source of truth for what gets built, but this catches
/// encoding refactors gone wrong and metric/geometry drift between the
/// model and runtime — the validator reuses the same `distance` the
/// model uses for `FarApart`.
pub fn final_check(
    pc: &Precomputed,
    students: &[Student],
    assignment: &Assignment,
    constraints: &[ConstraintKind],
) -> Result<(), String> {
    for s in students {
        if !assignment.contains_key(&s.name) {
            return Err(format!("student {} has no seat in the final assignment", s.name));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for (name, pos) in assignment {
        if !seen.insert(*pos) {
            return Err(format!("seat {pos} is occupied by more than one student"));
        }
        if !pc.room.contains(*pos) {
            return Err(format!("student {name} assigned to seat {pos} which does not exist"));
        }
    }

    for (name, pos) in assignment {
        let Some(idx) = pc.index_of(*pos) else {
            return Err(format!("student {name} assigned to seat {pos} outside the canonical seat order"));
        };
        let Some(bits) = pc.domains.get(name) else {
            return Err(format!("student {name} has no precomputed domain"));
        };
        if !bits[idx] {
            return Err(format!("student {name} assigned to seat {pos} outside their allowed domain"));
        }
    }

    for c in constraints {
        if !c.satisfied(assignment, pc) {
            return Err(format!("constraint {} violated: {:?}", c.tag(), c.serialize()));
        }
        if let ConstraintKind::EmptyNeighbor { student } = c {
            if !empty_neighbor_holds(pc, assignment, student) {
                return Err(format!("empty_neighbor violated for student {student}"));
            }
        }
    }

    Ok(())
}

fn empty_neighbor_holds(pc: &Precomputed, assignment: &Assignment, student: &str) -> bool {
    let Some(pos) = assignment.get(student) else {
        return true;
    };
    let Some(idx) = pc.index_of(*pos) else {
        return true;
    };
    let neighbors = pc.neighbors(idx);
    if neighbors.is_empty() {
        // Capacity-1 table, or an end seat with no adjacency edge at
        // all: vacuously satisfied.
        return true;
    }
    let occupied_positions: std::collections::HashSet<_> = assignment.values().copied().collect();
    neighbors
        .iter()
        .any(|&n| !occupied_positions.contains(&pc.seats[n]))
}

#[cfg(test)]
mod tests;
