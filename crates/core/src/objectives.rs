use std::collections::HashSet;

use crate::domain::{Assignment, Gender, Student};
use crate::precompute::Precomputed;

/// An independent recomputation of the three lexicographic objectives
/// from a finished assignment, used to populate the result report and
/// to cross-check the solver's own bookkeeping in tests — mirroring
/// how a soft-score recompute is kept separate from the model that
/// produced the schedule in the first place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Objectives {
    pub nb_isolated: u32,
    pub nb_same: u32,
    pub sum_y: u64,
}

pub fn compute(pc: &Precomputed, students: &[Student], assignment: &Assignment) -> Objectives {
    let gender_by_name: std::collections::HashMap<&str, Gender> =
        students.iter().map(|s| (s.name.as_str(), s.gender)).collect();

    let occupied: HashSet<usize> = assignment
        .values()
        .filter_map(|pos| pc.index_of(*pos))
        .collect();

    let mut nb_isolated = 0u32;
    for &i in &occupied {
        let has_neighbor = pc.neighbors(i).iter().any(|n| occupied.contains(n));
        if !has_neighbor {
            nb_isolated += 1;
        }
    }

    let mut nb_same = 0u32;
    for &(i, j) in &pc.edges {
        if !occupied.contains(&i) || !occupied.contains(&j) {
            continue;
        }
        let gi = seat_gender(pc, assignment, &gender_by_name, i);
        let gj = seat_gender(pc, assignment, &gender_by_name, j);
        match (gi, gj) {
            (Some(Gender::Feminine), Some(Gender::Feminine)) => nb_same += 1,
            (Some(Gender::Masculine), Some(Gender::Masculine)) => nb_same += 1,
            _ => {}
        }
    }

    let sum_y: u64 = assignment.values().map(|p| p.y as u64).sum();

    Objectives {
        nb_isolated,
        nb_same,
        sum_y,
    }
}

fn seat_gender(
    pc: &Precomputed,
    assignment: &Assignment,
    gender_by_name: &std::collections::HashMap<&str, Gender>,
    seat_idx: usize,
) -> Option<Gender> {
    let pos = pc.seats[seat_idx];
    assignment
        .iter()
        .find(|(_, p)| **p == pos)
        .and_then(|(name, _)| gender_by_name.get(name.as_str()).copied())
}

#[cfg(test)]
mod tests;
