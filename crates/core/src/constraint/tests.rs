use super::*;
use crate::domain::Room;
use crate::precompute::Precomputed;
use std::collections::HashMap;

fn pc_for(room: Room) -> Precomputed {
    Precomputed::build(room, &[], &[], None, None, None, None)
}

#[test]
fn front_rows_allows_only_rows_below_k() {
    let pc = pc_for(Room::from_schema(&[vec![2], vec![2], vec![2]]));
    let c = ConstraintKind::FrontRows {
        student: "A".into(),
        k: 1,
        metric: Metric::Grid,
    };
    let allowed = c.allowed("A", &pc).unwrap();
    assert!(allowed.iter().all(|p| p.y == 0));
}

#[test]
fn back_rows_allows_only_the_last_k_rows() {
    let pc = pc_for(Room::from_schema(&[vec![2], vec![2], vec![2]]));
    let c = ConstraintKind::BackRows {
        student: "A".into(),
        k: 1,
        metric: Metric::Grid,
    };
    let allowed = c.allowed("A", &pc).unwrap();
    assert!(allowed.iter().all(|p| p.y == 2));
}

#[test]
fn exact_seat_restricts_to_a_single_position() {
    let pc = pc_for(Room::from_schema(&[vec![2]]));
    let pos = Position::new(0, 0, 1);
    let c = ConstraintKind::ExactSeat {
        student: "A".into(),
        pos,
    };
    let allowed = c.allowed("A", &pc).unwrap();
    assert_eq!(allowed.len(), 1);
    assert!(allowed.contains(&pos));
}

#[test]
fn forbid_table_excludes_the_whole_table_for_every_student() {
    let pc = pc_for(Room::from_schema(&[vec![2, 3]]));
    let c = ConstraintKind::ForbidTable { x: 0, y: 0 };
    let allowed = c.allowed("anyone", &pc).unwrap();
    assert!(allowed.iter().all(|p| p.x != 0));
}

#[test]
fn binary_constraints_have_no_domain_opinion() {
    let pc = pc_for(Room::from_schema(&[vec![2]]));
    let c = ConstraintKind::SameTable {
        a: "A".into(),
        b: "B".into(),
    };
    assert!(c.allowed("A", &pc).is_none());
}

#[test]
fn same_table_and_adjacent_satisfaction() {
    let pc = pc_for(Room::from_schema(&[vec![3]]));
    let mut assignment: HashMap<String, Position> = HashMap::new();
    assignment.insert("X".into(), Position::new(0, 0, 0));
    assignment.insert("Y".into(), Position::new(0, 0, 1));

    let same = ConstraintKind::SameTable { a: "X".into(), b: "Y".into() };
    let adj = ConstraintKind::Adjacent { a: "X".into(), b: "Y".into() };
    assert!(same.satisfied(&assignment, &pc));
    assert!(adj.satisfied(&assignment, &pc));

    assignment.insert("Y".into(), Position::new(0, 0, 2));
    assert!(same.satisfied(&assignment, &pc));
    assert!(!adj.satisfied(&assignment, &pc));
}

#[test]
fn far_apart_uses_the_precomputed_distance() {
    let pc = pc_for(Room::from_schema(&[vec![2, 2], vec![2, 2]]));
    let mut assignment: HashMap<String, Position> = HashMap::new();
    assignment.insert("A".into(), Position::new(0, 0, 0));
    assignment.insert("B".into(), Position::new(1, 1, 0));
    let c = ConstraintKind::FarApart {
        a: "A".into(),
        b: "B".into(),
        d: 2.0,
        metric: Metric::Grid,
    };
    assert!(c.satisfied(&assignment, &pc));
    let too_close = ConstraintKind::FarApart {
        a: "A".into(),
        b: "B".into(),
        d: 3.0,
        metric: Metric::Grid,
    };
    assert!(!too_close.satisfied(&assignment, &pc));
}

#[test]
fn empty_neighbor_is_vacuously_satisfied_by_the_constraint_itself() {
    let pc = pc_for(Room::from_schema(&[vec![1]]));
    let mut assignment: HashMap<String, Position> = HashMap::new();
    assignment.insert("A".into(), Position::new(0, 0, 0));
    let c = ConstraintKind::EmptyNeighbor { student: "A".into() };
    assert!(c.satisfied(&assignment, &pc));
}
