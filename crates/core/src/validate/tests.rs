use super::*;
use crate::domain::Room;
use crate::precompute::Precomputed;

fn students(names: &[&str]) -> Vec<Student> {
    names.iter().map(|n| Student::new(*n, Gender::Unknown)).collect()
}

#[test]
fn rejects_an_assignment_missing_a_student() {
    let room = Room::from_schema(&[vec![2]]);
    let pc = Precomputed::build(room, &["A".into(), "B".into()], &[], None, None, None, None);
    let mut assignment = Assignment::new();
    assignment.insert("A".to_string(), seating_types::Position::new(0, 0, 0));
    let err = final_check(&pc, &students(&["A", "B"]), &assignment, &[]).unwrap_err();
    assert!(err.contains('B'));
}

#[test]
fn rejects_two_students_on_the_same_seat() {
    let room = Room::from_schema(&[vec![2]]);
    let pc = Precomputed::build(room, &["A".into(), "B".into()], &[], None, None, None, None);
    let mut assignment = Assignment::new();
    let pos = seating_types::Position::new(0, 0, 0);
    assignment.insert("A".to_string(), pos);
    assignment.insert("B".to_string(), pos);
    let err = final_check(&pc, &students(&["A", "B"]), &assignment, &[]).unwrap_err();
    assert!(err.contains("occupied by more than one"));
}

#[test]
fn accepts_a_complete_valid_assignment() {
    let room = Room::from_schema(&[vec![2]]);
    let pc = Precomputed::build(room, &["A".into(), "B".into()], &[], None, None, None, None);
    let mut assignment = Assignment::new();
    assignment.insert("A".to_string(), seating_types::Position::new(0, 0, 0));
    assignment.insert("B".to_string(), seating_types::Position::new(0, 0, 1));
    assert!(final_check(&pc, &students(&["A", "B"]), &assignment, &[]).is_ok());
}

#[test]
fn empty_neighbor_checks_actual_neighbor_occupancy() {
    let room = Room::from_schema(&[vec![2]]);
    let pc = Precomputed::build(room, &["A".into(), "B".into()], &[], None, None, None, None);
    let mut assignment = Assignment::new();
    assignment.insert("A".to_string(), seating_types::Position::new(0, 0, 0));
    assignment.insert("B".to_string(), seating_types::Position::new(0, 0, 1));
    let constraints = vec![ConstraintKind::EmptyNeighbor { student: "A".into() }];
    let err = final_check(&pc, &students(&["A", "B"]), &assignment, &constraints).unwrap_err();
    assert!(err.contains("empty_neighbor"));
}
