use super::*;
use crate::domain::Room;
use crate::precompute::Precomputed;
use seating_types::Position;

#[test]
fn isolated_seat_with_no_occupied_neighbor_counts_as_isolated() {
    let room = Room::from_schema(&[vec![2, 2]]);
    let pc = Precomputed::build(room, &["A".into()], &[], None, None, None, None);
    let students = vec![Student::new("A", Gender::Unknown)];
    let mut assignment = Assignment::new();
    assignment.insert("A".to_string(), Position::new(0, 0, 0));
    let obj = compute(&pc, &students, &assignment);
    assert_eq!(obj.nb_isolated, 1);
    assert_eq!(obj.nb_same, 0);
}

#[test]
fn adjacent_same_gender_pair_counts_toward_nb_same() {
    let room = Room::from_schema(&[vec![2]]);
    let pc = Precomputed::build(room, &["A".into(), "B".into()], &[], None, None, None, None);
    let students = vec![
        Student::new("A", Gender::Feminine),
        Student::new("B", Gender::Feminine),
    ];
    let mut assignment = Assignment::new();
    assignment.insert("A".to_string(), Position::new(0, 0, 0));
    assignment.insert("B".to_string(), Position::new(0, 0, 1));
    let obj = compute(&pc, &students, &assignment);
    assert_eq!(obj.nb_isolated, 0);
    assert_eq!(obj.nb_same, 1);
}

#[test]
fn sum_y_adds_row_indices_across_all_students() {
    let room = Room::from_schema(&[vec![2], vec![2]]);
    let pc = Precomputed::build(room, &["A".into(), "B".into()], &[], None, None, None, None);
    let students = vec![
        Student::new("A", Gender::Unknown),
        Student::new("B", Gender::Unknown),
    ];
    let mut assignment = Assignment::new();
    assignment.insert("A".to_string(), Position::new(0, 0, 0));
    assignment.insert("B".to_string(), Position::new(0, 1, 0));
    let obj = compute(&pc, &students, &assignment);
    assert_eq!(obj.sum_y, 1);
}
