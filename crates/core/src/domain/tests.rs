use super::*;

#[test]
fn schema_builds_tables_and_skips_gaps() {
    let room = Room::from_schema(&[vec![2, 0, 3], vec![-1, 4, 0]]);
    assert_eq!(room.tables().len(), 3);
    assert_eq!(room.table_at(0, 0).unwrap().capacity, 2);
    assert_eq!(room.table_at(2, 0).unwrap().capacity, 3);
    assert!(room.table_at(1, 0).is_none());
    assert_eq!(room.table_at(1, 1).unwrap().capacity, 4);
    assert_eq!(room.max_x(), 2);
    assert_eq!(room.max_y(), 1);
}

#[test]
fn compact_mode_repeats_a_single_row() {
    let room = Room::from_compact(&[2, 3, 2], 3);
    assert_eq!(room.tables().len(), 9);
    assert_eq!(room.max_y(), 2);
}

#[test]
fn seats_are_ordered_by_row_then_column_then_seat() {
    let room = Room::from_schema(&[vec![2, 3], vec![2]]);
    let seats = room.all_seats();
    let ordered: Vec<(u32, u32, u32)> = seats.iter().map(|p| (p.y, p.x, p.seat)).collect();
    let mut sorted = ordered.clone();
    sorted.sort();
    assert_eq!(ordered, sorted);
}

#[test]
fn gender_prefix_match_is_case_insensitive() {
    assert_eq!(Gender::normalize(Some("F")), Gender::Feminine);
    assert_eq!(Gender::normalize(Some("fille")), Gender::Feminine);
    assert_eq!(Gender::normalize(Some("M")), Gender::Masculine);
    assert_eq!(Gender::normalize(Some("garcon")), Gender::Masculine);
    assert_eq!(Gender::normalize(Some("G")), Gender::Masculine);
    assert_eq!(Gender::normalize(Some("x")), Gender::Unknown);
    assert_eq!(Gender::normalize(None), Gender::Unknown);
}

#[test]
fn student_identity_is_name_only() {
    let a = Student::new("Martin", Gender::Unknown);
    let b = Student::new("Martin", Gender::Feminine);
    assert_eq!(a, b);
}
