use super::*;

fn student(id: &str, name: &str) -> StudentWire {
    StudentWire {
        id: id.to_string(),
        name: name.to_string(),
        gender: None,
    }
}

fn wire(kind: &str, fields: serde_json::Value) -> ConstraintWire {
    ConstraintWire {
        kind: kind.to_string(),
        fields,
    }
}

#[test]
fn resolves_student_ids_through_the_roster() {
    let students = vec![student("1", "Martin")];
    let descriptors = vec![wire(
        "front_rows",
        serde_json::json!({ "student": "1", "k": 1 }),
    )];
    let out = translate(&students, &descriptors, &[], &HashMap::new(), false).unwrap();
    assert_eq!(out.len(), 1);
    match &out[0] {
        ConstraintKind::FrontRows { student, k, .. } => {
            assert_eq!(student, "Martin");
            assert_eq!(*k, 1);
        }
        other => panic!("unexpected constraint: {other:?}"),
    }
}

#[test]
fn unknown_student_id_is_a_configuration_error() {
    let students = vec![student("1", "Martin")];
    let descriptors = vec![wire("solo_table", serde_json::json!({ "student": "99" }))];
    let err = translate(&students, &descriptors, &[], &HashMap::new(), false).unwrap_err();
    assert_eq!(err, ConfigError::UnknownStudentId("99".into()));
}

#[test]
fn unknown_constraint_type_is_a_configuration_error() {
    let students = vec![student("1", "Martin")];
    let descriptors = vec![wire("levitate", serde_json::json!({}))];
    let err = translate(&students, &descriptors, &[], &HashMap::new(), false).unwrap_err();
    assert_eq!(err, ConfigError::UnknownConstraintType("levitate".into()));
}

#[test]
fn internal_markers_are_skipped() {
    let students = vec![student("1", "Martin")];
    let descriptors = vec![wire("_batch_marker_", serde_json::json!({}))];
    let out = translate(&students, &descriptors, &[], &HashMap::new(), false).unwrap();
    assert!(out.is_empty());
}

#[test]
fn forbidden_keys_become_forbid_seat_and_are_deduplicated() {
    let students = vec![student("1", "Martin")];
    let descriptors = vec![wire(
        "forbid_seat",
        serde_json::json!({ "key": "1,0,2" }),
    )];
    let out = translate(
        &students,
        &descriptors,
        &["1,0,2".to_string(), "0,0,0".to_string()],
        &HashMap::new(),
        false,
    )
    .unwrap();
    let forbid_seats: Vec<_> = out
        .iter()
        .filter(|c| matches!(c, ConstraintKind::ForbidSeat { .. }))
        .collect();
    assert_eq!(forbid_seats.len(), 2);
}

#[test]
fn lock_placements_emits_exact_seat_once_per_student() {
    let students = vec![student("1", "Martin")];
    let mut placements = HashMap::new();
    placements.insert("0,0,0".to_string(), "1".to_string());
    let descriptors = vec![wire(
        "exact_seat",
        serde_json::json!({ "student": "1", "key": "0,0,0" }),
    )];
    let out = translate(&students, &descriptors, &[], &placements, true).unwrap();
    let exact_seats: Vec<_> = out
        .iter()
        .filter(|c| matches!(c, ConstraintKind::ExactSeat { .. }))
        .collect();
    assert_eq!(exact_seats.len(), 1);
}

#[test]
fn exact_seat_accepts_separate_x_y_s_fields() {
    let students = vec![student("1", "Martin")];
    let descriptors = vec![wire(
        "exact_seat",
        serde_json::json!({ "student": "1", "x": 0, "y": 1, "s": 2 }),
    )];
    let out = translate(&students, &descriptors, &[], &HashMap::new(), false).unwrap();
    match &out[0] {
        ConstraintKind::ExactSeat { pos, .. } => assert_eq!(*pos, Position::new(0, 1, 2)),
        other => panic!("unexpected constraint: {other:?}"),
    }
}
