use super::*;

#[test]
fn rejects_more_students_than_seats() {
    let room = Room::from_schema(&[vec![2]]);
    let err = preflight(&room, 3, &[]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::NotEnoughSeats {
            students: 3,
            seats: 2
        }
    );
}

#[test]
fn rejects_conflicting_exact_seats() {
    let room = Room::from_schema(&[vec![2]]);
    let pos = Position::new(0, 0, 0);
    let constraints = vec![
        ConstraintKind::ExactSeat { student: "A".into(), pos },
        ConstraintKind::ExactSeat { student: "B".into(), pos },
    ];
    let err = preflight(&room, 2, &constraints).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateExactSeat(pos.key()));
}

#[test]
fn rejects_exact_seat_on_forbidden_table() {
    let room = Room::from_schema(&[vec![2]]);
    let pos = Position::new(0, 0, 0);
    let constraints = vec![
        ConstraintKind::ForbidTable { x: 0, y: 0 },
        ConstraintKind::ExactSeat { student: "A".into(), pos },
    ];
    let err = preflight(&room, 1, &constraints).unwrap_err();
    assert_eq!(err, ConfigError::ExactSeatOnForbiddenTable(pos.key()));
}

#[test]
fn accepts_a_consistent_configuration() {
    let room = Room::from_schema(&[vec![2, 3]]);
    let constraints = vec![ConstraintKind::ExactSeat {
        student: "A".into(),
        pos: Position::new(0, 0, 0),
    }];
    assert!(preflight(&room, 2, &constraints).is_ok());
}
