use super::*;
use crate::domain::Room;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("s{i}")).collect()
}

#[test]
fn adjacency_edges_only_connect_consecutive_seats_on_same_table() {
    let room = Room::from_schema(&[vec![3]]);
    let pc = Precomputed::build(room, &names(0), &[], None, None, None, None);
    assert_eq!(pc.edges.len(), 2);
    assert!(pc.edges.contains(&(0, 1)));
    assert!(pc.edges.contains(&(1, 2)));
}

#[test]
fn natural_row_order_ranks_by_y_ascending() {
    let room = Room::from_schema(&[vec![2], vec![2], vec![2]]);
    let pc = Precomputed::build(room, &names(0), &[], None, None, None, None);
    let order = pc.row_order(Metric::Grid);
    assert!(order.in_front(0, 0, 1));
    assert!(!order.in_front(0, 1, 1));
    assert!(order.in_back(0, 2, 1));
    assert!(!order.in_back(0, 0, 1));
}

#[test]
fn visual_row_map_overrides_natural_ordering() {
    let room = Room::from_schema(&[vec![2], vec![2]]);
    let mut map = HashMap::new();
    // Swap visual order relative to natural (y=1 is visually in front).
    map.insert((0u32, 0u32), 1i64);
    map.insert((0u32, 1u32), 0i64);
    let pc = Precomputed::build(room, &names(0), &[], None, Some(map), None, None);
    let order = pc.row_order(Metric::Grid);
    assert!(order.in_front(0, 1, 1));
    assert!(!order.in_front(0, 0, 1));
}

#[test]
fn grid_distance_is_manhattan_on_table_coordinates() {
    let room = Room::from_schema(&[vec![2, 2], vec![2, 2]]);
    let pc = Precomputed::build(room, &names(0), &[], None, None, None, None);
    let a = Position::new(0, 0, 0);
    let b = Position::new(1, 1, 0);
    assert_eq!(pc.distance(a, b, Metric::Grid), 2.0);
}
