use std::collections::HashMap;

use seating_types::{Geometry, Metric, Position};

use crate::constraint::ConstraintKind;
use crate::domain::Room;

/// The row-ordering scheme resolved for a single `FrontRows`/`BackRows`
/// evaluation, per the priority chain in the domain pre-computation
/// design: a caller-supplied per-table visual index wins over a
/// per-row visual permutation, which wins over pixel-geometry ordering,
/// which falls back to natural `y` ordering.
pub enum RowOrder {
    /// `(x, y) -> visual_row_index`, taken verbatim from the caller.
    PerTable(HashMap<(u32, u32), i64>),
    /// `y -> dense front-to-back rank` plus the highest rank present.
    PerRow(HashMap<u32, u32>, u32),
}

impl RowOrder {
    fn from_row_values(values: impl Iterator<Item = (u32, i64)>) -> Self {
        let mut by_y: HashMap<u32, i64> = HashMap::new();
        for (y, v) in values {
            by_y.entry(y).or_insert(v);
        }
        let mut ys: Vec<u32> = by_y.keys().copied().collect();
        ys.sort_by_key(|y| by_y[y]);
        let max_rank = ys.len().saturating_sub(1) as u32;
        let rank = ys.into_iter().enumerate().map(|(r, y)| (y, r as u32)).collect();
        RowOrder::PerRow(rank, max_rank)
    }

    fn natural(room: &Room) -> Self {
        Self::from_row_values((0..=room.max_y()).map(|y| (y, y as i64)))
    }

    /// `true` if the table at `(x, y)` lies within the first `k` rows
    /// under this ordering.
    pub fn in_front(&self, x: u32, y: u32, k: u32) -> bool {
        match self {
            RowOrder::PerTable(map) => map
                .get(&(x, y))
                .map(|&idx| idx >= 0 && (idx as u32) < k)
                .unwrap_or(false),
            RowOrder::PerRow(rank, _) => rank.get(&y).map(|&r| r < k).unwrap_or(false),
        }
    }

    /// `true` if the table at `(x, y)` lies within the last `k` rows.
    pub fn in_back(&self, x: u32, y: u32, k: u32) -> bool {
        match self {
            RowOrder::PerTable(map) => {
                let max_idx = map.values().copied().max().unwrap_or(0);
                map.get(&(x, y))
                    .map(|&idx| idx >= 0 && idx >= (max_idx - k as i64 + 1).max(0))
                    .unwrap_or(false)
            }
            RowOrder::PerRow(rank, max_rank) => rank.get(&y).map(|&r| {
                let threshold = (*max_rank as i64 - k as i64 + 1).max(0);
                r as i64 >= threshold
            }).unwrap_or(false),
        }
    }
}

/// Everything derived once from a room, a roster and the resolved
/// constraint set: the canonical seat order, same-table adjacency
/// edges, per-student allowed-seat domains, and the geometry needed to
/// resolve `px`-metric constraints and the row-sum objective.
pub struct Precomputed {
    pub room: Room,
    pub seats: Vec<Position>,
    pub seat_index: HashMap<Position, usize>,
    /// Undirected same-table adjacency edges `(i, j)`, `i < j`, indices
    /// into `seats`.
    pub edges: Vec<(usize, usize)>,
    /// `student name -> bitset over seats`, `true` meaning allowed.
    pub domains: HashMap<String, Vec<bool>>,
    visual_row_order: Option<Vec<i64>>,
    visual_row_map: Option<HashMap<(u32, u32), i64>>,
    geometry: Option<Geometry>,
    table_offsets: Option<HashMap<(u32, u32), (f64, f64)>>,
}

impl Precomputed {
    pub fn build(
        room: Room,
        student_names: &[String],
        constraints: &[ConstraintKind],
        visual_row_order: Option<Vec<i64>>,
        visual_row_map: Option<HashMap<(u32, u32), i64>>,
        geometry: Option<Geometry>,
        table_offsets: Option<HashMap<(u32, u32), (f64, f64)>>,
    ) -> Self {
        let seats = room.all_seats();
        let seat_index = seats
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, i))
            .collect::<HashMap<_, _>>();
        let edges = adjacency_edges(&room, &seat_index);

        let mut pc = Precomputed {
            room,
            seats,
            seat_index,
            edges,
            domains: HashMap::new(),
            visual_row_order,
            visual_row_map,
            geometry,
            table_offsets,
        };
        pc.domains = pc.build_domains(student_names, constraints);
        pc
    }

    fn build_domains(
        &self,
        student_names: &[String],
        constraints: &[ConstraintKind],
    ) -> HashMap<String, Vec<bool>> {
        let mut domains: HashMap<String, Vec<bool>> = student_names
            .iter()
            .map(|n| (n.clone(), vec![true; self.seats.len()]))
            .collect();

        for c in constraints {
            let Some(names) = c.domain_subjects(student_names) else {
                continue;
            };
            for name in names {
                let Some(filter) = c.allowed(&name, self) else {
                    continue;
                };
                if let Some(bits) = domains.get_mut(&name) {
                    for (i, pos) in self.seats.iter().enumerate() {
                        if !filter.contains(pos) {
                            bits[i] = false;
                        }
                    }
                }
            }
        }
        domains
    }

    pub fn row_order(&self, metric: Metric) -> RowOrder {
        if let Some(map) = &self.visual_row_map {
            return RowOrder::PerTable(map.clone());
        }
        if let Some(order) = &self.visual_row_order {
            return RowOrder::from_row_values(order.iter().enumerate().map(|(rank, &y)| (y as u32, rank as i64)));
        }
        if matches!(metric, Metric::Px) && self.geometry.is_some() {
            let mut min_py: HashMap<u32, f64> = HashMap::new();
            for t in self.room.tables() {
                let (_, py) = self.px_table(t.x, t.y);
                min_py
                    .entry(t.y)
                    .and_modify(|v| *v = v.min(py))
                    .or_insert(py);
            }
            return RowOrder::from_row_values(min_py.into_iter().map(|(y, py)| (y, (py * 1000.0) as i64)));
        }
        RowOrder::natural(&self.room)
    }

    fn px_table(&self, x: u32, y: u32) -> (f64, f64) {
        let g = self.geometry.unwrap_or_default();
        let (dx, dy) = self
            .table_offsets
            .as_ref()
            .and_then(|m| m.get(&(x, y)).copied())
            .unwrap_or((0.0, 0.0));
        (
            g.table_pitch_x * x as f64 + g.seat_offset_x + dx,
            g.table_pitch_y * y as f64 + g.seat_offset_y + dy,
        )
    }

    pub fn px(&self, pos: Position) -> (f64, f64) {
        let g = self.geometry.unwrap_or_default();
        let (tx, ty) = self.px_table(pos.x, pos.y);
        (tx + g.seat_pitch_x * pos.seat as f64, ty)
    }

    pub fn distance(&self, a: Position, b: Position, metric: Metric) -> f64 {
        match metric {
            Metric::Grid => (a.x as f64 - b.x as f64).abs() + (a.y as f64 - b.y as f64).abs(),
            Metric::Px => {
                let (ax, ay) = self.px(a);
                let (bx, by) = self.px(b);
                (ax - bx).abs() + (ay - by).abs()
            }
        }
    }

    pub fn neighbors(&self, seat_idx: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter_map(|&(i, j)| {
                if i == seat_idx {
                    Some(j)
                } else if j == seat_idx {
                    Some(i)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn index_of(&self, pos: Position) -> Option<usize> {
        self.seat_index.get(&pos).copied()
    }

    /// Whether a pixel geometry was supplied — callers use this to
    /// decide between `y(i)` and `py(i)` for the row-sum objective.
    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}

fn adjacency_edges(room: &Room, seat_index: &HashMap<Position, usize>) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for t in room.tables() {
        let mut seats: Vec<Position> = t.seats().collect();
        seats.sort_by_key(|p| p.seat);
        for w in seats.windows(2) {
            let i = seat_index[&w[0]];
            let j = seat_index[&w[1]];
            edges.push((i.min(j), i.max(j)));
        }
    }
    edges
}

#[cfg(test)]
mod tests;
