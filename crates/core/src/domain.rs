use std::collections::HashMap;

pub use seating_types::Position;

/// A group of adjacent seats at the same `(x, y)`. Seats on a table are
/// considered horizontally adjacent when their seat indices differ by 1.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Table {
    pub x: u32,
    pub y: u32,
    pub capacity: u32,
}

impl Table {
    pub fn seats(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.capacity).map(move |s| Position::new(self.x, self.y, s))
    }
}

/// A room built from a schema: a sequence of rows, each a sequence of
/// integers. A positive entry `c` places a capacity-`c` table at
/// `(column, row)`; a non-positive entry is a visual gap — it still
/// consumes a column slot but creates no table.
#[derive(Clone, Debug)]
pub struct Room {
    tables: Vec<Table>,
    max_x: u32,
    max_y: u32,
}

impl Room {
    pub fn from_schema(schema: &[Vec<i64>]) -> Self {
        let mut tables = Vec::new();
        let mut max_x: u32 = 0;
        let max_y = schema.len().saturating_sub(1) as u32;
        for (y, row) in schema.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                max_x = max_x.max(x as u32);
                if cell > 0 {
                    tables.push(Table {
                        x: x as u32,
                        y: y as u32,
                        capacity: cell as u32,
                    });
                }
            }
        }
        Self {
            tables,
            max_x,
            max_y,
        }
    }

    /// Builds a room of `rows` identical copies of a single row layout,
    /// the "compact mode" shorthand for a uniform classroom.
    pub fn from_compact(row: &[i64], rows: usize) -> Self {
        let schema: Vec<Vec<i64>> = (0..rows).map(|_| row.to_vec()).collect();
        Self::from_schema(&schema)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn max_x(&self) -> u32 {
        self.max_x
    }

    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    pub fn table_at(&self, x: u32, y: u32) -> Option<&Table> {
        self.tables.iter().find(|t| t.x == x && t.y == y)
    }

    pub fn capacity_by_table(&self) -> HashMap<(u32, u32), u32> {
        self.tables.iter().map(|t| ((t.x, t.y), t.capacity)).collect()
    }

    /// All seats in canonical order: `(y, x, seat)`.
    pub fn all_seats(&self) -> Vec<Position> {
        let mut tables = self.tables.clone();
        tables.sort_by_key(|t| (t.y, t.x));
        let mut seats = Vec::new();
        for t in &tables {
            seats.extend(t.seats());
        }
        seats
    }

    pub fn seats_by_table(&self) -> HashMap<(u32, u32), Vec<Position>> {
        self.tables
            .iter()
            .map(|t| ((t.x, t.y), t.seats().collect()))
            .collect()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.table_at(pos.x, pos.y)
            .map(|t| pos.seat < t.capacity)
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum Gender {
    Feminine,
    Masculine,
    #[default]
    Unknown,
}

impl Gender {
    /// Prefix-match, case-insensitive: `"f*"` is feminine, `"m*"` or
    /// `"g*"` (French "garçon") is masculine, anything else is unknown.
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Gender::Unknown;
        };
        let lower = raw.trim().to_lowercase();
        match lower.chars().next() {
            Some('f') => Gender::Feminine,
            Some('m') | Some('g') => Gender::Masculine,
            _ => Gender::Unknown,
        }
    }
}

/// A student, identified by a stable name unique within a solve.
#[derive(Clone, Debug)]
pub struct Student {
    pub name: String,
    pub gender: Gender,
}

impl Student {
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
        }
    }

    /// Converts a wire student record, normalizing its free-text gender.
    pub fn from_wire(wire: &seating_types::StudentWire) -> Self {
        Self {
            name: wire.name.clone(),
            gender: Gender::normalize(wire.gender.as_deref()),
        }
    }
}

impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Student {}

impl std::hash::Hash for Student {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Mapping student name -> seat, total over all students in a solve.
pub type Assignment = HashMap<String, Position>;

#[cfg(test)]
mod tests;
