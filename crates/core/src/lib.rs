//! Domain model, constraint taxonomy, translator, pre-computation and
//! validation for the seating solver. Solver-agnostic: nothing here
//! builds or runs a CP-SAT-style model — that lives in `seating-solver`.

pub mod constraint;
pub mod domain;
pub mod error;
pub mod objectives;
pub mod precompute;
pub mod registry;
pub mod sanity;
pub mod validate;

pub use constraint::ConstraintKind;
pub use domain::{Assignment, Gender, Room, Student, Table};
pub use error::ConfigError;
pub use objectives::Objectives;
pub use precompute::{Precomputed, RowOrder};
