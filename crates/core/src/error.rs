use thiserror::Error;

/// Configuration errors: malformed input caught before any solver pass
/// runs. All are fatal and synchronous — raised by the translator or
/// the sanity checker, never by the solver driver.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown constraint type: {0}")]
    UnknownConstraintType(String),

    #[error("constraint references unknown student id: {0}")]
    UnknownStudentId(String),

    #[error("duplicate exact seat assignment: {0}")]
    DuplicateExactSeat(String),

    #[error("exact seat on forbidden table: {0}")]
    ExactSeatOnForbiddenTable(String),

    #[error("exact seat on forbidden seat: {0}")]
    ExactSeatOnForbiddenSeat(String),

    #[error("more students ({students}) than seats ({seats})")]
    NotEnoughSeats { students: usize, seats: usize },

    #[error("malformed seat key: {0}")]
    MalformedKey(String),
}
