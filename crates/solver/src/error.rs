use thiserror::Error;

use seating_core::ConfigError;

/// Errors a solve can fail with. `Config` covers everything caught before
/// a model is ever built; the rest are raised by the lexicographic
/// driver or by the post-solve validator.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No satisfying assignment exists for at least one lexicographic
    /// pass. Carries the underlying solver engine's message.
    #[error("no feasible assignment satisfies the given constraints: {0}")]
    Infeasible(String),

    /// The engine returned no feasible incumbent before its share of the
    /// time budget ran out. Distinguished from plain infeasibility per
    /// the error taxonomy, even though the current engine integration
    /// reports both through the same channel today.
    #[error("solver exhausted its time budget without a feasible solution")]
    BudgetExhausted,

    /// The redundant post-solve check rejected the assignment the
    /// driver returned — upgraded to an infeasibility per the
    /// propagation policy, not surfaced as a distinct status.
    #[error("final validation rejected the returned assignment: {0}")]
    FinalCheckFailed(String),
}
