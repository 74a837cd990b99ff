//! Errors that end a parse without a result.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The start rule did not match; candidate errors are in the context.
    #[error("no match")]
    NoMatch,

    /// Execution fuel exhausted (too many evaluation steps).
    #[error("runtime execution limit exceeded ({0} steps)")]
    ExecFuelExhausted(u32),

    /// Recursion limit exceeded (too many nested rule invocations or nested
    /// expression evaluations).
    #[error("runtime recursion limit exceeded ({0} levels)")]
    RecursionLimitExceeded(u32),
}
