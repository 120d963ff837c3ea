//! Error types for solver operations.

use sw_core::CoreError;
use thiserror::Error;

/// Errors raised by the iterative solvers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Convergence failed: {what} after {iterations} iterations")]
    ConvergenceFailed {
        what: String,
        iterations: usize,
        /// Last iterate reached before giving up.
        estimate: Vec<f64>,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    /// Last iterate of a failed iteration, if any.
    pub fn estimate(&self) -> Option<&[f64]> {
        match self {
            SolverError::ConvergenceFailed { estimate, .. } => Some(estimate),
            _ => None,
        }
    }
}

impl From<SolverError> for CoreError {
    fn from(e: SolverError) -> Self {
        match e {
            SolverError::ConvergenceFailed { .. } => CoreError::Invariant {
                what: "solver convergence",
            },
            SolverError::InvalidArg { .. } => CoreError::InvalidArg {
                what: "solver argument",
            },
            SolverError::Numeric { .. } => CoreError::Invariant {
                what: "solver numerics",
            },
        }
    }
}
