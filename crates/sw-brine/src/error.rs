//! Brine phase-boundary errors.

use crate::batch::PointStatus;
use sw_core::CoreError;
use sw_solver::SolverError;
use sw_water::WaterError;
use thiserror::Error;

/// Result type for brine operations.
pub type BrineResult<T> = Result<T, BrineError>;

/// Errors raised by the H2O-NaCl layer.
///
/// Point-local errors (`OutOfRange`, `AboveCritical`, `Convergence`,
/// `InvalidPhase`) are recorded in a batch status array; the remaining
/// variants abort the whole call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrineError {
    #[error("{what} = {value} outside valid range [{min}, {max}]")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Temperature {t_k} K above critical temperature {tc_k} K")]
    AboveCritical { t_k: f64, tc_k: f64 },

    #[error("Convergence failed: {what}")]
    Convergence {
        what: String,
        /// Last iterate, in the layout documented by the failing operation.
        estimate: Vec<f64>,
    },

    #[error("Phase {phase} not stable at T = {t_k} K, P = {p_pa} Pa, X = {x}")]
    InvalidPhase {
        phase: &'static str,
        t_k: f64,
        p_pa: f64,
        x: f64,
    },

    #[error("Unknown equation of state: {name}")]
    UnknownVariant { name: String },

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid settings: {what}")]
    InvalidSettings { what: String },

    #[error("Water property error: {0}")]
    Water(WaterError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Core error: {0}")]
    Core(CoreError),
}

impl BrineError {
    pub(crate) fn out_of_range(what: &'static str, value: f64, min: f64, max: f64) -> Self {
        BrineError::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }

    /// True for errors that abort a whole call instead of flagging one point.
    pub fn is_fatal(&self) -> bool {
        match self {
            BrineError::UnknownVariant { .. }
            | BrineError::ShapeMismatch { .. }
            | BrineError::InvalidSettings { .. } => true,
            BrineError::Water(WaterError::UnknownVariant { .. }) => true,
            _ => false,
        }
    }

    /// Status recorded for a point that failed with this error.
    ///
    /// Fatal errors never reach a status array; they report `OutOfRange`.
    pub fn status(&self) -> PointStatus {
        match self {
            BrineError::OutOfRange { .. } => PointStatus::OutOfRange,
            BrineError::AboveCritical { .. } => PointStatus::AboveCritical,
            BrineError::Convergence { .. } => PointStatus::Convergence,
            BrineError::InvalidPhase { .. } => PointStatus::InvalidPhase,
            BrineError::Water(err) => match err {
                WaterError::AboveCritical { .. } => PointStatus::AboveCritical,
                WaterError::ConvergenceFailed { .. } => PointStatus::Convergence,
                WaterError::Solver(e) => solver_status(e),
                _ => PointStatus::OutOfRange,
            },
            BrineError::Solver(e) => solver_status(e),
            BrineError::UnknownVariant { .. }
            | BrineError::ShapeMismatch { .. }
            | BrineError::InvalidSettings { .. }
            | BrineError::Core(_) => PointStatus::OutOfRange,
        }
    }
}

fn solver_status(err: &SolverError) -> PointStatus {
    match err {
        SolverError::InvalidArg { .. } => PointStatus::OutOfRange,
        SolverError::ConvergenceFailed { .. } | SolverError::Numeric { .. } => {
            PointStatus::Convergence
        }
    }
}

impl From<WaterError> for BrineError {
    fn from(err: WaterError) -> Self {
        match err {
            WaterError::UnknownVariant { name } => BrineError::UnknownVariant { name },
            other => BrineError::Water(other),
        }
    }
}

impl From<CoreError> for BrineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ShapeMismatch {
                what,
                expected,
                found,
            } => BrineError::ShapeMismatch {
                what,
                expected,
                found,
            },
            other => BrineError::Core(other),
        }
    }
}

impl From<BrineError> for CoreError {
    fn from(err: BrineError) -> Self {
        match err {
            BrineError::OutOfRange { what, .. } => CoreError::InvalidArg { what },
            BrineError::AboveCritical { .. } => CoreError::InvalidArg {
                what: "temperature above critical point",
            },
            BrineError::Convergence { .. } => CoreError::Invariant {
                what: "brine solve convergence",
            },
            BrineError::InvalidPhase { .. } => CoreError::InvalidArg {
                what: "phase not stable at state",
            },
            BrineError::UnknownVariant { .. } => CoreError::InvalidArg {
                what: "equation of state name",
            },
            BrineError::ShapeMismatch {
                what,
                expected,
                found,
            } => CoreError::ShapeMismatch {
                what,
                expected,
                found,
            },
            BrineError::InvalidSettings { .. } => CoreError::InvalidArg {
                what: "solver settings",
            },
            BrineError::Water(e) => e.into(),
            BrineError::Solver(e) => e.into(),
            BrineError::Core(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_classification() {
        assert!(BrineError::UnknownVariant { name: "X".into() }.is_fatal());
        assert!(
            BrineError::ShapeMismatch {
                what: "pressure",
                expected: 2,
                found: 3
            }
            .is_fatal()
        );
        assert!(!BrineError::out_of_range("temperature [K]", 1.0, 2.0, 3.0).is_fatal());
        let water: BrineError = WaterError::UnknownVariant { name: "Y".into() }.into();
        assert!(matches!(water, BrineError::UnknownVariant { .. }));
        assert!(water.is_fatal());
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            BrineError::out_of_range("t", 0.0, 1.0, 2.0).status(),
            PointStatus::OutOfRange
        );
        let err = BrineError::Convergence {
            what: "critical".into(),
            estimate: vec![1.0],
        };
        assert_eq!(err.status(), PointStatus::Convergence);
        let err: BrineError = WaterError::AboveCritical {
            t_k: 700.0,
            tc_k: 647.096,
        }
        .into();
        assert_eq!(err.status(), PointStatus::AboveCritical);
        let err: BrineError = SolverError::InvalidArg {
            what: "bracket".into(),
        }
        .into();
        assert_eq!(err.status(), PointStatus::OutOfRange);
    }

    #[test]
    fn shape_mismatch_from_core() {
        let err: BrineError = sw_core::ensure_same_len("x", 2, 1).unwrap_err().into();
        assert!(matches!(err, BrineError::ShapeMismatch { expected: 2, .. }));
        let back: CoreError = err.into();
        assert!(matches!(back, CoreError::ShapeMismatch { found: 1, .. }));
    }
}
