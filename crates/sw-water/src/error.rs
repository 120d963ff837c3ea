//! Pure-water property errors.

use sw_core::CoreError;
use sw_solver::SolverError;
use thiserror::Error;

/// Result type for pure-water operations.
pub type WaterResult<T> = Result<T, WaterError>;

/// Errors that can occur during pure-water property calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaterError {
    /// Input outside the formulation's validity envelope.
    #[error("{what} = {value} outside valid range [{min}, {max}]")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Saturation requested above the critical temperature.
    #[error("Temperature {t_k} K above critical temperature {tc_k} K")]
    AboveCritical { t_k: f64, tc_k: f64 },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Convergence failure (density root, saturation state).
    #[error("Convergence failed for {what}")]
    ConvergenceFailed { what: &'static str },

    /// Unknown formulation selector.
    #[error("Unknown water equation of state: {name}")]
    UnknownVariant { name: String },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

impl From<WaterError> for CoreError {
    fn from(err: WaterError) -> Self {
        match err {
            WaterError::OutOfRange { what, .. } => CoreError::InvalidArg { what },
            WaterError::AboveCritical { .. } => CoreError::InvalidArg {
                what: "temperature above critical point",
            },
            WaterError::NonPhysical { what } => CoreError::Invariant { what },
            WaterError::ConvergenceFailed { what } => CoreError::Invariant { what },
            WaterError::UnknownVariant { .. } => CoreError::InvalidArg {
                what: "equation of state name",
            },
            WaterError::Solver(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = WaterError::OutOfRange {
            what: "temperature",
            value: 1000.0,
            min: 273.15,
            max: 973.15,
        };
        let msg = err.to_string();
        assert!(msg.contains("temperature") && msg.contains("973.15"));

        let err = WaterError::UnknownVariant {
            name: "IAPWS2030".into(),
        };
        assert!(err.to_string().contains("IAPWS2030"));
    }

    #[test]
    fn error_to_core_error() {
        let err: CoreError = WaterError::NonPhysical { what: "density" }.into();
        assert!(matches!(err, CoreError::Invariant { what: "density" }));
    }
}
