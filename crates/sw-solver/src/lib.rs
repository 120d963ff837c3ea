//! Numerical building blocks shared by the water and brine crates.
//!
//! - `newton`: damped Newton iteration on small dense systems (nalgebra)
//! - `jacobian`: finite-difference Jacobians
//! - `scalar`: one-dimensional root finding (bracketed and free Newton, bisection)
//! - `continuation`: pseudo-arclength tracing of implicit plane curves
//!
//! All iterations are bounded; exhausting the budget yields
//! [`SolverError::ConvergenceFailed`] carrying the last iterate.

pub mod continuation;
pub mod error;
pub mod jacobian;
pub mod newton;
pub mod scalar;

pub use continuation::{ArcLengthConfig, CurveTrace, PlaneCurve, StepPolicy, StopReason, trace_curve};
pub use error::{SolverError, SolverResult};
pub use newton::{NewtonConfig, NewtonResult, newton_solve};
pub use scalar::{ScalarConfig, ScalarRoot, bisect, newton_1d, solve_bracketed};
