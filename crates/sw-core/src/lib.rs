//! sw-core: stable foundation for the saltwater workspace.
//!
//! Contains:
//! - units (uom SI types + constructors, bar/°C helpers)
//! - numeric (grids, monotonicity and length checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
