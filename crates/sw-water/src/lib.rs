//! sw-water: pure-water equations of state for saltwater.
//!
//! Provides:
//! - `WaterEos` trait: density, enthalpy and phase at (T, P), boiling curve,
//!   saturation states and critical point
//! - IAPWS-95 (`Iapws95`) with Maxwell or auxiliary boiling curve
//! - Industrial region formulation (`Iaps84`, IF97 region equations)
//! - `EosKind` selector and the `PureWater` enum wrapper
//!
//! # Example
//!
//! ```
//! use sw_core::units::{k, pa};
//! use sw_water::{PureWater, WaterEos, WaterPhase};
//!
//! let water = PureWater::from_name("IAPWS95").unwrap();
//! let state = water.evaluate(k(300.0), pa(101_325.0)).unwrap();
//! assert_eq!(state.phase(), WaterPhase::Liquid);
//! assert!((state.density_kg_m3() - 996.5).abs() < 0.1);
//! ```

pub mod auxiliary;
mod branch;
mod density;
pub mod envelope;
pub mod eos;
pub mod error;
pub mod helmholtz;
pub mod iaps84;
pub mod iapws95;
pub mod model;
pub mod phase;
pub mod regions;
pub mod state;

pub use envelope::ValidityEnvelope;
pub use eos::{EosKind, PureWater};
pub use error::{WaterError, WaterResult};
pub use iaps84::Iaps84;
pub use iapws95::{Iapws95, SaturationRoute};
pub use model::WaterEos;
pub use phase::{FluidBranch, WaterPhase};
pub use state::{CriticalPoint, SaturationState, SpecEnthalpy, ThermodynamicState};
