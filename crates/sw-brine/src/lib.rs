//! sw-brine: phase boundaries and properties of H2O-NaCl.
//!
//! Provides:
//! - `BinarySaltSystem`: critical curve, VLH three-phase curve,
//!   halite-saturated vapor, halite liquidus and vapor-liquid coexistence on
//!   top of any `sw-water` formulation
//! - Isobaric vapor-liquid sections traced by pseudo-arclength continuation
//! - Liquid, vapor and halite density and enthalpy at (T, P, X)
//! - Phase-boundary curves, surfaces and a complete phase diagram
//! - Batch evaluation in parallel (rayon) or serially, with per-point status
//!
//! # Architecture
//!
//! The low-level correlations (`halite`, `liquidus`, `vlh`, `vh`,
//! `properties`) work in °C, bar and mole fraction. `BinarySaltSystem` wraps
//! them behind an SI interface (K, Pa), validates every input range and owns
//! the iterative solves: Newton in a deformed composition for the critical
//! curve, arclength continuation for VL sections.
//!
//! # Example
//!
//! ```
//! use sw_brine::{BinarySaltSystem, BrinePhase, Composition, SolverSettings};
//!
//! let system = BinarySaltSystem::from_name("IAPWS95", SolverSettings::default()).unwrap();
//! let x = Composition::from_mass_fraction(0.1).unwrap();
//! let brine = system
//!     .property_at_state(298.15, 1e5, x, BrinePhase::Liquid)
//!     .unwrap();
//! assert!(brine.density_kg_m3() > 1050.0);
//! ```

pub mod batch;
pub mod composition;
pub mod constants;
pub mod critical;
pub mod curve;
pub mod diagram;
pub mod error;
pub mod halite;
pub mod liquidus;
pub mod phase;
pub mod properties;
pub mod settings;
pub mod surface;
pub mod sweeps;
pub mod system;
mod trace;
pub mod vapor_liquid;
pub mod vh;
pub mod vlh;

pub use batch::{BatchResult, EvalMode, PointOutcome, PointStatus};
pub use composition::{Composition, CompositionUnit, DeformedComposition};
pub use critical::{CriticalCurve, CriticalPoint};
pub use curve::{BoundaryKind, BoundaryPoint, PhaseBoundaryCurve};
pub use diagram::PhaseDiagram;
pub use error::{BrineError, BrineResult};
pub use phase::{BrinePhase, PhaseRegion};
pub use settings::{ContinuationSettings, CriticalSettings, DiagramSettings, SolverSettings};
pub use surface::PhaseBoundarySurface;
pub use sweeps::{SweepDefinition, SweepType};
pub use system::{BinarySaltSystem, BrineState};
pub use vapor_liquid::VaporLiquidBounds;
pub use sw_water::EosKind;
