//! Thermodynamic state definitions.

use crate::error::{WaterError, WaterResult};
use crate::phase::WaterPhase;
use sw_core::units::{Density, Pressure, Temperature};

/// Specific enthalpy [J/kg].
///
/// Not part of uom's standard set, so we use f64 with clear documentation.
pub type SpecEnthalpy = f64;

/// Immutable result of a property query at (T, P).
///
/// Generic over the phase tag so brine states reuse the same shape.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermodynamicState<P = WaterPhase> {
    t: Temperature,
    p: Pressure,
    rho: Density,
    h: SpecEnthalpy,
    phase: P,
}

impl<P: Copy> ThermodynamicState<P> {
    /// Create a state, validating that every quantity is finite and
    /// temperature, pressure and density are positive.
    pub fn new(
        t: Temperature,
        p: Pressure,
        rho: Density,
        h: SpecEnthalpy,
        phase: P,
    ) -> WaterResult<Self> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(WaterError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(WaterError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        if !rho.value.is_finite() || rho.value <= 0.0 {
            return Err(WaterError::NonPhysical {
                what: "density must be positive and finite",
            });
        }
        if !h.is_finite() {
            return Err(WaterError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(Self {
            t,
            p,
            rho,
            h,
            phase,
        })
    }

    pub fn temperature(&self) -> Temperature {
        self.t
    }

    pub fn pressure(&self) -> Pressure {
        self.p
    }

    pub fn density(&self) -> Density {
        self.rho
    }

    pub fn enthalpy(&self) -> SpecEnthalpy {
        self.h
    }

    pub fn phase(&self) -> P {
        self.phase
    }

    pub fn temperature_k(&self) -> f64 {
        self.t.value
    }

    pub fn pressure_pa(&self) -> f64 {
        self.p.value
    }

    pub fn density_kg_m3(&self) -> f64 {
        self.rho.value
    }

    /// Same state with a different phase tag.
    pub fn with_phase<Q: Copy>(&self, phase: Q) -> ThermodynamicState<Q> {
        ThermodynamicState {
            t: self.t,
            p: self.p,
            rho: self.rho,
            h: self.h,
            phase,
        }
    }
}

/// Coexisting liquid and vapor on the boiling curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaturationState {
    pub t: Temperature,
    pub p: Pressure,
    pub rho_liquid: Density,
    pub rho_vapor: Density,
    pub h_liquid: SpecEnthalpy,
    pub h_vapor: SpecEnthalpy,
}

/// Critical point of a formulation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalPoint {
    pub t: Temperature,
    pub p: Pressure,
    pub rho: Density,
}
