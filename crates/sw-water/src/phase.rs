//! Phase tags for pure water.

use std::fmt;

/// Phase of a pure-water state.
///
/// Ids are stable: they are what batch outputs and exporters store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WaterPhase {
    Liquid,
    Vapor,
    SupercriticalFluid,
    SupercriticalLiquid,
    SupercriticalVapor,
    /// On the boiling curve.
    TwoPhase,
    CriticalPoint,
}

impl WaterPhase {
    pub const ALL: [WaterPhase; 7] = [
        WaterPhase::Liquid,
        WaterPhase::Vapor,
        WaterPhase::SupercriticalFluid,
        WaterPhase::SupercriticalLiquid,
        WaterPhase::SupercriticalVapor,
        WaterPhase::TwoPhase,
        WaterPhase::CriticalPoint,
    ];

    pub fn id(self) -> u8 {
        match self {
            WaterPhase::Liquid => 0,
            WaterPhase::Vapor => 1,
            WaterPhase::SupercriticalFluid => 2,
            WaterPhase::SupercriticalLiquid => 3,
            WaterPhase::SupercriticalVapor => 4,
            WaterPhase::TwoPhase => 5,
            WaterPhase::CriticalPoint => 6,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            WaterPhase::Liquid => "Liquid",
            WaterPhase::Vapor => "Vapor",
            WaterPhase::SupercriticalFluid => "Supercritical fluid",
            WaterPhase::SupercriticalLiquid => "Supercritical liquid",
            WaterPhase::SupercriticalVapor => "Supercritical vapor",
            WaterPhase::TwoPhase => "Two phase",
            WaterPhase::CriticalPoint => "Critical point",
        }
    }
}

impl fmt::Display for WaterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which density root to follow when a state may be metastable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FluidBranch {
    Liquid,
    Vapor,
}

/// Relative pressure window treated as lying on the boiling curve.
pub(crate) const SATURATION_REL_TOL: f64 = 1e-9;

/// Phase at (T, P) given the critical point and, below Tc, the boiling pressure.
pub(crate) fn classify(t_k: f64, p_pa: f64, tc_k: f64, pc_pa: f64, psat_pa: f64) -> WaterPhase {
    if t_k == tc_k && p_pa == pc_pa {
        return WaterPhase::CriticalPoint;
    }
    if t_k >= tc_k {
        return if p_pa >= pc_pa {
            WaterPhase::SupercriticalFluid
        } else {
            WaterPhase::SupercriticalVapor
        };
    }
    if p_pa >= pc_pa {
        return WaterPhase::SupercriticalLiquid;
    }
    if (p_pa - psat_pa).abs() <= SATURATION_REL_TOL * psat_pa {
        WaterPhase::TwoPhase
    } else if p_pa > psat_pa {
        WaterPhase::Liquid
    } else {
        WaterPhase::Vapor
    }
}
