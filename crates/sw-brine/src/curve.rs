//! Phase-boundary curves: ordered (T, P, X) points of one branch.

use crate::composition::{CompositionUnit, mass_fraction_of, mole_fraction_of};
use crate::error::{BrineError, BrineResult};
use crate::phase::BrinePhase;
use std::fmt;

/// Which boundary a curve belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryKind {
    /// One branch of an isobaric vapor-liquid section.
    VaporLiquid(BrinePhase),
    /// One phase of the three-phase curve.
    VaporLiquidHalite(BrinePhase),
    /// Halite-saturated vapor at fixed pressure.
    VaporHalite,
    Critical,
    WaterBoiling,
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VaporLiquid(phase) => write!(f, "VL {phase}"),
            Self::VaporLiquidHalite(phase) => write!(f, "VLH {phase}"),
            Self::VaporHalite => write!(f, "VH"),
            Self::Critical => write!(f, "critical curve"),
            Self::WaterBoiling => write!(f, "H2O boiling curve"),
        }
    }
}

/// One (T, P, X) point; `x` is in the unit of the owning curve or surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryPoint {
    pub t_k: f64,
    pub p_pa: f64,
    pub x: f64,
}

impl BoundaryPoint {
    pub fn new(t_k: f64, p_pa: f64, x: f64) -> Self {
        Self { t_k, p_pa, x }
    }

    pub(crate) fn convert(self, from: CompositionUnit, to: CompositionUnit) -> Self {
        let x = match (from, to) {
            (CompositionUnit::Mole, CompositionUnit::Mass) => mass_fraction_of(self.x),
            (CompositionUnit::Mass, CompositionUnit::Mole) => mole_fraction_of(self.x),
            _ => self.x,
        };
        Self { x, ..self }
    }

    pub(crate) fn check(&self) -> BrineResult<()> {
        if !(self.t_k.is_finite() && self.p_pa.is_finite()) {
            return Err(BrineError::Core(sw_core::CoreError::NonFinite {
                what: "boundary point",
                value: if self.t_k.is_finite() { self.p_pa } else { self.t_k },
            }));
        }
        if !(0.0..=1.0).contains(&self.x) {
            return Err(BrineError::out_of_range("boundary composition", self.x, 0.0, 1.0));
        }
        Ok(())
    }
}

/// Ordered points of one phase-boundary branch.
///
/// Temperatures are strictly monotonic and every composition lies in [0, 1];
/// both are checked on construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhaseBoundaryCurve {
    kind: BoundaryKind,
    unit: CompositionUnit,
    points: Vec<BoundaryPoint>,
}

impl PhaseBoundaryCurve {
    pub fn new(
        kind: BoundaryKind,
        unit: CompositionUnit,
        points: Vec<BoundaryPoint>,
    ) -> BrineResult<Self> {
        for p in &points {
            p.check()?;
        }
        let temperatures: Vec<f64> = points.iter().map(|p| p.t_k).collect();
        if !sw_core::is_strictly_monotonic(&temperatures) {
            return Err(BrineError::Core(sw_core::CoreError::Invariant {
                what: "boundary temperatures must be strictly monotonic",
            }));
        }
        Ok(Self { kind, unit, points })
    }

    pub fn kind(&self) -> BoundaryKind {
        self.kind
    }

    pub fn unit(&self) -> CompositionUnit {
        self.unit
    }

    pub fn points(&self) -> &[BoundaryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&BoundaryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&BoundaryPoint> {
        self.points.last()
    }

    pub fn temperatures_k(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.t_k).collect()
    }

    pub fn pressures_pa(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.p_pa).collect()
    }

    pub fn compositions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// The same curve with compositions expressed in `unit`.
    pub fn to_unit(&self, unit: CompositionUnit) -> Self {
        Self {
            kind: self.kind,
            unit,
            points: self
                .points
                .iter()
                .map(|p| p.convert(self.unit, unit))
                .collect(),
        }
    }
}
