//! Phase-boundary surfaces and the complete P-T-X phase diagram.

use crate::batch::{self, BatchResult, PointStatus};
use crate::composition::CompositionUnit;
use crate::constants::{P_MIN_PA, T_MAX_K, T_MIN_VLH_K};
use crate::curve::{BoundaryKind, BoundaryPoint, PhaseBoundaryCurve};
use crate::error::{BrineError, BrineResult};
use crate::phase::BrinePhase;
use crate::settings::DiagramSettings;
use crate::surface::PhaseBoundarySurface;
use crate::sweeps::{SweepDefinition, SweepType};
use crate::system::BinarySaltSystem;
use std::collections::BTreeMap;
use sw_core::units::k;
use sw_water::WaterEos;
use tracing::debug;

/// Fraction of the VLH temperature range covered by the coarse part of the
/// VLH grid; the rest is refined towards the NaCl triple point.
const VLH_COARSE_SPAN: f64 = 0.95;

/// Named surfaces and lines of the H2O-NaCl phase diagram.
///
/// Every composition is a mass fraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PhaseDiagram {
    pub surfaces: BTreeMap<&'static str, PhaseBoundarySurface>,
    pub lines: BTreeMap<&'static str, PhaseBoundaryCurve>,
}

impl PhaseDiagram {
    pub fn surface(&self, name: &str) -> Option<&PhaseBoundarySurface> {
        self.surfaces.get(name)
    }

    pub fn line(&self, name: &str) -> Option<&PhaseBoundaryCurve> {
        self.lines.get(name)
    }
}

/// VLH curve data at one temperature (mole fractions).
#[derive(Debug, Clone, Copy)]
struct VlhNode {
    t_k: f64,
    p_pa: f64,
    x_liquid: f64,
    x_vapor: f64,
}

fn fluid_only(phase: BrinePhase) -> BrineResult<()> {
    if phase == BrinePhase::Halite {
        return Err(BrineError::Core(sw_core::CoreError::InvalidArg {
            what: "VL surfaces have liquid and vapor branches only",
        }));
    }
    Ok(())
}

fn min_resolution(what: &str, n: usize) -> BrineResult<()> {
    if n < 2 {
        return Err(BrineError::InvalidSettings {
            what: format!("{what} needs at least 2 points, got {n}"),
        });
    }
    Ok(())
}

fn curve(kind: BoundaryKind, points: Vec<BoundaryPoint>) -> BrineResult<PhaseBoundaryCurve> {
    Ok(PhaseBoundaryCurve::new(kind, CompositionUnit::Mole, points)?.to_unit(CompositionUnit::Mass))
}

impl BinarySaltSystem {
    /// Liquid or vapor VL surface over `n_t` temperatures in
    /// [T_MIN_VLH, Tmax_VLH] and `n_p` pressure fractions.
    ///
    /// Columns run from the merge pressure (column 0) down to the VLH
    /// pressure, uniform in the square root of the pressure fraction so the
    /// steep part near the merge point is resolved. Compositions are mass
    /// fractions.
    pub fn vapor_liquid_surface(
        &self,
        phase: BrinePhase,
        n_t: usize,
        n_p: usize,
    ) -> BrineResult<PhaseBoundarySurface> {
        fluid_only(phase)?;
        min_resolution("VL surface temperature grid", n_t)?;
        min_resolution("VL surface pressure grid", n_p)?;
        let temperatures = SweepDefinition::linear(T_MIN_VLH_K, self.t_max_vlh(), n_t)?.generate_points();
        let fractions = SweepDefinition::new(0.0, 1.0, n_p, SweepType::Power(2.0))?.generate_points();

        let rows = batch::evaluate(&temperatures, self.settings().eval_mode, |t| {
            Ok(self.vapor_liquid_bounds(*t).into())
        })?;
        let nodes = rows
            .values
            .iter()
            .zip(&rows.status)
            .flat_map(|(bounds, status)| {
                fractions.iter().map(move |s| match bounds {
                    Some(b) => {
                        let (xl, xv) = b.compositions_at(*s);
                        let x = if phase == BrinePhase::Liquid { xl } else { xv };
                        (Some(BoundaryPoint::new(b.t_k, b.pressure_at(*s), x)), PointStatus::Ok)
                    }
                    None => (None, *status),
                })
            });
        let surface = PhaseBoundarySurface::from_outcomes(n_t, n_p, CompositionUnit::Mole, nodes)?;
        Ok(surface.to_unit(CompositionUnit::Mass))
    }

    /// VLH temperatures, refined close to the upper end of the curve.
    fn vlh_grid(&self, n: usize) -> BrineResult<Vec<f64>> {
        let n_high = (n / 3).max(1);
        let n_low = n - n_high;
        let t_split = T_MIN_VLH_K + (self.t_max_vlh() - T_MIN_VLH_K) * VLH_COARSE_SPAN;
        let mut grid = SweepDefinition::linear(T_MIN_VLH_K, t_split, n_low)?.generate_points();
        let high = SweepDefinition::linear(t_split, self.t_max_vlh(), n_high + 1)?.generate_points();
        grid.extend(high.into_iter().skip(1));
        Ok(grid)
    }

    fn vlh_nodes(&self, temperatures: &[f64]) -> BrineResult<Vec<VlhNode>> {
        let nodes = batch::evaluate(temperatures, self.settings().eval_mode, |t| {
            let node = self.vlh_pressure(*t).and_then(|p_pa| {
                let (xl, xv) = self.vlh_compositions(*t, p_pa)?;
                Ok(VlhNode {
                    t_k: *t,
                    p_pa,
                    x_liquid: xl.mole_fraction(),
                    x_vapor: xv.mole_fraction(),
                })
            });
            Ok(node.into())
        })?;
        Ok(nodes.values.into_iter().flatten().collect())
    }

    /// Every phase boundary of the system at the given resolution.
    ///
    /// Surfaces: `VLH_VL` and `VLH_LH` (the three-phase plane split at the
    /// liquid composition), `VH`, `halite_liquidus`, `VL_liquid` and
    /// `VL_vapor`. Lines: `VLH_liquid`, `VLH_vapor`, `VLH_halite`, `VH_pmin`
    /// (halite-saturated vapor at the minimum pressure), `critical` and
    /// `water_boiling`.
    pub fn phase_diagram(&self, resolution: &DiagramSettings) -> BrineResult<PhaseDiagram> {
        resolution.validate()?;
        let DiagramSettings { n_t, n_p, n_x } = *resolution;
        let mode = self.settings().eval_mode;
        let deform = self.deformation();
        let mut surfaces = BTreeMap::new();
        let mut lines = BTreeMap::new();

        // three-phase plane and its edges
        let vlh = self.vlh_nodes(&self.vlh_grid(n_t)?)?;
        let columns = sw_core::linspace(0.0, 1.0, n_x);
        let plane = |x_at: &dyn Fn(&VlhNode, f64) -> f64| {
            let nodes = vlh.iter().flat_map(|node| {
                columns.iter().map(move |f| {
                    let point = BoundaryPoint::new(node.t_k, node.p_pa, x_at(node, *f));
                    (Some(point), PointStatus::Ok)
                })
            });
            PhaseBoundarySurface::from_outcomes(vlh.len(), n_x, CompositionUnit::Mole, nodes)
                .map(|s| s.to_unit(CompositionUnit::Mass))
        };
        let vapor_to_liquid = |node: &VlhNode, f: f64| {
            let (lo, hi) = (deform.forward(node.x_vapor), deform.forward(node.x_liquid));
            deform.inverse(lo + (hi - lo) * f).clamp(node.x_vapor, node.x_liquid)
        };
        let liquid_to_halite = |node: &VlhNode, f: f64| node.x_liquid + (1.0 - node.x_liquid) * f;
        surfaces.insert("VLH_VL", plane(&vapor_to_liquid)?);
        surfaces.insert("VLH_LH", plane(&liquid_to_halite)?);

        let edge = |x_of: fn(&VlhNode) -> f64| {
            vlh.iter()
                .map(|n| BoundaryPoint::new(n.t_k, n.p_pa, x_of(n)))
                .collect::<Vec<_>>()
        };
        lines.insert(
            "VLH_liquid",
            curve(BoundaryKind::VaporLiquidHalite(BrinePhase::Liquid), edge(|n| n.x_liquid))?,
        );
        lines.insert(
            "VLH_vapor",
            curve(BoundaryKind::VaporLiquidHalite(BrinePhase::Vapor), edge(|n| n.x_vapor))?,
        );
        lines.insert(
            "VLH_halite",
            curve(BoundaryKind::VaporLiquidHalite(BrinePhase::Halite), edge(|_| 1.0))?,
        );

        // halite-saturated vapor, down to the formulation's pressure floor
        let p_floor = self.water().envelope().p_min_pa;
        let rows = SweepDefinition::linear(T_MIN_VLH_K, self.t_max_vlh(), n_t)?.generate_points();
        let vh_rows = batch::evaluate(&rows, mode, |t| {
            let row = self.vlh_pressure(*t).and_then(|p_vlh| {
                let p_lo = p_floor.min(p_vlh);
                let pressures =
                    SweepDefinition::new(p_lo, p_vlh, n_p, SweepType::Logarithmic)?.generate_points();
                pressures
                    .into_iter()
                    .map(|p| {
                        let x = self.vh_composition(*t, p)?.mole_fraction();
                        Ok(BoundaryPoint::new(*t, p, x))
                    })
                    .collect::<BrineResult<Vec<_>>>()
            });
            Ok(row.into())
        })?;
        surfaces.insert("VH", grid_surface(vh_rows, n_p)?);

        // halite liquidus from the VLH pressure to the pressure cap
        let cap = self.settings().liquidus_pressure_cap_pa;
        let liquidus_rows = batch::evaluate(&rows, mode, |t| {
            let row = self.vlh_pressure(*t).and_then(|p_vlh| {
                SweepDefinition::linear(p_vlh, cap, n_p)?
                    .generate_points()
                    .into_iter()
                    .map(|p| {
                        let x = self.halite_liquidus_composition(*t, p)?.mole_fraction();
                        Ok(BoundaryPoint::new(*t, p, x))
                    })
                    .collect::<BrineResult<Vec<_>>>()
            });
            Ok(row.into())
        })?;
        surfaces.insert("halite_liquidus", grid_surface(liquidus_rows, n_p)?);

        surfaces.insert("VL_liquid", self.vapor_liquid_surface(BrinePhase::Liquid, n_t, n_p)?);
        surfaces.insert("VL_vapor", self.vapor_liquid_surface(BrinePhase::Vapor, n_t, n_p)?);

        // VH at the minimum pressure, between the two VLH temperatures there
        let (t_low, t_high) = self.vlh_temperatures(P_MIN_PA)?;
        let temps = SweepDefinition::linear(t_low, t_high, n_t)?.generate_points();
        let vh_line = batch::evaluate(&temps, mode, |t| {
            let point = self
                .vh_composition(*t, P_MIN_PA)
                .map(|x| BoundaryPoint::new(*t, P_MIN_PA, x.mole_fraction()));
            Ok(point.into())
        })?;
        lines.insert(
            "VH_pmin",
            curve(BoundaryKind::VaporHalite, vh_line.values.into_iter().flatten().collect())?,
        );

        // critical curve; the degenerate water end point is left out
        let temps = SweepDefinition::linear(self.t_min(), T_MAX_K, n_t)?.generate_points();
        let critical = self.critical_curve(&temps)?;
        let points = critical
            .ok_values()
            .map(|(_, c)| BoundaryPoint::new(c.t_k, c.p_pa, c.x.mole_fraction()))
            .collect();
        lines.insert("critical", curve(BoundaryKind::Critical, points)?);

        let envelope = self.water().envelope();
        let temps = SweepDefinition::linear(envelope.t_min_k, self.t_min(), n_t)?.generate_points();
        let boiling = batch::evaluate(&temps, mode, |t| {
            let point = self
                .water()
                .boiling_pressure(k(*t))
                .map(|p| BoundaryPoint::new(*t, p.value, 0.0))
                .map_err(BrineError::from);
            Ok(point.into())
        })?;
        lines.insert(
            "water_boiling",
            curve(BoundaryKind::WaterBoiling, boiling.values.into_iter().flatten().collect())?,
        );

        debug!(
            surfaces = surfaces.len(),
            lines = lines.len(),
            "phase diagram assembled"
        );
        Ok(PhaseDiagram { surfaces, lines })
    }
}

/// Surface from whole rows; a failed row becomes `n_cols` flagged nodes.
fn grid_surface(
    rows: BatchResult<Vec<BoundaryPoint>>,
    n_cols: usize,
) -> BrineResult<PhaseBoundarySurface> {
    let n_rows = rows.len();
    let nodes = rows
        .values
        .into_iter()
        .zip(rows.status)
        .flat_map(|(row, status)| -> Vec<(Option<BoundaryPoint>, PointStatus)> {
            match row {
                Some(points) => points.into_iter().map(|p| (Some(p), PointStatus::Ok)).collect(),
                None => vec![(None, status); n_cols],
            }
        });
    let surface = PhaseBoundarySurface::from_outcomes(n_rows, n_cols, CompositionUnit::Mole, nodes)?;
    Ok(surface.to_unit(CompositionUnit::Mass))
}
