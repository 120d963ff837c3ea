//! Isobaric vapor-liquid sections by pseudo-arclength continuation.
//!
//! A branch is the implicit curve `ξ - ξ(x_phase(T, P)) = 0`, traced from its
//! upper temperature towards the point where liquid and vapor merge. The
//! merge point is known in closed form (water boiling point or critical
//! curve), so the traced points stop just short of it and the exact point is
//! appended.
//!
//! Compositions open up as `√(T - T_merge)` next to the merge point, so the
//! trace runs in `(τ, ξ)` with `T = T_merge + τ²`. The curve is then regular
//! up to `τ = 0`, and finite-difference stencils that reach past the merge
//! point stay inside the field.

use crate::composition::{CompositionUnit, DeformedComposition};
use crate::constants::{P_MAX_PA, T_MAX_K, T_MIN_VLH_K};
use crate::curve::{BoundaryKind, BoundaryPoint, PhaseBoundaryCurve};
use crate::error::{BrineError, BrineResult};
use crate::phase::BrinePhase;
use crate::system::{BinarySaltSystem, check_range};
use sw_solver::{PlaneCurve, StopReason, trace_curve};
use tracing::{debug, warn};

/// One branch of an isobaric VL section as a plane curve in (τ, ξ).
struct VaporLiquidBranch<'a> {
    system: &'a BinarySaltSystem,
    deform: &'a DeformedComposition,
    phase: BrinePhase,
    p_pa: f64,
    t_merge_k: f64,
    end_tol_k: f64,
    /// Absolute floor on the composition, below which the trace ends.
    x_floor: f64,
}

impl VaporLiquidBranch<'_> {
    fn temperature(&self, tau: f64) -> f64 {
        self.t_merge_k + tau * tau
    }

    fn composition(&self, t_k: f64) -> BrineResult<f64> {
        let (xl, xv) = self
            .system
            .vapor_liquid_bounds(t_k)?
            .compositions(self.p_pa)?;
        let x = match self.phase {
            BrinePhase::Vapor => xv,
            _ => xl,
        };
        if x > 0.0 {
            Ok(x)
        } else {
            Err(BrineError::out_of_range("VL branch composition", x, 0.0, 1.0))
        }
    }
}

impl PlaneCurve for VaporLiquidBranch<'_> {
    type Error = BrineError;

    fn residual(&self, y: [f64; 2]) -> BrineResult<f64> {
        Ok(y[1] - self.deform.forward(self.composition(self.temperature(y[0]))?))
    }

    fn accept(&self, previous: [f64; 2], next: [f64; 2]) -> bool {
        next[0] >= 0.0 && next[0] < previous[0]
    }

    fn is_done(&self, y: [f64; 2]) -> bool {
        y[0] * y[0] <= self.end_tol_k || self.deform.inverse(y[1]) <= self.x_floor
    }
}

impl BinarySaltSystem {
    /// Upper temperature [K] of the isobaric VL section at `p_pa`.
    ///
    /// Below the VLH pressure maximum this is the rising-limb VLH
    /// temperature; above it the VL field reaches the upper temperature of
    /// the model.
    fn vapor_liquid_start(&self, p_pa: f64) -> BrineResult<f64> {
        let p_min = self.vlh_pressure(T_MIN_VLH_K)?;
        check_range("VL section pressure [Pa]", p_pa, p_min, P_MAX_PA)?;
        let (_, p_peak) = self.vlh_peak();
        if p_pa <= p_peak {
            Ok(self.vlh_temperatures(p_pa)?.0)
        } else {
            Ok(T_MAX_K)
        }
    }

    /// Liquid or vapor branch of the isobaric VL section at `p_pa`.
    ///
    /// Points run in increasing temperature from the merge point (water
    /// boiling point below the water critical pressure, critical point above
    /// it) to the VLH temperature, or to the upper model temperature above
    /// the VLH pressure maximum; compositions are mass fractions. Both
    /// branches at one pressure share their first point exactly. Below the
    /// VLH pressure maximum only the low-temperature segment is traced.
    pub fn vapor_liquid_boundary(
        &self,
        phase: BrinePhase,
        p_pa: f64,
    ) -> BrineResult<PhaseBoundaryCurve> {
        if phase == BrinePhase::Halite {
            return Err(BrineError::Core(sw_core::CoreError::InvalidArg {
                what: "VL sections have liquid and vapor branches only",
            }));
        }
        let t_start = self.vapor_liquid_start(p_pa)?;
        let (t_merge, x_merge) = self.vapor_liquid_merge(p_pa)?;
        if t_merge >= t_start {
            return Err(BrineError::out_of_range(
                "VL merge temperature [K]",
                t_merge,
                T_MIN_VLH_K,
                t_start,
            ));
        }

        let settings = &self.settings().continuation;
        let deform = self.deformation();
        let mut branch = VaporLiquidBranch {
            system: self,
            deform,
            phase,
            p_pa,
            t_merge_k: t_merge,
            end_tol_k: settings.end_tol_k,
            x_floor: 0.0,
        };
        let x_start = branch.composition(t_start)?;
        branch.x_floor = settings.composition_floor * x_start;

        let start = [(t_start - t_merge).sqrt(), deform.forward(x_start)];
        let trace = trace_curve(&branch, start, [-1.0, 0.0], &settings.arclength_config())?;
        let last_t = trace
            .points
            .last()
            .map_or(t_start, |y| branch.temperature(y[0]));
        match trace.stop {
            StopReason::Done => {}
            stop if last_t - t_merge <= settings.snap_tol_k => {
                debug!(gap_k = last_t - t_merge, ?stop, "VL branch snapped to merge point");
            }
            stop => {
                let x_last = trace.points.last().map_or(x_start, |y| deform.inverse(y[1]));
                warn!(%phase, p_pa, last_t, ?stop, "VL branch did not reach its merge point");
                return Err(BrineError::Convergence {
                    what: format!("{phase} branch of the VL section at {p_pa} Pa ({stop:?})"),
                    estimate: vec![last_t, p_pa, x_last],
                });
            }
        }
        debug!(
            %phase,
            p_pa,
            points = trace.points.len(),
            rejected = trace.rejected_steps,
            "VL branch traced"
        );

        let mut points = Vec::with_capacity(trace.points.len() + 1);
        points.push(BoundaryPoint::new(t_merge, p_pa, x_merge));
        for t_k in trace
            .points
            .iter()
            .rev()
            .map(|y| branch.temperature(y[0]))
            .filter(|t| *t > t_merge)
        {
            points.push(BoundaryPoint::new(t_k, p_pa, branch.composition(t_k)?));
        }
        let curve = PhaseBoundaryCurve::new(
            BoundaryKind::VaporLiquid(phase),
            CompositionUnit::Mole,
            points,
        )?;
        Ok(curve.to_unit(CompositionUnit::Mass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SolverSettings;
    use sw_core::convert::c_to_k;
    use sw_water::EosKind;

    fn system() -> BinarySaltSystem {
        BinarySaltSystem::new(EosKind::Iapws95, SolverSettings::serial()).unwrap()
    }

    #[test]
    fn subcritical_branches_meet_at_boiling_point() {
        let s = system();
        let liquid = s.vapor_liquid_boundary(BrinePhase::Liquid, 10e5).unwrap();
        let vapor = s.vapor_liquid_boundary(BrinePhase::Vapor, 10e5).unwrap();
        assert_eq!(liquid.first(), vapor.first());
        let merge = liquid.first().unwrap();
        assert!((merge.t_k - c_to_k(179.88)).abs() < 0.05);
        assert_eq!(merge.x, 0.0);
        let top = liquid.last().unwrap();
        let (t_vlh, _) = s.vlh_temperatures(10e5).unwrap();
        assert!((top.t_k - t_vlh).abs() < 1e-9);
        assert_eq!(liquid.unit(), CompositionUnit::Mass);
        assert!(top.x > vapor.last().unwrap().x);
    }

    #[test]
    fn supercritical_branches_meet_at_critical_point() {
        let s = system();
        let liquid = s.vapor_liquid_boundary(BrinePhase::Liquid, 250e5).unwrap();
        let vapor = s.vapor_liquid_boundary(BrinePhase::Vapor, 250e5).unwrap();
        let (a, b) = (liquid.first().unwrap(), vapor.first().unwrap());
        assert_eq!(a, b);
        let critical = s.critical_temperature(250e5).unwrap();
        assert!((a.t_k - critical.t_k).abs() < 1e-12);
        assert!((a.x - critical.x.mass_fraction()).abs() < 1e-12);
        assert!(liquid.len() > 3 && vapor.len() > 3);
        assert!(liquid.pressures_pa().iter().all(|p| *p == 250e5));
    }

    #[test]
    fn above_vlh_peak_runs_to_upper_temperature() {
        let s = system();
        let liquid = s.vapor_liquid_boundary(BrinePhase::Liquid, 500e5).unwrap();
        let top = liquid.last().unwrap();
        assert!((top.t_k - s.t_max()).abs() < 1e-9);
        let temps = liquid.temperatures_k();
        assert!(temps.windows(2).all(|w| w[0] < w[1]));
        assert!(temps.iter().any(|t| *t > s.t_max_vlh()));
    }

    #[test]
    fn branches_reach_the_merge_point_at_every_pressure() {
        let s = system();
        let pressures_bar = [
            1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 150.0, 200.0, 220.0, 221.0, 230.0, 250.0,
            282.0, 300.0, 350.0, 390.0, 400.0, 500.0, 700.0, 1000.0, 1500.0,
        ];
        for p_bar in pressures_bar {
            let p = p_bar * 1e5;
            let (t_merge, _) = s.vapor_liquid_merge(p).unwrap();
            let liquid = s.vapor_liquid_boundary(BrinePhase::Liquid, p).unwrap();
            let vapor = s.vapor_liquid_boundary(BrinePhase::Vapor, p).unwrap();
            assert_eq!(liquid.first(), vapor.first(), "{p_bar} bar");
            assert_eq!(liquid.first().unwrap().t_k, t_merge);
            for curve in [&liquid, &vapor] {
                assert!(curve.len() > 3, "{p_bar} bar");
                let temps = curve.temperatures_k();
                assert!(temps.windows(2).all(|w| w[0] < w[1]), "{p_bar} bar");
                // the first traced point sits next to the merge point
                assert!(temps[1] - t_merge <= s.settings().continuation.snap_tol_k);
            }
        }
    }

    #[test]
    fn rejects_halite_and_low_pressure() {
        let s = system();
        assert!(matches!(
            s.vapor_liquid_boundary(BrinePhase::Halite, 10e5),
            Err(BrineError::Core(_))
        ));
        assert!(matches!(
            s.vapor_liquid_boundary(BrinePhase::Liquid, 100.0),
            Err(BrineError::OutOfRange { .. })
        ));
    }
}
