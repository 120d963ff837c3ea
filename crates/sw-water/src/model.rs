//! Water equation-of-state trait.

use crate::branch::extrapolate_metastable;
use crate::envelope::ValidityEnvelope;
use crate::eos::EosKind;
use crate::error::{WaterError, WaterResult};
use crate::phase::{FluidBranch, WaterPhase, classify};
use crate::state::{CriticalPoint, SaturationState, ThermodynamicState};
use crate::auxiliary;
use sw_core::units::{Pressure, Temperature, k, kgpm3, pa};
use sw_solver::{ScalarConfig, solve_bracketed};

/// A pure-water formulation.
///
/// Implementations must be thread-safe (Send + Sync) to support parallel evaluation.
/// The required methods are raw kernels working in SI `f64`; the provided
/// methods add envelope checks, phase classification and the typed API.
pub trait WaterEos: Send + Sync {
    fn kind(&self) -> EosKind;

    /// Formulation name (for debugging/logging).
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    fn envelope(&self) -> ValidityEnvelope;

    fn critical_point(&self) -> CriticalPoint;

    /// Boiling pressure [Pa] for `t_min <= t_k < Tc`.
    fn boiling_pressure_subcritical(&self, t_k: f64) -> WaterResult<f64>;

    /// Coexisting states for `t_min <= t_k < Tc`.
    fn saturation_subcritical(&self, t_k: f64) -> WaterResult<SaturationState>;

    /// Density [kg/m³] and enthalpy [J/kg] of the stable root on `branch`.
    ///
    /// The branch only matters below the critical temperature; the caller
    /// guarantees the branch is stable (or on the boundary) at (T, P).
    fn density_enthalpy(&self, t_k: f64, p_pa: f64, branch: FluidBranch)
    -> WaterResult<(f64, f64)>;

    /// Saturation pressure at `t`.
    ///
    /// `AboveCritical` above Tc; exactly the critical pressure at Tc.
    fn boiling_pressure(&self, t: Temperature) -> WaterResult<Pressure> {
        let t_k = t.value;
        validation::validate_temperature_k(t_k)?;
        let cp = self.critical_point();
        let tc = cp.t.value;
        if t_k > tc {
            return Err(WaterError::AboveCritical { t_k, tc_k: tc });
        }
        let env = self.envelope();
        env.check_temperature(t_k)?;
        if t_k == tc {
            return Ok(cp.p);
        }
        Ok(pa(self.boiling_pressure_subcritical(t_k)?))
    }

    /// Saturated liquid and vapor at `t`.
    fn saturation(&self, t: Temperature) -> WaterResult<SaturationState> {
        let t_k = t.value;
        validation::validate_temperature_k(t_k)?;
        let cp = self.critical_point();
        let tc = cp.t.value;
        if t_k > tc {
            return Err(WaterError::AboveCritical { t_k, tc_k: tc });
        }
        self.envelope().check_temperature(t_k)?;
        if t_k == tc {
            let (rho, h) = self.density_enthalpy(tc, cp.p.value, FluidBranch::Liquid)?;
            return Ok(SaturationState {
                t,
                p: cp.p,
                rho_liquid: kgpm3(rho),
                rho_vapor: kgpm3(rho),
                h_liquid: h,
                h_vapor: h,
            });
        }
        self.saturation_subcritical(t_k)
    }

    /// Inverse of the boiling curve.
    fn boiling_temperature(&self, p: Pressure) -> WaterResult<Temperature> {
        let p_pa = p.value;
        validation::validate_pressure_pa(p_pa)?;
        let env = self.envelope();
        let cp = self.critical_point();
        let p_low = self.boiling_pressure(k(env.t_min_k))?.value;
        if !(p_low..=cp.p.value).contains(&p_pa) {
            return Err(WaterError::OutOfRange {
                what: "boiling pressure [Pa]",
                value: p_pa,
                min: p_low,
                max: cp.p.value,
            });
        }
        if p_pa == cp.p.value {
            return Ok(cp.t);
        }
        let f = |t_k: f64| -> WaterResult<(f64, f64)> {
            let psat = self.boiling_pressure(k(t_k))?.value;
            Ok(((psat / p_pa).ln(), auxiliary::dln_boiling_pressure_dt(t_k)))
        };
        let config = ScalarConfig {
            x_tol: 1e-13,
            f_tol: 1e-13,
            ..ScalarConfig::default()
        };
        let root = solve_bracketed(f, env.t_min_k, cp.t.value, &config)?;
        Ok(k(root.x))
    }

    /// State at (T, P) with its phase tag.
    ///
    /// On the boiling curve the saturated liquid is returned, tagged `TwoPhase`.
    fn evaluate(&self, t: Temperature, p: Pressure) -> WaterResult<ThermodynamicState> {
        let (t_k, p_pa) = (t.value, p.value);
        validation::validate_temperature_k(t_k)?;
        validation::validate_pressure_pa(p_pa)?;
        self.envelope().check(t_k, p_pa)?;
        let cp = self.critical_point();
        let (tc, pc) = (cp.t.value, cp.p.value);
        let psat = if t_k < tc && p_pa < pc {
            self.boiling_pressure_subcritical(t_k)?
        } else {
            pc
        };
        let phase = classify(t_k, p_pa, tc, pc, psat);
        if phase == WaterPhase::CriticalPoint {
            return ThermodynamicState::new(t, p, cp.rho, self.critical_enthalpy()?, phase);
        }
        let branch = match phase {
            WaterPhase::Vapor | WaterPhase::SupercriticalVapor => FluidBranch::Vapor,
            _ => FluidBranch::Liquid,
        };
        let (rho, h) = self.density_enthalpy(t_k, p_pa, branch)?;
        ThermodynamicState::new(t, p, kgpm3(rho), h, phase)
    }

    /// Liquid-like or vapor-like state at (T, P).
    ///
    /// Where the requested branch is metastable the state is extrapolated
    /// along the isobar from the saturated state at `Tsat(P)`, and tagged with
    /// the branch's phase.
    fn evaluate_on_branch(
        &self,
        t: Temperature,
        p: Pressure,
        branch: FluidBranch,
    ) -> WaterResult<ThermodynamicState> {
        let (t_k, p_pa) = (t.value, p.value);
        validation::validate_temperature_k(t_k)?;
        validation::validate_pressure_pa(p_pa)?;
        self.envelope().check(t_k, p_pa)?;
        let cp = self.critical_point();
        let (tc, pc) = (cp.t.value, cp.p.value);
        if t_k >= tc || p_pa >= pc {
            return self.evaluate(t, p);
        }
        let psat = self.boiling_pressure_subcritical(t_k)?;
        let stable = match branch {
            FluidBranch::Liquid => p_pa >= psat,
            FluidBranch::Vapor => p_pa <= psat,
        };
        if !stable {
            return extrapolate_metastable(self, t, p, branch);
        }
        let (rho, h) = self.density_enthalpy(t_k, p_pa, branch)?;
        let phase = match classify(t_k, p_pa, tc, pc, psat) {
            WaterPhase::TwoPhase => WaterPhase::TwoPhase,
            _ if branch == FluidBranch::Liquid => WaterPhase::Liquid,
            _ => WaterPhase::Vapor,
        };
        ThermodynamicState::new(t, p, kgpm3(rho), h, phase)
    }

    /// Enthalpy [J/kg] at the critical point.
    fn critical_enthalpy(&self) -> WaterResult<f64> {
        let cp = self.critical_point();
        Ok(self
            .density_enthalpy(cp.t.value, cp.p.value, FluidBranch::Liquid)?
            .1)
    }

    /// Display name of a phase; identical for every formulation.
    fn phase_name(&self, phase: WaterPhase) -> &'static str {
        phase.name()
    }

    fn phase_name_by_id(&self, id: u8) -> Option<&'static str> {
        WaterPhase::from_id(id).map(|p| self.phase_name(p))
    }
}

/// Reject non-finite or non-positive inputs before they reach a kernel.
pub mod validation {
    use crate::error::{WaterError, WaterResult};

    pub fn validate_temperature_k(t_k: f64) -> WaterResult<()> {
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(WaterError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    pub fn validate_pressure_pa(p_pa: f64) -> WaterResult<()> {
        if !p_pa.is_finite() || p_pa <= 0.0 {
            return Err(WaterError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }
}
