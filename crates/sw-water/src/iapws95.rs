//! IAPWS-95 formulation for general and scientific use.

use crate::auxiliary::{self, PC_PA, RHOC_KG_M3, TC_K};
use crate::density::{DensityBracket, solve_density};
use crate::envelope::ValidityEnvelope;
use crate::eos::EosKind;
use crate::error::{WaterError, WaterResult};
use crate::helmholtz::{ideal, residual};
use crate::model::WaterEos;
use crate::phase::FluidBranch;
use crate::state::{CriticalPoint, SaturationState};
use nalgebra::{DMatrix, DVector};
use sw_core::units::{k, kgpm3, pa};
use sw_solver::{NewtonConfig, newton_solve};
use tracing::{debug, warn};

/// Specific gas constant [J/(kg·K)].
pub const R_SPECIFIC: f64 = 461.518_05;

/// Below `TC_K - MAXWELL_CUTOFF_K` the phase equilibrium is solved; above it
/// the auxiliary equations are used.
const MAXWELL_CUTOFF_K: f64 = 0.1;

const ENVELOPE: ValidityEnvelope = ValidityEnvelope {
    t_min_k: 273.16,
    t_max_k: 1273.15,
    p_min_pa: 100.0,
    p_max_pa: 1.0e9,
};

/// How the boiling curve is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SaturationRoute {
    /// Equal pressure and Gibbs energy of the coexisting phases.
    Maxwell,
    /// Wagner-Pruss auxiliary equations.
    Auxiliary,
}

/// IAPWS-95 Helmholtz formulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Iapws95 {
    route: SaturationRoute,
    /// Maxwell minus auxiliary boiling pressure at the cutoff [Pa]; faded out
    /// linearly towards Tc so the boiling curve stays continuous.
    cutoff_offset_pa: f64,
}

impl Default for Iapws95 {
    fn default() -> Self {
        Self::new()
    }
}

impl Iapws95 {
    /// Phase equilibrium from the Maxwell criterion.
    pub fn new() -> Self {
        let t_cut = TC_K - MAXWELL_CUTOFF_K;
        let cutoff_offset_pa = match maxwell(t_cut) {
            Ok((p, _, _)) => p - auxiliary::boiling_pressure(t_cut),
            Err(e) => {
                warn!(error = %e, "phase equilibrium failed at cutoff, no offset applied");
                0.0
            }
        };
        Self {
            route: SaturationRoute::Maxwell,
            cutoff_offset_pa,
        }
    }

    /// Boiling curve from the auxiliary equations.
    pub fn reference() -> Self {
        Self {
            route: SaturationRoute::Auxiliary,
            cutoff_offset_pa: 0.0,
        }
    }

    pub fn route(&self) -> SaturationRoute {
        self.route
    }

    /// Pressure [Pa] at density [kg/m³] and temperature [K].
    pub fn pressure(rho: f64, t_k: f64) -> f64 {
        pressure_and_slope(rho, t_k).0
    }

    /// Specific enthalpy [J/kg] at density [kg/m³] and temperature [K].
    pub fn enthalpy(rho: f64, t_k: f64) -> f64 {
        let (delta, tau) = reduced(rho, t_k);
        let i = ideal(delta, tau);
        let r = residual(delta, tau);
        R_SPECIFIC * t_k * (1.0 + tau * (i.t + r.t) + delta * r.d)
    }

    fn auxiliary_boiling_pressure(&self, t_k: f64) -> f64 {
        let t_cut = TC_K - MAXWELL_CUTOFF_K;
        let fade = ((TC_K - t_k) / MAXWELL_CUTOFF_K).clamp(0.0, 1.0);
        let offset = if t_k >= t_cut {
            self.cutoff_offset_pa * fade
        } else {
            0.0
        };
        auxiliary::boiling_pressure(t_k) + offset
    }

    fn uses_maxwell(&self, t_k: f64) -> bool {
        self.route == SaturationRoute::Maxwell && t_k < TC_K - MAXWELL_CUTOFF_K
    }
}

fn reduced(rho: f64, t_k: f64) -> (f64, f64) {
    (rho / RHOC_KG_M3, TC_K / t_k)
}

/// `(p, ∂p/∂ρ)` at fixed temperature.
fn pressure_and_slope(rho: f64, t_k: f64) -> (f64, f64) {
    let (delta, tau) = reduced(rho, t_k);
    let r = residual(delta, tau);
    let rt = R_SPECIFIC * t_k;
    let p = rho * rt * (1.0 + delta * r.d);
    let dp = rt * (1.0 + 2.0 * delta * r.d + delta * delta * r.dd);
    (p, dp)
}

/// Density-dependent part of `g / (R T)`.
fn reduced_gibbs(rho: f64, t_k: f64) -> f64 {
    let (delta, tau) = reduced(rho, t_k);
    let r = residual(delta, tau);
    delta.ln() + r.phi + delta * r.d
}

/// Coexisting `(p, ρ', ρ'')` from equal pressure and Gibbs energy.
fn maxwell(t_k: f64) -> WaterResult<(f64, f64, f64)> {
    let p_scale = auxiliary::boiling_pressure(t_k);
    let rt = R_SPECIFIC * t_k;
    let x0 = DVector::from_vec(vec![
        auxiliary::saturated_liquid_density(t_k),
        auxiliary::saturated_vapor_density(t_k),
    ]);

    let residual_fn = |x: &DVector<f64>| -> WaterResult<DVector<f64>> {
        let (rl, rv) = (x[0], x[1]);
        Ok(DVector::from_vec(vec![
            (Iapws95::pressure(rl, t_k) - Iapws95::pressure(rv, t_k)) / p_scale,
            reduced_gibbs(rl, t_k) - reduced_gibbs(rv, t_k),
        ]))
    };
    let jacobian_fn = |x: &DVector<f64>| -> WaterResult<DMatrix<f64>> {
        let (rl, rv) = (x[0], x[1]);
        let dpl = pressure_and_slope(rl, t_k).1;
        let dpv = pressure_and_slope(rv, t_k).1;
        Ok(DMatrix::from_row_slice(
            2,
            2,
            &[
                dpl / p_scale,
                -dpv / p_scale,
                dpl / (rl * rt),
                -dpv / (rv * rt),
            ],
        ))
    };
    let admissible = |x: &DVector<f64>| x[1] > 0.0 && x[0] > x[1];
    let config = NewtonConfig {
        max_iterations: 60,
        abs_tol: 1e-9,
        ..NewtonConfig::default()
    };

    let sol = newton_solve(x0, residual_fn, jacobian_fn, admissible, &config)?;
    let (rl, rv) = (sol.x[0], sol.x[1]);
    debug!(t_k, iterations = sol.iterations, rl, rv, "phase equilibrium solved");
    Ok((Iapws95::pressure(rl, t_k), rl, rv))
}

impl WaterEos for Iapws95 {
    fn kind(&self) -> EosKind {
        match self.route {
            SaturationRoute::Maxwell => EosKind::Iapws95,
            SaturationRoute::Auxiliary => EosKind::Iapws95Reference,
        }
    }

    fn envelope(&self) -> ValidityEnvelope {
        ENVELOPE
    }

    fn critical_point(&self) -> CriticalPoint {
        CriticalPoint {
            t: k(TC_K),
            p: pa(PC_PA),
            rho: kgpm3(RHOC_KG_M3),
        }
    }

    fn boiling_pressure_subcritical(&self, t_k: f64) -> WaterResult<f64> {
        if self.uses_maxwell(t_k) {
            match maxwell(t_k) {
                Ok((p, _, _)) => return Ok(p),
                Err(e) => warn!(t_k, error = %e, "phase equilibrium failed, using auxiliary boiling curve"),
            }
        }
        Ok(self.auxiliary_boiling_pressure(t_k))
    }

    fn saturation_subcritical(&self, t_k: f64) -> WaterResult<SaturationState> {
        let (p, rl, rv) = if self.uses_maxwell(t_k) {
            match maxwell(t_k) {
                Ok(sat) => sat,
                Err(e) => {
                    warn!(t_k, error = %e, "phase equilibrium failed, using auxiliary densities");
                    auxiliary_saturation(self, t_k)
                }
            }
        } else {
            auxiliary_saturation(self, t_k)
        };
        Ok(SaturationState {
            t: k(t_k),
            p: pa(p),
            rho_liquid: kgpm3(rl),
            rho_vapor: kgpm3(rv),
            h_liquid: Iapws95::enthalpy(rl, t_k),
            h_vapor: Iapws95::enthalpy(rv, t_k),
        })
    }

    fn density_enthalpy(
        &self,
        t_k: f64,
        p_pa: f64,
        branch: FluidBranch,
    ) -> WaterResult<(f64, f64)> {
        if !(t_k.is_finite() && p_pa.is_finite()) || t_k <= 0.0 || p_pa <= 0.0 {
            return Err(WaterError::NonPhysical {
                what: "temperature and pressure must be positive",
            });
        }
        let bracket = if t_k >= TC_K {
            DensityBracket::Fluid {
                rho_scale: RHOC_KG_M3,
            }
        } else {
            match branch {
                FluidBranch::Liquid => DensityBracket::Liquid {
                    rho_sat: auxiliary::saturated_liquid_density(t_k),
                },
                FluidBranch::Vapor => DensityBracket::Vapor {
                    rho_sat: auxiliary::saturated_vapor_density(t_k),
                },
            }
        };
        let ideal_rho = p_pa / (R_SPECIFIC * t_k);
        let rho = solve_density(
            |rho| pressure_and_slope(rho, t_k),
            p_pa,
            t_k,
            ideal_rho,
            bracket,
        )?;
        Ok((rho, Iapws95::enthalpy(rho, t_k)))
    }

    fn critical_enthalpy(&self) -> WaterResult<f64> {
        Ok(Iapws95::enthalpy(RHOC_KG_M3, TC_K))
    }
}

fn auxiliary_saturation(eos: &Iapws95, t_k: f64) -> (f64, f64, f64) {
    (
        eos.auxiliary_boiling_pressure(t_k),
        auxiliary::saturated_liquid_density(t_k),
        auxiliary::saturated_vapor_density(t_k),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    #[test]
    fn single_phase_pressures() {
        // (T [K], ρ [kg/m³], p [MPa])
        let cases = [
            (300.0, 996.556, 0.0992418352),
            (300.0, 1005.308, 20.0022515),
            (500.0, 0.435, 0.0999679423),
            (647.0, 358.0, 22.0384756),
        ];
        for (t, rho, p_mpa) in cases {
            let p = Iapws95::pressure(rho, t) / 1e6;
            assert!(rel(p, p_mpa) < 1e-8, "T = {t}, ρ = {rho}: {p} vs {p_mpa}");
        }
    }

    #[test]
    fn phase_equilibrium_reference_values() {
        // (T [K], p [Pa], ρ' , ρ'')
        let cases = [
            (275.0, 698.451, 999.887406, 0.00550664919),
            (450.0, 932_203.564, 890.341250, 4.81200360),
            (625.0, 16.9082693e6, 567.090385, 118.290280),
        ];
        for (t, p, rl, rv) in cases {
            let (ps, l, v) = maxwell(t).unwrap();
            assert!(rel(ps, p) < 1e-6, "T = {t}: p = {ps}");
            assert!(rel(l, rl) < 1e-7, "T = {t}: ρ' = {l}");
            assert!(rel(v, rv) < 1e-6, "T = {t}: ρ'' = {v}");
        }
    }

    #[test]
    fn density_roots_on_both_branches() {
        let eos = Iapws95::new();
        let (rho, _) = eos
            .density_enthalpy(300.0, 0.0992418352e6, FluidBranch::Liquid)
            .unwrap();
        assert!(rel(rho, 996.556) < 1e-7);
        let (rho, _) = eos
            .density_enthalpy(500.0, 0.0999679423e6, FluidBranch::Vapor)
            .unwrap();
        assert!(rel(rho, 0.435) < 1e-7);
    }

    #[test]
    fn routes_differ_slightly() {
        let maxwell = Iapws95::new();
        let aux = Iapws95::reference();
        let a = maxwell.boiling_pressure_subcritical(450.0).unwrap();
        let b = aux.boiling_pressure_subcritical(450.0).unwrap();
        assert!(a != b);
        assert!(rel(a, b) < 1e-5);
    }

    #[test]
    fn boiling_curve_continuous_at_cutoff() {
        let eos = Iapws95::new();
        let t_cut = TC_K - MAXWELL_CUTOFF_K;
        let below = eos.boiling_pressure_subcritical(t_cut - 1e-9).unwrap();
        let above = eos.boiling_pressure_subcritical(t_cut).unwrap();
        assert!((above - below).abs() < 1.0, "{below} vs {above}");
    }

    #[test]
    fn enthalpy_at_triple_point_liquid_is_small() {
        let sat = Iapws95::new().saturation_subcritical(273.16).unwrap();
        // Internal energy and entropy of the saturated liquid vanish at the triple point.
        assert!(sat.h_liquid.abs() < 1.0, "h' = {}", sat.h_liquid);
    }
}
