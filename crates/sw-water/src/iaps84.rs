//! Industrial formulation (IAPS-84 slot), realised with the IF97 region set.

use crate::auxiliary::{self, PC_PA, RHOC_KG_M3, TC_K};
use crate::density::{DensityBracket, solve_density};
use crate::envelope::ValidityEnvelope;
use crate::eos::EosKind;
use crate::error::{WaterError, WaterResult};
use crate::model::WaterEos;
use crate::phase::FluidBranch;
use crate::regions::{
    R_IF97, T_REGION1_MAX_K, T_REGION3_MAX_K, b23_pressure, region1, region2, region3_enthalpy,
    region3_pressure, saturation_pressure,
};
use crate::state::{CriticalPoint, SaturationState};
use sw_core::units::{k, kgpm3, pa};

const ENVELOPE: ValidityEnvelope = ValidityEnvelope {
    t_min_k: 273.15,
    t_max_k: 973.15,
    p_min_pa: 611.213,
    p_max_pa: 100.0e6,
};

/// Region-based industrial formulation.
///
/// Selected as `IAPS84` for compatibility with existing inputs, but the
/// equations are the IAPWS-IF97 regions 1, 2, 3 and 4, not the IAPS-84
/// Helmholtz function. Results differ from IAPS-84 within the IF97
/// consistency tolerances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iaps84;

impl Iaps84 {
    pub fn new() -> Self {
        Self
    }
}

impl WaterEos for Iaps84 {
    fn kind(&self) -> EosKind {
        EosKind::Iaps84
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
        // The region 4 fit overshoots Pc by a fraction of a pascal right at Tc.
        Ok(saturation_pressure(t_k).min(PC_PA))
    }

    fn saturation_subcritical(&self, t_k: f64) -> WaterResult<SaturationState> {
        let p = self.boiling_pressure_subcritical(t_k)?;
        let (rho_l, h_l) = self.density_enthalpy(t_k, p, FluidBranch::Liquid)?;
        let (rho_v, h_v) = self.density_enthalpy(t_k, p, FluidBranch::Vapor)?;
        Ok(SaturationState {
            t: k(t_k),
            p: pa(p),
            rho_liquid: kgpm3(rho_l),
            rho_vapor: kgpm3(rho_v),
            h_liquid: h_l,
            h_vapor: h_v,
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
        if t_k <= T_REGION1_MAX_K {
            return Ok(match branch {
                FluidBranch::Liquid => region1(p_pa, t_k),
                FluidBranch::Vapor => region2(p_pa, t_k),
            });
        }
        if t_k > T_REGION3_MAX_K || p_pa <= b23_pressure(t_k) {
            return Ok(region2(p_pa, t_k));
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
        let rho = solve_density(
            |rho| region3_pressure(rho, t_k),
            p_pa,
            t_k,
            p_pa / (R_IF97 * t_k),
            bracket,
        )?;
        Ok((rho, region3_enthalpy(rho, t_k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_selection() {
        let eos = Iaps84;
        // IF97 verification values. Region 1 liquid, region 2 vapor and
        // supercritical steam.
        let (rho, _) = eos.density_enthalpy(300.0, 3e6, FluidBranch::Liquid).unwrap();
        assert!((1.0 / rho - 0.100215168e-2).abs() < 1e-12);
        let (rho, _) = eos.density_enthalpy(700.0, 30e6, FluidBranch::Vapor).unwrap();
        assert!((1.0 / rho - 0.542946619e-2).abs() < 1e-11);
        // Region 3 root reproduces the region 3 check point.
        let (rho, h) = eos
            .density_enthalpy(650.0, 0.255837018e8, FluidBranch::Liquid)
            .unwrap();
        assert!((rho - 500.0).abs() < 1e-5, "{rho}");
        assert!((h - 0.186343019e7).abs() < 1.0);
        let (rho, _) = eos
            .density_enthalpy(750.0, 0.783095639e8, FluidBranch::Liquid)
            .unwrap();
        assert!((rho - 500.0).abs() < 1e-5, "{rho}");
    }

    #[test]
    fn saturation_brackets_both_phases() {
        let sat = Iaps84.saturation_subcritical(500.0).unwrap();
        assert!((sat.p.value - 2.63889776e6).abs() < 1.0);
        assert!(sat.rho_liquid.value > 800.0 && sat.rho_vapor.value < 20.0);
        assert!(sat.h_vapor > sat.h_liquid);

        let near_critical = Iaps84.saturation_subcritical(640.0).unwrap();
        assert!(near_critical.rho_liquid.value > near_critical.rho_vapor.value);
    }
}
