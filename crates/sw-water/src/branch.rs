//! Metastable continuation of the liquid and vapor branches.

use crate::error::WaterResult;
use crate::model::WaterEos;
use crate::phase::{FluidBranch, WaterPhase};
use crate::state::ThermodynamicState;
use sw_core::units::{Pressure, Temperature, kgpm3};
use tracing::trace;

/// Temperature offset [K] of the stable reference point used for the isobaric slope.
const SLOPE_STEP_K: f64 = 1.0;

/// Linear isobaric extrapolation of `branch` past the boiling curve.
///
/// The anchor is the saturated state at `Tsat(P)`; the slope comes from the
/// stable state one kelvin on the other side of the boiling temperature.
pub(crate) fn extrapolate_metastable<E: WaterEos + ?Sized>(
    eos: &E,
    t: Temperature,
    p: Pressure,
    branch: FluidBranch,
) -> WaterResult<ThermodynamicState> {
    let (t_k, p_pa) = (t.value, p.value);
    let t_sat = eos.boiling_temperature(p)?.value;
    let (rho_sat, h_sat) = eos.density_enthalpy(t_sat, p_pa, branch)?;
    let t_ref = match branch {
        FluidBranch::Liquid => t_sat - SLOPE_STEP_K,
        FluidBranch::Vapor => t_sat + SLOPE_STEP_K,
    };
    let (rho_ref, h_ref) = eos.density_enthalpy(t_ref, p_pa, branch)?;

    let dt = t_k - t_sat;
    let rho = rho_sat + (rho_sat - rho_ref) / (t_sat - t_ref) * dt;
    let h = h_sat + (h_sat - h_ref) / (t_sat - t_ref) * dt;
    trace!(t_k, p_pa, t_sat, rho, h, ?branch, "metastable extrapolation");

    let phase = match branch {
        FluidBranch::Liquid => WaterPhase::Liquid,
        FluidBranch::Vapor => WaterPhase::Vapor,
    };
    ThermodynamicState::new(t, p, kgpm3(rho), h, phase)
}
