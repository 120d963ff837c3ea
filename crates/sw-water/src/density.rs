//! Density roots of pressure-explicit formulations.
//!
//! The bracket is chosen from the branch: the liquid root lies above the
//! saturated liquid density, the vapor root below the saturated vapor density
//! and, above the critical temperature, pressure is monotonic in density.

use crate::error::{WaterError, WaterResult};
use sw_solver::{ScalarConfig, solve_bracketed};
use tracing::debug;

/// Where to look for the density root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum DensityBracket {
    /// Start from the (approximate) saturated liquid density and go up.
    Liquid { rho_sat: f64 },
    /// Start from the (approximate) saturated vapor density and go down.
    Vapor { rho_sat: f64 },
    /// Single-valued isotherm above the critical temperature.
    Fluid { rho_scale: f64 },
}

const MAX_BRACKET_STEPS: usize = 400;

fn root_config() -> ScalarConfig {
    ScalarConfig {
        max_iterations: 200,
        x_tol: 1e-14,
        f_tol: 1e-13,
        max_step: f64::INFINITY,
    }
}

fn bracket_failure(what: &'static str, p_pa: f64, t_k: f64) -> WaterError {
    debug!(p_pa, t_k, what, "density bracket not found");
    WaterError::ConvergenceFailed { what }
}

/// Solve `p(ρ) = p_pa` for ρ.
///
/// `pressure` returns `(p [Pa], ∂p/∂ρ [Pa·m³/kg])` at fixed temperature;
/// `ideal_rho` is `p / (R T)`, a lower-bound scale for gas-like roots.
pub(crate) fn solve_density<F>(
    pressure: F,
    p_pa: f64,
    t_k: f64,
    ideal_rho: f64,
    bracket: DensityBracket,
) -> WaterResult<f64>
where
    F: Fn(f64) -> (f64, f64),
{
    let (lo, hi) = match bracket {
        DensityBracket::Liquid { rho_sat } => {
            let mut lo = rho_sat;
            let mut found = false;
            for _ in 0..MAX_BRACKET_STEPS {
                let (p, dp) = pressure(lo);
                if p < p_pa {
                    found = true;
                    break;
                }
                if dp <= 0.0 {
                    break;
                }
                lo *= 0.998;
            }
            if !found {
                return Err(bracket_failure("liquid density bracket", p_pa, t_k));
            }
            (lo, grow_until_above(&pressure, lo * 1.05, p_pa, 1.05)
                .ok_or_else(|| bracket_failure("liquid density bracket", p_pa, t_k))?)
        }
        DensityBracket::Vapor { rho_sat } => {
            let mut hi = rho_sat;
            let mut found = false;
            for _ in 0..MAX_BRACKET_STEPS {
                let (p, dp) = pressure(hi);
                if p > p_pa {
                    found = true;
                    break;
                }
                if dp <= 0.0 {
                    break;
                }
                hi *= 1.002;
            }
            if !found {
                return Err(bracket_failure("vapor density bracket", p_pa, t_k));
            }
            let lo = shrink_until_below(&pressure, (0.5 * ideal_rho).min(0.5 * hi), p_pa)
                .ok_or_else(|| bracket_failure("vapor density bracket", p_pa, t_k))?;
            (lo, hi)
        }
        DensityBracket::Fluid { rho_scale } => {
            let lo = shrink_until_below(&pressure, (0.5 * ideal_rho).min(0.5 * rho_scale), p_pa)
                .ok_or_else(|| bracket_failure("fluid density bracket", p_pa, t_k))?;
            let hi = grow_until_above(&pressure, rho_scale.max(2.0 * lo), p_pa, 1.2)
                .ok_or_else(|| bracket_failure("fluid density bracket", p_pa, t_k))?;
            (lo, hi)
        }
    };

    let f = |rho: f64| -> WaterResult<(f64, f64)> {
        let (p, dp) = pressure(rho);
        if !p.is_finite() || !dp.is_finite() {
            return Err(WaterError::NonPhysical {
                what: "pressure must be finite",
            });
        }
        Ok((p / p_pa - 1.0, dp / p_pa))
    };
    let root = solve_bracketed(f, lo, hi, &root_config())?;
    if !root.x.is_finite() || root.x <= 0.0 {
        return Err(WaterError::NonPhysical {
            what: "density must be positive and finite",
        });
    }
    Ok(root.x)
}

fn grow_until_above<F>(pressure: &F, start: f64, p_pa: f64, factor: f64) -> Option<f64>
where
    F: Fn(f64) -> (f64, f64),
{
    let mut hi = start;
    for _ in 0..MAX_BRACKET_STEPS {
        if pressure(hi).0 > p_pa {
            return Some(hi);
        }
        hi *= factor;
    }
    None
}

fn shrink_until_below<F>(pressure: &F, start: f64, p_pa: f64) -> Option<f64>
where
    F: Fn(f64) -> (f64, f64),
{
    let mut lo = start;
    for _ in 0..MAX_BRACKET_STEPS {
        if pressure(lo).0 < p_pa {
            return Some(lo);
        }
        lo *= 0.5;
    }
    None
}
