//! Vapor + liquid + halite coexistence (the VLH curve).
//!
//! Pressure is a polynomial in `θ = T / T_triple(NaCl)`; the liquid lies on
//! the halite liquidus and the vapor carries the vapor/liquid ratio of the VL
//! field at the same state. Temperatures in °C, pressures in bar.

use crate::constants::NACL_TRIPLE_T_C;
use crate::error::{BrineError, BrineResult};
use crate::liquidus;
use crate::vapor_liquid::vapor_ratio;
use sw_solver::{ScalarConfig, bisect, solve_bracketed};
use tracing::debug;

const F: [f64; 10] = [
    4.64e-3, 5e-7, 16.9078, -269.148, 7632.04, -49563.6, 233119.0, -513556.0, 549708.0,
    -284628.0,
];

fn coefficients() -> [f64; 11] {
    let mut f = [0.0; 11];
    f[..10].copy_from_slice(&F);
    // Ends at the NaCl triple point.
    f[10] = crate::constants::NACL_TRIPLE_P_BAR - F.iter().sum::<f64>();
    f
}

/// VLH pressure at `t_c`.
pub fn pressure(t_c: f64) -> f64 {
    let theta = t_c / NACL_TRIPLE_T_C;
    coefficients().iter().rev().fold(0.0, |acc, f| acc * theta + f)
}

/// dP/dT [bar/K] and d²P/dT² along the VLH curve.
fn pressure_derivatives(t_c: f64) -> (f64, f64) {
    let theta = t_c / NACL_TRIPLE_T_C;
    let f = coefficients();
    let mut d1 = 0.0;
    let mut d2 = 0.0;
    for (i, fi) in f.iter().enumerate().skip(1) {
        let n = i as f64;
        d1 += n * fi * theta.powi(i as i32 - 1);
        if i >= 2 {
            d2 += n * (n - 1.0) * fi * theta.powi(i as i32 - 2);
        }
    }
    (
        d1 / NACL_TRIPLE_T_C,
        d2 / (NACL_TRIPLE_T_C * NACL_TRIPLE_T_C),
    )
}

/// Liquid and vapor mole fractions on the VLH curve at (`t_c`, `p_bar`).
///
/// `p_bar` is normally [`pressure`]`(t_c)`; the liquid is evaluated on the
/// liquidus at the given pressure. `p_crit_bar` normalizes the vapor ratio
/// (see [`vapor_ratio`]).
pub fn compositions(t_c: f64, p_bar: f64, p_crit_bar: f64) -> (f64, f64) {
    let x_liquid = liquidus::composition(t_c, p_bar);
    let x_vapor = (x_liquid * vapor_ratio(t_c, p_bar, p_crit_bar)).min(x_liquid);
    (x_liquid, x_vapor)
}

fn config() -> ScalarConfig {
    ScalarConfig {
        max_iterations: 200,
        x_tol: 1e-14,
        f_tol: 1e-12,
        ..ScalarConfig::default()
    }
}

/// Temperature and pressure of the VLH pressure maximum.
pub fn peak() -> BrineResult<(f64, f64)> {
    let slope = |t: f64| -> BrineResult<(f64, f64)> { Ok(pressure_derivatives(t)) };
    let root = solve_bracketed(slope, 450.0, 750.0, &config())?;
    debug!(t_c = root.x, p_bar = pressure(root.x), "VLH pressure maximum");
    Ok((root.x, pressure(root.x)))
}

/// Highest VLH temperature: where the pressure falls to `p_floor_bar`.
pub fn max_temperature(p_floor_bar: f64, peak_t_c: f64) -> BrineResult<f64> {
    let excess = |t: f64| -> BrineResult<f64> { Ok(pressure(t) - p_floor_bar) };
    Ok(bisect(excess, peak_t_c, NACL_TRIPLE_T_C, &config())?.x)
}

/// The temperatures on the rising and falling limbs where the VLH pressure
/// equals `p_bar`, for limbs bounded by `[t_min_c, t_max_c]`.
pub fn temperatures(
    p_bar: f64,
    t_min_c: f64,
    t_max_c: f64,
    peak: (f64, f64),
) -> BrineResult<(f64, f64)> {
    let (t_peak, p_peak) = peak;
    let p_low = pressure(t_min_c).max(pressure(t_max_c));
    if !(p_low..=p_peak).contains(&p_bar) {
        return Err(BrineError::out_of_range(
            "VLH pressure [bar]",
            p_bar,
            p_low,
            p_peak,
        ));
    }
    let f = |t: f64| -> BrineResult<(f64, f64)> {
        Ok((pressure(t) - p_bar, pressure_derivatives(t).0))
    };
    let cfg = config();
    let rising = solve_bracketed(f, t_min_c, t_peak, &cfg)?.x;
    let falling = solve_bracketed(f, t_peak, t_max_c, &cfg)?.x;
    Ok((rising, falling))
}
