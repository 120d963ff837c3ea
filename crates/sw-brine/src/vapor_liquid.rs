//! Vapor + liquid coexistence compositions.
//!
//! On an isotherm the two-phase field spans the pressures between a lower
//! limit and the point where the liquid and vapor branches merge (top). The
//! top is the water boiling pressure below the water critical temperature and
//! the critical curve above it. The lower limit is the VLH curve up to its
//! highest temperature and the boiling curve of molten NaCl beyond that.
//!
//! With `ΔP = P_top - P` the liquid follows
//! `X_L = X_top + g0·√ΔP + g1·ΔP + g2·ΔP²`, where `g1` and `g2` are smooth
//! steps in temperature and `g0` pins the liquid to its composition at the
//! lower limit. The vapor carries the liquid composition times a ratio whose
//! logarithm runs from the ideal-gas value `P_NaCl / P` at the NaCl vapor
//! pressure to one at the critical pressure. Temperatures in °C, pressures in
//! bar, compositions as mole fractions.

use crate::error::{BrineError, BrineResult};
use crate::halite;
use sw_core::convert::{k_to_c, pa_to_bar};

/// Liquid expansion: `g1` steps from H[0] to H[1] around H[2] with width
/// H[3] plus H[4]·T²; `g2` steps from H[5] to H[6] around H[7] with width
/// H[8] plus H[9]·exp(-H[10]·T).
const H: [f64; 11] = [
    1.68486e-3, 2.19379e-4, 438.854, 18.4836, -5.6765e-10, 6.73704e-6, 1.44951e-7, 384.904,
    7.07477, 6.06896e-5, 7.62859e-3,
];

/// Vapor ratio shape functions `j0..j3` of temperature.
const K: [f64; 16] = [
    -0.235694, -0.188838, 0.004, 0.0552466, 0.66918, 396.848, 45.0, -3.2719e-7, 141.699,
    -0.292631, -0.00139991, 1.95965e-6, -7.3653e-10, 0.904411, 0.000769766, -1.18658e-6,
];

/// Relative slack accepted on the pressure limits before rejecting a query.
const PRESSURE_SLACK: f64 = 1e-9;

/// Logistic step from `cold` to `hot` centred on `centre`.
fn step(t_c: f64, cold: f64, hot: f64, centre: f64, width: f64) -> f64 {
    hot + (cold - hot) / (1.0 + ((t_c - centre) / width).exp())
}

/// Linear and quadratic coefficients of the liquid expansion.
fn liquid_coefficients(t_c: f64) -> (f64, f64) {
    let g1 = step(t_c, H[0], H[1], H[2], H[3]) + H[4] * t_c * t_c;
    let g2 = step(t_c, H[5], H[6], H[7], H[8]) + H[9] * (-H[10] * t_c).exp();
    (g1, g2)
}

/// Liquid mole fraction `dp_bar` below the top pressure of a field spanning
/// `span_bar`, running from `x_top` at the top to `x_low` at the lower limit.
pub fn liquid_composition(t_c: f64, dp_bar: f64, span_bar: f64, x_top: f64, x_low: f64) -> f64 {
    let (g1, g2) = liquid_coefficients(t_c);
    let g0 = (x_low - x_top - g1 * span_bar - g2 * span_bar * span_bar) / span_bar.sqrt();
    x_top + g0 * dp_bar.sqrt() + g1 * dp_bar + g2 * dp_bar * dp_bar
}

/// Ratio `X_vapor / X_liquid` of coexisting fluids at (`t_c`, `p_bar`).
///
/// `p_crit_bar` is the pressure at which the ratio reaches one: the critical
/// pressure above the water critical temperature, its subcritical extension
/// below. At or under the NaCl vapor pressure the ratio is the ideal-gas
/// value `P_NaCl / P`.
pub fn vapor_ratio(t_c: f64, p_bar: f64, p_crit_bar: f64) -> f64 {
    let p_nacl = halite::vapor_pressure(t_c);
    let u = 1.0 - ((p_bar - p_nacl) / (p_crit_bar - p_nacl)).clamp(0.0, 1.0);

    let j0 = K[0] + K[1] * (-K[2] * t_c).exp();
    let j1 = step(t_c, K[3], K[4], K[5], K[6]) + K[7] * (t_c + K[8]).powi(2);
    let j2 = K[9] + t_c * (K[10] + t_c * (K[11] + t_c * K[12]));
    let j3 = K[13] + t_c * (K[14] + t_c * K[15]);
    let f = 1.0 + j0 * u.powf(j1) + j2 * u + j3 * u * u - (1.0 + j0 + j2 + j3) * u.powi(3);

    10f64.powf((p_nacl / p_bar).log10() + f * (p_crit_bar / p_nacl).log10())
}

/// Composition and pressure limits of the VL field on one isotherm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaporLiquidBounds {
    pub t_k: f64,
    /// Merge pressure [Pa] (boiling or critical).
    pub p_top_pa: f64,
    /// Merge mole fraction (zero below the water critical temperature).
    pub x_top: f64,
    /// Lower pressure limit [Pa]: the VLH pressure, or the NaCl boiling
    /// pressure above the highest VLH temperature.
    pub p_low_pa: f64,
    pub x_liquid_low: f64,
    pub x_vapor_low: f64,
    /// Pressure [Pa] where the vapor/liquid ratio reaches one.
    pub p_crit_pa: f64,
}

impl VaporLiquidBounds {
    pub fn contains(&self, p_pa: f64) -> bool {
        let slack = PRESSURE_SLACK * self.p_top_pa;
        p_pa >= self.p_low_pa - slack && p_pa <= self.p_top_pa + slack
    }

    /// Pressure fraction `s` in [0, 1]; zero at the merge point.
    pub fn fraction(&self, p_pa: f64) -> BrineResult<f64> {
        if !self.contains(p_pa) {
            return Err(BrineError::out_of_range(
                "vapor-liquid pressure [Pa]",
                p_pa,
                self.p_low_pa,
                self.p_top_pa,
            ));
        }
        let span = self.p_top_pa - self.p_low_pa;
        Ok(((self.p_top_pa - p_pa) / span).clamp(0.0, 1.0))
    }

    /// Pressure at fraction `s`.
    pub fn pressure_at(&self, s: f64) -> f64 {
        self.p_top_pa - s * (self.p_top_pa - self.p_low_pa)
    }

    /// (liquid, vapor) mole fractions at fraction `s`.
    pub fn compositions_at(&self, s: f64) -> (f64, f64) {
        if s <= 0.0 {
            return (self.x_top, self.x_top);
        }
        if s >= 1.0 {
            return (self.x_liquid_low, self.x_vapor_low);
        }
        let t_c = k_to_c(self.t_k);
        let span = pa_to_bar(self.p_top_pa - self.p_low_pa);
        let x_liquid =
            liquid_composition(t_c, s * span, span, self.x_top, self.x_liquid_low).clamp(0.0, 1.0);
        let ratio = vapor_ratio(
            t_c,
            pa_to_bar(self.pressure_at(s)),
            pa_to_bar(self.p_crit_pa),
        );
        (x_liquid, (x_liquid * ratio).min(x_liquid))
    }

    /// (liquid, vapor) mole fractions at `p_pa`.
    pub fn compositions(&self, p_pa: f64) -> BrineResult<(f64, f64)> {
        Ok(self.compositions_at(self.fraction(p_pa)?))
    }
}
