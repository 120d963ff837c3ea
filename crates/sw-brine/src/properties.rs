//! Scaled-temperature correlations for brine volume and enthalpy.
//!
//! A brine at (T, P, x) has the molar volume of pure water at `T_V*` and the
//! specific enthalpy of pure water at `T_h*`, both at the same pressure. The
//! scaled temperatures are linear in T with pressure- and
//! composition-dependent coefficients. Temperatures in °C, pressures in bar.

use crate::composition::molar_mass;
use crate::constants::M_H2O;

/// Temperature [°C] at which pure water has the brine's molar volume.
pub fn volume_temperature(t_c: f64, p_bar: f64, x: f64) -> f64 {
    let (p, p2, p3) = (p_bar, p_bar * p_bar, p_bar * p_bar * p_bar);
    let sqrt_p = p_bar.sqrt();

    let n1_salt = 330.47 + 0.942876 * sqrt_p + 0.0817193 * p - 2.47556e-8 * p2 + 3.45052e-10 * p3;
    let n11 = -54.2958 - 45.7623 * (-9.44785e-4 * p).exp();
    let n12 = -n1_salt - n11;

    let n2_salt =
        -0.0370751 + 0.00237723 * sqrt_p + 5.42049e-5 * p + 5.84709e-9 * p2 - 5.99373e-13 * p3;
    let n21 = -2.6142 - 2.39092e-4 * p;
    let n22 = 1.0 - n2_salt - n21;

    let w = 1.0 - x;
    let n1 = n1_salt + n11 * w + n12 * w * w;
    let n2 = n2_salt + n21 * w + n22 * w * w;
    n1 + n2 * t_c
}

/// Temperature [°C] at which pure water has the brine's specific enthalpy.
pub fn enthalpy_temperature(t_c: f64, p_bar: f64, x: f64) -> f64 {
    let p = p_bar;
    let q10 = 47.9048 - 9.36994e-3 * p + 6.51059e-6 * p * p;
    let q11 = -32.1724 + 0.0621255 * p;
    let q12 = -q10 - q11;

    let q2_salt = 0.241022 + 3.45087e-5 * p - 4.28356e-9 * p * p;
    let q21 = -1.69513 - 4.52781e-4 * p - 6.04279e-8 * p * p;
    let q22 = 1.0 - q2_salt - q21;

    let w = 1.0 - x;
    let q1 = q10 + q11 * w + q12 * w * w;
    let q2 = q2_salt + q21 * w + q22 * w * w;
    q1 + q2 * t_c
}

/// Brine density from the density of water evaluated at the volume temperature.
pub fn density_from_water(rho_water: f64, x: f64) -> f64 {
    rho_water * molar_mass(x) / M_H2O
}
