//! Auxiliary saturation equations (Wagner & Pruss).
//!
//! Explicit fits of the boiling curve and the coexisting densities. They
//! seed the phase-equilibrium solve and provide the boiling curve of the
//! reference formulation.

/// Critical temperature [K].
pub const TC_K: f64 = 647.096;
/// Critical pressure [Pa].
pub const PC_PA: f64 = 22.064e6;
/// Critical density [kg/m³].
pub const RHOC_KG_M3: f64 = 322.0;

const PSAT_A: [f64; 6] = [
    -7.85951783,
    1.84408259,
    -11.7866497,
    22.6807411,
    -15.9618719,
    1.80122502,
];
const PSAT_EXP: [f64; 6] = [1.0, 1.5, 3.0, 3.5, 4.0, 7.5];

const RHO_LIQ_B: [f64; 6] = [
    1.99274064,
    1.09965342,
    -0.510839303,
    -1.75493479,
    -45.5170352,
    -6.74694450e5,
];
const RHO_LIQ_EXP: [f64; 6] = [
    1.0 / 3.0,
    2.0 / 3.0,
    5.0 / 3.0,
    16.0 / 3.0,
    43.0 / 3.0,
    110.0 / 3.0,
];

const RHO_VAP_C: [f64; 6] = [
    -2.03150240,
    -2.68302940,
    -5.38626492,
    -17.2991605,
    -44.7586581,
    -63.9201063,
];
const RHO_VAP_EXP: [f64; 6] = [
    2.0 / 6.0,
    4.0 / 6.0,
    8.0 / 6.0,
    18.0 / 6.0,
    37.0 / 6.0,
    71.0 / 6.0,
];

fn theta(t_k: f64) -> f64 {
    (1.0 - t_k / TC_K).max(0.0)
}

fn series(coeffs: &[f64; 6], exps: &[f64; 6], x: f64) -> f64 {
    coeffs.iter().zip(exps).map(|(c, e)| c * x.powf(*e)).sum()
}

/// Boiling pressure [Pa]; exactly `PC_PA` at `TC_K`.
pub fn boiling_pressure(t_k: f64) -> f64 {
    let th = theta(t_k);
    PC_PA * (TC_K / t_k * series(&PSAT_A, &PSAT_EXP, th)).exp()
}

/// `d ln(p_sat) / dT` [1/K].
pub fn dln_boiling_pressure_dt(t_k: f64) -> f64 {
    let th = theta(t_k);
    let s = series(&PSAT_A, &PSAT_EXP, th);
    let ds: f64 = PSAT_A
        .iter()
        .zip(PSAT_EXP)
        .map(|(a, e)| a * e * th.powf(e - 1.0))
        .sum();
    // dθ/dT = -1/Tc
    -TC_K / (t_k * t_k) * s - ds / t_k
}

/// Saturated liquid density [kg/m³].
pub fn saturated_liquid_density(t_k: f64) -> f64 {
    RHOC_KG_M3 * (1.0 + series(&RHO_LIQ_B, &RHO_LIQ_EXP, theta(t_k)))
}

/// Saturated vapor density [kg/m³].
pub fn saturated_vapor_density(t_k: f64) -> f64 {
    RHOC_KG_M3 * series(&RHO_VAP_C, &RHO_VAP_EXP, theta(t_k)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_limit_is_exact() {
        assert_eq!(boiling_pressure(TC_K), PC_PA);
        assert_eq!(saturated_liquid_density(TC_K), RHOC_KG_M3);
        assert_eq!(saturated_vapor_density(TC_K), RHOC_KG_M3);
    }

    #[test]
    fn normal_boiling_point() {
        let p = boiling_pressure(373.124);
        assert!((p - 101_325.0).abs() < 20.0, "p = {p}");
        assert!((saturated_liquid_density(373.15) - 958.35).abs() < 0.05);
        assert!((saturated_vapor_density(373.15) - 0.598).abs() < 1e-3);
    }

    #[test]
    fn slope_matches_finite_difference() {
        for t in [280.0, 400.0, 600.0, 645.0] {
            let h = 1e-4;
            let fd = (boiling_pressure(t + h).ln() - boiling_pressure(t - h).ln()) / (2.0 * h);
            let an = dln_boiling_pressure_dt(t);
            assert!(((fd - an) / an).abs() < 1e-6, "T = {t}");
        }
    }
}
