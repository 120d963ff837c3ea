//! Pure NaCl: phase boundaries of the salt and properties of solid halite.
//!
//! Temperatures in °C, pressures in bar.

use crate::constants::{NACL_TRIPLE_P_BAR, NACL_TRIPLE_T_C};

const TRIPLE_T_K: f64 = NACL_TRIPLE_T_C + 273.15;
const SUBLIMATION_SLOPE: f64 = 11806.1;
const BOILING_SLOPE: f64 = 9418.12;
const MELTING_DT_DP: f64 = 2.4726e-2;

const REFERENCE_T_C: f64 = 25.0;
const CP: [f64; 3] = [1148.81, 0.275774, 8.8103e-5];

/// Halite melting temperature at `p_bar`.
pub fn melting_temperature(p_bar: f64) -> f64 {
    NACL_TRIPLE_T_C + MELTING_DT_DP * (p_bar - NACL_TRIPLE_P_BAR)
}

fn clausius_clapeyron(slope: f64, t_c: f64) -> f64 {
    let log_p = NACL_TRIPLE_P_BAR.log10() + slope * (1.0 / TRIPLE_T_K - 1.0 / (t_c + 273.15));
    10f64.powf(log_p)
}

/// Vapor pressure over solid NaCl.
pub fn sublimation_pressure(t_c: f64) -> f64 {
    clausius_clapeyron(SUBLIMATION_SLOPE, t_c)
}

/// Vapor pressure over liquid NaCl.
pub fn boiling_pressure(t_c: f64) -> f64 {
    clausius_clapeyron(BOILING_SLOPE, t_c)
}

/// Vapor pressure of pure NaCl: sublimation below the triple point, boiling
/// above it.
pub fn vapor_pressure(t_c: f64) -> f64 {
    if t_c < NACL_TRIPLE_T_C {
        sublimation_pressure(t_c)
    } else {
        boiling_pressure(t_c)
    }
}

/// Halite density [kg/m³].
pub fn density(t_c: f64, p_bar: f64) -> f64 {
    let rho0 = 2170.43 - 0.24599 * t_c - 9.5797e-5 * t_c * t_c;
    let compressibility = 5.727e-3 + 2.715e-3 * (t_c / 733.4).exp();
    rho0 + compressibility * p_bar
}

/// Specific heat of halite [J/(kg·K)].
pub fn heat_capacity(t_c: f64) -> f64 {
    CP[0] + CP[1] * t_c + CP[2] * t_c * t_c
}

/// Halite enthalpy [J/kg] relative to 25 °C, from the integrated heat capacity.
pub fn enthalpy(t_c: f64) -> f64 {
    let integral = |t: f64| CP[0] * t + CP[1] * t * t / 2.0 + CP[2] * t * t * t / 3.0;
    integral(t_c) - integral(REFERENCE_T_C)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_meet_at_triple_point() {
        assert!((sublimation_pressure(NACL_TRIPLE_T_C) / NACL_TRIPLE_P_BAR - 1.0).abs() < 1e-12);
        assert!((boiling_pressure(NACL_TRIPLE_T_C) / NACL_TRIPLE_P_BAR - 1.0).abs() < 1e-12);
        assert_eq!(melting_temperature(NACL_TRIPLE_P_BAR), NACL_TRIPLE_T_C);
        // Sublimation is steeper: below the triple point it lies beneath the
        // extrapolated liquid curve.
        assert!(sublimation_pressure(700.0) < boiling_pressure(700.0));
        assert_eq!(vapor_pressure(700.0), sublimation_pressure(700.0));
        assert_eq!(vapor_pressure(900.0), boiling_pressure(900.0));
    }

    #[test]
    fn melting_rises_with_pressure() {
        assert!((melting_temperature(1000.0) - 825.426).abs() < 1e-2);
    }

    #[test]
    fn halite_density_near_ambient() {
        let rho = density(25.0, 1.0);
        assert!((rho - 2164.2).abs() < 1.0, "rho = {rho}");
        assert!(density(25.0, 1000.0) > rho);
    }

    #[test]
    fn enthalpy_integrates_heat_capacity() {
        assert_eq!(enthalpy(REFERENCE_T_C), 0.0);
        let (t, dt) = (300.0, 1e-3);
        let slope = (enthalpy(t + dt) - enthalpy(t - dt)) / (2.0 * dt);
        assert!((slope - heat_capacity(t)).abs() < 1e-4);
    }
}
