//! Critical curve of H2O-NaCl.
//!
//! Critical temperature and pressure are cubic in the NaCl mole fraction and
//! start at the critical point of the selected water formulation. Both are
//! strictly increasing in `x`, so the curve is inverted by one-dimensional
//! root finding. Below the water critical temperature the pressure continues
//! as a subcritical extension in `Tc - T`, which normalizes the vapor
//! composition of the VL field.

use crate::composition::{Composition, DeformedComposition};
use crate::error::{BrineError, BrineResult};
use sw_core::convert;
use sw_solver::{ScalarConfig, SolverError, newton_1d, solve_bracketed};
use tracing::{debug, warn};

const T_EXCESS: [f64; 3] = [4035.0, -41060.0, 341890.0];
const P_EXCESS: [f64; 3] = [9074.4, -15353.0, 357300.0];

/// Subcritical extension: coefficients and exponents in `Tc - T` [K].
const P_SUBCRITICAL: [(f64, f64); 7] = [
    (-2.36, 1.0),
    (0.128534, 1.5),
    (-0.023707, 2.0),
    (0.00320089, 2.5),
    (-0.000138917, 3.0),
    (1.02789e-7, 4.0),
    (-4.8376e-11, 5.0),
];

fn cubic(c: &[f64; 3], x: f64) -> f64 {
    x * (c[0] + x * (c[1] + x * c[2]))
}

fn cubic_slope(c: &[f64; 3], x: f64) -> f64 {
    c[0] + x * (2.0 * c[1] + x * 3.0 * c[2])
}

/// A point on the critical curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CriticalPoint {
    pub t_k: f64,
    pub p_pa: f64,
    pub x: Composition,
}

impl CriticalPoint {
    /// Rebuild a point from a `[T, P, x]` convergence estimate.
    pub(crate) fn from_estimate(estimate: &[f64]) -> Option<Self> {
        match *estimate {
            [t_k, p_pa, x] => Some(Self {
                t_k,
                p_pa,
                x: Composition::from_mole_fraction(x).ok()?,
            }),
            _ => None,
        }
    }
}

/// Critical curve anchored at a water critical point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalCurve {
    tc_k: f64,
    pc_bar: f64,
}

impl CriticalCurve {
    pub fn new(tc_k: f64, pc_pa: f64) -> Self {
        Self {
            tc_k,
            pc_bar: convert::pa_to_bar(pc_pa),
        }
    }

    /// Critical temperature [K] at mole fraction `x`.
    pub fn temperature(&self, x: f64) -> f64 {
        self.tc_k + cubic(&T_EXCESS, x)
    }

    /// Critical pressure [bar] at mole fraction `x`.
    pub fn pressure(&self, x: f64) -> f64 {
        self.pc_bar + cubic(&P_EXCESS, x)
    }

    /// Pressure [bar] of the subcritical extension at `t_k`; equal to the
    /// water critical pressure at and above the water critical temperature.
    pub fn subcritical_pressure(&self, t_k: f64) -> f64 {
        let below = (self.tc_k - t_k).max(0.0);
        self.pc_bar
            + P_SUBCRITICAL
                .iter()
                .map(|(c, a)| c * below.powf(*a))
                .sum::<f64>()
    }

    /// Mole fraction whose critical temperature is `t_k`.
    ///
    /// Newton in the deformed coordinate, seeded from the initial slope of
    /// the curve. At exactly the water critical temperature the root is
    /// `x = 0`, which ξ cannot reach; the iteration then exhausts its budget
    /// and reports `Convergence` with the last mole fraction as estimate.
    pub fn composition_at_temperature(
        &self,
        t_k: f64,
        deform: &DeformedComposition,
        config: &ScalarConfig,
    ) -> BrineResult<f64> {
        let excess = t_k - self.tc_k;
        if excess.is_nan() || excess < 0.0 {
            return Err(BrineError::out_of_range(
                "critical temperature [K]",
                t_k,
                self.tc_k,
                f64::INFINITY,
            ));
        }
        let seed = (excess / T_EXCESS[0]).max(1e-20);
        let f = |xi: f64| -> Result<(f64, f64), SolverError> {
            let x = deform.inverse(xi);
            let r = cubic(&T_EXCESS, x) - excess;
            Ok((r, cubic_slope(&T_EXCESS, x) * deform.inverse_derivative(xi)))
        };
        match newton_1d(f, deform.forward(seed), config) {
            Ok(root) => {
                let x = deform.inverse(root.x);
                debug!(t_k, x, iterations = root.iterations, "critical composition");
                Ok(x)
            }
            Err(SolverError::ConvergenceFailed {
                iterations,
                estimate,
                ..
            }) => {
                let x = estimate.first().map_or(0.0, |xi| deform.inverse(*xi));
                warn!(t_k, x, iterations, "critical composition did not converge");
                Err(BrineError::Convergence {
                    what: format!("critical composition at T = {t_k} K"),
                    estimate: vec![x],
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Mole fraction whose critical pressure is `p_bar`, searched on `[0, x_max]`.
    pub fn composition_at_pressure(
        &self,
        p_bar: f64,
        x_max: f64,
        config: &ScalarConfig,
    ) -> BrineResult<f64> {
        let p_max = self.pressure(x_max);
        if !(self.pc_bar..=p_max).contains(&p_bar) {
            return Err(BrineError::out_of_range(
                "critical pressure [bar]",
                p_bar,
                self.pc_bar,
                p_max,
            ));
        }
        let excess = p_bar - self.pc_bar;
        let f = |x: f64| -> BrineResult<(f64, f64)> {
            Ok((cubic(&P_EXCESS, x) - excess, cubic_slope(&P_EXCESS, x)))
        };
        Ok(solve_bracketed(f, 0.0, x_max, config)?.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sw_water::auxiliary::{PC_PA, TC_K};

    fn curve() -> CriticalCurve {
        CriticalCurve::new(TC_K, PC_PA)
    }

    fn config() -> ScalarConfig {
        ScalarConfig {
            max_iterations: 60,
            x_tol: 1e-12,
            f_tol: 1e-9,
            max_step: 0.05,
        }
    }

    #[test]
    fn starts_at_water_critical_point() {
        assert_eq!(curve().temperature(0.0), TC_K);
        assert!((curve().pressure(0.0) - 220.64).abs() < 1e-12);
    }

    #[test]
    fn composition_at_upper_temperature() {
        let c = curve();
        let x = c
            .composition_at_temperature(1273.15, &DeformedComposition::default(), &config())
            .unwrap();
        assert!((x - 0.134).abs() < 1e-3, "x = {x}");
        assert!((c.pressure(x) - 2020.66).abs() < 0.1);
    }

    #[test]
    fn resolves_dilute_compositions() {
        let c = curve();
        let t = TC_K + 1e-6;
        let x = c
            .composition_at_temperature(t, &DeformedComposition::default(), &config())
            .unwrap();
        assert!(x > 0.0 && (x * 4035.0 / 1e-6 - 1.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_at_water_critical_temperature() {
        let err = curve()
            .composition_at_temperature(TC_K, &DeformedComposition::default(), &config())
            .unwrap_err();
        match err {
            BrineError::Convergence { estimate, .. } => {
                assert_eq!(estimate.len(), 1);
                assert!(estimate[0] >= 0.0 && estimate[0] < 1e-20);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn below_water_critical_temperature_is_out_of_range() {
        let err = curve()
            .composition_at_temperature(600.0, &DeformedComposition::default(), &config())
            .unwrap_err();
        assert!(matches!(err, BrineError::OutOfRange { .. }));
    }

    #[test]
    fn subcritical_extension() {
        let c = curve();
        assert!((c.subcritical_pressure(TC_K) - 220.64).abs() < 1e-12);
        assert!((c.subcritical_pressure(573.15) - 95.53317075067527).abs() < 1e-9);
        assert!((c.subcritical_pressure(373.15) - 1.9945894713114).abs() < 1e-9);
        // stays above the water boiling pressure
        assert!(c.subcritical_pressure(573.15) > 85.88);
        assert!(c.subcritical_pressure(273.15) > 0.0);
    }

    #[test]
    fn pressure_inverse() {
        let c = curve();
        let x = c.composition_at_pressure(1000.0, 0.2, &config()).unwrap();
        assert!((c.pressure(x) - 1000.0).abs() < 1e-6);
        assert!(c.composition_at_pressure(100.0, 0.2, &config()).is_err());
    }

    #[test]
    fn estimate_layout() {
        let p = CriticalPoint::from_estimate(&[647.096, 22.064e6, 0.0]).unwrap();
        assert_eq!(p.x.mole_fraction(), 0.0);
        assert!(CriticalPoint::from_estimate(&[1.0]).is_none());
    }
}
