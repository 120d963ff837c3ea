//! Validity envelopes of the water formulations.

use crate::error::{WaterError, WaterResult};

/// Rectangular (T, P) domain a formulation is evaluated on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidityEnvelope {
    pub t_min_k: f64,
    pub t_max_k: f64,
    pub p_min_pa: f64,
    pub p_max_pa: f64,
}

impl ValidityEnvelope {
    pub fn check_temperature(&self, t_k: f64) -> WaterResult<()> {
        if (self.t_min_k..=self.t_max_k).contains(&t_k) {
            Ok(())
        } else {
            Err(WaterError::OutOfRange {
                what: "temperature [K]",
                value: t_k,
                min: self.t_min_k,
                max: self.t_max_k,
            })
        }
    }

    pub fn check_pressure(&self, p_pa: f64) -> WaterResult<()> {
        if (self.p_min_pa..=self.p_max_pa).contains(&p_pa) {
            Ok(())
        } else {
            Err(WaterError::OutOfRange {
                what: "pressure [Pa]",
                value: p_pa,
                min: self.p_min_pa,
                max: self.p_max_pa,
            })
        }
    }

    pub fn check(&self, t_k: f64, p_pa: f64) -> WaterResult<()> {
        self.check_temperature(t_k)?;
        self.check_pressure(p_pa)
    }

    pub fn contains(&self, t_k: f64, p_pa: f64) -> bool {
        self.check(t_k, p_pa).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENV: ValidityEnvelope = ValidityEnvelope {
        t_min_k: 273.15,
        t_max_k: 973.15,
        p_min_pa: 611.213,
        p_max_pa: 100e6,
    };

    #[test]
    fn inside_and_outside() {
        assert!(ENV.contains(300.0, 1e5));
        assert!(!ENV.contains(1000.0, 1e5));
        assert!(!ENV.contains(300.0, 200e6));
        assert!(!ENV.contains(f64::NAN, 1e5));
    }

    #[test]
    fn out_of_range_reports_bounds() {
        let err = ENV.check(1000.0, 1e5).unwrap_err();
        assert_eq!(
            err,
            WaterError::OutOfRange {
                what: "temperature [K]",
                value: 1000.0,
                min: 273.15,
                max: 973.15,
            }
        );
    }
}
