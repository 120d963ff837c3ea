//! Grid generation for temperature, pressure and fraction sweeps.
//!
//! Used to lay out the rows and columns of phase-boundary surfaces and the
//! sample points of diagram lines.

use crate::error::{BrineError, BrineResult};
use std::fmt;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points (both ends positive)
    Logarithmic,
    /// Uniform in `u`, mapped through `u^power`; `power > 1` packs points
    /// near the start.
    Power(f64),
}

/// Definition of a single parameter sweep between two SI values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(start: f64, end: f64, num_points: usize, sweep_type: SweepType) -> BrineResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(BrineError::InvalidSettings {
                what: "sweep bounds must be finite".to_string(),
            });
        }
        if num_points == 0 {
            return Err(BrineError::InvalidSettings {
                what: "sweep must have at least 1 point".to_string(),
            });
        }
        match sweep_type {
            SweepType::Logarithmic if start <= 0.0 || end <= 0.0 => {
                return Err(BrineError::InvalidSettings {
                    what: format!("logarithmic sweep needs positive bounds, got [{start}, {end}]"),
                });
            }
            SweepType::Power(p) if !(p.is_finite() && p > 0.0) => {
                return Err(BrineError::InvalidSettings {
                    what: format!("sweep power must be positive, got {p}"),
                });
            }
            _ => {}
        }
        Ok(Self {
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    pub fn linear(start: f64, end: f64, num_points: usize) -> BrineResult<Self> {
        Self::new(start, end, num_points, SweepType::Linear)
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => self.generate_linear(),
            SweepType::Logarithmic => self.generate_logarithmic(),
            SweepType::Power(p) => self.generate_power(p),
        }
    }

    fn unit_steps(&self) -> impl Iterator<Item = f64> + '_ {
        let n = self.num_points;
        (0..n).map(move |i| i as f64 / (n - 1) as f64)
    }

    fn generate_linear(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let mut points = sw_core::linspace(self.start, self.end, self.num_points);
        // Ensure exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_logarithmic(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let (log_start, log_end) = (self.start.ln(), self.end.ln());
        let mut points: Vec<f64> = self
            .unit_steps()
            .map(|u| (log_start + u * (log_end - log_start)).exp())
            .collect();
        points[0] = self.start;
        points[self.num_points - 1] = self.end;
        points
    }

    fn generate_power(&self, power: f64) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let mut points: Vec<f64> = self
            .unit_steps()
            .map(|u| self.start + u.powf(power) * (self.end - self.start))
            .collect();
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
            Self::Power(p) => write!(f, "Power({p})"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep from {} to {} ({} points, {})",
            self.start, self.end, self.num_points, self.sweep_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sweep_generation() {
        let sweep = SweepDefinition::linear(300.0, 400.0, 5).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 300.0).abs() < 1e-9);
        assert!((points[2] - 350.0).abs() < 1e-9);
        assert_eq!(points[4], 400.0);
    }

    #[test]
    fn logarithmic_sweep_generation() {
        let sweep = SweepDefinition::new(1e5, 1e6, 3, SweepType::Logarithmic).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points, vec![1e5, points[1], 1e6]);
        let expected_mid = (1e5_f64 * 1e6_f64).sqrt();
        assert!((points[1] - expected_mid).abs() / expected_mid < 1e-9);
    }

    #[test]
    fn power_sweep_packs_start() {
        let sweep = SweepDefinition::new(0.0, 1.0, 5, SweepType::Power(2.0)).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points, vec![0.0, 0.0625, 0.25, 0.5625, 1.0]);
    }

    #[test]
    fn single_point_sweep() {
        let sweep = SweepDefinition::linear(300.0, 300.0, 1).unwrap();
        assert_eq!(sweep.generate_points(), vec![300.0]);
    }

    #[test]
    fn reject_invalid_definitions() {
        assert!(SweepDefinition::linear(300.0, 400.0, 0).is_err());
        assert!(SweepDefinition::new(0.0, 1e6, 4, SweepType::Logarithmic).is_err());
        assert!(SweepDefinition::new(0.0, 1.0, 4, SweepType::Power(-1.0)).is_err());
        assert!(SweepDefinition::linear(f64::NAN, 1.0, 4).is_err());
    }
}
