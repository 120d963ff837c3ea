//! Solver and diagram configuration.
//!
//! Settings are fixed when a [`BinarySaltSystem`](crate::BinarySaltSystem)
//! is built. With the `serde` feature they can be read from YAML; missing
//! fields take their defaults and the result is validated before use.

use crate::batch::EvalMode;
use crate::composition::DeformedComposition;
use crate::constants::LIQUIDUS_PRESSURE_CAP_PA;
use crate::error::{BrineError, BrineResult};
use sw_solver::{ArcLengthConfig, NewtonConfig, ScalarConfig, StepPolicy};

/// Newton iteration for the critical composition at a given temperature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CriticalSettings {
    pub max_iterations: usize,
    /// Step tolerance in the deformed composition.
    pub x_tol: f64,
    /// Residual tolerance on the critical temperature [K].
    pub f_tol_k: f64,
    /// Largest Newton step in the deformed composition.
    pub max_step: f64,
}

impl Default for CriticalSettings {
    fn default() -> Self {
        Self {
            max_iterations: 60,
            x_tol: 1e-12,
            f_tol_k: 1e-9,
            max_step: 0.05,
        }
    }
}

impl CriticalSettings {
    pub(crate) fn scalar_config(&self) -> ScalarConfig {
        ScalarConfig {
            max_iterations: self.max_iterations,
            x_tol: self.x_tol,
            f_tol: self.f_tol_k,
            max_step: self.max_step,
        }
    }
}

/// Pseudo-arclength tracing of vapor-liquid branches in (τ, ξ), with
/// `τ = √(T - T_merge)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContinuationSettings {
    pub policy: StepPolicy,
    pub corrector_max_iterations: usize,
    pub corrector_tol: f64,
    /// Characteristic temperature step [K] of the scaled arclength; τ is
    /// scaled by its square root.
    pub scale_t_k: f64,
    /// Characteristic step of the deformed composition.
    pub scale_xi: f64,
    /// Tracing stops once this close [K] to the merge temperature.
    pub end_tol_k: f64,
    /// Tracing stops once the composition drops below this fraction of the
    /// starting composition.
    pub composition_floor: f64,
    /// Largest gap [K] to the merge point that is closed by snapping.
    pub snap_tol_k: f64,
}

impl Default for ContinuationSettings {
    fn default() -> Self {
        Self {
            policy: StepPolicy {
                initial_step: 0.2,
                min_step: 1e-8,
                max_step: 1.0,
                ..StepPolicy::default()
            },
            corrector_max_iterations: 10,
            corrector_tol: 1e-10,
            scale_t_k: 10.0,
            scale_xi: 0.01,
            end_tol_k: 1e-6,
            composition_floor: 1e-10,
            snap_tol_k: 0.5,
        }
    }
}

impl ContinuationSettings {
    pub(crate) fn arclength_config(&self) -> ArcLengthConfig {
        ArcLengthConfig {
            policy: self.policy.clone(),
            corrector: NewtonConfig {
                max_iterations: self.corrector_max_iterations,
                abs_tol: self.corrector_tol,
                ..NewtonConfig::default()
            },
            scale: [self.scale_t_k.sqrt(), self.scale_xi],
            ..ArcLengthConfig::default()
        }
    }
}

/// Everything a `BinarySaltSystem` needs besides its water formulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverSettings {
    pub eval_mode: EvalMode,
    pub critical: CriticalSettings,
    /// Lower centre of the deformed composition.
    pub deform_lower: f64,
    /// Upper centre of the deformed composition.
    pub deform_upper: f64,
    pub continuation: ContinuationSettings,
    /// Highest pressure [Pa] at which the halite liquidus is evaluated.
    pub liquidus_pressure_cap_pa: f64,
    /// Relative tolerance for a state to count as lying on a boundary.
    pub boundary_tol: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let deform = DeformedComposition::default();
        Self {
            eval_mode: EvalMode::Parallel,
            critical: CriticalSettings::default(),
            deform_lower: deform.lower(),
            deform_upper: deform.upper(),
            continuation: ContinuationSettings::default(),
            liquidus_pressure_cap_pa: LIQUIDUS_PRESSURE_CAP_PA,
            boundary_tol: 1e-8,
        }
    }
}

fn invalid(what: impl Into<String>) -> BrineError {
    BrineError::InvalidSettings { what: what.into() }
}

impl SolverSettings {
    pub fn serial() -> Self {
        Self {
            eval_mode: EvalMode::Serial,
            ..Self::default()
        }
    }

    pub fn deformation(&self) -> BrineResult<DeformedComposition> {
        DeformedComposition::new(self.deform_lower, self.deform_upper)
    }

    pub fn validate(&self) -> BrineResult<()> {
        self.deformation()?;
        let c = &self.critical;
        if c.max_iterations == 0 {
            return Err(invalid("critical.max_iterations must be at least 1"));
        }
        for (name, v) in [
            ("critical.x_tol", c.x_tol),
            ("critical.f_tol_k", c.f_tol_k),
            ("critical.max_step", c.max_step),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {v}")));
            }
        }

        let k = &self.continuation;
        let p = &k.policy;
        if !(p.min_step > 0.0 && p.min_step <= p.initial_step && p.initial_step <= p.max_step) {
            return Err(invalid(
                "continuation steps must satisfy 0 < min_step <= initial_step <= max_step",
            ));
        }
        if !(p.grow_factor >= 1.0 && p.shrink_factor > 0.0 && p.shrink_factor < 1.0) {
            return Err(invalid(
                "continuation needs grow_factor >= 1 and 0 < shrink_factor < 1",
            ));
        }
        if p.max_points < 2 || k.corrector_max_iterations == 0 {
            return Err(invalid("continuation budgets must be positive"));
        }
        for (name, v) in [
            ("continuation.corrector_tol", k.corrector_tol),
            ("continuation.scale_t_k", k.scale_t_k),
            ("continuation.scale_xi", k.scale_xi),
            ("continuation.end_tol_k", k.end_tol_k),
            ("continuation.composition_floor", k.composition_floor),
            ("continuation.snap_tol_k", k.snap_tol_k),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {v}")));
            }
        }

        if !(self.liquidus_pressure_cap_pa.is_finite() && self.liquidus_pressure_cap_pa > 0.0) {
            return Err(invalid(format!(
                "liquidus_pressure_cap_pa must be positive, got {}",
                self.liquidus_pressure_cap_pa
            )));
        }
        if !(self.boundary_tol.is_finite() && self.boundary_tol >= 0.0 && self.boundary_tol < 0.1) {
            return Err(invalid(format!(
                "boundary_tol must lie in [0, 0.1), got {}",
                self.boundary_tol
            )));
        }
        Ok(())
    }

    /// Parse settings from YAML and validate them.
    #[cfg(feature = "serde")]
    pub fn from_yaml_str(content: &str) -> BrineResult<Self> {
        let settings: SolverSettings =
            serde_yaml::from_str(content).map_err(|e| invalid(format!("YAML: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    #[cfg(feature = "serde")]
    pub fn to_yaml_string(&self) -> BrineResult<String> {
        self.validate()?;
        serde_yaml::to_string(self).map_err(|e| invalid(format!("YAML: {e}")))
    }
}

/// Resolution of a full phase diagram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagramSettings {
    /// Temperature rows of every surface and points of every line.
    pub n_t: usize,
    /// Pressure (or pressure-fraction) columns.
    pub n_p: usize,
    /// Composition columns of the three-phase surfaces.
    pub n_x: usize,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            n_t: 100,
            n_p: 50,
            n_x: 20,
        }
    }
}

impl DiagramSettings {
    pub fn validate(&self) -> BrineResult<()> {
        if self.n_t < 2 || self.n_p < 2 || self.n_x < 2 {
            return Err(invalid(format!(
                "diagram resolution must be at least 2 in every direction, got {}x{}x{}",
                self.n_t, self.n_p, self.n_x
            )));
        }
        Ok(())
    }
}
