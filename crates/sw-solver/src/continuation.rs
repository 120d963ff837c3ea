//! Pseudo-arclength continuation for implicit curves `G(y) = 0`, `y ∈ R²`.
//!
//! Each step predicts along the unit tangent, then corrects with Newton on
//! the augmented system `[G(y); t·(y - y_k) - ds] = 0`. The step length adapts:
//! it grows after fast corrector convergence and halves after a failed
//! corrector, a rejected point or an excessive turn of the tangent. Tracing
//! ends when the problem reports completion, the step falls below its
//! minimum, or the point budget is spent.

use crate::error::SolverError;
use crate::jacobian::robust_difference_jacobian;
use crate::newton::{NewtonConfig, newton_solve};
use nalgebra::{DMatrix, DVector, Vector2};
use tracing::{debug, trace};

/// A plane curve defined implicitly by one scalar equation.
pub trait PlaneCurve {
    type Error: From<SolverError>;

    /// Residual `G(y)`; errors mark points outside the curve's domain.
    fn residual(&self, y: [f64; 2]) -> Result<f64, Self::Error>;

    /// Extra acceptance test for a corrected point (e.g. monotonicity).
    fn accept(&self, _previous: [f64; 2], _next: [f64; 2]) -> bool {
        true
    }

    /// True once the trace has reached its target.
    fn is_done(&self, _y: [f64; 2]) -> bool {
        false
    }
}

/// Adaptive step-size policy, in scaled arclength units.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepPolicy {
    pub initial_step: f64,
    pub min_step: f64,
    pub max_step: f64,
    pub grow_factor: f64,
    pub shrink_factor: f64,
    /// Corrector iterations at or below which the step grows.
    pub fast_iterations: usize,
    /// Minimum cosine between consecutive tangents.
    pub min_turn_cos: f64,
    pub max_points: usize,
}

impl Default for StepPolicy {
    fn default() -> Self {
        Self {
            initial_step: 0.5,
            min_step: 1e-7,
            max_step: 2.0,
            grow_factor: 1.5,
            shrink_factor: 0.5,
            fast_iterations: 3,
            min_turn_cos: 0.9,
            max_points: 4000,
        }
    }
}

/// Full continuation configuration.
#[derive(Clone, Debug)]
pub struct ArcLengthConfig {
    pub policy: StepPolicy,
    pub corrector: NewtonConfig,
    /// Characteristic size of each coordinate; arclength is measured in `y / scale`.
    pub scale: [f64; 2],
    /// Relative perturbation for finite-difference gradients.
    pub fd_epsilon: f64,
}

impl Default for ArcLengthConfig {
    fn default() -> Self {
        Self {
            policy: StepPolicy::default(),
            corrector: NewtonConfig {
                max_iterations: 8,
                abs_tol: 1e-11,
                ..NewtonConfig::default()
            },
            scale: [1.0, 1.0],
            fd_epsilon: 1e-7,
        }
    }
}

/// Why a trace stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The curve reported completion.
    Done,
    /// The step shrank below the policy minimum.
    MinStep,
    /// The point budget was exhausted.
    MaxPoints,
}

/// Traced points in the caller's (unscaled) coordinates.
#[derive(Clone, Debug)]
pub struct CurveTrace {
    pub points: Vec<[f64; 2]>,
    pub stop: StopReason,
    pub rejected_steps: usize,
}

struct Scaled<'a, C: PlaneCurve> {
    curve: &'a C,
    scale: [f64; 2],
}

impl<C: PlaneCurve> Scaled<'_, C> {
    fn unscale(&self, z: &DVector<f64>) -> [f64; 2] {
        [z[0] * self.scale[0], z[1] * self.scale[1]]
    }

    fn residual(&self, z: &DVector<f64>) -> Result<DVector<f64>, C::Error> {
        Ok(DVector::from_element(1, self.curve.residual(self.unscale(z))?))
    }

    fn gradient(&self, z: &DVector<f64>, eps: f64) -> Result<Vector2<f64>, C::Error> {
        let jac = robust_difference_jacobian(z, |v| self.residual(v), eps)?;
        Ok(Vector2::new(jac[(0, 0)], jac[(0, 1)]))
    }

    /// Unit tangent oriented along `hint`.
    fn tangent(
        &self,
        z: &DVector<f64>,
        hint: &Vector2<f64>,
        eps: f64,
    ) -> Result<Vector2<f64>, C::Error> {
        let g = self.gradient(z, eps)?;
        let t = Vector2::new(g[1], -g[0]);
        let norm = t.norm();
        if !norm.is_finite() || norm == 0.0 {
            return Err(SolverError::Numeric {
                what: "vanishing curve gradient".to_string(),
            }
            .into());
        }
        let t = t / norm;
        Ok(if t.dot(hint) < 0.0 { -t } else { t })
    }
}

/// Trace a curve from `start` (assumed on the curve) heading along `direction`.
pub fn trace_curve<C: PlaneCurve>(
    curve: &C,
    start: [f64; 2],
    direction: [f64; 2],
    config: &ArcLengthConfig,
) -> Result<CurveTrace, C::Error> {
    let policy = &config.policy;
    if !(policy.min_step > 0.0 && policy.min_step <= policy.initial_step) {
        return Err(SolverError::InvalidArg {
            what: "continuation step policy".to_string(),
        }
        .into());
    }

    let scaled = Scaled {
        curve,
        scale: config.scale,
    };
    let eps = config.fd_epsilon;

    let mut z = DVector::from_vec(vec![start[0] / config.scale[0], start[1] / config.scale[1]]);
    let hint = Vector2::new(
        direction[0] / config.scale[0],
        direction[1] / config.scale[1],
    );
    let mut t = scaled.tangent(&z, &hint, eps)?;

    let mut points = vec![start];
    let mut ds = policy.initial_step;
    let mut rejected_steps = 0;

    if curve.is_done(start) {
        return Ok(CurveTrace {
            points,
            stop: StopReason::Done,
            rejected_steps,
        });
    }

    loop {
        if points.len() >= policy.max_points {
            debug!(points = points.len(), "continuation point budget exhausted");
            return Ok(CurveTrace {
                points,
                stop: StopReason::MaxPoints,
                rejected_steps,
            });
        }
        if ds < policy.min_step {
            debug!(points = points.len(), ds, "continuation step below minimum");
            return Ok(CurveTrace {
                points,
                stop: StopReason::MinStep,
                rejected_steps,
            });
        }

        let z_k = z.clone();
        let t_k = t;
        let predictor = &z_k + DVector::from_vec(vec![ds * t_k[0], ds * t_k[1]]);

        let augmented = |v: &DVector<f64>| -> Result<DVector<f64>, C::Error> {
            let g = scaled.residual(v)?[0];
            let arc = t_k[0] * (v[0] - z_k[0]) + t_k[1] * (v[1] - z_k[1]) - ds;
            Ok(DVector::from_vec(vec![g, arc]))
        };
        let augmented_jacobian = |v: &DVector<f64>| -> Result<DMatrix<f64>, C::Error> {
            let g = scaled.gradient(v, eps)?;
            Ok(DMatrix::from_row_slice(2, 2, &[g[0], g[1], t_k[0], t_k[1]]))
        };

        let corrected = newton_solve(
            predictor,
            augmented,
            augmented_jacobian,
            |v| v.iter().all(|c| c.is_finite()),
            &config.corrector,
        );

        let step = corrected.ok().and_then(|res| {
            let y_new = scaled.unscale(&res.x);
            let previous = *points.last()?;
            if !curve.accept(previous, y_new) {
                return None;
            }
            let t_new = scaled.tangent(&res.x, &t_k, eps).ok()?;
            if t_new.dot(&t_k) < policy.min_turn_cos {
                return None;
            }
            Some((res, y_new, t_new))
        });

        match step {
            Some((res, y_new, t_new)) => {
                trace!(t = y_new[0], y = y_new[1], ds, "continuation step accepted");
                points.push(y_new);
                z = res.x;
                t = t_new;
                if res.iterations <= policy.fast_iterations {
                    ds = (ds * policy.grow_factor).min(policy.max_step);
                }
                if curve.is_done(y_new) {
                    return Ok(CurveTrace {
                        points,
                        stop: StopReason::Done,
                        rejected_steps,
                    });
                }
            }
            None => {
                rejected_steps += 1;
                ds *= policy.shrink_factor;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unit circle, traced counter-clockwise from (1, 0) until y < 0 again.
    struct Circle;

    impl PlaneCurve for Circle {
        type Error = SolverError;

        fn residual(&self, y: [f64; 2]) -> Result<f64, SolverError> {
            Ok(y[0] * y[0] + y[1] * y[1] - 1.0)
        }

        fn is_done(&self, y: [f64; 2]) -> bool {
            y[0] < -0.99
        }
    }

    #[test]
    fn traces_half_circle_through_vertical_tangents() {
        let config = ArcLengthConfig {
            policy: StepPolicy {
                initial_step: 0.1,
                max_step: 0.2,
                ..StepPolicy::default()
            },
            ..ArcLengthConfig::default()
        };
        let trace = trace_curve(&Circle, [1.0, 0.0], [0.0, 1.0], &config).unwrap();
        assert_eq!(trace.stop, StopReason::Done);
        for p in &trace.points {
            assert!((p[0] * p[0] + p[1] * p[1] - 1.0).abs() < 1e-8);
        }
        // only the final step may cross y = 0
        let (_, upper) = trace.points.split_last().unwrap();
        assert!(upper.iter().all(|p| p[1] >= -1e-9));
        assert!(trace.points.len() > 10);
    }

    /// y = sqrt(x - 1) written as G = y^2 - (x - 1); undefined for x < 1.
    /// Traced with decreasing x it must stop at the vertical-tangent end.
    struct SqrtBranch;

    impl PlaneCurve for SqrtBranch {
        type Error = SolverError;

        fn residual(&self, y: [f64; 2]) -> Result<f64, SolverError> {
            if y[0] < 1.0 || y[1] < 0.0 {
                return Err(SolverError::InvalidArg {
                    what: "outside branch".to_string(),
                });
            }
            Ok(y[1] - (y[0] - 1.0).sqrt())
        }

        fn accept(&self, previous: [f64; 2], next: [f64; 2]) -> bool {
            next[0] < previous[0]
        }
    }

    #[test]
    fn shrinks_into_domain_edge() {
        let trace = trace_curve(
            &SqrtBranch,
            [5.0, 2.0],
            [-1.0, 0.0],
            &ArcLengthConfig::default(),
        )
        .unwrap();
        assert_eq!(trace.stop, StopReason::MinStep);
        let last = trace.points.last().unwrap();
        assert!(last[0] - 1.0 < 1e-3);
        assert!(trace.points.windows(2).all(|w| w[1][0] < w[0][0]));
        assert!(trace.rejected_steps > 0);
    }
}
