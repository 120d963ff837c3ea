//! Newton solver with backtracking line search and admissibility constraints.

use crate::error::SolverError;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance for residual norm
    pub abs_tol: f64,
    /// Relative tolerance for residual norm (relative to the initial norm)
    pub rel_tol: f64,
    /// Relative step tolerance: converged once |dx| <= step_tol * (1 + |x|)
    pub step_tol: f64,
    /// Line search backtracking factor
    pub line_search_beta: f64,
    /// Maximum line search iterations
    pub max_line_search_iters: usize,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            abs_tol: 1e-10,
            rel_tol: 0.0,
            step_tol: 1e-13,
            line_search_beta: 0.5,
            max_line_search_iters: 20,
        }
    }
}

/// Newton iteration result.
#[derive(Clone, Debug)]
pub struct NewtonResult {
    /// Solution vector
    pub x: DVector<f64>,
    /// Final residual norm
    pub residual_norm: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Newton solver with line search.
///
/// `admissible` rejects trial points outside the physical domain (negative
/// densities, temperatures below a curve end, ...); rejected or failing trial
/// points are treated like a residual increase and the step is halved.
pub fn newton_solve<F, J, A, E>(
    x0: DVector<f64>,
    residual_fn: F,
    jacobian_fn: J,
    admissible: A,
    config: &NewtonConfig,
) -> Result<NewtonResult, E>
where
    F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
    J: Fn(&DVector<f64>) -> Result<DMatrix<f64>, E>,
    A: Fn(&DVector<f64>) -> bool,
    E: From<SolverError>,
{
    let mut x = x0;
    let mut r = residual_fn(&x)?;
    let mut r_norm = r.norm();
    let r0_norm = r_norm;

    for iter in 0..config.max_iterations {
        if r_norm < config.abs_tol || r_norm < config.rel_tol * r0_norm {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter,
            });
        }

        let jac = jacobian_fn(&x)?;

        // Solve J * dx = -r
        let dx = jac.lu().solve(&(-&r)).ok_or_else(|| SolverError::Numeric {
            what: format!("singular Jacobian at iteration {iter}"),
        })?;

        let mut alpha = 1.0;
        let mut accepted = None;
        for _ in 0..=config.max_line_search_iters {
            let x_trial = &x + alpha * &dx;
            if admissible(&x_trial) {
                if let Ok(r_trial) = residual_fn(&x_trial) {
                    let n = r_trial.norm();
                    if n.is_finite() && n < r_norm {
                        accepted = Some((x_trial, r_trial, n));
                        break;
                    }
                }
            }
            alpha *= config.line_search_beta;
        }

        let Some((x_new, r_new, r_new_norm)) = accepted else {
            return Err(SolverError::ConvergenceFailed {
                what: "line search found no admissible descent step".to_string(),
                iterations: iter,
                estimate: x.as_slice().to_vec(),
            }
            .into());
        };

        let step_norm = (&x_new - &x).norm();
        x = x_new;
        r = r_new;
        r_norm = r_new_norm;
        debug!(iter, residual = r_norm, alpha, "newton step");

        if step_norm <= config.step_tol * (1.0 + x.norm()) && r_norm < config.abs_tol.sqrt() {
            return Ok(NewtonResult {
                x,
                residual_norm: r_norm,
                iterations: iter + 1,
            });
        }
    }

    if r_norm < config.abs_tol {
        return Ok(NewtonResult {
            x,
            residual_norm: r_norm,
            iterations: config.max_iterations,
        });
    }

    Err(SolverError::ConvergenceFailed {
        what: format!("newton residual {r_norm:e} above tolerance"),
        iterations: config.max_iterations,
        estimate: x.as_slice().to_vec(),
    }
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverResult;

    #[test]
    fn simple_quadratic() {
        // Solve x^2 - 4 = 0, x > 0
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] - 4.0))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        };

        let x0 = DVector::from_element(1, 3.0);
        let config = NewtonConfig::default();
        let result = newton_solve(x0, residual, jacobian, |x| x[0] > 0.0, &config).unwrap();

        assert!((result.x[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn two_by_two_system() {
        // x^2 + y^2 = 4, x - y = 0  ->  x = y = sqrt(2)
        let residual = |v: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_vec(vec![
                v[0] * v[0] + v[1] * v[1] - 4.0,
                v[0] - v[1],
            ]))
        };
        let jacobian = |v: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_row_slice(2, 2, &[2.0 * v[0], 2.0 * v[1], 1.0, -1.0]))
        };

        let x0 = DVector::from_vec(vec![1.0, 2.0]);
        let result =
            newton_solve(x0, residual, jacobian, |_| true, &NewtonConfig::default()).unwrap();
        let s = 2.0_f64.sqrt();
        assert!((result.x[0] - s).abs() < 1e-9);
        assert!((result.x[1] - s).abs() < 1e-9);
    }

    #[test]
    fn reports_last_iterate_on_failure() {
        // x^2 + 1 = 0 has no real root.
        let residual = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0] + 1.0))
        };
        let jacobian = |x: &DVector<f64>| -> SolverResult<DMatrix<f64>> {
            Ok(DMatrix::from_element(1, 1, 2.0 * x[0]))
        };

        let config = NewtonConfig {
            max_iterations: 10,
            ..NewtonConfig::default()
        };
        let err = newton_solve(DVector::from_element(1, 0.5), residual, jacobian, |_| true, &config)
            .unwrap_err();
        assert!(err.estimate().is_some());
    }
}
