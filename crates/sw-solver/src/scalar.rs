//! One-dimensional root finding.

use crate::error::SolverError;
use tracing::debug;

/// Scalar root-finder configuration.
#[derive(Clone, Debug)]
pub struct ScalarConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Step tolerance: |dx| <= x_tol * (1 + |x|)
    pub x_tol: f64,
    /// Residual tolerance: |f| <= f_tol
    pub f_tol: f64,
    /// Largest Newton step allowed (damping)
    pub max_step: f64,
}

impl Default for ScalarConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            x_tol: 1e-13,
            f_tol: 1e-10,
            max_step: f64::INFINITY,
        }
    }
}

/// Converged scalar root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalarRoot {
    pub x: f64,
    pub residual: f64,
    pub iterations: usize,
}

fn not_converged(what: &str, iterations: usize, x: f64) -> SolverError {
    SolverError::ConvergenceFailed {
        what: what.to_string(),
        iterations,
        estimate: vec![x],
    }
}

/// Damped Newton iteration without a bracket.
///
/// `f` returns the residual and its derivative. Convergence requires both a
/// small step and a small residual, so an iteration creeping towards a root
/// at infinity (in the caller's coordinate) never reports success.
pub fn newton_1d<F, E>(mut f: F, x0: f64, config: &ScalarConfig) -> Result<ScalarRoot, E>
where
    F: FnMut(f64) -> Result<(f64, f64), E>,
    E: From<SolverError>,
{
    let mut x = x0;
    for iter in 0..config.max_iterations {
        let (fx, dfx) = f(x)?;
        if !fx.is_finite() || !dfx.is_finite() || dfx == 0.0 {
            return Err(not_converged("newton_1d: degenerate derivative", iter, x).into());
        }
        let step = (fx / dfx).clamp(-config.max_step, config.max_step);
        x -= step;
        if step.abs() <= config.x_tol * (1.0 + x.abs()) && fx.abs() <= config.f_tol {
            debug!(iter, x, residual = fx, "newton_1d converged");
            return Ok(ScalarRoot {
                x,
                residual: fx,
                iterations: iter + 1,
            });
        }
    }
    Err(not_converged("newton_1d", config.max_iterations, x).into())
}

/// Safeguarded Newton inside a sign-changing bracket `[lo, hi]`.
///
/// Newton steps that leave the current bracket, or do not shrink it fast
/// enough, are replaced by bisection.
pub fn solve_bracketed<F, E>(
    mut f: F,
    lo: f64,
    hi: f64,
    config: &ScalarConfig,
) -> Result<ScalarRoot, E>
where
    F: FnMut(f64) -> Result<(f64, f64), E>,
    E: From<SolverError>,
{
    let (mut a, mut b) = if lo < hi { (lo, hi) } else { (hi, lo) };
    let (fa, _) = f(a)?;
    let (fb, _) = f(b)?;
    if fa == 0.0 {
        return Ok(ScalarRoot { x: a, residual: 0.0, iterations: 0 });
    }
    if fb == 0.0 {
        return Ok(ScalarRoot { x: b, residual: 0.0, iterations: 0 });
    }
    if fa.signum() == fb.signum() {
        return Err(SolverError::InvalidArg {
            what: format!("root not bracketed on [{a}, {b}]"),
        }
        .into());
    }
    // Orient so that f(a) < 0 < f(b).
    let flip = fa > 0.0;

    let mut x = 0.5 * (a + b);
    let mut dx_old = (b - a).abs();
    for iter in 0..config.max_iterations {
        let (mut fx, mut dfx) = f(x)?;
        if flip {
            fx = -fx;
            dfx = -dfx;
        }
        if fx.abs() <= config.f_tol {
            return Ok(ScalarRoot { x, residual: fx, iterations: iter + 1 });
        }
        if fx < 0.0 {
            a = x;
        } else {
            b = x;
        }

        let newton_ok = dfx.is_finite() && dfx != 0.0 && {
            let trial = x - fx / dfx;
            trial > a && trial < b && (fx / dfx).abs() < 0.5 * dx_old
        };
        let x_new = if newton_ok {
            x - fx / dfx
        } else {
            0.5 * (a + b)
        };
        dx_old = (x_new - x).abs();
        x = x_new;

        if dx_old <= config.x_tol * (1.0 + x.abs()) || (b - a) <= config.x_tol * (1.0 + x.abs())
        {
            return Ok(ScalarRoot { x, residual: fx, iterations: iter + 1 });
        }
    }
    Err(not_converged("solve_bracketed", config.max_iterations, x).into())
}

/// Plain bisection for functions without a convenient derivative.
pub fn bisect<F, E>(mut f: F, lo: f64, hi: f64, config: &ScalarConfig) -> Result<ScalarRoot, E>
where
    F: FnMut(f64) -> Result<f64, E>,
    E: From<SolverError>,
{
    let (mut a, mut b) = (lo.min(hi), lo.max(hi));
    let fa = f(a)?;
    let fb = f(b)?;
    if fa == 0.0 {
        return Ok(ScalarRoot { x: a, residual: 0.0, iterations: 0 });
    }
    if fb == 0.0 {
        return Ok(ScalarRoot { x: b, residual: 0.0, iterations: 0 });
    }
    if fa.signum() == fb.signum() {
        return Err(SolverError::InvalidArg {
            what: format!("root not bracketed on [{a}, {b}]"),
        }
        .into());
    }
    let sign_a = fa.signum();
    for iter in 0..config.max_iterations {
        let mid = 0.5 * (a + b);
        let fm = f(mid)?;
        if fm == 0.0 || (b - a) <= config.x_tol * (1.0 + mid.abs()) {
            return Ok(ScalarRoot { x: mid, residual: fm, iterations: iter + 1 });
        }
        if fm.signum() == sign_a {
            a = mid;
        } else {
            b = mid;
        }
    }
    let mid = 0.5 * (a + b);
    Err(not_converged("bisect", config.max_iterations, mid).into())
}
