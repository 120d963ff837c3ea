//! Finite difference Jacobian computation.

use nalgebra::{DMatrix, DVector};

/// Compute Jacobian using one-sided finite differences.
///
/// For each column j, perturbs x[j] by `epsilon * max(|x[j]|, 1)` and computes
/// (f(x+e) - f(x))/e. A negative `epsilon` gives a backward difference.
pub fn finite_difference_jacobian<F, E>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> Result<DMatrix<f64>, E>
where
    F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
{
    let n = x.len();
    let f_x = f(x)?;
    let m = f_x.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let mut x_perturbed = x.clone();
        let dx = epsilon * x[j].abs().max(1.0);
        x_perturbed[j] += dx;

        let f_perturbed = f(&x_perturbed)?;
        let df = (f_perturbed - &f_x) / dx;

        jac.set_column(j, &df);
    }

    Ok(jac)
}

/// Compute Jacobian using central finite differences (more accurate but 2x cost).
pub fn central_difference_jacobian<F, E>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> Result<DMatrix<f64>, E>
where
    F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
{
    let n = x.len();
    let m = f(x)?.len();

    let mut jac = DMatrix::zeros(m, n);

    for j in 0..n {
        let dx = epsilon * x[j].abs().max(1.0);

        let mut x_plus = x.clone();
        x_plus[j] += dx;
        let f_plus = f(&x_plus)?;

        let mut x_minus = x.clone();
        x_minus[j] -= dx;
        let f_minus = f(&x_minus)?;

        let df = (f_plus - f_minus) / (2.0 * dx);
        jac.set_column(j, &df);
    }

    Ok(jac)
}

/// Central differences where possible, falling back to a one-sided stencil
/// when the function fails on one side (e.g. at a domain edge).
pub fn robust_difference_jacobian<F, E>(
    x: &DVector<f64>,
    f: F,
    epsilon: f64,
) -> Result<DMatrix<f64>, E>
where
    F: Fn(&DVector<f64>) -> Result<DVector<f64>, E>,
{
    if let Ok(jac) = central_difference_jacobian(x, &f, epsilon) {
        return Ok(jac);
    }
    match finite_difference_jacobian(x, &f, epsilon) {
        Ok(jac) => Ok(jac),
        Err(_) => finite_difference_jacobian(x, &f, -epsilon),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SolverError, SolverResult};

    #[test]
    fn jacobian_linear() {
        // f(x) = 2*x, J = 2
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, 2.0 * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let jac = finite_difference_jacobian(&x, f, 1e-7).unwrap();

        assert!((jac[(0, 0)] - 2.0).abs() < 1e-5);
    }

    #[test]
    fn jacobian_quadratic() {
        // f(x) = x^2, J = 2*x
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            Ok(DVector::from_element(1, x[0] * x[0]))
        };

        let x = DVector::from_element(1, 3.0);
        let jac = central_difference_jacobian(&x, f, 1e-6).unwrap();

        assert!((jac[(0, 0)] - 6.0).abs() < 1e-6);
    }

    #[test]
    fn robust_falls_back_at_domain_edge() {
        // sqrt is undefined left of zero; central differences fail at x = 1e-12.
        let f = |x: &DVector<f64>| -> SolverResult<DVector<f64>> {
            if x[0] < 0.0 {
                return Err(SolverError::InvalidArg {
                    what: "negative".into(),
                });
            }
            Ok(DVector::from_element(1, x[0] + 1.0))
        };

        let x = DVector::from_element(1, 1e-12);
        let jac = robust_difference_jacobian(&x, f, 1e-6).unwrap();
        assert!((jac[(0, 0)] - 1.0).abs() < 1e-6);
    }
}
