//! Direct least squares, used as a reference for the iterative solver.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{Result, SolverErr};

/// Solves the normal equations `(xᵗx) w = xᵗy`.
///
/// # Errors
/// `SizeMismatch` if `x` and `y` don't have the same amount of rows, `NotPositiveDefinite` if `x`
/// doesn't have full column rank.
pub fn normal_equations(x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Array1<f64>> {
    if x.nrows() != y.len() {
        return Err(SolverErr::SizeMismatch {
            a: "x rows",
            b: "y",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    let gram = x.t().dot(&x);
    let rhs = x.t().dot(&y);
    let l = cholesky(gram.view())?;

    Ok(back_substitution(l.view(), forward_substitution(l.view(), rhs.view()).view()))
}

/// Factorizes a symmetric positive definite matrix as `l · lᵗ`, returning the lower triangular
/// `l`. Only the lower triangle of `a` is read.
///
/// # Errors
/// `SizeMismatch` if `a` is not square, `NotPositiveDefinite` if a pivot is not positive.
pub fn cholesky(a: ArrayView2<f64>) -> Result<Array2<f64>> {
    let (n, m) = a.dim();
    if n != m {
        return Err(SolverErr::SizeMismatch {
            a: "rows",
            b: "columns",
            got: m,
            expected: n,
        });
    }

    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();

            if i == j {
                let pivot = a[[i, i]] - sum;
                if !(pivot.is_finite() && pivot > 0.) {
                    return Err(SolverErr::NotPositiveDefinite { pivot: i });
                }
                l[[i, i]] = pivot.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    Ok(l)
}

/// Solves `l z = b` for a lower triangular `l`.
fn forward_substitution(l: ArrayView2<f64>, b: ArrayView1<f64>) -> Array1<f64> {
    let n = b.len();
    let mut z = Array1::<f64>::zeros(n);

    for i in 0..n {
        let sum: f64 = (0..i).map(|k| l[[i, k]] * z[k]).sum();
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    z
}

/// Solves `lᵗ w = z` for a lower triangular `l`.
fn back_substitution(l: ArrayView2<f64>, z: ArrayView1<f64>) -> Array1<f64> {
    let n = z.len();
    let mut w = Array1::<f64>::zeros(n);

    for i in (0..n).rev() {
        let sum: f64 = (i + 1..n).map(|k| l[[k, i]] * w[k]).sum();
        w[i] = (z[i] - sum) / l[[i, i]];
    }

    w
}
