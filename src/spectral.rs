use log::debug;
use ndarray::{Array1, ArrayView2};
use ndarray_rand::RandomExt;
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

use crate::{Result, SolverErr};

const POWER_ITERATIONS: usize = 1000;
const POWER_TOLERANCE: f64 = 1e-10;
const POWER_SEED: u64 = 0x5eed;

/// Estimates the largest eigenvalue of a symmetric positive semi-definite matrix by power
/// iteration.
///
/// The start vector is a seeded standard normal draw, so it has a component along the top
/// eigenvector with probability one (a fixed vector such as all ones can be orthogonal to it).
///
/// Stops once the relative change of the estimate is within `tolerance` or after
/// `max_iterations`.
///
/// # Errors
/// `SizeMismatch` if `a` is not square.
pub fn largest_eigenvalue(
    a: ArrayView2<f64>,
    max_iterations: usize,
    tolerance: f64,
) -> Result<f64> {
    let (n, m) = a.dim();
    if n != m {
        return Err(SolverErr::SizeMismatch {
            a: "rows",
            b: "columns",
            got: m,
            expected: n,
        });
    }

    if n == 0 {
        return Ok(0.);
    }

    let mut rng = StdRng::seed_from_u64(POWER_SEED);
    let mut v = Array1::<f64>::random_using(n, StandardNormal, &mut rng);
    let start_norm = v.dot(&v).sqrt();
    v /= start_norm;

    let mut lambda = 0.;

    for _ in 0..max_iterations {
        let av = a.dot(&v);
        let norm = av.dot(&av).sqrt();
        if norm == 0. {
            return Ok(0.);
        }

        // rayleigh quotient, v is normalized
        let next = v.dot(&av);
        v = av / norm;

        if (next - lambda).abs() <= tolerance * next.abs() {
            return Ok(next);
        }
        lambda = next;
    }

    Ok(lambda)
}

/// Returns `2 / λmax(xᵗx)`, any learning rate below it makes gradient descent on the least
/// squares objective converge when `x` has full column rank.
///
/// Returns infinity for an all zero design.
pub fn stability_threshold(x: ArrayView2<f64>) -> Result<f64> {
    let gram = x.t().dot(&x);
    let lambda = largest_eigenvalue(gram.view(), POWER_ITERATIONS, POWER_TOLERANCE)?;
    debug!(largest_eigenvalue = lambda; "computed stability threshold");

    Ok(2. / lambda)
}
