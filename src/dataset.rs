use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use ndarray_rand::RandomExt;
use rand::{Rng, distr::StandardUniform};
use rand_distr::{Normal, StandardNormal};

use crate::{Result, SolverErr, initialization::RandErr};

/// A least squares problem: a design matrix with a sample per row and its targets.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Problem {
    /// Creates a new `Problem`.
    ///
    /// # Errors
    /// `SizeMismatch` if `y` doesn't have a target per row of `x`.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(SolverErr::SizeMismatch {
                a: "x rows",
                b: "y",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        Ok(Self { x, y })
    }

    /// Standard normal features with targets drawn uniformly from `[0, 1)`, unrelated to the
    /// features.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, n_samples: usize, n_features: usize) -> Self {
        let x = Array2::<f64>::random_using((n_samples, n_features), StandardNormal, rng);
        let y = Array1::<f64>::random_using(n_samples, StandardUniform, rng);
        Self { x, y }
    }

    /// Standard normal features with targets generated by standard normal weights plus gaussian
    /// noise.
    ///
    /// # Returns
    /// The problem along with the weights used to generate it, or an error if `noise_std` is
    /// not finite.
    pub fn planted<R: Rng + ?Sized>(
        rng: &mut R,
        n_samples: usize,
        n_features: usize,
        noise_std: f64,
    ) -> Result<(Self, Array1<f64>)> {
        let noise = Normal::new(0., noise_std).map_err(RandErr::from)?;

        let x = Array2::<f64>::random_using((n_samples, n_features), StandardNormal, rng);
        let w = Array1::<f64>::random_using(n_features, StandardNormal, rng);
        let y = x.dot(&w) + Array1::<f64>::random_using(n_samples, noise, rng);

        Ok((Self { x, y }, w))
    }

    /// Multiplies every feature by `factor`, making the problem as badly scaled as raw
    /// measurements tend to be.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.x *= factor;
        self
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Returns `‖xw − y‖`.
    ///
    /// # Errors
    /// `SizeMismatch` if `w` doesn't have a weight per feature.
    pub fn residual_norm(&self, w: ArrayView1<f64>) -> Result<f64> {
        if w.len() != self.n_features() {
            return Err(SolverErr::SizeMismatch {
                a: "x columns",
                b: "weights",
                got: w.len(),
                expected: self.n_features(),
            });
        }

        let r = self.x.dot(&w) - &self.y;
        Ok(r.dot(&r).sqrt())
    }
}
