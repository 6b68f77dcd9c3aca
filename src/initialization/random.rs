use rand::{
    Rng,
    distr::{Distribution, Uniform},
};
use rand_distr::Normal;

use super::{ParamGen, Result};

/// Draws starting weights independently from `distribution`, at most `limit` of them in total.
///
/// The generator owns its rng, pass `&mut rng` to keep using the rng afterwards.
pub struct RandParamGen<R: Rng, D: Distribution<f64>> {
    rng: R,
    distribution: D,
    remaining: usize,
}

impl<R: Rng, D: Distribution<f64>> RandParamGen<R, D> {
    pub fn new(rng: R, distribution: D, limit: usize) -> Self {
        Self {
            rng,
            distribution,
            remaining: limit,
        }
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f64>> {
    /// Weights drawn uniformly from `[low, high)`.
    ///
    /// # Errors
    /// `RandErr::Uniform` unless `low < high` and both are finite.
    pub fn uniform(rng: R, limit: usize, low: f64, high: f64) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?, limit))
    }
}

impl<R: Rng> RandParamGen<R, Normal<f64>> {
    /// Weights drawn from `N(mean, std_dev²)`. A zero `std_dev` yields `mean` every time.
    ///
    /// # Errors
    /// `RandErr::Normal` if `std_dev` is negative or not finite.
    pub fn normal(rng: R, limit: usize, mean: f64, std_dev: f64) -> Result<Self> {
        Ok(Self::new(rng, Normal::new(mean, std_dev)?, limit))
    }

    /// The solver's default starting point, `N(0, 1)` for every weight.
    pub fn standard_normal(rng: R, limit: usize) -> Result<Self> {
        Self::normal(rng, limit, 0., 1.)
    }
}

impl<R: Rng, D: Distribution<f64>> ParamGen for RandParamGen<R, D> {
    fn sample(&mut self, n: usize) -> Option<Vec<f64>> {
        if self.remaining == 0 {
            return None;
        }

        let n = n.min(self.remaining);
        self.remaining -= n;

        Some(
            (&self.distribution)
                .sample_iter(&mut self.rng)
                .take(n)
                .collect(),
        )
    }
}
