use ndarray::{Array1, ArrayView1, ArrayView2};

use super::{LossFn, loss_fn::residual};

/// Ordinary least squares, `½‖xw − y‖²`, whose gradient is `xᵗ(xw − y)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastSquares;

impl LeastSquares {
    /// Returns a new `LeastSquares`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for LeastSquares {
    fn loss(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>) -> f64 {
        let r = residual(x, y, w);
        0.5 * r.dot(&r)
    }

    fn gradient(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        w: ArrayView1<f64>,
    ) -> Array1<f64> {
        x.t().dot(&residual(x, y, w))
    }
}
