use ndarray::{Array1, ArrayView1, ArrayView2};

use super::{LossFn, loss_fn::residual};

/// Mean squared error, `‖xw − y‖² / n`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanSquared;

impl MeanSquared {
    /// Returns a new `MeanSquared`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for MeanSquared {
    fn loss(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>) -> f64 {
        let r = residual(x, y, w);
        r.mapv(|e| e.powi(2)).mean().unwrap_or_default()
    }

    fn gradient(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        w: ArrayView1<f64>,
    ) -> Array1<f64> {
        let n = y.len();
        if n == 0 {
            return Array1::zeros(w.len());
        }

        x.t().dot(&residual(x, y, w)) * (2. / n as f64)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;
    use crate::loss::LeastSquares;

    #[test]
    fn scaled_least_squares_gradient() {
        let x = array![[1., 2.], [3., 4.], [5., 6.], [7., 8.]];
        let y = array![1., 0., -1., 2.];
        let w = array![0.25, 0.5];

        let mse = MeanSquared.gradient(x.view(), y.view(), w.view());
        let ols = LeastSquares.gradient(x.view(), y.view(), w.view());

        assert_eq!(mse, ols * 0.5);
    }

    #[test]
    fn no_samples() {
        let x = Array2::<f64>::zeros((0, 3));
        let y = Array1::<f64>::zeros(0);
        let w = array![1., 2., 3.];

        assert_eq!(MeanSquared::new().loss(x.view(), y.view(), w.view()), 0.);
        assert_eq!(
            MeanSquared.gradient(x.view(), y.view(), w.view()),
            Array1::<f64>::zeros(3)
        );
    }
}
