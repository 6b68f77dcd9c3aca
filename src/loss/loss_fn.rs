use ndarray::{Array1, ArrayView1, ArrayView2};

/// An objective over the weights of a linear model `x · w ≈ y`.
///
/// Implementors may assume the shapes were already checked by the caller.
pub trait LossFn {
    fn loss(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>) -> f64;
    fn gradient(&self, x: ArrayView2<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>)
    -> Array1<f64>;
}

/// Returns `x · w - y`.
pub(super) fn residual(x: ArrayView2<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>) -> Array1<f64> {
    x.dot(&w) - y
}
