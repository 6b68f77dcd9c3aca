use ndarray::{ArrayView1, ArrayViewMut1};

use crate::Result;

/// Defines the strategy for updating the weights based on the current gradient.
pub trait Optimizer {
    /// Updates the provided weights using the gradient.
    ///
    /// # Arguments
    /// * `params` - The weights to update.
    /// * `grad` - The gradient evaluated at `params`.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad` and `params`.
    fn update_params(&mut self, params: ArrayViewMut1<f64>, grad: ArrayView1<f64>) -> Result<()>;
}
