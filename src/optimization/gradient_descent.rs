use ndarray::{ArrayView1, ArrayViewMut1};

use super::Optimizer;
use crate::{Result, SolverErr};

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of `learning_rate`.
    fn update_params(
        &mut self,
        mut params: ArrayViewMut1<f64>,
        grad: ArrayView1<f64>,
    ) -> Result<()> {
        if params.len() != grad.len() {
            return Err(SolverErr::SizeMismatch {
                a: "params",
                b: "grad",
                got: grad.len(),
                expected: params.len(),
            });
        }

        params.scaled_add(-self.learning_rate, &grad);
        Ok(())
    }
}
