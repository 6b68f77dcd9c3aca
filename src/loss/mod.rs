mod least_squares;
mod loss_fn;
mod mean_squared;

pub use least_squares::LeastSquares;
pub use loss_fn::LossFn;
pub use mean_squared::MeanSquared;
