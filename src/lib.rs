//! Batch gradient descent for ordinary least squares.
//!
//! [`solver::solve`] starts from standard normal weights and repeatedly steps against the
//! gradient `xᵗ(xw − y)` until its norm is within tolerance or the iteration budget runs out.
//! Either way the last iterate is returned, tagged with a [`solver::Status`].

pub mod closed_form;
pub mod config;
pub mod dataset;
pub mod error;
pub mod initialization;
pub mod loss;
pub mod optimization;
pub mod solver;
pub mod spectral;

pub use config::{InitConfig, SolverConfig};
pub use dataset::Problem;
pub use error::{Result, SolverErr};
pub use solver::{GradientDescentSolver, Solution, Solver, Status, solve};
