use log::{debug, info, trace, warn};
use ndarray::{Array1, ArrayView1, ArrayView2};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result, SolverErr,
    config::{InitConfig, SolverConfig},
    initialization::{ParamGen, RandParamGen},
    loss::{LeastSquares, LossFn},
    optimization::{GradientDescent, Optimizer},
};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The gradient norm reached the tolerance after `iterations` updates.
    Converged { iterations: usize },
    /// The budget ran out, the weights are the last iterate.
    IterationLimitExceeded { iterations: usize },
}

/// The outcome of a run: the final weights and whether they converged.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    weights: Array1<f64>,
    status: Status,
    gradient_norms: Vec<f64>,
}

impl Solution {
    pub fn weights(&self) -> ArrayView1<'_, f64> {
        self.weights.view()
    }

    pub fn into_weights(self) -> Array1<f64> {
        self.weights
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn converged(&self) -> bool {
        matches!(self.status, Status::Converged { .. })
    }

    /// Number of updates applied to the weights.
    pub fn iterations(&self) -> usize {
        match self.status {
            Status::Converged { iterations } | Status::IterationLimitExceeded { iterations } => {
                iterations
            }
        }
    }

    /// The norm of every gradient evaluated during the run, in order.
    pub fn gradient_norms(&self) -> &[f64] {
        &self.gradient_norms
    }

    /// `None` if no gradient was evaluated (zero iteration budget).
    pub fn last_gradient_norm(&self) -> Option<f64> {
        self.gradient_norms.last().copied()
    }
}

/// Iteratively minimizes a loss `L` over the weights of a linear model, using the optimizer `O`
/// for every step.
///
/// Each iteration evaluates the gradient at the current weights, stops if its norm is within
/// `tolerance` and otherwise lets the optimizer take a step. Running out of iterations is
/// reported through [`Status`], never as an error.
pub struct Solver<L: LossFn, O: Optimizer> {
    loss: L,
    optimizer: O,
    tolerance: f64,
    max_iterations: usize,
    seed: Option<u64>,
    initialization: InitConfig,
}

/// Plain gradient descent on the least squares objective.
pub type GradientDescentSolver = Solver<LeastSquares, GradientDescent>;

impl GradientDescentSolver {
    /// Creates a new `GradientDescentSolver` from the given config.
    ///
    /// # Errors
    /// `InvalidConfig` if the config doesn't validate.
    pub fn new(config: &SolverConfig) -> Result<Self> {
        config.validate()?;

        let mut solver = Self::with_parts(
            LeastSquares,
            GradientDescent::new(config.learning_rate),
            config.tolerance,
            config.max_iterations,
        );
        solver.seed = config.seed;
        solver.initialization = config.initialization;
        Ok(solver)
    }
}

impl<L: LossFn, O: Optimizer> Solver<L, O> {
    /// Creates a new `Solver` from its parts, without a seed and with standard normal
    /// initialization.
    ///
    /// # Arguments
    /// * `loss` - The objective to minimize.
    /// * `optimizer` - The update rule.
    /// * `tolerance` - Threshold on the gradient norm.
    /// * `max_iterations` - The maximum amount of updates.
    pub fn with_parts(loss: L, optimizer: O, tolerance: f64, max_iterations: usize) -> Self {
        Self {
            loss,
            optimizer,
            tolerance,
            max_iterations,
            seed: None,
            initialization: InitConfig::StandardNormal,
        }
    }

    /// Solves starting from weights drawn as the config's initialization says, seeded from the
    /// config if it had a seed.
    pub fn solve(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<Solution> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let n = x.ncols();

        match self.initialization {
            InitConfig::StandardNormal => self.solve_with_rng(x, y, &mut rng),
            InitConfig::Normal { mean, std_dev } => {
                let mut param_gen = RandParamGen::normal(&mut rng, n, mean, std_dev)?;
                self.solve_with(x, y, &mut param_gen)
            }
            InitConfig::Uniform { low, high } => {
                let mut param_gen = RandParamGen::uniform(&mut rng, n, low, high)?;
                self.solve_with(x, y, &mut param_gen)
            }
            InitConfig::Constant { value } => self.solve_from(x, y, Array1::from_elem(n, value)),
        }
    }

    /// Solves starting from standard normal weights drawn from `rng`.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        rng: &mut R,
    ) -> Result<Solution> {
        let mut param_gen = RandParamGen::standard_normal(rng, x.ncols())?;
        self.solve_with(x, y, &mut param_gen)
    }

    /// Solves starting from weights sampled from `param_gen`.
    ///
    /// # Errors
    /// `ParamGenExhausted` if the generator can't provide a weight per column of `x`.
    pub fn solve_with<G: ParamGen>(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        param_gen: &mut G,
    ) -> Result<Solution> {
        let expected = x.ncols();
        let mut weights = Vec::with_capacity(expected);

        while weights.len() < expected {
            match param_gen.sample(expected - weights.len()) {
                Some(sample) if !sample.is_empty() => weights.extend(sample),
                _ => {
                    return Err(SolverErr::ParamGenExhausted {
                        got: weights.len(),
                        expected,
                    });
                }
            }
        }

        self.solve_from(x, y, Array1::from_vec(weights))
    }

    /// Solves starting from the given weights.
    ///
    /// # Errors
    /// `SizeMismatch` if `y` doesn't have a target per row of `x` or `weights` doesn't have a
    /// weight per column of `x`.
    pub fn solve_from(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        mut weights: Array1<f64>,
    ) -> Result<Solution> {
        check_shapes(x, y, weights.view())?;

        let (n_samples, n_features) = x.dim();
        debug!(
            n_samples = n_samples, n_features = n_features, tolerance = self.tolerance,
            max_iterations = self.max_iterations;
            "starting gradient descent"
        );

        let mut gradient_norms = Vec::new();

        for iteration in 0..self.max_iterations {
            let grad = self.loss.gradient(x, y, weights.view());
            let norm = grad.dot(&grad).sqrt();
            gradient_norms.push(norm);
            trace!(iteration = iteration, gradient_norm = norm; "gradient evaluated");

            if norm <= self.tolerance {
                info!(iterations = iteration, gradient_norm = norm; "converged");
                return Ok(Solution {
                    weights,
                    status: Status::Converged {
                        iterations: iteration,
                    },
                    gradient_norms,
                });
            }

            self.optimizer.update_params(weights.view_mut(), grad.view())?;
        }

        warn!(
            max_iterations = self.max_iterations,
            gradient_norm = gradient_norms.last().copied().unwrap_or(f64::NAN);
            "iteration limit exceeded"
        );

        Ok(Solution {
            weights,
            status: Status::IterationLimitExceeded {
                iterations: self.max_iterations,
            },
            gradient_norms,
        })
    }

    /// The value of the loss at `weights`.
    pub fn loss(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        weights: ArrayView1<f64>,
    ) -> Result<f64> {
        check_shapes(x, y, weights)?;
        Ok(self.loss.loss(x, y, weights))
    }
}

/// Runs least squares gradient descent with the given hyperparameters, starting from standard
/// normal weights drawn from the thread rng.
///
/// # Errors
/// `InvalidConfig` if `learning_rate` or `tolerance` aren't positive, `SizeMismatch` if `x` and `y`
/// don't have the same amount of rows.
pub fn solve(
    x: ArrayView2<f64>,
    y: ArrayView1<f64>,
    learning_rate: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Solution> {
    let config = SolverConfig::default()
        .with_learning_rate(learning_rate)
        .with_tolerance(tolerance)
        .with_max_iterations(max_iterations);

    GradientDescentSolver::new(&config)?.solve_with_rng(x, y, &mut rand::rng())
}

fn check_shapes(x: ArrayView2<f64>, y: ArrayView1<f64>, w: ArrayView1<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(SolverErr::SizeMismatch {
            a: "x rows",
            b: "y",
            got: y.len(),
            expected: x.nrows(),
        });
    }

    if x.ncols() != w.len() {
        return Err(SolverErr::SizeMismatch {
            a: "x columns",
            b: "weights",
            got: w.len(),
            expected: x.ncols(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;
    use crate::loss::MeanSquared;

    fn solver(learning_rate: f64, tolerance: f64, max_iterations: usize) -> GradientDescentSolver {
        let config = SolverConfig::default()
            .with_learning_rate(learning_rate)
            .with_tolerance(tolerance)
            .with_max_iterations(max_iterations);

        GradientDescentSolver::new(&config).unwrap()
    }

    /// Hands out `values` at most `chunk` at a time.
    struct Chunks {
        values: Vec<f64>,
        chunk: usize,
    }

    impl ParamGen for Chunks {
        fn sample(&mut self, n: usize) -> Option<Vec<f64>> {
            if self.values.is_empty() {
                return None;
            }

            let n = n.min(self.chunk).min(self.values.len());
            Some(self.values.drain(..n).collect())
        }
    }

    #[test]
    fn identity_design_converges_to_targets() {
        let x = Array2::<f64>::eye(3);
        let y = array![1., -2., 3.];

        let solution = solver(0.5, 1e-10, 1000)
            .solve_from(x.view(), y.view(), Array1::zeros(3))
            .unwrap();

        assert!(solution.converged());
        for (w, t) in solution.weights().iter().zip(&y) {
            assert!((w - t).abs() < 1e-9, "{w} != {t}");
        }
    }

    #[test]
    fn single_step_on_identity() {
        // with lr = 1 and x = I the first step lands on y
        let x = Array2::<f64>::eye(2);
        let y = array![4., 5.];

        let solution = solver(1., 1e-6, 10)
            .solve_from(x.view(), y.view(), array![0., 0.])
            .unwrap();

        assert_eq!(solution.status(), Status::Converged { iterations: 1 });
        assert_eq!(solution.weights(), y.view());
        assert_eq!(solution.gradient_norms(), &[41f64.sqrt(), 0.]);
    }

    #[test]
    fn already_optimal_returns_without_update() {
        let x = array![[1., 0.], [0., 2.], [1., 1.]];
        let w = array![1., 1.];
        let y = x.dot(&w);

        let solution = solver(0.1, 1e-3, 100)
            .solve_from(x.view(), y.view(), w.clone())
            .unwrap();

        assert_eq!(solution.status(), Status::Converged { iterations: 0 });
        assert_eq!(solution.into_weights(), w);
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let x = Array2::<f64>::eye(2);
        let y = array![1., 1.];

        let solution = solver(0.01, 1e-12, 5)
            .solve_from(x.view(), y.view(), array![0., 0.])
            .unwrap();

        assert_eq!(
            solution.status(),
            Status::IterationLimitExceeded { iterations: 5 }
        );
        assert!(!solution.converged());
        assert_eq!(solution.iterations(), 5);
        assert_eq!(solution.gradient_norms().len(), 5);
    }

    #[test]
    fn zero_budget_returns_initial_weights() {
        let x = Array2::<f64>::eye(2);
        let y = array![1., 1.];
        let w = array![3., -3.];

        let solution = solver(0.1, 1e-3, 0)
            .solve_from(x.view(), y.view(), w.clone())
            .unwrap();

        assert!(!solution.converged());
        assert_eq!(solution.weights(), w.view());
        assert_eq!(solution.last_gradient_norm(), None);
    }

    #[test]
    fn nan_gradient_never_converges() {
        let x = Array2::<f64>::eye(2);
        let y = array![f64::NAN, 0.];

        let solution = solver(0.1, 1e-3, 3)
            .solve_from(x.view(), y.view(), array![0., 0.])
            .unwrap();

        assert!(!solution.converged());
        assert!(solution.gradient_norms().iter().all(|n| n.is_nan()));
    }

    #[test]
    fn solve_with_param_gen() {
        let x = Array2::<f64>::eye(3);
        let y = array![1., 2., 3.];

        let mut param_gen = Chunks {
            values: vec![4., 5., 6.],
            chunk: 2,
        };
        let solution = solver(1., 1e-9, 0)
            .solve_with(x.view(), y.view(), &mut param_gen)
            .unwrap();

        assert_eq!(solution.into_weights(), array![4., 5., 6.]);

        let mut param_gen = Chunks {
            values: vec![0.; 3],
            chunk: 1,
        };
        let solution = solver(1., 1e-9, 10)
            .solve_with(x.view(), y.view(), &mut param_gen)
            .unwrap();

        assert_eq!(solution.status(), Status::Converged { iterations: 1 });
    }

    #[test]
    fn constant_initialization_from_config() {
        let x = Array2::<f64>::eye(2);
        let y = array![2., -2.];
        let config = SolverConfig::default()
            .with_learning_rate(1.)
            .with_max_iterations(0)
            .with_initialization(InitConfig::Constant { value: 0.25 });

        let solution = GradientDescentSolver::new(&config)
            .unwrap()
            .solve(x.view(), y.view())
            .unwrap();

        assert_eq!(solution.into_weights(), array![0.25, 0.25]);
    }

    #[test]
    fn uniform_initialization_from_config() {
        let x = Array2::<f64>::zeros((3, 6));
        let y = Array1::<f64>::zeros(3);
        let config = SolverConfig::default()
            .with_max_iterations(0)
            .with_seed(2)
            .with_initialization(InitConfig::Uniform { low: 4., high: 5. });

        let solution = GradientDescentSolver::new(&config)
            .unwrap()
            .solve(x.view(), y.view())
            .unwrap();

        assert_eq!(solution.weights().len(), 6);
        assert!(solution.weights().iter().all(|w| (4. ..5.).contains(w)));
    }

    #[test]
    fn normal_initialization_from_config() {
        let x = Array2::<f64>::zeros((3, 4));
        let y = Array1::<f64>::zeros(3);
        let config = SolverConfig::default()
            .with_max_iterations(0)
            .with_seed(2)
            .with_initialization(InitConfig::Normal {
                mean: 100.,
                std_dev: 0.,
            });

        let solution = GradientDescentSolver::new(&config)
            .unwrap()
            .solve(x.view(), y.view())
            .unwrap();

        assert_eq!(solution.into_weights(), array![100., 100., 100., 100.]);
    }

    #[test]
    fn exhausted_param_gen() {
        let x = Array2::<f64>::eye(3);
        let y = array![1., 2., 3.];

        let mut param_gen = Chunks {
            values: vec![0.; 2],
            chunk: 3,
        };
        let res = solver(0.1, 1e-3, 10).solve_with(x.view(), y.view(), &mut param_gen);

        assert!(matches!(
            res,
            Err(SolverErr::ParamGenExhausted {
                got: 2,
                expected: 3
            })
        ));
    }

    #[test]
    fn shape_mismatches() {
        let x = Array2::<f64>::zeros((4, 2));
        let mut solver = solver(0.1, 1e-3, 10);

        let res = solver.solve_from(x.view(), Array1::<f64>::zeros(3).view(), Array1::zeros(2));
        assert!(matches!(
            res,
            Err(SolverErr::SizeMismatch {
                got: 3,
                expected: 4,
                ..
            })
        ));

        let res = solver.solve_from(x.view(), Array1::<f64>::zeros(4).view(), Array1::zeros(5));
        assert!(matches!(
            res,
            Err(SolverErr::SizeMismatch {
                got: 5,
                expected: 2,
                ..
            })
        ));
    }

    #[test]
    fn invalid_config() {
        let config = SolverConfig::default().with_learning_rate(-0.1);
        assert!(matches!(
            GradientDescentSolver::new(&config),
            Err(SolverErr::InvalidConfig(_))
        ));
    }

    #[test]
    fn mean_squared_objective() {
        let x = array![[1., 0.], [0., 1.], [1., 1.], [2., 1.]];
        let w_true = array![0.5, -1.5];
        let y = x.dot(&w_true);

        let mut solver = Solver::with_parts(MeanSquared, GradientDescent::new(0.2), 1e-10, 10_000);
        let solution = solver
            .solve_from(x.view(), y.view(), Array1::zeros(2))
            .unwrap();

        assert!(solution.converged());
        assert!(solver.loss(x.view(), y.view(), solution.weights()).unwrap() < 1e-16);
    }
}
