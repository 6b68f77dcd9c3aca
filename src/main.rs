use anyhow::Context;
use env_logger::Env;
use least_squares_descent::{GradientDescentSolver, Problem, SolverConfig, closed_form, spectral};
use log::info;
use rand::{SeedableRng, rngs::StdRng};

const SEED: u64 = 42;
const N_SAMPLES: usize = 50;
const N_FEATURES: usize = 20;
const FEATURE_SCALE: f64 = 100.;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(SEED);
    let problem = Problem::random(&mut rng, N_SAMPLES, N_FEATURES);
    let reference =
        closed_form::normal_equations(problem.x(), problem.y()).context("closed form solve")?;

    // fixed step size on well scaled data
    let config = SolverConfig::default().with_tolerance(1e-4).with_seed(SEED);
    let solution = GradientDescentSolver::new(&config)?.solve(problem.x(), problem.y())?;
    let distance = (&solution.weights() - &reference).mapv(|d| d * d).sum().sqrt();
    info!(
        status:? = solution.status(),
        residual = problem.residual_norm(solution.weights())?,
        reference_residual = problem.residual_norm(reference.view())?,
        distance_to_reference = distance;
        "synthetic problem"
    );

    // step size derived from the spectrum of xᵗx
    let threshold = spectral::stability_threshold(problem.x())?;
    let config = config.with_learning_rate(threshold / 2.);
    let solution = GradientDescentSolver::new(&config)?.solve(problem.x(), problem.y())?;
    info!(
        learning_rate = config.learning_rate,
        status:? = solution.status();
        "synthetic problem, learning rate from stability threshold"
    );

    // the same fixed step size on badly scaled features
    let scaled = problem.scaled(FEATURE_SCALE);
    let config = SolverConfig::default().with_seed(SEED).with_max_iterations(1000);
    let solution = GradientDescentSolver::new(&config)?.solve(scaled.x(), scaled.y())?;
    info!(
        stability_threshold = spectral::stability_threshold(scaled.x())?,
        status:? = solution.status(),
        last_gradient_norm:? = solution.last_gradient_norm();
        "scaled problem"
    );

    Ok(())
}
