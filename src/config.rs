use serde::{Deserialize, Serialize};

use crate::{Result, SolverErr};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_TOLERANCE: f64 = 1e-3;
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// How the starting weights are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitConfig {
    #[default]
    StandardNormal,
    Normal { mean: f64, std_dev: f64 },
    Uniform { low: f64, high: f64 },
    Constant { value: f64 },
}

/// Hyperparameters of a gradient descent run.
///
/// Missing fields take their default value when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub learning_rate: f64,
    /// Threshold on the euclidean norm of the gradient.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Seed for the weight initialization, `None` draws one from the OS.
    pub seed: Option<u64>,
    pub initialization: InitConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            initialization: InitConfig::default(),
        }
    }
}

impl SolverConfig {
    /// Parses and validates a config from its JSON representation.
    ///
    /// # Errors
    /// `Json` if the text is not a valid config, `InvalidConfig` if a value is out of range.
    pub fn from_json(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_initialization(mut self, initialization: InitConfig) -> Self {
        self.initialization = initialization;
        self
    }

    /// Checks that the step size and the tolerance are positive and finite, and that the
    /// initialization describes a proper distribution.
    ///
    /// A zero iteration budget is valid, the solver then returns the initial weights.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.) {
            return Err(SolverErr::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.) {
            return Err(SolverErr::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }

        match self.initialization {
            InitConfig::StandardNormal => {}
            InitConfig::Normal { mean, std_dev } => {
                if !(mean.is_finite() && std_dev.is_finite() && std_dev >= 0.) {
                    return Err(SolverErr::InvalidConfig(format!(
                        "normal initialization needs a finite mean and std_dev >= 0, got \
                         mean {mean} and std_dev {std_dev}"
                    )));
                }
            }
            InitConfig::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(SolverErr::InvalidConfig(format!(
                        "uniform initialization needs finite bounds with low < high, got \
                         [{low}, {high})"
                    )));
                }
            }
            InitConfig::Constant { value } => {
                if !value.is_finite() {
                    return Err(SolverErr::InvalidConfig(format!(
                        "constant initialization must be finite, got {value}"
                    )));
                }
            }
        }

        Ok(())
    }
}
