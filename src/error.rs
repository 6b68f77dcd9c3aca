use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::initialization::RandErr;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, SolverErr>;

/// The crate's error type.
///
/// Running out of iterations is not an error, see [`crate::solver::Status`].
#[derive(Debug)]
pub enum SolverErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    InvalidConfig(String),
    ParamGenExhausted {
        got: usize,
        expected: usize,
    },
    NotPositiveDefinite {
        pivot: usize,
    },
    Init(RandErr),
    Json(serde_json::Error),
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
            ),
            SolverErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            SolverErr::ParamGenExhausted { got, expected } => write!(
                f,
                "The parameter generator was exhausted, it produced {got} of the expected {expected} weights"
            ),
            SolverErr::NotPositiveDefinite { pivot } => write!(
                f,
                "The matrix is not positive definite, factorization broke down at pivot {pivot}"
            ),
            SolverErr::Init(e) => write!(f, "weight initialization failed: {e}"),
            SolverErr::Json(e) => write!(f, "invalid JSON: {e}"),
        }
    }
}

impl Error for SolverErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SolverErr::Init(e) => Some(e),
            SolverErr::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RandErr> for SolverErr {
    fn from(value: RandErr) -> Self {
        Self::Init(value)
    }
}

impl From<serde_json::Error> for SolverErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
