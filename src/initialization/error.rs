use std::{
    error::Error,
    fmt::{self, Display},
};

use rand::distr::uniform::Error as UniformError;
use rand_distr::NormalError;

pub type Result<T> = std::result::Result<T, RandErr>;

/// The distribution an initializer was asked for couldn't be built from its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RandErr {
    Normal(NormalError),
    Uniform(UniformError),
}

impl From<NormalError> for RandErr {
    fn from(value: NormalError) -> Self {
        Self::Normal(value)
    }
}

impl From<UniformError> for RandErr {
    fn from(value: UniformError) -> Self {
        Self::Uniform(value)
    }
}

impl Display for RandErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandErr::Normal(e) => write!(f, "invalid normal distribution: {e}"),
            RandErr::Uniform(e) => write!(f, "invalid uniform distribution: {e}"),
        }
    }
}

impl Error for RandErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RandErr::Normal(e) => Some(e),
            RandErr::Uniform(e) => Some(e),
        }
    }
}
