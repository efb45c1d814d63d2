use chase_core::CoreError;
use chase_env::EnvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario configuration error: {0}")]
    Config(String),

    #[error("no legal initial positions after {attempts} attempts")]
    UnsatisfiableConstraints { attempts: u32 },

    #[error("action space must contain at least one direction")]
    EmptyActionSpace,

    #[error("invalid action distribution: {0}")]
    InvalidDistribution(String),

    #[error("unknown sweep condition `{0}`")]
    UnknownCondition(String),

    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    #[error("state error: {0}")]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
