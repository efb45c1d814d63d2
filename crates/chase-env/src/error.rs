use chase_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EnvError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("wolf subtlety must be finite and >= 0, got {0}")]
    InvalidSubtlety(f64),

    #[error("capture radius must be finite and >= 0, got {0}")]
    InvalidRadius(f64),

    #[error("pursuer and target must be different agents")]
    SelfPursuit,

    #[error("{what} has {got} agents but {expected} were expected")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

pub type EnvResult<T> = Result<T, EnvError>;
