//! Error types for chase-output.

use chase_env::EnvError;
use thiserror::Error;

/// Errors that can occur when saving, loading, or rendering trajectories.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("interpolation error: {0}")]
    Env(#[from] EnvError),

    #[error("invalid render settings: {0}")]
    Render(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
