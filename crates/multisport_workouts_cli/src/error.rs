//! Error types for the command-line front end.

use thiserror::Error;

/// Wrapped errors keep their own message; anyhow prints the source chain.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Workout(#[from] multisport_workouts::WorkoutError),

    #[error("file access failed")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
