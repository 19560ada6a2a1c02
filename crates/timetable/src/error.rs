//! CLI error types.

use thiserror::Error;

use timetable_core::calendar::EntityError;
use timetable_core::storage::RepositoryError;

/// Result type alias for the timetable shell.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid record: {0}")]
    Entity(#[from] EntityError),

    #[error("Data file not found: {0} (run `timetable seed` to create one)")]
    MissingDataFile(String),

    #[error("Data file already exists: {0} (pass --force to overwrite)")]
    DataFileExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Scroll was cancelled before it fired")]
    ScrollCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
