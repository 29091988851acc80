//! Error types for the ps-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives the CLI one error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config validation failed: {0}")]
    Validation(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Compilation failed: {0}")]
    Compile(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ps-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ps_project::ProjectError> for AppError {
    fn from(err: ps_project::ProjectError) -> Self {
        match err {
            ps_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ps_project::ValidationError> for AppError {
    fn from(err: ps_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ps_dynamics::DynamicsError> for AppError {
    fn from(err: ps_dynamics::DynamicsError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<ps_controls::ControlError> for AppError {
    fn from(err: ps_controls::ControlError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<ps_sim::SimError> for AppError {
    fn from(err: ps_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<ps_results::ResultsError> for AppError {
    fn from(err: ps_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
