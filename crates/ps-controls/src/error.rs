//! Error types for control system operations.

use ps_core::error::CoreError;
use ps_dynamics::DynamicsError;
use thiserror::Error;

/// Result type for control system operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur in control system operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a control function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Gain row does not match the state it multiplies.
    #[error("Gain has {gains} entries but the state has {states}")]
    GainSize { gains: usize, states: usize },

    /// The closed-form gain computation only exists for one plant.
    #[error("Pole placement is not available for {plant}")]
    PolePlacementUnsupported { plant: &'static str },

    #[error("Matrix error: {0}")]
    Core(#[from] CoreError),

    #[error("Plant error: {0}")]
    Dynamics(#[from] DynamicsError),
}
