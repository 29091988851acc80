//! Error types for plant models.

use ps_core::error::CoreError;
use thiserror::Error;

/// Errors that can occur while building or evaluating a plant model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DynamicsError {
    #[error("Non-physical parameter: {what}")]
    NonPhysical { what: &'static str },

    #[error("State size mismatch for {model}: expected {expected} rows, got {actual}")]
    StateSize {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Matrix error: {0}")]
    Core(#[from] CoreError),
}

pub type DynamicsResult<T> = Result<T, DynamicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DynamicsError::NonPhysical { what: "pendulum mass" };
        assert!(err.to_string().contains("pendulum mass"));
    }

    #[test]
    fn error_conversion() {
        let core = CoreError::Singular { determinant: 0.0 };
        let err: DynamicsError = core.into();
        assert!(matches!(err, DynamicsError::Core(CoreError::Singular { .. })));
    }
}
