//! Error types for simulation operations.

use ps_controls::ControlError;
use ps_core::error::CoreError;
use ps_dynamics::DynamicsError;
use thiserror::Error;

/// Errors encountered while setting up or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Initial state has {actual} entries, {model} expects {expected}")]
    StateSize {
        model: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("State became non-finite at t = {t_s} s (step {step})")]
    NonFinite { t_s: f64, step: usize },

    #[error("History already holds a {what} sample at {t_ns} ns")]
    SampleOverwrite { what: &'static str, t_ns: u64 },

    #[error("Matrix error: {0}")]
    Core(#[from] CoreError),

    #[error("Plant error: {0}")]
    Dynamics(#[from] DynamicsError),

    #[error("Controller error: {0}")]
    Control(#[from] ControlError),
}

pub type SimResult<T> = Result<T, SimError>;
