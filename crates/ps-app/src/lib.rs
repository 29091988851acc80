//! Shared application service layer for pendsim.
//!
//! Centralizes config handling, compilation into a runnable simulation, run
//! execution with export, parallel sweeps, and result querying for the CLI.

pub mod compile;
pub mod error;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;
pub mod sweep_service;

pub use compile::compile_config;
pub use error::{AppError, AppResult};
pub use progress::{RunProgressEvent, RunStage};
pub use project_service::{PRESET_NAMES, load_config, preset, save_config, validate_config};
pub use query::{
    RunSummary, estimate_period, extract_component_series, get_run_summary, list_state_labels,
};
pub use run_service::{RunOptions, RunResponse, RunTimingSummary, run_config};
pub use sweep_service::{SweepPoint, SweepResult, sweep_initial_angles};
