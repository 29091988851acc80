//! ps-results: trajectory export and run manifests.

pub mod bundle;
pub mod csv;
pub mod hash;
pub mod types;
pub mod unwrap;

pub use bundle::ExportBundle;
pub use csv::{format_series_csv, write_control_csv, write_theta_csv};
pub use hash::compute_run_id;
pub use types::*;
pub use unwrap::unwrap_angles;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No manifest in {dir}")]
    ManifestNotFound { dir: String },

    #[error("History error: {0}")]
    History(#[from] ps_sim::SimError),
}
