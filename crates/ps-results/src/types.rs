//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Summary written next to exported series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub name: String,
    pub timestamp: String,
    pub plant: String,
    pub control_law: String,
    pub dt_s: f64,
    pub timespan_s: f64,
    pub sample_interval_s: f64,
    pub steps: usize,
    pub state_samples: usize,
    pub control_samples: usize,
    pub saturated_steps: usize,
    pub solver_version: String,
    #[serde(default)]
    pub files: Vec<String>,
}
