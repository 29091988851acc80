//! Query helpers for extracting data from finished runs.

use ps_core::{Real, wrap_angle};
use ps_sim::SimRecord;

use crate::error::{AppError, AppResult};

/// Summary of a run's time range and headline numbers.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub time_range: (f64, f64),
    pub state_samples: usize,
    pub control_samples: usize,
    pub peak_abs_theta: f64,
    pub peak_abs_control: f64,
    pub saturated_steps: usize,
    pub final_state: Vec<f64>,
}

pub fn get_run_summary(record: &SimRecord) -> AppResult<RunSummary> {
    let theta = record.theta_series()?;
    let (t_max, final_state) = record
        .history
        .final_state()
        .map(|(t, s)| (ps_sim::ns_to_secs(t), s.values().to_vec()))
        .ok_or_else(|| AppError::InvalidInput("No samples in run".to_string()))?;

    let peak_abs_theta = theta.iter().map(|(_, th)| th.abs()).fold(0.0, f64::max);
    let peak_abs_control = record
        .history
        .controls()
        .map(|(_, u)| u.abs())
        .fold(0.0, f64::max);

    Ok(RunSummary {
        time_range: (0.0, t_max),
        state_samples: record.history.len(),
        control_samples: record.history.control_len(),
        peak_abs_theta,
        peak_abs_control,
        saturated_steps: record.saturated_steps,
        final_state,
    })
}

/// List the state component labels in row order.
pub fn list_state_labels(record: &SimRecord) -> Vec<String> {
    record.state_labels.iter().map(|s| s.to_string()).collect()
}

/// `(time_s, value)` series of the state component named `label`.
pub fn extract_component_series(record: &SimRecord, label: &str) -> AppResult<Vec<(f64, f64)>> {
    let row = record
        .state_labels
        .iter()
        .position(|l| *l == label)
        .ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Unknown state component '{}' (have {})",
                label,
                record.state_labels.join(", ")
            ))
        })?;
    Ok(record.history.component_series(row)?)
}

/// Mean oscillation period of an angle series about `reference`.
///
/// Measured between upward crossings of `theta - reference`, located by
/// linear interpolation. Wrap-around jumps are not counted as crossings.
/// Returns `None` with fewer than two crossings.
pub fn estimate_period(series: &[(Real, Real)], reference: Real) -> Option<Real> {
    let crossings: Vec<Real> = series
        .windows(2)
        .filter_map(|w| {
            let (t0, a) = (w[0].0, wrap_angle(w[0].1 - reference));
            let (t1, b) = (w[1].0, wrap_angle(w[1].1 - reference));
            if a < 0.0 && b >= 0.0 && b - a < std::f64::consts::PI {
                Some(t0 + (t1 - t0) * (-a) / (b - a))
            } else {
                None
            }
        })
        .collect();

    if crossings.len() < 2 {
        return None;
    }
    let span = crossings[crossings.len() - 1] - crossings[0];
    Some(span / (crossings.len() - 1) as Real)
}
