//! Independent runs over a set of initial angles, executed in parallel.

use ps_core::timing::{AccumulatingTimer, Timer};
use ps_dynamics::Plant;
use ps_project::SimConfig;
use rayon::prelude::*;
use tracing::info;

use crate::compile::compile_plant;
use crate::error::{AppError, AppResult};
use crate::query::{estimate_period, get_run_summary};

/// Outcome of one run of a sweep.
#[derive(Debug, Clone)]
pub struct SweepPoint {
    pub initial_angle_rad: f64,
    pub peak_abs_theta: f64,
    pub final_theta: f64,
    pub saturated_steps: usize,
    /// Oscillation period about upright, if the angle crossed it repeatedly.
    pub period_s: Option<f64>,
    pub wall_time_s: f64,
}

#[derive(Debug, Clone)]
pub struct SweepResult {
    pub points: Vec<SweepPoint>,
    pub total_wall_time_s: f64,
    pub average_run_time_s: f64,
}

/// Run `config` once per initial angle, everything else unchanged.
pub fn sweep_initial_angles(config: &SimConfig, angles_rad: &[f64]) -> AppResult<SweepResult> {
    if angles_rad.is_empty() {
        return Err(AppError::InvalidInput("Sweep needs at least one angle".to_string()));
    }
    let theta_row = compile_plant(&config.plant)?.layout().theta;
    let started = Timer::start("sweep");

    let points = angles_rad
        .par_iter()
        .map(|&angle| run_point(config, theta_row, angle))
        .collect::<AppResult<Vec<_>>>()?;

    let mut timer = AccumulatingTimer::new();
    for p in &points {
        timer.record(p.wall_time_s);
    }
    let total_wall_time_s = started.stop();
    info!(
        runs = points.len(),
        total_wall_time_s,
        average_run_time_s = timer.average_seconds(),
        "sweep complete"
    );

    Ok(SweepResult {
        points,
        total_wall_time_s,
        average_run_time_s: timer.average_seconds(),
    })
}

fn run_point(config: &SimConfig, theta_row: usize, angle: f64) -> AppResult<SweepPoint> {
    let timer = Timer::start("sweep point");
    let mut config = config.clone();
    if let Some(theta) = config.initial_state.get_mut(theta_row) {
        *theta = angle;
    }

    let record = crate::compile::compile_config(&config)?.run()?;
    let summary = get_run_summary(&record)?;
    let theta = record.theta_series()?;

    Ok(SweepPoint {
        initial_angle_rad: angle,
        peak_abs_theta: summary.peak_abs_theta,
        final_theta: summary.final_state[record.layout.theta],
        saturated_steps: summary.saturated_steps,
        period_s: estimate_period(&theta, 0.0),
        wall_time_s: timer.stop(),
    })
}
