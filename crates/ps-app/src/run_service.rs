//! Run execution and export service.

use std::path::PathBuf;

use ps_core::timing::Timer;
use ps_project::SimConfig;
use ps_results::{ExportBundle, RunManifest, compute_run_id};
use ps_sim::SimRecord;
use tracing::info;

use crate::compile::compile_config;
use crate::error::AppResult;
use crate::progress::{RunProgressEvent, RunStage};

/// Options for running simulations.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub solver_version: String,
    /// Directory for `theta.csv`, `torque.csv` and `manifest.json`.
    pub export_dir: Option<PathBuf>,
    /// Unwrap the exported angle for continuous plots.
    pub unwrap_angles: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            solver_version: env!("CARGO_PKG_VERSION").to_string(),
            export_dir: None,
            unwrap_angles: false,
        }
    }
}

/// Concise timing summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub solve_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
}

/// Response from a run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub record: SimRecord,
    pub manifest: RunManifest,
    pub timing: RunTimingSummary,
}

fn emit(
    cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: &Timer,
    message: &str,
) {
    if let Some(cb) = cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed_s(),
            Some(message.to_string()),
        ));
    }
}

/// Compile, run and optionally export one configuration.
pub fn run_config(
    config: &SimConfig,
    options: &RunOptions,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Timer::start("run");
    let mut timing = RunTimingSummary::default();

    emit(&mut progress_cb, RunStage::Compiling, &started, "Compiling configuration");
    let compile_timer = Timer::start("compile");
    let sim = compile_config(config)?;
    timing.compile_time_s = compile_timer.stop();

    emit(&mut progress_cb, RunStage::Simulating, &started, "Running simulation");
    let solve_timer = Timer::start("solve");
    let record = {
        let mut forward = |p: ps_sim::SimProgress| {
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(RunProgressEvent {
                    stage: RunStage::Simulating,
                    elapsed_wall_s: started.elapsed_s(),
                    message: Some(format!(
                        "Step {}/{} | t={:.4}/{:.4} s",
                        p.step, p.total_steps, p.sim_time, p.t_end
                    )),
                    fraction_complete: Some(p.fraction_complete),
                });
            }
        };
        sim.run_with_progress(Some(&mut forward))?
    };
    timing.solve_time_s = solve_timer.stop();

    let mut manifest = RunManifest {
        run_id: compute_run_id(config, &options.solver_version),
        name: config.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        plant: record.plant.to_string(),
        control_law: record.control_law.to_string(),
        dt_s: config.timing.dt_s,
        timespan_s: config.timing.timespan_s,
        sample_interval_s: config.timing.sample_interval_s,
        steps: record.steps,
        state_samples: record.history.len(),
        control_samples: record.history.control_len(),
        saturated_steps: record.saturated_steps,
        solver_version: options.solver_version.clone(),
        files: Vec::new(),
    };

    if let Some(dir) = &options.export_dir {
        emit(&mut progress_cb, RunStage::Exporting, &started, "Writing results");
        let save_timer = Timer::start("save");
        let bundle = ExportBundle::new(dir.clone())?;
        manifest = bundle.write(&manifest, &record, options.unwrap_angles)?;
        timing.save_time_s = save_timer.stop();
    }

    timing.total_time_s = started.stop();
    info!(
        run_id = %manifest.run_id,
        samples = manifest.state_samples,
        total_time_s = timing.total_time_s,
        "run complete"
    );
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent {
            stage: RunStage::Completed,
            elapsed_wall_s: timing.total_time_s,
            message: Some("Run complete".to_string()),
            fraction_complete: Some(1.0),
        });
    }

    Ok(RunResponse {
        record,
        manifest,
        timing,
    })
}
