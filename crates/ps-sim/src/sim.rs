//! Simulation driver and result recording.

use crate::clock::{SimClock, ns_to_secs};
use crate::error::{SimError, SimResult};
use crate::history::History;
use crate::integrator::{Integrator, Rk4};
use ps_controls::{ControlLaw, PerturbationSchedule, saturate};
use ps_core::{Matrix, Real, wrap_angle};
use ps_dynamics::{DynamicsModel, Plant, StateLayout};
use tracing::{debug, info, warn};

/// Options for simulation runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: Real,
    /// Final simulation time (seconds)
    pub t_end: Real,
    /// Interval between recorded samples (seconds); a multiple of `dt`
    pub sample_interval: Real,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1e-4,
            t_end: 3.0,
            sample_interval: 0.01,
        }
    }
}

/// Progress snapshot handed to a progress callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimProgress {
    pub step: usize,
    pub total_steps: usize,
    pub sim_time: Real,
    pub t_end: Real,
    pub fraction_complete: Real,
}

/// Record of a finished run.
#[derive(Clone, Debug)]
pub struct SimRecord {
    pub history: History,
    pub layout: StateLayout,
    pub state_labels: &'static [&'static str],
    pub plant: &'static str,
    pub control_law: &'static str,
    /// Integration steps taken
    pub steps: usize,
    /// Steps on which the controller output was clamped
    pub saturated_steps: usize,
}

impl SimRecord {
    /// `(time_s, theta)` pairs.
    pub fn theta_series(&self) -> SimResult<Vec<(Real, Real)>> {
        self.history.component_series(self.layout.theta)
    }

    pub fn control_series(&self) -> Vec<(Real, Real)> {
        self.history.control_series()
    }
}

/// One fully configured run. Consumed by [`Simulation::run`].
#[derive(Clone, Debug)]
pub struct Simulation {
    model: DynamicsModel,
    law: ControlLaw,
    perturbations: PerturbationSchedule,
    control_limit: Option<Real>,
    clock: SimClock,
    options: SimOptions,
    initial_state: Matrix,
}

impl Simulation {
    pub fn new(
        model: DynamicsModel,
        law: ControlLaw,
        options: SimOptions,
        initial_state: Matrix,
    ) -> SimResult<Self> {
        let clock = SimClock::new(options.dt, options.t_end, options.sample_interval)?;

        if initial_state.columns() != 1 || initial_state.rows() != model.state_dim() {
            return Err(SimError::StateSize {
                model: model.name(),
                expected: model.state_dim(),
                actual: initial_state.values().len(),
            });
        }
        if !initial_state.is_finite() {
            return Err(SimError::InvalidArg {
                what: "initial state must be finite",
            });
        }
        law.check_state_dim(model.state_dim())?;

        Ok(Self {
            model,
            law,
            perturbations: PerturbationSchedule::empty(),
            control_limit: None,
            clock,
            options,
            initial_state,
        })
    }

    pub fn with_perturbations(mut self, perturbations: PerturbationSchedule) -> Self {
        self.perturbations = perturbations;
        self
    }

    /// Bound controller output to `[-limit, limit]`; `None` leaves it unbounded.
    pub fn with_control_limit(mut self, limit: Option<Real>) -> SimResult<Self> {
        if let Some(max) = limit {
            if !(max.is_finite() && max > 0.0) {
                return Err(SimError::InvalidArg {
                    what: "control limit must be positive",
                });
            }
        }
        self.control_limit = limit;
        Ok(self)
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn model(&self) -> &DynamicsModel {
        &self.model
    }

    pub fn run(self) -> SimResult<SimRecord> {
        self.run_with_progress(None)
    }

    /// Run to completion, reporting progress roughly every percent.
    pub fn run_with_progress(
        self,
        mut progress: Option<&mut dyn FnMut(SimProgress)>,
    ) -> SimResult<SimRecord> {
        let Simulation {
            model,
            mut law,
            perturbations,
            control_limit,
            clock,
            options,
            initial_state,
        } = self;

        let layout = model.layout();
        let wraps = model.wraps_angle();
        let dt = clock.dt_s();
        let total_steps = clock.step_count();
        let report_every = (total_steps / 100).max(1);

        debug!(
            plant = model.name(),
            law = law.name(),
            dt = options.dt,
            t_end = options.t_end,
            sample_interval = options.sample_interval,
            ?control_limit,
            perturbations = perturbations.len(),
            "simulation configured"
        );
        info!(plant = model.name(), steps = total_steps, "simulation started");

        law.reset();
        let integrator = Rk4;
        let mut history = History::seeded(initial_state.clone(), clock.sample_ns());
        let mut x = initial_state;
        let mut t_ns: u64 = 0;
        let mut step = 0usize;
        let mut saturated_steps = 0usize;

        while t_ns < clock.timespan_ns() {
            if wraps {
                let theta = x.get(0, layout.theta);
                x.set(0, layout.theta, wrap_angle(theta));
            }

            let raw = law.evaluate(&x, &layout, dt)?;
            let (u, clamped) = saturate(raw, control_limit);
            if clamped {
                if saturated_steps == 0 {
                    warn!(
                        t = ns_to_secs(t_ns),
                        requested = raw,
                        applied = u,
                        "controller output saturated"
                    );
                }
                saturated_steps += 1;
            }

            if clock.is_sample(t_ns) {
                history.record_control(t_ns, u)?;
            }

            let applied = u + perturbations.total_at_ns(t_ns);
            x = integrator.step(|s| Ok(model.derivative(s, applied)?), &x, dt)?;
            t_ns += clock.dt_ns();
            step += 1;

            if !x.is_finite() {
                return Err(SimError::NonFinite {
                    t_s: ns_to_secs(t_ns),
                    step,
                });
            }

            if clock.is_sample(t_ns) && t_ns <= clock.timespan_ns() {
                history.record_state(t_ns, x.clone())?;
            }

            if let Some(cb) = progress.as_deref_mut() {
                if step % report_every == 0 || step == total_steps {
                    cb(SimProgress {
                        step,
                        total_steps,
                        sim_time: ns_to_secs(t_ns),
                        t_end: options.t_end,
                        fraction_complete: step as Real / total_steps as Real,
                    });
                }
            }
        }

        info!(
            plant = model.name(),
            steps = step,
            samples = history.len(),
            saturated_steps,
            "simulation finished"
        );

        Ok(SimRecord {
            history,
            layout,
            state_labels: model.state_labels(),
            plant: model.name(),
            control_law: law.name(),
            steps: step,
            saturated_steps,
        })
    }
}
