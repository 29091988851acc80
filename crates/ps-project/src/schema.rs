//! Run configuration schema.

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// Everything needed to reproduce one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    pub version: u32,
    pub name: String,
    pub plant: PlantDef,
    pub control: ControlLawDef,
    /// Symmetric bound on controller output; absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control_limit: Option<f64>,
    /// Master switch for the perturbation schedule.
    #[serde(default = "default_true")]
    pub include_perturbations: bool,
    #[serde(default)]
    pub perturbations: Vec<PerturbationDef>,
    pub initial_state: Vec<f64>,
    pub timing: TimingDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum PlantDef {
    Pendulum {
        mass_kg: f64,
        length_m: f64,
        width_m: f64,
        #[serde(default = "default_gravity")]
        gravity_mps2: f64,
        #[serde(default)]
        friction: f64,
        /// Integrate the linearized model instead of the nonlinear one.
        #[serde(default)]
        linearized: bool,
    },
    CartPole {
        cart_mass_kg: f64,
        pendulum_mass_kg: f64,
        length_m: f64,
        #[serde(default = "default_gravity")]
        gravity_mps2: f64,
    },
}

impl PlantDef {
    pub fn state_dim(&self) -> usize {
        match self {
            PlantDef::Pendulum { .. } => 2,
            PlantDef::CartPole { .. } => 4,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PlantDef::Pendulum { .. } => "pendulum",
            PlantDef::CartPole { .. } => "cart-pole",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ControlLawDef {
    None,
    Pid {
        kp: f64,
        #[serde(default)]
        ki: f64,
        #[serde(default)]
        kd: f64,
        #[serde(default)]
        form: PidFormDef,
    },
    /// PID gains derived from a measured ultimate gain and period.
    ZieglerNichols {
        ku: f64,
        tu: f64,
        #[serde(default)]
        rule: TuningRuleDef,
        #[serde(default)]
        form: PidFormDef,
    },
    /// State feedback with gains placing the two pendulum poles.
    PolePlacement { eigenvalues: [f64; 2] },
    StateFeedback { gains: Vec<f64> },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PidFormDef {
    #[default]
    Continuous,
    Discrete,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TuningRuleDef {
    #[default]
    Pid,
    Pd,
    UltimateProbe,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerturbationDef {
    pub onset_s: f64,
    pub magnitude: f64,
    pub duration_s: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimingDef {
    pub dt_s: f64,
    pub timespan_s: f64,
    pub sample_interval_s: f64,
}

impl Default for TimingDef {
    fn default() -> Self {
        Self {
            dt_s: 1e-4,
            timespan_s: 3.0,
            sample_interval_s: 0.01,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_gravity() -> f64 {
    9.81
}
