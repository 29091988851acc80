//! Built-in configurations.

use crate::schema::{
    ControlLawDef, LATEST_VERSION, PerturbationDef, PidFormDef, PlantDef, SimConfig, TimingDef,
};

impl SimConfig {
    /// Bar pendulum held upright by pole placement at (-3, -60), bounded to
    /// 2.5 N·m and pushed by a 2.3 N·m disturbance for the first half second.
    pub fn pendulum_default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "Pendulum (pole placement)".to_string(),
            plant: bar_pendulum(),
            control: ControlLawDef::PolePlacement {
                eigenvalues: [-3.0, -60.0],
            },
            control_limit: Some(2.5),
            include_perturbations: true,
            perturbations: vec![PerturbationDef {
                onset_s: 0.0,
                magnitude: 2.3,
                duration_s: 0.5,
            }],
            initial_state: vec![0.0, 0.0],
            timing: TimingDef::default(),
        }
    }

    /// Same bar and disturbance under hand-tuned PD control.
    pub fn pendulum_pd() -> Self {
        Self {
            name: "Pendulum (PD)".to_string(),
            control: ControlLawDef::Pid {
                kp: 20.0,
                ki: 0.0,
                kd: 6.0,
                form: PidFormDef::Continuous,
            },
            ..Self::pendulum_default()
        }
    }

    /// Cart-pole released with a 0.5 rad/s nudge, balanced by discrete PID
    /// with the cart force bounded to 50 N.
    pub fn cart_pole_default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: "Cart-pole (discrete PID)".to_string(),
            plant: PlantDef::CartPole {
                cart_mass_kg: 5.0,
                pendulum_mass_kg: 0.5,
                length_m: 0.4,
                gravity_mps2: 9.81,
            },
            control: ControlLawDef::Pid {
                kp: 100.0,
                ki: 0.0,
                kd: 95_000.0,
                form: PidFormDef::Discrete,
            },
            control_limit: Some(50.0),
            include_perturbations: true,
            perturbations: Vec::new(),
            initial_state: vec![0.0, 0.0, 0.0, 0.5],
            timing: TimingDef::default(),
        }
    }
}

fn bar_pendulum() -> PlantDef {
    PlantDef::Pendulum {
        mass_kg: 1.0,
        length_m: 0.8,
        width_m: 0.05,
        gravity_mps2: 9.81,
        friction: 0.01,
        linearized: false,
    }
}
