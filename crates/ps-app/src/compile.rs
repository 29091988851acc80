//! Turn a validated [`SimConfig`] into a ready-to-run [`Simulation`].

use ps_controls::{
    ControlLaw, Perturbation, PerturbationSchedule, PidForm, PidGains, StateFeedbackController,
    TuningRule, UltimateGain, place_poles, ziegler_nichols,
};
use ps_core::Matrix;
use ps_core::units::{kg, m, mps2};
use ps_dynamics::{CartPoleModel, CartPoleParams, DynamicsModel, ModelForm, PendulumModel, PendulumParams};
use ps_project::{
    ControlLawDef, PerturbationDef, PidFormDef, PlantDef, SimConfig, TimingDef, TuningRuleDef,
    validate_config,
};
use ps_sim::{SimOptions, Simulation};

use crate::error::AppResult;

pub fn compile_config(config: &SimConfig) -> AppResult<Simulation> {
    validate_config(config)?;

    let model = compile_plant(&config.plant)?;
    let law = compile_control(&config.control, &model)?;
    let perturbations = compile_perturbations(&config.perturbations, config.include_perturbations)?;

    let sim = Simulation::new(
        model,
        law,
        compile_timing(&config.timing),
        Matrix::column_vector(&config.initial_state),
    )?
    .with_perturbations(perturbations)
    .with_control_limit(config.control_limit)?;
    Ok(sim)
}

pub fn compile_plant(plant: &PlantDef) -> AppResult<DynamicsModel> {
    let model = match *plant {
        PlantDef::Pendulum {
            mass_kg,
            length_m,
            width_m,
            gravity_mps2,
            friction,
            linearized,
        } => {
            let params = PendulumParams::new(
                kg(mass_kg),
                m(length_m),
                m(width_m),
                mps2(gravity_mps2),
                friction,
            )?;
            let form = if linearized {
                ModelForm::Linearized
            } else {
                ModelForm::Nonlinear
            };
            PendulumModel::new(params, form)?.into()
        }
        PlantDef::CartPole {
            cart_mass_kg,
            pendulum_mass_kg,
            length_m,
            gravity_mps2,
        } => {
            let params = CartPoleParams::new(
                kg(cart_mass_kg),
                kg(pendulum_mass_kg),
                m(length_m),
                mps2(gravity_mps2),
            )?;
            CartPoleModel::new(params).into()
        }
    };
    Ok(model)
}

pub fn compile_control(control: &ControlLawDef, model: &DynamicsModel) -> AppResult<ControlLaw> {
    let law = match control {
        ControlLawDef::None => ControlLaw::None,
        ControlLawDef::Pid { kp, ki, kd, form } => {
            ControlLaw::pid(PidGains::new(*kp, *ki, *kd)?, pid_form(*form))
        }
        ControlLawDef::ZieglerNichols { ku, tu, rule, form } => {
            let gains = ziegler_nichols(UltimateGain::new(*ku, *tu)?, tuning_rule(*rule));
            ControlLaw::pid(gains, pid_form(*form))
        }
        ControlLawDef::PolePlacement { eigenvalues } => {
            ControlLaw::state_feedback(place_poles(model, eigenvalues[0], eigenvalues[1])?)
        }
        ControlLawDef::StateFeedback { gains } => {
            ControlLaw::state_feedback(StateFeedbackController::new(gains)?)
        }
    };
    Ok(law)
}

pub fn compile_perturbations(
    defs: &[PerturbationDef],
    enabled: bool,
) -> AppResult<PerturbationSchedule> {
    let entries = defs
        .iter()
        .map(|p| Perturbation::new(p.onset_s, p.magnitude, p.duration_s))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(if enabled {
        PerturbationSchedule::new(entries)
    } else {
        PerturbationSchedule::disabled(entries)
    })
}

pub fn compile_timing(timing: &TimingDef) -> SimOptions {
    SimOptions {
        dt: timing.dt_s,
        t_end: timing.timespan_s,
        sample_interval: timing.sample_interval_s,
    }
}

fn pid_form(form: PidFormDef) -> PidForm {
    match form {
        PidFormDef::Continuous => PidForm::Continuous,
        PidFormDef::Discrete => PidForm::Discrete,
    }
}

fn tuning_rule(rule: TuningRuleDef) -> TuningRule {
    match rule {
        TuningRuleDef::Pid => TuningRule::Pid,
        TuningRuleDef::Pd => TuningRule::Pd,
        TuningRuleDef::UltimateProbe => TuningRule::UltimateProbe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_dynamics::Plant;

    #[test]
    fn compiles_presets() {
        let sim = compile_config(&SimConfig::pendulum_default()).unwrap();
        assert_eq!(sim.model().name(), "pendulum");
        assert_eq!(sim.clock().step_count(), 30_000);

        let sim = compile_config(&SimConfig::cart_pole_default()).unwrap();
        assert_eq!(sim.model().state_dim(), 4);
    }

    #[test]
    fn pole_placement_gains_reach_the_law() {
        let model = compile_plant(&SimConfig::pendulum_default().plant).unwrap();
        let law = compile_control(
            &ControlLawDef::PolePlacement {
                eigenvalues: [-3.0, -60.0],
            },
            &model,
        )
        .unwrap();
        match law {
            ControlLaw::StateFeedback(sf) => {
                assert!((sf.gain().get(0, 0) - 23.14275).abs() < 1e-9);
            }
            other => panic!("unexpected law {other:?}"),
        }
    }

    #[test]
    fn ziegler_nichols_gains_reach_the_law() {
        let model = compile_plant(&SimConfig::pendulum_default().plant).unwrap();
        let law = compile_control(
            &ControlLawDef::ZieglerNichols {
                ku: 20.0,
                tu: 0.57,
                rule: TuningRuleDef::Pd,
                form: PidFormDef::Continuous,
            },
            &model,
        )
        .unwrap();
        match law {
            ControlLaw::Pid { controller, .. } => {
                assert!((controller.gains.kp - 16.0).abs() < 1e-12);
                assert!((controller.gains.kd - 1.14).abs() < 1e-12);
            }
            other => panic!("unexpected law {other:?}"),
        }
    }

    #[test]
    fn disabled_perturbations_are_kept_but_silent() {
        let defs = [PerturbationDef {
            onset_s: 0.0,
            magnitude: 2.3,
            duration_s: 0.5,
        }];
        let schedule = compile_perturbations(&defs, false).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.total_at(0.1), 0.0);
    }

    #[test]
    fn invalid_config_fails_before_compiling() {
        let mut config = SimConfig::pendulum_default();
        config.timing.dt_s = 0.0;
        assert!(compile_config(&config).is_err());
    }
}
