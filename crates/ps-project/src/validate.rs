//! Configuration validation logic.

use crate::schema::{
    ControlLawDef, LATEST_VERSION, PerturbationDef, PlantDef, SimConfig, TimingDef,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be positive and finite"))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be non-negative and finite"))
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite"))
    }
}

pub fn validate_config(config: &SimConfig) -> Result<(), ValidationError> {
    if config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    validate_plant(&config.plant)?;
    validate_timing(&config.timing)?;
    validate_control(&config.control, &config.plant)?;

    if let Some(limit) = config.control_limit {
        positive("control_limit", limit)?;
    }

    let expected = config.plant.state_dim();
    if config.initial_state.len() != expected {
        return Err(invalid(
            "initial_state",
            format!("{} entries", config.initial_state.len()),
            &format!("{} expects {} entries", config.plant.kind_name(), expected),
        ));
    }
    for value in &config.initial_state {
        finite("initial_state", *value)?;
    }

    for perturbation in &config.perturbations {
        validate_perturbation(perturbation)?;
    }

    Ok(())
}

fn validate_plant(plant: &PlantDef) -> Result<(), ValidationError> {
    match plant {
        PlantDef::Pendulum {
            mass_kg,
            length_m,
            width_m,
            gravity_mps2,
            friction,
            ..
        } => {
            positive("plant.mass_kg", *mass_kg)?;
            positive("plant.length_m", *length_m)?;
            non_negative("plant.width_m", *width_m)?;
            positive("plant.gravity_mps2", *gravity_mps2)?;
            non_negative("plant.friction", *friction)?;
        }
        PlantDef::CartPole {
            cart_mass_kg,
            pendulum_mass_kg,
            length_m,
            gravity_mps2,
        } => {
            positive("plant.cart_mass_kg", *cart_mass_kg)?;
            positive("plant.pendulum_mass_kg", *pendulum_mass_kg)?;
            positive("plant.length_m", *length_m)?;
            positive("plant.gravity_mps2", *gravity_mps2)?;
        }
    }
    Ok(())
}

fn validate_timing(timing: &TimingDef) -> Result<(), ValidationError> {
    positive("timing.dt_s", timing.dt_s)?;
    positive("timing.timespan_s", timing.timespan_s)?;
    positive("timing.sample_interval_s", timing.sample_interval_s)?;

    let ratio = timing.sample_interval_s / timing.dt_s;
    if ratio < 1.0 - 1e-9 || (ratio - ratio.round()).abs() > 1e-6 {
        return Err(invalid(
            "timing.sample_interval_s",
            timing.sample_interval_s,
            "must be a whole multiple of dt_s",
        ));
    }
    Ok(())
}

fn validate_control(control: &ControlLawDef, plant: &PlantDef) -> Result<(), ValidationError> {
    match control {
        ControlLawDef::None => {}
        ControlLawDef::Pid { kp, ki, kd, .. } => {
            finite("control.kp", *kp)?;
            finite("control.ki", *ki)?;
            finite("control.kd", *kd)?;
        }
        ControlLawDef::ZieglerNichols { ku, tu, .. } => {
            positive("control.ku", *ku)?;
            positive("control.tu", *tu)?;
        }
        ControlLawDef::PolePlacement { eigenvalues } => {
            if !matches!(plant, PlantDef::Pendulum { .. }) {
                return Err(ValidationError::Unsupported {
                    feature: "PolePlacement".to_string(),
                    reason: format!(
                        "closed-form pole placement exists only for the pendulum, not the {}",
                        plant.kind_name()
                    ),
                });
            }
            for lambda in eigenvalues {
                finite("control.eigenvalues", *lambda)?;
            }
        }
        ControlLawDef::StateFeedback { gains } => {
            if gains.len() != plant.state_dim() {
                return Err(invalid(
                    "control.gains",
                    format!("{} entries", gains.len()),
                    &format!("{} expects {} gains", plant.kind_name(), plant.state_dim()),
                ));
            }
            for k in gains {
                finite("control.gains", *k)?;
            }
        }
    }
    Ok(())
}

fn validate_perturbation(p: &PerturbationDef) -> Result<(), ValidationError> {
    non_negative("perturbations.onset_s", p.onset_s)?;
    finite("perturbations.magnitude", p.magnitude)?;
    non_negative("perturbations.duration_s", p.duration_s)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampling_must_be_whole_steps() {
        let mut config = SimConfig::pendulum_default();
        config.timing.sample_interval_s = 0.00015;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("timing.sample_interval_s"));

        config.timing.sample_interval_s = 0.00005;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn state_length_must_match_plant() {
        let mut config = SimConfig::cart_pole_default();
        config.initial_state = vec![0.0, 0.0];
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("cart-pole expects 4"));
    }

    #[test]
    fn pole_placement_needs_pendulum() {
        let mut config = SimConfig::cart_pole_default();
        config.control = ControlLawDef::PolePlacement {
            eigenvalues: [-3.0, -60.0],
        };
        assert!(matches!(
            validate_config(&config),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn rejects_bad_numbers() {
        let mut config = SimConfig::pendulum_default();
        config.control_limit = Some(-1.0);
        assert!(validate_config(&config).is_err());

        let mut config = SimConfig::pendulum_default();
        config.perturbations[0].duration_s = -0.5;
        assert!(validate_config(&config).is_err());

        let mut config = SimConfig::pendulum_default();
        config.control = ControlLawDef::StateFeedback {
            gains: vec![1.0, f64::NAN],
        };
        assert!(validate_config(&config).is_err());

        let mut config = SimConfig::pendulum_default();
        config.version = LATEST_VERSION + 1;
        assert_eq!(
            validate_config(&config),
            Err(ValidationError::UnsupportedVersion {
                version: LATEST_VERSION + 1
            })
        );
    }
}
