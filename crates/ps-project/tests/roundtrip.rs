use ps_project::schema::*;
use ps_project::{ProjectError, load_config, load_json, load_yaml, save_json, save_yaml};

#[test]
fn roundtrip_yaml_pendulum_preset() {
    let config = SimConfig::pendulum_default();

    let path = std::env::temp_dir().join("ps_project_roundtrip_pendulum.yaml");
    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_cart_pole_preset() {
    let config = SimConfig::cart_pole_default();

    let path = std::env::temp_dir().join("ps_project_roundtrip_cart_pole.json");
    save_json(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn minimal_yaml_uses_defaults() {
    let yaml = r#"
version: 1
name: Minimal
plant:
  type: Pendulum
  mass_kg: 1.0
  length_m: 0.8
  width_m: 0.05
control:
  type: ZieglerNichols
  ku: 20.0
  tu: 0.57
  rule: pd
initial_state: [0.1, 0.0]
timing:
  dt_s: 0.0001
  timespan_s: 1.0
  sample_interval_s: 0.01
"#;
    let path = std::env::temp_dir().join("ps_project_minimal.yaml");
    std::fs::write(&path, yaml).unwrap();
    let config = load_yaml(&path).unwrap();

    assert!(config.include_perturbations);
    assert!(config.perturbations.is_empty());
    assert_eq!(config.control_limit, None);
    match config.plant {
        PlantDef::Pendulum {
            gravity_mps2,
            friction,
            linearized,
            ..
        } => {
            assert_eq!(gravity_mps2, 9.81);
            assert_eq!(friction, 0.0);
            assert!(!linearized);
        }
        other => panic!("unexpected plant {other:?}"),
    }
    assert_eq!(
        config.control,
        ControlLawDef::ZieglerNichols {
            ku: 20.0,
            tu: 0.57,
            rule: TuningRuleDef::Pd,
            form: PidFormDef::Continuous,
        }
    );
}

#[test]
fn free_response_control_parses() {
    let json = r#"{
        "version": 1,
        "name": "Free",
        "plant": {"type": "CartPole", "cart_mass_kg": 5.0, "pendulum_mass_kg": 0.5, "length_m": 0.4},
        "control": {"type": "None"},
        "initial_state": [0.0, 0.0, 0.0, 0.5],
        "timing": {"dt_s": 0.0001, "timespan_s": 3.0, "sample_interval_s": 0.01}
    }"#;
    let path = std::env::temp_dir().join("ps_project_free.json");
    std::fs::write(&path, json).unwrap();
    let config = load_json(&path).unwrap();
    assert_eq!(config.control, ControlLawDef::None);
    assert_eq!(config.plant.state_dim(), 4);
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let mut config = SimConfig::pendulum_default();
    config.initial_state = vec![0.0];
    let path = std::env::temp_dir().join("ps_project_invalid.json");
    std::fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    assert!(matches!(load_json(&path), Err(ProjectError::Validation(_))));
    assert!(save_json(&path, &config).is_err());
}
