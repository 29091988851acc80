use ps_controls::ControlLaw;
use ps_core::Matrix;
use ps_dynamics::{DynamicsModel, PendulumModel, PendulumParams};
use ps_project::SimConfig;
use ps_results::{ExportBundle, RunManifest, ResultsError, compute_run_id};
use ps_sim::{SimOptions, SimRecord, Simulation};

fn short_run() -> SimRecord {
    let params = PendulumParams::from_si(1.0, 0.8, 0.05, 9.81, 0.01).unwrap();
    let model: DynamicsModel = PendulumModel::nonlinear(params).unwrap().into();
    let options = SimOptions {
        dt: 1e-3,
        t_end: 0.1,
        sample_interval: 0.01,
    };
    Simulation::new(model, ControlLaw::None, options, Matrix::column_vector(&[0.2, 0.0]))
        .unwrap()
        .run()
        .unwrap()
}

fn manifest_for(record: &SimRecord) -> RunManifest {
    let config = SimConfig::pendulum_default();
    RunManifest {
        run_id: compute_run_id(&config, "test"),
        name: config.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        plant: record.plant.to_string(),
        control_law: record.control_law.to_string(),
        dt_s: 1e-3,
        timespan_s: 0.1,
        sample_interval_s: 0.01,
        steps: record.steps,
        state_samples: record.history.len(),
        control_samples: record.history.control_len(),
        saturated_steps: record.saturated_steps,
        solver_version: "test".to_string(),
        files: vec![],
    }
}

#[test]
fn bundle_writes_csv_and_manifest() {
    let dir = std::env::temp_dir().join("ps_results_bundle_smoke");
    let _ = std::fs::remove_dir_all(&dir);
    let bundle = ExportBundle::new(dir.clone()).unwrap();
    assert!(!bundle.has_manifest());

    let record = short_run();
    let written = bundle.write(&manifest_for(&record), &record, false).unwrap();
    assert_eq!(written.files, vec!["theta.csv", "torque.csv"]);

    let theta = std::fs::read_to_string(dir.join("theta.csv")).unwrap();
    let lines: Vec<&str> = theta.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[0], "0,0.2");
    assert!(theta.ends_with('\n'));

    let torque = std::fs::read_to_string(dir.join("torque.csv")).unwrap();
    assert_eq!(torque.lines().count(), 10);
    assert!(torque.lines().all(|l| l.ends_with(",0")));

    let loaded = bundle.load_manifest().unwrap();
    assert_eq!(loaded, written);
    assert_eq!(loaded.state_samples, 11);
}

#[test]
fn missing_manifest_is_reported() {
    let dir = std::env::temp_dir().join("ps_results_bundle_empty");
    let _ = std::fs::remove_dir_all(&dir);
    let bundle = ExportBundle::new(dir).unwrap();
    assert!(matches!(
        bundle.load_manifest(),
        Err(ResultsError::ManifestNotFound { .. })
    ));
}
