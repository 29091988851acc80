use clap::{Parser, Subcommand};
use ps_app::{
    AppError, AppResult, RunOptions, RunProgressEvent, RunStage, RunTimingSummary,
    project_service, query, run_service, sweep_service,
};
use ps_core::units::{deg, si};
use ps_results::{format_series_csv, unwrap_angles};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "pendsim")]
#[command(about = "pendsim - inverted pendulum and cart-pole simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run configuration file
    Validate {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
    },
    /// Run a simulation
    Run {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
        /// Directory for theta.csv, torque.csv and manifest.json
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Unwrap the exported angle for continuous plots
        #[arg(long)]
        unwrap: bool,
    },
    /// Write a built-in configuration
    Preset {
        /// Preset name (pendulum, pendulum-pd, cart-pole)
        name: String,
        /// Output file (.yaml or .json); defaults to YAML on stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run and print one state component as CSV
    Series {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
        /// Component label (e.g. theta, theta_dot, x)
        component: String,
        /// Unwrap angle components
        #[arg(long)]
        unwrap: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run once per initial angle, in parallel
    Sweep {
        /// Path to the YAML or JSON config
        config_path: PathBuf,
        /// Initial angles in degrees
        #[arg(long, num_args = 1.., required = true, allow_negative_numbers = true)]
        angles_deg: Vec<f64>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            out,
            unwrap,
        } => cmd_run(&config_path, out, unwrap),
        Commands::Preset { name, output } => cmd_preset(&name, output.as_deref()),
        Commands::Series {
            config_path,
            component,
            unwrap,
            output,
        } => cmd_series(&config_path, &component, unwrap, output.as_deref()),
        Commands::Sweep {
            config_path,
            angles_deg,
        } => cmd_sweep(&config_path, &angles_deg),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = project_service::load_config(config_path)?;
    project_service::validate_config(&config)?;
    println!("✓ Config is valid");
    println!("  Plant: {}", config.plant.kind_name());
    println!("  States: {}", config.plant.state_dim());
    Ok(())
}

fn cmd_run(config_path: &Path, out: Option<PathBuf>, unwrap: bool) -> AppResult<()> {
    let config = project_service::load_config(config_path)?;
    println!("Running: {}", config.name);
    println!(
        "  dt = {} s, timespan = {} s, sampling = {} s",
        config.timing.dt_s, config.timing.timespan_s, config.timing.sample_interval_s
    );

    let options = RunOptions {
        export_dir: out,
        unwrap_angles: unwrap,
        ..RunOptions::default()
    };

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::run_config(
        &config,
        &options,
        Some(&mut |event| {
            let fraction = event.fraction_complete.unwrap_or(-1.0);
            let emit_now = (fraction >= 0.0 && (fraction - last_fraction).abs() >= 0.005)
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                if fraction >= 0.0 {
                    last_fraction = fraction;
                }
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    println!("✓ Simulation completed: {}", response.manifest.run_id);
    print_timing_summary(&response.timing);

    let summary = query::get_run_summary(&response.record)?;
    println!("  Samples: {}", summary.state_samples);
    println!("  Controls: {}", summary.control_samples);
    println!("  Peak |theta|: {:.4} rad", summary.peak_abs_theta);
    println!("  Peak |u|: {:.4}", summary.peak_abs_control);
    println!("  Saturated steps: {}", summary.saturated_steps);
    println!("  Final state: {:?}", summary.final_state);
    if let Some(dir) = &options.export_dir {
        info!(run_id = %response.manifest.run_id, dir = %dir.display(), "run exported");
        println!("  Exported to {}", dir.display());
    }
    Ok(())
}

fn cmd_preset(name: &str, output: Option<&Path>) -> AppResult<()> {
    let config = project_service::preset(name)?;
    match output {
        Some(path) => {
            project_service::save_config(path, &config)?;
            println!("✓ Wrote preset '{}' to {}", name, path.display());
        }
        None => {
            print!("{}", project_service::render_yaml(&config)?);
        }
    }
    Ok(())
}

fn cmd_series(
    config_path: &Path,
    component: &str,
    unwrap: bool,
    output: Option<&Path>,
) -> AppResult<()> {
    let config = project_service::load_config(config_path)?;
    let response = run_service::run_config(&config, &RunOptions::default(), None)?;
    let mut series = query::extract_component_series(&response.record, component)?;
    if unwrap && component == "theta" {
        series = unwrap_angles(&series);
    }

    let csv = format_series_csv(&series);
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} samples to {}", series.len(), path.display());
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_sweep(config_path: &Path, angles_deg: &[f64]) -> AppResult<()> {
    let config = project_service::load_config(config_path)?;
    let angles_rad: Vec<f64> = angles_deg.iter().map(|a| si::radians(deg(*a))).collect();
    if angles_rad.iter().any(|a| !a.is_finite()) {
        return Err(AppError::InvalidInput("Angles must be finite".to_string()));
    }

    println!("Sweeping {} initial angles: {}", angles_rad.len(), config.name);
    let result = sweep_service::sweep_initial_angles(&config, &angles_rad)?;

    println!(
        "{:>10}  {:>12}  {:>12}  {:>10}  {:>10}",
        "theta0", "peak|theta|", "final", "saturated", "period"
    );
    for (point, angle_deg) in result.points.iter().zip(angles_deg) {
        let period = point
            .period_s
            .map(|p| format!("{:.4}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>10.3}  {:>12.5}  {:>12.5}  {:>10}  {:>10}",
            angle_deg, point.peak_abs_theta, point.final_theta, point.saturated_steps, period
        );
    }
    println!(
        "  Wall time: {:.3} s total, {:.3} s per run",
        result.total_wall_time_s, result.average_run_time_s
    );
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, event.fraction_complete) {
        (RunStage::Simulating, Some(fraction)) => {
            let width = 28usize;
            let filled = ((fraction * width as f64).round() as usize).min(width);
            let bar = format!(
                "{}{}",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled))
            );
            print!(
                "\r[{}] {:>6.2}%  phase={}  elapsed={:.1}s",
                bar,
                fraction * 100.0,
                event.stage.label(),
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {}", msg));
            }
            print!("{}", line);
        }
    }
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!("  Timing:");
    println!("    compile: {:.3} s", timing.compile_time_s);
    println!("    solve:   {:.3} s", timing.solve_time_s);
    if timing.save_time_s > 0.0 {
        println!("    save:    {:.3} s", timing.save_time_s);
    }
    println!("    total:   {:.3} s", timing.total_time_s);
}
