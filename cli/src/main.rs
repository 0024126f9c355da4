//! Thin CLI harness around the autoclicker core.
//!
//! Runs one session against the in-process simulated environment and prints
//! the environment's final metric. All loop logic lives in the library.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use autoclicker_core_rs::{
    RunConfig, RunController, SimulatedConfig, SimulatedEnvironment, SystemClock,
};

/// Command-line arguments for the autoclicker binary.
///
/// Typical usage:
///   autoclicker --duration 60
///   autoclicker --config run.json --events-jsonl events.jsonl
#[derive(Parser, Debug)]
#[command(
    name = "autoclicker",
    version,
    about = "Click, evaluate the store, buy the best affordable upgrade"
)]
struct Args {
    /// JSON run config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds between purchase evaluations.
    #[arg(long)]
    interval: Option<f64>,

    /// Total run length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Pause after each tick, in milliseconds.
    #[arg(long)]
    tick_pause_ms: Option<u64>,

    /// JSON config for the simulated store.
    #[arg(long)]
    environment: Option<PathBuf>,

    /// Write the run report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the event log as JSON lines.
    #[arg(long)]
    events_jsonl: Option<PathBuf>,
}

fn load_run_config(args: &Args) -> anyhow::Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => RunConfig::from_json_file(path)?,
        None => RunConfig::default(),
    };

    if let Some(interval) = args.interval {
        config.evaluation_interval_secs = interval;
    }
    if let Some(duration) = args.duration {
        config.total_duration_secs = duration;
    }
    if let Some(pause) = args.tick_pause_ms {
        config.tick_pause_millis = pause;
    }

    config.validate()?;
    Ok(config)
}

fn load_environment_config(path: Option<&PathBuf>) -> anyhow::Result<SimulatedConfig> {
    let Some(path) = path else {
        return Ok(SimulatedConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    let run_config = load_run_config(&args)?;
    let env_config = load_environment_config(args.environment.as_ref())?;
    info!(
        evaluation_interval_secs = run_config.evaluation_interval_secs,
        total_duration_secs = run_config.total_duration_secs,
        buildings = env_config.buildings.len(),
        "configuration loaded"
    );

    let clock = SystemClock::new();
    let mut env = SimulatedEnvironment::new(env_config, clock)?;
    let controller = RunController::new(run_config)?;
    let outcome = controller.run(&mut env, &clock)?;

    if let Some(path) = &args.report {
        std::fs::write(path, outcome.report.to_json_pretty()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    if let Some(path) = &args.events_jsonl {
        std::fs::write(path, outcome.events.to_jsonl()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    println!(
        "{}",
        outcome.report.final_metric.as_deref().unwrap_or("final metric unavailable")
    );
    Ok(())
}
