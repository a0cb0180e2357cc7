mod scenario;

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use gizmo::error::GizmoError;
use gizmo::settings::{GizmoSettings, InterfaceVisibility};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use scenario::{Host, Scenario, mask_table};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid scenario: {0}")]
    InvalidScenario(#[source] serde_json::Error),
    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Gizmo(#[from] GizmoError),
}

#[derive(Parser, Debug)]
#[command(name = "transform-control", about = "Replay transform gizmo interactions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON scenario and print every host action as a JSON line.
    Replay(ReplayArgs),
    /// Print the disabled-handle mask for every alignment result.
    Masks,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// Scenario file.
    file: PathBuf,

    #[arg(long, env = "GIZMO_SNAP_CENTER", value_parser = clap::builder::BoolishValueParser::new())]
    snap_center: Option<bool>,

    /// never, always, on-interaction, or 1-3.
    #[arg(long, env = "GIZMO_SHOW_INTERFACE")]
    show_interface: Option<String>,

    #[arg(long, env = "GIZMO_SNAP_RADIUS")]
    snap_radius: Option<f64>,

    #[arg(long, env = "GIZMO_ROTATION_DEADZONE")]
    rotation_deadzone: Option<f64>,
}

impl ReplayArgs {
    /// Flags and environment win over the scenario's own settings.
    fn apply_to(&self, mut settings: GizmoSettings) -> Result<GizmoSettings, GizmoError> {
        if let Some(snap_center) = self.snap_center {
            settings.snap_center = snap_center;
        }
        if let Some(raw) = &self.show_interface {
            settings.show_interface = InterfaceVisibility::parse(raw)?;
        }
        if let Some(radius) = self.snap_radius {
            settings.snap_radius = radius;
        }
        if let Some(deadzone) = self.rotation_deadzone {
            settings.rotation_deadzone = deadzone;
        }
        settings.validate()?;
        Ok(settings)
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay(args) => run_replay(&args),
        Command::Masks => run_masks(),
    }
}

fn run_replay(args: &ReplayArgs) -> Result<(), CliError> {
    let raw = fs::read_to_string(&args.file)
        .map_err(|source| CliError::Read { path: args.file.clone(), source })?;
    let scenario: Scenario = serde_json::from_str(&raw).map_err(CliError::InvalidScenario)?;

    let base = match scenario.settings {
        Some(settings) => settings,
        None => GizmoSettings::from_env()?,
    };
    let settings = args.apply_to(base)?;
    tracing::info!(?settings, steps = scenario.steps.len(), "replaying scenario");

    let lines = Host::replay(scenario, settings)?;
    for line in &lines {
        print_json(line)?;
    }
    tracing::info!(actions = lines.len(), "replay finished");
    Ok(())
}

fn run_masks() -> Result<(), CliError> {
    for row in mask_table() {
        print_json(&row)?;
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let text = serde_json::to_string(value).map_err(CliError::Encode)?;
    println!("{text}");
    Ok(())
}
