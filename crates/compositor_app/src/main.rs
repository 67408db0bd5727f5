// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compositor command runner.
//!
//! Runs a RON command script against an in-memory scene and prints the
//! resulting shot list and render settings.

use clap::Parser;
use compositor_app::{load_script, CompositorSettings, ScriptError, Session, SettingsError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Run a compositor command script
#[derive(Debug, Parser)]
#[command(name = "compositor", version, about)]
struct Cli {
    /// RON file holding a list of commands
    script: PathBuf,

    /// Settings file (defaults to compositor.ron in the working directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the final state as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("Settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Script: {0}")]
    Script(#[from] ScriptError),

    #[error("Output: {0}")]
    Json(#[from] serde_json::Error),
}

fn load_settings(cli: &Cli) -> Result<CompositorSettings, SettingsError> {
    match &cli.config {
        Some(path) => CompositorSettings::load(path),
        None => {
            let path = CompositorSettings::settings_file_path(std::path::Path::new("."));
            if path.exists() {
                CompositorSettings::load(&path)
            } else {
                Ok(CompositorSettings::default())
            }
        }
    }
}

fn init_tracing(settings: &CompositorSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(compositor_app::DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli, settings: &CompositorSettings) -> Result<(), AppError> {
    let commands = load_script(&cli.script)?;
    tracing::info!("Running {} commands from {:?}", commands.len(), cli.script);

    let mut session = Session::open(settings.build_host(), settings);
    for command in &commands {
        session.execute(command);
    }

    let snapshot = session.snapshot();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{snapshot}");
    }

    session.close();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("compositor: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings);

    tracing::info!("Starting compositor v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
