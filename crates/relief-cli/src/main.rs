//! `relief`: generate a terrain heightmap and write it to disk.
//!
//! Settings come from `config.ron` in the config directory and can be
//! overridden with CLI flags:
//! `relief --kind planet --width 2048 --height 1024 -o planet.png`.

mod export;
mod generate;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use relief_config::{CliArgs, Config, ConfigError};
use relief_terrain::GenerateError;
use thiserror::Error;
use tracing::{error, info};

use crate::export::ExportError;
use crate::generate::HeightStats;

#[derive(Error, Debug)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .map(|dir| dir.join("relief"))
            .unwrap_or_else(|| PathBuf::from(".relief"))
    });

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    relief_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), RunError> {
    config.validate()?;

    let started = Instant::now();
    let heightmap = generate::generate(config)?;
    let stats = HeightStats::of(&heightmap);
    info!(
        kind = ?config.generator.kind,
        width = heightmap.width(),
        height = heightmap.height(),
        seed = config.generator.seed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Generated heightmap"
    );
    info!(
        min = stats.min,
        max = stats.max,
        mean = stats.mean,
        land_fraction = stats.above_zero,
        "Height statistics"
    );

    export::export(&heightmap, &config.output)?;
    info!(
        "Wrote {:?} heightmap to {}",
        config.output.format,
        config.output.path.display()
    );
    Ok(())
}
