//! Command-line arguments for the `relief` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, GeneratorKind, OutputFormat};

/// Relief heightmap generator arguments.
///
/// Any flag given here replaces the matching value from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "relief", about = "Procedural terrain heightmap generator")]
pub struct CliArgs {
    /// Generator to run.
    #[arg(long, value_enum)]
    pub kind: Option<GeneratorKind>,

    /// Heightmap width in texels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Heightmap height in texels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Noise seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// fBm octave count. Zero or negative produces a flat map.
    #[arg(long, allow_negative_numbers = true)]
    pub octaves: Option<i32>,

    /// Output file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Output file format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Remap raw output to [0, 1].
    #[arg(long)]
    pub normalize: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(kind) = args.kind {
            self.generator.kind = kind;
        }
        if let Some(w) = args.width {
            self.generator.width = w;
        }
        if let Some(h) = args.height {
            self.generator.height = h;
        }
        if let Some(seed) = args.seed {
            self.generator.seed = seed;
        }
        if let Some(octaves) = args.octaves {
            self.fbm.octaves = octaves;
        }
        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if let Some(format) = args.format {
            self.output.format = format;
        }
        if let Some(normalize) = args.normalize {
            self.output.normalize = normalize;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
