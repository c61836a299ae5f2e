//! Configuration for the relief heightmap generator.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line via clap. Missing fields fall back to defaults, so older and
//! newer config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, FbmConfig, GeneratorConfig, GeneratorKind, OutputConfig, OutputFormat,
};
pub use error::ConfigError;
