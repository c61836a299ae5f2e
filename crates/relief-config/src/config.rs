//! Generator settings with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Which heightmap to generate, and at what size.
    pub generator: GeneratorConfig,
    /// Parameters for the fBm generator.
    pub fbm: FbmConfig,
    /// Where and how to write the result.
    pub output: OutputConfig,
    /// Logging settings.
    pub debug: DebugConfig,
}

/// The heightmap generators that can be selected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum GeneratorKind {
    /// Single island with a warped coastline.
    #[default]
    Island,
    /// Flat fractal noise.
    Fbm,
    /// Equirectangular planet.
    Planet,
}

/// Generator selection and output size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Generator to run.
    pub kind: GeneratorKind,
    /// Heightmap width in texels.
    pub width: u32,
    /// Heightmap height in texels.
    pub height: u32,
    /// Noise seed.
    pub seed: u32,
}

/// fBm parameters; ignored by the island and planet generators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FbmConfig {
    /// Frequency of the first octave, in cycles per image.
    pub frequency: f64,
    /// Amplitude of the first octave.
    pub amplitude: f64,
    /// Octave count; zero or negative yields a flat map.
    pub octaves: i32,
    /// Frequency multiplier per octave.
    pub lacunarity: f64,
    /// Amplitude multiplier per octave.
    pub gain: f64,
}

/// File formats the heightmap can be written in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// 16-bit grayscale PNG, stretched over the heightmap's value range.
    #[default]
    Png16,
    /// Little-endian `f32` texels, row-major, no header.
    RawF32,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file.
    pub path: PathBuf,
    /// File format.
    pub format: OutputFormat,
    /// Remap raw output to `[0, 1]`. PNG output is always remapped.
    pub normalize: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info", "relief_terrain=trace").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            kind: GeneratorKind::Island,
            width: 512,
            height: 512,
            seed: 0,
        }
    }
}

impl Default for FbmConfig {
    fn default() -> Self {
        Self {
            frequency: 4.0,
            amplitude: 1.0,
            octaves: 6,
            lacunarity: 2.0,
            gain: 0.5,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("heightmap.png"),
            format: OutputFormat::Png16,
            normalize: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            tracing::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            tracing::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.width == 0 {
            return Err(ConfigError::Invalid {
                field: "generator.width",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.generator.height == 0 {
            return Err(ConfigError::Invalid {
                field: "generator.height",
                reason: "must be at least 1".to_string(),
            });
        }
        for (field, value) in [
            ("fbm.frequency", self.fbm.frequency),
            ("fbm.amplitude", self.fbm.amplitude),
            ("fbm.lacunarity", self.fbm.lacunarity),
            ("fbm.gain", self.fbm.gain),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
