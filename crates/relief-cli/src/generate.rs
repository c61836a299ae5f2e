//! Dispatch from configuration to the terrain generators.

use relief_config::{Config, GeneratorKind};
use relief_terrain::{
    FbmParams, GenerateError, Image, generate_fbm, generate_island_heightmap,
    generate_planet_heightmap,
};

/// Run the generator selected in `config`.
pub fn generate(config: &Config) -> Result<Image, GenerateError> {
    let width = config.generator.width as usize;
    let height = config.generator.height as usize;
    let seed = config.generator.seed;

    match config.generator.kind {
        GeneratorKind::Island => generate_island_heightmap(width, height, seed),
        GeneratorKind::Planet => generate_planet_heightmap(width, height, seed),
        GeneratorKind::Fbm => generate_fbm(&fbm_params(config)),
    }
}

fn fbm_params(config: &Config) -> FbmParams {
    FbmParams {
        width: config.generator.width as usize,
        height: config.generator.height as usize,
        frequency: config.fbm.frequency,
        amplitude: config.fbm.amplitude,
        octaves: config.fbm.octaves,
        lacunarity: config.fbm.lacunarity,
        gain: config.fbm.gain,
        seed: config.generator.seed,
    }
}

/// Summary of a generated heightmap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightStats {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    /// Fraction of texels above zero; the land fraction for islands.
    pub above_zero: f64,
}

impl HeightStats {
    /// Statistics over band 0.
    pub fn of(image: &Image) -> Self {
        let nbands = image.nbands();
        let count = (image.width() * image.height()) as f64;
        let (mut min, mut max) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut sum, mut positive) = (0.0f64, 0usize);
        for &v in image.data().iter().step_by(nbands) {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
            if v > 0.0 {
                positive += 1;
            }
        }
        Self {
            min,
            max,
            mean: sum / count,
            above_zero: positive as f64 / count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kind: GeneratorKind) -> Config {
        let mut config = Config::default();
        config.generator.kind = kind;
        config.generator.width = 32;
        config.generator.height = 16;
        config.generator.seed = 4;
        config
    }

    #[test]
    fn test_each_kind_produces_requested_size() {
        for kind in [GeneratorKind::Island, GeneratorKind::Fbm, GeneratorKind::Planet] {
            let image = generate(&config(kind)).unwrap();
            assert_eq!(image.info(), (32, 16, 1), "{kind:?}");
        }
    }

    #[test]
    fn test_fbm_uses_configured_octaves() {
        let mut flat = config(GeneratorKind::Fbm);
        flat.fbm.octaves = -1;
        let image = generate(&flat).unwrap();
        assert!(image.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_fbm_dispatch_matches_direct_call() {
        let cfg = config(GeneratorKind::Fbm);
        let direct = generate_fbm(&fbm_params(&cfg)).unwrap();
        assert_eq!(generate(&cfg).unwrap(), direct);
    }

    #[test]
    fn test_zero_width_is_an_error() {
        let mut cfg = config(GeneratorKind::Planet);
        cfg.generator.width = 0;
        assert!(generate(&cfg).is_err());
    }

    #[test]
    fn test_stats() {
        let image = Image::from_vec(2, 2, 1, vec![-1.0, 0.0, 0.5, 2.5]).unwrap();
        let stats = HeightStats::of(&image);
        assert_eq!(stats.min, -1.0);
        assert_eq!(stats.max, 2.5);
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert!((stats.above_zero - 0.5).abs() < 1e-12);
    }
}
