//! Flat-domain fractal Brownian motion (fBm) heightmaps.
//!
//! Sums octaves of 2D simplex noise over normalized image coordinates, each
//! octave scaling frequency by `lacunarity` and amplitude by `gain`.

use rayon::prelude::*;
use relief_image::Image;
use relief_noise::{CoherentNoise, NoiseContext};
use tracing::debug;

use crate::{GenerateError, check_dimensions};

/// Parameters for [`generate_fbm`].
#[derive(Clone, Debug, PartialEq)]
pub struct FbmParams {
    /// Output width in texels.
    pub width: usize,
    /// Output height in texels.
    pub height: usize,
    /// Frequency of the first octave, in cycles per image.
    pub frequency: f64,
    /// Amplitude of the first octave.
    pub amplitude: f64,
    /// Number of octaves. Zero or negative produces an all-zero image.
    pub octaves: i32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub gain: f64,
    /// Noise seed.
    pub seed: u32,
}

impl Default for FbmParams {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            frequency: 4.0,
            amplitude: 1.0,
            octaves: 6,
            lacunarity: 2.0,
            gain: 0.5,
            seed: 0,
        }
    }
}

impl FbmParams {
    /// Number of accumulation passes actually run: `max(octaves, 0)`.
    pub fn passes(&self) -> u32 {
        self.octaves.max(0) as u32
    }

    /// Sum of all octave amplitudes; bounds `|value| / max_noise`.
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amp = self.amplitude;
        for _ in 0..self.passes() {
            sum += amp.abs();
            amp *= self.gain;
        }
        sum
    }

    fn validate(&self) -> Result<(), GenerateError> {
        check_dimensions(self.width, self.height)?;
        for (name, value) in [
            ("frequency", self.frequency),
            ("amplitude", self.amplitude),
            ("lacunarity", self.lacunarity),
            ("gain", self.gain),
        ] {
            if !value.is_finite() {
                return Err(GenerateError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Generate a single-band fBm heightmap.
///
/// The output starts at zero and receives exactly [`FbmParams::passes`]
/// octaves. Texel `(x, y)` samples noise at `(x / width, y / height)` scaled
/// by the current frequency.
pub fn generate_fbm(params: &FbmParams) -> Result<Image, GenerateError> {
    params.validate()?;
    debug!(
        width = params.width,
        height = params.height,
        octaves = params.octaves,
        seed = params.seed,
        "generating fbm heightmap"
    );

    let noise = NoiseContext::new(params.seed);
    let mut image = Image::new(params.width, params.height, 1)?;
    image.fill(0.0);

    let inv_w = 1.0 / params.width as f64;
    let inv_h = 1.0 / params.height as f64;
    let mut ampl = params.amplitude;
    let mut freq = params.frequency;

    for _ in 0..params.passes() {
        image.par_rows_mut().for_each(|(y, row)| {
            let v = y as f64 * inv_h;
            for (x, texel) in row.iter_mut().enumerate() {
                let u = x as f64 * inv_w;
                *texel += (ampl * noise.evaluate_2d(u * freq, v * freq)) as f32;
            }
        });
        ampl *= params.gain;
        freq *= params.lacunarity;
    }

    Ok(image)
}
