//! Island heightmaps: radial continent, warped coastline, distance-based relief.
//!
//! The pipeline runs four strictly sequential stages, each consuming the
//! complete output of the previous one:
//!
//! 1. [`island_noise`]: a 3-band noise texture. Band 0 is low-frequency
//!    elevation bias, bands 1 and 2 form a high-frequency displacement field.
//! 2. [`coastline_mask`]: a warped radial falloff thresholded at
//!    [`SEA_LEVEL`] into a land/water mask.
//! 3. A signed distance field of the mask, positive on land.
//! 4. [`compose_elevation`]: inland texels resample the distance field at a
//!    warped position and gain noise relief; water stays smooth.

use rayon::prelude::*;
use relief_distance::{DistanceField, EuclideanSdf};
use relief_image::{Image, ImageError};
use relief_noise::{CoherentNoise, NoiseContext};
use tracing::{debug, trace};

use crate::{GenerateError, check_dimensions};

/// Falloff threshold separating land (`m >= SEA_LEVEL`) from water.
pub const SEA_LEVEL: f32 = 0.5;

/// Radius term of the falloff; roughly `1 / sqrt(2)`.
pub const COAST_RADIUS: f32 = 0.707;

/// Scale of the noise relief added to inland texels.
pub const RELIEF_SCALE: f32 = 6.0;

const BASE_FREQS: [f64; 3] = [4.0, 16.0, 32.0];
const BASE_AMPLS: [f64; 3] = [0.2, 0.1, 0.05];
const WARP_FREQS: [f64; 2] = [64.0, 128.0];
const WARP_AMPLS: [f64; 2] = [0.025, 0.0125];

/// Offset between the two displacement bands along `u`.
const WARP_BAND_OFFSET: f64 = 0.5;

/// Generate an island heightmap using the built-in Euclidean distance field.
pub fn generate_island_heightmap(
    width: usize,
    height: usize,
    seed: u32,
) -> Result<Image, GenerateError> {
    generate_island_heightmap_with(width, height, seed, &EuclideanSdf)
}

/// Generate an island heightmap with a caller-supplied distance field.
///
/// # Errors
///
/// Fails on zero dimensions, allocation failure, a rejected mask, or a
/// distance field whose shape differs from `width x height x 1`.
pub fn generate_island_heightmap_with(
    width: usize,
    height: usize,
    seed: u32,
    distance: &dyn DistanceField,
) -> Result<Image, GenerateError> {
    check_dimensions(width, height)?;
    debug!(width, height, seed, "generating island heightmap");

    let noise_tex = {
        let noise = NoiseContext::new(seed);
        island_noise(width, height, &noise)?
    };

    let mask = coastline_mask(&noise_tex)?;
    trace!(land = land_fraction(&mask), "coastline mask ready");

    let field = distance.signed_distance(&mask)?;
    let (found_width, found_height, found_bands) = field.info();
    if (found_width, found_height, found_bands) != (width, height, 1) {
        return Err(GenerateError::DistanceFieldShape {
            width,
            height,
            found_width,
            found_height,
            found_bands,
        });
    }
    drop(mask);

    compose_elevation(&noise_tex, &field)
}

/// Stage 1: the 3-band noise texture.
///
/// Coordinates are normalized by the larger image dimension so non-square
/// images are not stretched. Band 2 reuses band 1's octaves at `u + 0.5`.
pub fn island_noise<N>(width: usize, height: usize, noise: &N) -> Result<Image, GenerateError>
where
    N: CoherentNoise + ?Sized,
{
    let mut image = Image::new(width, height, 3)?;
    let inv = 1.0 / width.max(height) as f64;

    image.par_rows_mut().for_each(|(y, row)| {
        let v = y as f64 * inv;
        for (x, texel) in row.chunks_exact_mut(3).enumerate() {
            let u = x as f64 * inv;
            texel[0] = octave_sum(noise, &BASE_FREQS, &BASE_AMPLS, u, v);
            texel[1] = octave_sum(noise, &WARP_FREQS, &WARP_AMPLS, u, v);
            texel[2] = octave_sum(noise, &WARP_FREQS, &WARP_AMPLS, u + WARP_BAND_OFFSET, v);
        }
    });

    Ok(image)
}

fn octave_sum<N>(noise: &N, freqs: &[f64], ampls: &[f64], u: f64, v: f64) -> f32
where
    N: CoherentNoise + ?Sized,
{
    freqs
        .iter()
        .zip(ampls)
        .map(|(&f, &a)| a * noise.evaluate_2d(u * f, v * f))
        .sum::<f64>() as f32
}

/// Radial falloff `COAST_RADIUS - |(dx, dy)|` around the image center.
#[inline]
pub fn coast_falloff(dx: f32, dy: f32) -> f32 {
    COAST_RADIUS - (dx * dx + dy * dy).sqrt()
}

/// Threshold of the falloff value `m`; monotonic in `m`.
#[inline]
pub fn is_land(m: f32) -> bool {
    m >= SEA_LEVEL
}

/// Stage 2: binary land (1) / water (0) mask.
///
/// The offset from the center is displaced by noise bands 1 and 2 before the
/// radial falloff is taken, then band 0 is added as a low-frequency bias.
pub fn coastline_mask(noise_tex: &Image) -> Result<Image, GenerateError> {
    let (width, height, nbands) = noise_tex.info();
    if nbands != 3 {
        return Err(ImageError::BandMismatch {
            expected: 3,
            found: nbands,
        }
        .into());
    }

    let mut mask = Image::new(width, height, 1)?;
    let inv_w = 1.0 / width as f32;
    let inv_h = 1.0 / height as f32;
    let half_w = (width / 2) as f32;
    let half_h = (height / 2) as f32;

    mask.par_rows_mut().for_each(|(y, row)| {
        let v = y as f32 * inv_h;
        let dy = (y as f32 - half_h) * inv_h;
        for (x, out) in row.iter_mut().enumerate() {
            let u = x as f32 * inv_w;
            let n = noise_tex.sample(u, v);
            let dx = (x as f32 - half_w) * inv_w;
            let m = coast_falloff(dx + n[1], dy + n[2]) + n[0];
            *out = if is_land(m) { 1.0 } else { 0.0 };
        }
    });

    Ok(mask)
}

/// Stage 4: final elevation from the noise texture and the distance field.
///
/// Inland texels (`z > 0`) use `z` as an influence: the distance field is
/// resampled at `(u, v) + z * (n1, n2)` and `RELIEF_SCALE * z * n0` is added.
/// Texels at or below the coast keep the raw distance value.
pub fn compose_elevation(noise_tex: &Image, field: &Image) -> Result<Image, GenerateError> {
    let (width, height, _) = field.info();
    let mut result = Image::new(width, height, 1)?;
    let inv_w = 1.0 / width as f32;
    let inv_h = 1.0 / height as f32;

    result.par_rows_mut().for_each(|(y, row)| {
        let v = y as f32 * inv_h;
        for (x, out) in row.iter_mut().enumerate() {
            let u = x as f32 * inv_w;
            let n = noise_tex.sample(u, v);
            let mut z = field.sample_scalar(u, v);
            if z > 0.0 {
                let influence = z;
                z = field.sample_scalar(u + influence * n[1], v + influence * n[2]);
                z += RELIEF_SCALE * influence * n[0];
            }
            *out = z;
        }
    });

    Ok(result)
}

/// Fraction of non-zero texels in band 0.
pub fn land_fraction(mask: &Image) -> f64 {
    let nbands = mask.nbands();
    let land = mask
        .data()
        .iter()
        .step_by(nbands)
        .filter(|&&v| v != 0.0)
        .count();
    land as f64 / (mask.width() * mask.height()) as f64
}
