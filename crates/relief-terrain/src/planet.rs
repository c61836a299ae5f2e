//! Equirectangular planet heightmaps from noise sampled on concentric spheres.
//!
//! Columns map to longitude `[0, 2pi)` and rows to colatitude `[0, pi)`.
//! Evaluating 3D noise on the sphere, rather than 2D noise on the image,
//! removes the seam at the longitude wrap and the pinching at the poles.

use std::f64::consts::{PI, TAU};

use rayon::prelude::*;
use relief_image::Image;
use relief_noise::{CoherentNoise, NoiseContext, sphere_point};
use tracing::debug;

use crate::{GenerateError, check_dimensions};

/// Octaves of spherical noise per texel.
pub const PLANET_OCTAVES: u32 = 6;

/// Rows below this normalized position get the southern ice-cap ramp.
const ANTARCTIC_START: f64 = 0.95;

/// Ramp lowering the southernmost rows; `-0.5` everywhere else.
///
/// `rv` is the normalized row position `y / height`.
pub fn antarctic_influence(rv: f64) -> f64 {
    (10.0 * (rv - ANTARCTIC_START) / ANTARCTIC_START).max(-0.5)
}

/// Positive bump peaking at the equator (`rv = 0.5`) and zero at the poles.
pub fn equatorial_influence(rv: f64) -> f64 {
    let t = 1.5 * (0.5 - (rv - 0.5).abs());
    t * t
}

/// Sum of [`PLANET_OCTAVES`] noise octaves on spheres of radius 1, 2, 4, ...
/// with amplitudes 1, 1/2, 1/4, ...
fn spherical_fbm<N>(noise: &N, u: f64, v: f64) -> f64
where
    N: CoherentNoise + ?Sized,
{
    let mut freq = 1.0;
    let mut amp = 1.0;
    let mut h = 0.0;
    for _ in 0..PLANET_OCTAVES {
        let [x, y, z] = sphere_point(u, v, freq);
        h += amp * noise.evaluate_3d(x, y, z);
        amp *= 0.5;
        freq *= 2.0;
    }
    h
}

/// Generate a planet heightmap in equirectangular projection.
///
/// Elevation = `antarctic_influence + equatorial_influence + spherical fBm`.
pub fn generate_planet_heightmap(
    width: usize,
    height: usize,
    seed: u32,
) -> Result<Image, GenerateError> {
    check_dimensions(width, height)?;
    debug!(width, height, seed, "generating planet heightmap");

    let noise = NoiseContext::new(seed);
    let mut result = Image::new(width, height, 1)?;
    let scale_x = TAU / width as f64;
    let scale_y = PI / height as f64;
    let inv_h = 1.0 / height as f64;

    result.par_rows_mut().for_each(|(y, row)| {
        let rv = y as f64 * inv_h;
        let bias = antarctic_influence(rv) + equatorial_influence(rv);
        let v = y as f64 * scale_y;
        for (x, out) in row.iter_mut().enumerate() {
            let u = x as f64 * scale_x;
            *out = (bias + spherical_fbm(&noise, u, v)) as f32;
        }
    });

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_determinism() {
        let a = generate_planet_heightmap(64, 32, 3).unwrap();
        let b = generate_planet_heightmap(64, 32, 3).unwrap();
        assert_eq!(a.info(), (64, 32, 1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_planet_heightmap(32, 16, 1).unwrap();
        let b = generate_planet_heightmap(32, 16, 2).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_longitude_seam_is_continuous() {
        let noise = NoiseContext::new(17);
        let width = 128;
        let scale_x = TAU / width as f64;
        for j in 0..32 {
            let v = j as f64 * PI / 32.0;
            let first = spherical_fbm(&noise, 0.0, v);
            let wrapped = spherical_fbm(&noise, width as f64 * scale_x, v);
            assert!(
                (first - wrapped).abs() < 1e-6,
                "seam at v={v}: {first} vs {wrapped}"
            );
        }
    }

    #[test]
    fn test_first_column_matches_wrapped_column() {
        let (w, h) = (256, 64);
        let scale_x = TAU / w as f64;
        let scale_y = PI / h as f64;
        for seed in [0, 9, 123, 4096] {
            let image = generate_planet_heightmap(w, h, seed).unwrap();
            let noise = NoiseContext::new(seed);
            for y in 0..h {
                let rv = y as f64 / h as f64;
                let v = y as f64 * scale_y;
                let bias = antarctic_influence(rv) + equatorial_influence(rv);
                let wrapped = spherical_fbm(&noise, w as f64 * scale_x, v);
                assert!(
                    (spherical_fbm(&noise, 0.0, v) - wrapped).abs() < 1e-6,
                    "seed {seed} row {y}: seam mismatch"
                );
                let got = image.texel(0, y)[0] as f64;
                assert!(
                    (got - (bias + wrapped)).abs() < 1e-5,
                    "seed {seed} row {y}: column 0 is {got}, wrapped column is {}",
                    bias + wrapped
                );
            }
        }
    }

    #[test]
    fn test_north_pole_row_is_uniform() {
        let image = generate_planet_heightmap(64, 32, 5).unwrap();
        let first = image.texel(0, 0)[0];
        for x in 1..64 {
            assert!((image.texel(x, 0)[0] - first).abs() < 1e-5);
        }
    }

    #[test]
    fn test_antarctic_influence() {
        assert!((antarctic_influence(0.0) + 0.5).abs() < EPSILON);
        assert!((antarctic_influence(0.5) + 0.5).abs() < EPSILON);
        assert!((antarctic_influence(0.95)).abs() < EPSILON);
        assert!((antarctic_influence(1.0) - 0.5 / 0.95).abs() < EPSILON);
        // Clamped at -0.5 until just above rv = 0.9025.
        assert!((antarctic_influence(0.9) + 0.5).abs() < EPSILON);
        assert!(antarctic_influence(0.93) > -0.5);
    }

    #[test]
    fn test_equatorial_influence() {
        assert!((equatorial_influence(0.5) - 0.5625).abs() < EPSILON);
        assert!(equatorial_influence(0.0).abs() < EPSILON);
        assert!(equatorial_influence(1.0).abs() < EPSILON);
        assert!((equatorial_influence(0.25) - equatorial_influence(0.75)).abs() < EPSILON);
    }

    #[test]
    fn test_texel_is_bias_plus_noise() {
        let (w, h) = (16, 8);
        let image = generate_planet_heightmap(w, h, 21).unwrap();
        let noise = NoiseContext::new(21);
        let (x, y) = (5, 3);
        let rv = y as f64 * (1.0 / h as f64);
        let u = x as f64 * (TAU / w as f64);
        let v = y as f64 * (PI / h as f64);
        let expected =
            antarctic_influence(rv) + equatorial_influence(rv) + spherical_fbm(&noise, u, v);
        assert_eq!(image.texel(x, y)[0], expected as f32);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(generate_planet_heightmap(0, 8, 1).is_err());
        assert!(generate_planet_heightmap(8, 0, 1).is_err());
    }
}
