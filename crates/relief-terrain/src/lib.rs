//! Heightmap generators: generic fBm, islands, and whole planets.
//!
//! Every entry point is a pure function of its parameters that returns a
//! freshly owned single-band [`Image`]. Each call creates its own
//! [`NoiseContext`](relief_noise::NoiseContext) and drops it before
//! returning. Rows are computed in parallel; a stage writes its output image
//! once and only reads images that earlier stages have finished.

mod error;
mod fbm;
mod island;
mod planet;

pub use error::GenerateError;
pub use fbm::{FbmParams, generate_fbm};
pub use island::{
    COAST_RADIUS, RELIEF_SCALE, SEA_LEVEL, coast_falloff, coastline_mask, compose_elevation,
    generate_island_heightmap, generate_island_heightmap_with, is_land, island_noise,
    land_fraction,
};
pub use planet::{
    PLANET_OCTAVES, antarctic_influence, equatorial_influence, generate_planet_heightmap,
};
pub use relief_image::Image;

use relief_image::ImageError;

/// Reject zero-sized requests before any noise context or buffer exists.
fn check_dimensions(width: usize, height: usize) -> Result<(), GenerateError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions {
            width,
            height,
            nbands: 1,
        }
        .into());
    }
    Ok(())
}
