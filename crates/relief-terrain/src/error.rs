//! Generation error types.

use relief_distance::DistanceError;
use relief_image::ImageError;

/// Errors that abort a heightmap generation call.
///
/// Intermediate images are owned by the call, so returning any of these
/// releases everything allocated so far.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// Invalid dimensions or a failed allocation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The distance transform rejected the coastline mask.
    #[error(transparent)]
    Distance(#[from] DistanceError),

    /// An injected distance field returned an image of the wrong shape.
    #[error(
        "distance field returned {found_width}x{found_height} with {found_bands} bands, \
         expected {width}x{height} with 1 band"
    )]
    DistanceFieldShape {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
        found_bands: usize,
    },

    /// A generator parameter was NaN or infinite.
    #[error("parameter `{name}` must be finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
