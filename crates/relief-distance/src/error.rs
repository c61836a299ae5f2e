//! Distance field error types.

use relief_image::ImageError;

/// Errors that can occur while computing a distance field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    /// Masks must have exactly one band.
    #[error("distance field input must have 1 band, found {0}")]
    BandCount(usize),

    /// Allocating an intermediate or output image failed.
    #[error(transparent)]
    Image(#[from] ImageError),
}
