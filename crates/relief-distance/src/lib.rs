//! Signed distance fields for binary masks.
//!
//! The island generator turns its coastline mask into a distance field
//! through the [`DistanceField`] trait, so tests and callers can inject their
//! own transform. [`EuclideanSdf`] is the exact Euclidean transform used by
//! default.

mod edt;
mod error;

pub use edt::EuclideanSdf;
pub use error::DistanceError;

use relief_image::Image;

/// Produces a signed distance field from a single-band mask.
///
/// The output has the mask's dimensions and one band. Texels where the mask
/// is non-zero are positive, the rest are zero or negative, and the magnitude
/// is the distance to the mask boundary in normalized image units. The input
/// is never modified and the result depends only on it.
pub trait DistanceField: Send + Sync {
    /// Compute the signed distance field of `mask`.
    fn signed_distance(&self, mask: &Image) -> Result<Image, DistanceError>;
}

impl<F> DistanceField for F
where
    F: Fn(&Image) -> Result<Image, DistanceError> + Send + Sync,
{
    fn signed_distance(&self, mask: &Image) -> Result<Image, DistanceError> {
        self(mask)
    }
}
