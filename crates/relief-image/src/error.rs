//! Image error types.

/// Errors that can occur when creating or addressing an [`Image`](crate::Image).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// Width, height and band count must all be non-zero.
    #[error("invalid image dimensions {width}x{height} with {nbands} bands")]
    InvalidDimensions {
        width: usize,
        height: usize,
        nbands: usize,
    },

    /// Storage for the requested number of floats could not be obtained.
    #[error("failed to allocate storage for {texels} texels with {nbands} bands")]
    AllocationFailure { texels: usize, nbands: usize },

    /// Texel coordinates outside `[0, width) x [0, height)`.
    #[error("texel ({x}, {y}) is outside a {width}x{height} image")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// A backing vector does not hold exactly `width * height * nbands` floats.
    #[error("expected {expected} floats, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// An operation expected a different band count.
    #[error("expected {expected} bands, found {found}")]
    BandMismatch { expected: usize, found: usize },
}
