//! Multi-band floating-point image buffers shared by every heightmap generator.
//!
//! An [`Image`] owns a flat row-major array of `width * height * nbands`
//! floats. Generators write it once, row by row, and then hand it on to the
//! next stage or to the caller as an immutable value.

mod error;
mod image;

pub use self::image::Image;
pub use error::ImageError;
