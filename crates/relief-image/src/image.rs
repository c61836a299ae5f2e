//! A 2D multi-band image stored as a flat array of `f32` texels.

use rayon::prelude::*;

use crate::ImageError;

/// A `width x height` grid of texels, each holding `nbands` floats.
///
/// Texel `(x, y)` band `b` lives at `(y * width + x) * nbands + b`. The
/// storage is owned exclusively by the image and released when it is
/// dropped; there is no way to alias it or to release it twice.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    nbands: usize,
    data: Vec<f32>,
}

impl Image {
    /// Create an image with the given dimensions.
    ///
    /// Storage is zero-filled, but callers should only rely on that where a
    /// generator documents it.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] if any dimension is zero and
    /// [`ImageError::AllocationFailure`] if the float count overflows or the
    /// storage cannot be reserved.
    pub fn new(width: usize, height: usize, nbands: usize) -> Result<Self, ImageError> {
        let len = checked_len(width, height, nbands)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageError::AllocationFailure {
                texels: width * height,
                nbands,
            })?;
        data.resize(len, 0.0);

        Ok(Self {
            width,
            height,
            nbands,
            data,
        })
    }

    /// Wrap an existing row-major texel vector.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::InvalidDimensions`] for zero dimensions and
    /// [`ImageError::LengthMismatch`] if `data.len() != width * height * nbands`.
    pub fn from_vec(
        width: usize,
        height: usize,
        nbands: usize,
        data: Vec<f32>,
    ) -> Result<Self, ImageError> {
        let expected = checked_len(width, height, nbands)?;
        if data.len() != expected {
            return Err(ImageError::LengthMismatch {
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            nbands,
            data,
        })
    }

    /// Image width in texels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in texels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of floats per texel.
    pub fn nbands(&self) -> usize {
        self.nbands
    }

    /// Returns `(width, height, nbands)`.
    pub fn info(&self) -> (usize, usize, usize) {
        (self.width, self.height, self.nbands)
    }

    /// The raw row-major texel array. Length = `width * height * nbands`.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the raw texel array.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Number of floats in the backing array.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`; images have at least one texel.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the image and return its backing storage.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * self.nbands
    }

    /// Borrow the bands of texel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn texel(&self, x: usize, y: usize) -> &[f32] {
        assert!(
            x < self.width && y < self.height,
            "texel ({x}, {y}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        let start = self.offset(x, y);
        &self.data[start..start + self.nbands]
    }

    /// Mutably borrow the bands of texel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn texel_mut(&mut self, x: usize, y: usize) -> &mut [f32] {
        assert!(
            x < self.width && y < self.height,
            "texel ({x}, {y}) out of bounds for {}x{} image",
            self.width,
            self.height
        );
        let start = self.offset(x, y);
        let nbands = self.nbands;
        &mut self.data[start..start + nbands]
    }

    /// Borrow texel `(x, y)`, reporting out-of-range coordinates as an error.
    pub fn try_texel(&self, x: usize, y: usize) -> Result<&[f32], ImageError> {
        if x >= self.width || y >= self.height {
            return Err(ImageError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.texel(x, y))
    }

    /// Nearest-neighbor sample at normalized coordinates `(u, v)`.
    ///
    /// The texel is `x = clamp(floor(u * width), 0, width - 1)` and likewise
    /// for `y`, so coordinates outside `[0, 1)` clamp to the border and
    /// sampling never fails. There is no interpolation: the result is always
    /// one of the image's texels.
    pub fn sample(&self, u: f32, v: f32) -> &[f32] {
        let x = nearest_index(u, self.width);
        let y = nearest_index(v, self.height);
        self.texel(x, y)
    }

    /// Copy the nearest-neighbor sample at `(u, v)` into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != nbands`.
    pub fn sample_into(&self, u: f32, v: f32, out: &mut [f32]) {
        out.copy_from_slice(self.sample(u, v));
    }

    /// Nearest-neighbor sample of band 0.
    pub fn sample_scalar(&self, u: f32, v: f32) -> f32 {
        self.sample(u, v)[0]
    }

    /// Set every float in the image to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Iterate over rows; each item holds `width * nbands` floats.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.width * self.nbands)
    }

    /// Parallel iterator over `(y, row)` pairs with disjoint mutable rows.
    pub fn par_rows_mut(&mut self) -> impl IndexedParallelIterator<Item = (usize, &mut [f32])> {
        let stride = self.width * self.nbands;
        self.data.par_chunks_mut(stride).enumerate()
    }

    /// Smallest and largest value of one band.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::BandMismatch`] if `band >= nbands`.
    pub fn min_max(&self, band: usize) -> Result<(f32, f32), ImageError> {
        if band >= self.nbands {
            return Err(ImageError::BandMismatch {
                expected: band + 1,
                found: self.nbands,
            });
        }
        let range = self
            .data
            .iter()
            .skip(band)
            .step_by(self.nbands)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Ok(range)
    }
}

fn checked_len(width: usize, height: usize, nbands: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 || nbands == 0 {
        return Err(ImageError::InvalidDimensions {
            width,
            height,
            nbands,
        });
    }
    width
        .checked_mul(height)
        .and_then(|texels| texels.checked_mul(nbands))
        .ok_or(ImageError::AllocationFailure {
            texels: width.saturating_mul(height),
            nbands,
        })
}

#[inline]
fn nearest_index(coord: f32, extent: usize) -> usize {
    let scaled = (coord * extent as f32).floor();
    if scaled > 0.0 {
        (scaled as usize).min(extent - 1)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_info_roundtrip() {
        for &(w, h, b) in &[(1, 1, 1), (4, 4, 1), (17, 3, 3), (256, 128, 4)] {
            let image = Image::new(w, h, b).unwrap();
            assert_eq!(image.info(), (w, h, b));
            assert_eq!(image.len(), w * h * b);
            assert!(!image.is_empty());
        }
    }

    #[test]
    fn test_zero_dimensions_are_rejected() {
        assert!(matches!(
            Image::new(0, 4, 1),
            Err(ImageError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Image::new(4, 0, 1),
            Err(ImageError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Image::new(4, 4, 0),
            Err(ImageError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_overflowing_size_is_allocation_failure() {
        let result = Image::new(usize::MAX, 2, 1);
        assert!(matches!(result, Err(ImageError::AllocationFailure { .. })));
    }

    #[test]
    fn test_texel_write_read_roundtrip() {
        let mut image = Image::new(5, 3, 3).unwrap();
        image.texel_mut(4, 2).copy_from_slice(&[1.0, -2.5, 3.25]);
        image.texel_mut(0, 0).copy_from_slice(&[7.0, 8.0, 9.0]);

        assert_eq!(image.texel(4, 2), &[1.0, -2.5, 3.25]);
        assert_eq!(image.texel(0, 0), &[7.0, 8.0, 9.0]);

        // Row-major, interleaved bands.
        let idx = (2 * 5 + 4) * 3;
        assert_eq!(image.data()[idx + 1], -2.5);
    }

    #[test]
    fn test_try_texel_out_of_bounds() {
        let image = Image::new(4, 4, 1).unwrap();
        assert!(image.try_texel(3, 3).is_ok());
        assert_eq!(
            image.try_texel(4, 0),
            Err(ImageError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 4
            })
        );
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_texel_panics_out_of_bounds() {
        let image = Image::new(4, 4, 1).unwrap();
        let _ = image.texel(0, 4);
    }

    fn ramp(width: usize, height: usize) -> Image {
        let data = (0..width * height).map(|i| i as f32).collect();
        Image::from_vec(width, height, 1, data).unwrap()
    }

    #[test]
    fn test_sample_is_nearest_texel() {
        let image = ramp(7, 5);
        for i in 0..40 {
            for j in 0..40 {
                let u = i as f32 / 40.0;
                let v = j as f32 / 40.0;
                let sampled = image.sample_scalar(u, v);
                assert!(
                    image.data().contains(&sampled),
                    "sample at ({u}, {v}) produced {sampled}, not a texel"
                );
                let x = (u * 7.0).floor() as usize;
                let y = (v * 5.0).floor() as usize;
                assert_eq!(sampled, image.texel(x, y)[0]);
            }
        }
    }

    #[test]
    fn test_sample_clamps_outside_unit_square() {
        let image = ramp(4, 4);
        assert_eq!(image.sample_scalar(-3.0, -0.1), image.texel(0, 0)[0]);
        assert_eq!(image.sample_scalar(1.0, 1.0), image.texel(3, 3)[0]);
        assert_eq!(image.sample_scalar(12.5, 0.0), image.texel(3, 0)[0]);
        assert_eq!(image.sample_scalar(f32::NAN, 0.0), image.texel(0, 0)[0]);
    }

    #[test]
    fn test_sample_into_copies_all_bands() {
        let mut image = Image::new(2, 2, 3).unwrap();
        image.texel_mut(1, 1).copy_from_slice(&[0.1, 0.2, 0.3]);
        let mut out = [0.0; 3];
        image.sample_into(0.9, 0.9, &mut out);
        assert_eq!(out, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let result = Image::from_vec(2, 2, 1, vec![0.0; 3]);
        assert_eq!(
            result,
            Err(ImageError::LengthMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_par_rows_mut_covers_each_row_once() {
        let mut image = Image::new(8, 6, 2).unwrap();
        image.par_rows_mut().for_each(|(y, row)| {
            assert_eq!(row.len(), 16);
            row.fill(y as f32);
        });
        for (y, row) in image.rows().enumerate() {
            assert!(row.iter().all(|&v| v == y as f32));
        }
    }

    #[test]
    fn test_min_max_per_band() {
        let data = vec![1.0, -4.0, 3.0, 10.0, -2.0, 0.5];
        let image = Image::from_vec(3, 1, 2, data).unwrap();
        assert_eq!(image.min_max(0).unwrap(), (-2.0, 3.0));
        assert_eq!(image.min_max(1).unwrap(), (-4.0, 10.0));
        assert!(image.min_max(2).is_err());
    }
}
