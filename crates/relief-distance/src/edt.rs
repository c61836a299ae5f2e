//! Exact Euclidean distance transform (Felzenszwalb & Huttenlocher).
//!
//! The squared distance transform is separable: a 1D lower-envelope pass over
//! every column, then over every row. Lines are independent, so each pass
//! runs in parallel.

use rayon::prelude::*;
use relief_image::Image;
use tracing::trace;

use crate::{DistanceError, DistanceField};

/// Squared distance assigned to texels with no feature yet.
const FAR: f64 = 1e20;

/// Signed Euclidean distance field, normalized by the image width.
///
/// Mask texels that are non-zero (land) get the distance to the nearest zero
/// texel; zero texels (water) get the negated distance to the nearest
/// non-zero texel. A mask without any land or without any water produces a
/// very large but finite magnitude.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanSdf;

impl DistanceField for EuclideanSdf {
    fn signed_distance(&self, mask: &Image) -> Result<Image, DistanceError> {
        let (width, height, nbands) = mask.info();
        if nbands != 1 {
            return Err(DistanceError::BandCount(nbands));
        }

        let mut to_water: Vec<f64> = mask
            .data()
            .iter()
            .map(|&m| if m != 0.0 { FAR } else { 0.0 })
            .collect();
        let mut to_land: Vec<f64> = mask
            .data()
            .iter()
            .map(|&m| if m != 0.0 { 0.0 } else { FAR })
            .collect();

        squared_distance_2d(&mut to_water, width, height);
        squared_distance_2d(&mut to_land, width, height);

        let inv = 1.0 / width as f64;
        let data = to_water
            .iter()
            .zip(&to_land)
            .map(|(&pos, &neg)| ((pos.sqrt() - neg.sqrt()) * inv) as f32)
            .collect();

        trace!(width, height, "computed signed distance field");
        Ok(Image::from_vec(width, height, 1, data)?)
    }
}

/// In-place 2D squared distance transform of a row-major grid.
fn squared_distance_2d(grid: &mut [f64], width: usize, height: usize) {
    let mut columns = transpose(grid, width, height);
    columns
        .par_chunks_mut(height)
        .for_each(squared_distance_1d);

    for (x, column) in columns.chunks_exact(height).enumerate() {
        for (y, &value) in column.iter().enumerate() {
            grid[y * width + x] = value;
        }
    }

    grid.par_chunks_mut(width).for_each(squared_distance_1d);
}

/// Column-major copy of a row-major grid.
fn transpose(grid: &[f64], width: usize, height: usize) -> Vec<f64> {
    let mut out = vec![0.0; grid.len()];
    for y in 0..height {
        for x in 0..width {
            out[x * height + y] = grid[y * width + x];
        }
    }
    out
}

/// 1D squared distance transform of sampled function `line`, in place.
///
/// Computes the lower envelope of the parabolas rooted at each sample, then
/// reads it back at every integer position.
fn squared_distance_1d(line: &mut [f64]) {
    let n = line.len();
    if n == 0 {
        return;
    }
    let f = line.to_vec();
    let mut hull = vec![0usize; n];
    let mut bounds = vec![0.0f64; n + 1];

    let intersect = |q: usize, p: usize| -> f64 {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
    };

    let mut k = 0;
    bounds[0] = f64::NEG_INFINITY;
    bounds[1] = f64::INFINITY;
    for q in 1..n {
        let mut s = intersect(q, hull[k]);
        while s <= bounds[k] {
            k -= 1;
            s = intersect(q, hull[k]);
        }
        k += 1;
        hull[k] = q;
        bounds[k] = s;
        bounds[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in line.iter_mut().enumerate() {
        while bounds[k + 1] < q as f64 {
            k += 1;
        }
        let d = q as f64 - hull[k] as f64;
        *out = d * d + f[hull[k]];
    }
}
