//! Deterministic math helpers (libm, not platform libc).
//!
//! Generators that map pixels onto a sphere go through these so that the
//! same seed produces the same heightmap on every platform.

/// Deterministic sine using libm.
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

/// Point on a sphere of radius `r` for longitude `u` and colatitude `v`.
///
/// `v = 0` is the north pole (`+y`), `v = pi` the south pole.
#[inline]
pub fn sphere_point(u: f64, v: f64, r: f64) -> [f64; 3] {
    let sin_v = det_sin(v);
    [
        r * sin_v * det_cos(u),
        r * det_cos(v),
        r * -sin_v * det_sin(u),
    ]
}
