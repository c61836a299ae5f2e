//! Seeded noise context and the evaluation trait the generators consume.

use noise::{NoiseFn, SuperSimplex};

/// Deterministic 2D/3D coherent noise returning values in roughly `[-1, 1]`.
///
/// Implementations must be pure: the same coordinates always yield the same
/// value, regardless of call order or of which thread evaluates them. The
/// `Sync` bound lets one context be shared read-only by row workers.
pub trait CoherentNoise: Send + Sync {
    /// Evaluate 2D noise at `(x, y)`.
    fn evaluate_2d(&self, x: f64, y: f64) -> f64;

    /// Evaluate 3D noise at `(x, y, z)`.
    fn evaluate_3d(&self, x: f64, y: f64, z: f64) -> f64;
}

/// SuperSimplex noise seeded from an integer; continuous in every coordinate.
///
/// Each generation call creates its own context and drops it on return, so
/// calls never share generator state even when they use the same seed.
#[derive(Clone, Debug)]
pub struct NoiseContext {
    seed: u32,
    source: SuperSimplex,
}

impl NoiseContext {
    /// Create a context for the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            source: SuperSimplex::new(seed),
        }
    }

    /// The seed this context was created from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl CoherentNoise for NoiseContext {
    #[inline]
    fn evaluate_2d(&self, x: f64, y: f64) -> f64 {
        self.source.get([x, y])
    }

    #[inline]
    fn evaluate_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.source.get([x, y, z])
    }
}
