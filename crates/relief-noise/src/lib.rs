//! Seeded coherent noise for heightmap generators.
//!
//! [`NoiseContext`] is created once per generation call from an integer seed,
//! evaluated many times (possibly from several worker threads at once), and
//! dropped when the call returns. The [`CoherentNoise`] trait is the seam the
//! generators are written against.

mod context;
mod math;

pub use context::{CoherentNoise, NoiseContext};
pub use math::{det_cos, det_sin, sphere_point};
