//! Coherent 2D noise source shared by the synthesizer and the brush.
//!
//! Wraps an OpenSimplex2 `FastNoiseLite` at frequency 1.0 so callers pass raw
//! noise-space coordinates and do their own scaling. The gradient basis is
//! seeded once at construction; two instances built from the same seed
//! produce the same field.

use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};

#[derive(Resource)]
pub struct NoiseField {
    seed: i32,
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(1.0));
        Self { seed, noise }
    }

    /// Seed the basis from the thread-local RNG. Each process run sees a
    /// different island.
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<i32>())
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Noise value in [-1, 1] at `(x, y)`.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        self.noise.get_noise_2d(x, y).clamp(-1.0, 1.0)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField")
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
