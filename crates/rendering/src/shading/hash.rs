//! Cheap stateless hashes for biome variation and per-pixel jitter.
//!
//! These are `fract(sin(dot(p, k)) * c)` hashes. They are not smooth and are
//! unrelated to the coherent `NoiseField`.

use bevy::math::Vec2;

use super::math::fract;

const HASH_K: Vec2 = Vec2::new(12.9898, 78.233);
const HASH_C: f32 = 43758.547;

const HASH2_K: Vec2 = Vec2::new(41.123, 67.891);
const HASH2_C: f32 = 23421.68;

#[inline]
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(HASH_K).sin() * HASH_C)
}

#[inline]
pub fn hash2(p: Vec2) -> f32 {
    fract(p.dot(HASH2_K).sin() * HASH2_C)
}
