//! Height-banded biome colors with hashed variation, plus slope rock blending.

use bevy::math::{Vec2, Vec3};

use super::hash::{hash, hash2};
use super::math::smoothstep;
use crate::scene::SceneParameters;

// ---------------------------------------------------------------------------
// Palettes
// ---------------------------------------------------------------------------

pub(crate) const SAND: [Vec3; 4] = [
    Vec3::new(0.95, 0.85, 0.65),
    Vec3::new(0.9, 0.8, 0.55),
    Vec3::new(0.98, 0.9, 0.75),
    Vec3::new(0.85, 0.75, 0.5),
];

pub(crate) const GRASS: [Vec3; 4] = [
    Vec3::new(0.3, 0.8, 0.2),
    Vec3::new(0.5, 0.85, 0.3),
    Vec3::new(0.25, 0.7, 0.15),
    Vec3::new(0.4, 0.75, 0.35),
];

pub(crate) const FOREST: [Vec3; 4] = [
    Vec3::new(0.15, 0.6, 0.1),
    Vec3::new(0.2, 0.5, 0.15),
    Vec3::new(0.1, 0.55, 0.05),
    Vec3::new(0.25, 0.45, 0.2),
];

pub(crate) const ROCK: [Vec3; 4] = [
    Vec3::new(0.6, 0.6, 0.65),
    Vec3::new(0.55, 0.5, 0.45),
    Vec3::new(0.7, 0.7, 0.7),
    Vec3::new(0.45, 0.4, 0.4),
];

pub(crate) const SNOW: [Vec3; 3] = [
    Vec3::new(0.98, 0.98, 1.0),
    Vec3::new(0.95, 0.95, 0.98),
    Vec3::new(0.92, 0.94, 0.98),
];

/// Scale of the hash lookup that picks the rock tint on steep slopes.
const SLOPE_VARIATION_FREQ: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Biome {
    Sand,
    Grass,
    Forest,
    Rock,
    Snow,
}

impl Biome {
    /// Band for a (jittered) height. Each level is an exclusive upper bound.
    pub fn for_height(height: f32, scene: &SceneParameters) -> Self {
        if height < scene.sand_level {
            Biome::Sand
        } else if height < scene.grass_level {
            Biome::Grass
        } else if height < scene.forest_level {
            Biome::Forest
        } else if height < scene.rock_level {
            Biome::Rock
        } else {
            Biome::Snow
        }
    }

    pub fn color(self, variation: f32) -> Vec3 {
        match self {
            Biome::Sand => cyclic_blend(&SAND, variation),
            Biome::Grass => cyclic_blend(&GRASS, variation),
            Biome::Forest => cyclic_blend(&FOREST, variation),
            Biome::Rock => cyclic_blend(&ROCK, variation),
            Biome::Snow => snow_blend(variation),
        }
    }
}

/// Walk the four palette entries in quarters of `variation`, wrapping from
/// the last color back to the first.
fn cyclic_blend(palette: &[Vec3; 4], variation: f32) -> Vec3 {
    if variation < 0.25 {
        palette[0].lerp(palette[1], variation * 4.0)
    } else if variation < 0.5 {
        palette[1].lerp(palette[2], (variation - 0.25) * 4.0)
    } else if variation < 0.75 {
        palette[2].lerp(palette[3], (variation - 0.5) * 4.0)
    } else {
        palette[3].lerp(palette[0], (variation - 0.75) * 4.0)
    }
}

fn snow_blend(variation: f32) -> Vec3 {
    if variation < 0.5 {
        SNOW[0].lerp(SNOW[1], variation * 2.0)
    } else {
        SNOW[1].lerp(SNOW[2], (variation - 0.5) * 2.0)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Two-frequency hashed variation at a terrain position, in `[0, 1)`.
pub fn biome_variation(uv: Vec2, scene: &SceneParameters) -> f32 {
    let v1 = hash(uv * scene.biome_freq1);
    let v2 = hash2(uv * scene.biome_freq2);
    super::math::fract(v1 + v2 * 0.5)
}

/// Base terrain color for a pixel. `frag` is the pixel coordinate used for
/// the height jitter, so neighbouring pixels straddling a band edge dither.
pub fn classify_terrain(height: f32, uv: Vec2, frag: Vec2, scene: &SceneParameters) -> Vec3 {
    let variation = biome_variation(uv, scene);
    let jitter = (hash(frag) * 2.0 - 1.0) * scene.terrain_variation;
    Biome::for_height(height + jitter, scene).color(variation)
}

/// Blend toward rock on steep terrain above the sand band.
pub fn apply_slope(
    color: Vec3,
    height: f32,
    normal: Vec3,
    uv: Vec2,
    scene: &SceneParameters,
) -> Vec3 {
    if height <= scene.sand_level {
        return color;
    }
    let slope = 1.0 - normal.y;
    let rock_factor = smoothstep(scene.slope_start, 1.0, slope);
    let rock = Biome::Rock.color(hash(uv * SLOPE_VARIATION_FREQ));
    color.lerp(rock, rock_factor)
}
