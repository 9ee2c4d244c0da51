//! Animated water surface: texture-driven wave displacement and the color
//! composite over submerged terrain.

use bevy::image::Image;
use bevy::math::{Vec2, Vec3};
use bevy::prelude::Resource;
use bevy::render::render_resource::TextureFormat;

use terrain::HeightField;

use super::math::{ease_out, fract, smoothstep};
use crate::scene::SceneParameters;

const COASTAL_WATER: Vec3 = Vec3::new(0.1, 0.6, 0.9);
const DEEP_WATER: Vec3 = Vec3::new(0.0, 0.43, 0.69);

/// Step used when differentiating the water surface.
pub(crate) const WATER_NORMAL_STEP: f32 = 0.001;

/// Depth over which the shoreline foam fades out.
const FOAM_DEPTH: f32 = 0.05;

// ---------------------------------------------------------------------------
// Texture
// ---------------------------------------------------------------------------

/// Red channel of the wave noise texture, sampled bilinearly with repeat
/// wrapping. Values are in `[0, 1]`; 0.5 means no displacement.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WaterTexture {
    red: HeightField,
}

impl Default for WaterTexture {
    /// A single mid-grey texel, so waves are flat until a texture loads.
    fn default() -> Self {
        let mut red = HeightField::new(1, 1);
        red.values[0] = 0.5;
        Self { red }
    }
}

impl WaterTexture {
    /// Build from raw red values in `[0, 1]`, row-major. Returns `None` when
    /// the size does not match.
    pub fn from_red(width: usize, height: usize, values: Vec<f32>) -> Option<Self> {
        if width == 0 || height == 0 || values.len() != width * height {
            return None;
        }
        Some(Self {
            red: HeightField {
                width,
                height,
                values,
            },
        })
    }

    /// Extract the red channel of an 8-bit image. The bytes are used as
    /// stored, without sRGB decoding.
    pub fn from_image(image: &Image) -> Option<Self> {
        let stride = match image.texture_descriptor.format {
            TextureFormat::Rgba8Unorm | TextureFormat::Rgba8UnormSrgb => 4,
            TextureFormat::R8Unorm => 1,
            _ => return None,
        };
        let width = image.width() as usize;
        let height = image.height() as usize;
        if image.data.len() < width * height * stride {
            return None;
        }
        let values = image
            .data
            .chunks_exact(stride)
            .take(width * height)
            .map(|texel| texel[0] as f32 / 255.0)
            .collect();
        Self::from_red(width, height, values)
    }

    pub fn width(&self) -> usize {
        self.red.width
    }

    pub fn height(&self) -> usize {
        self.red.height
    }

    #[inline]
    pub fn sample_red(&self, uv: Vec2) -> f32 {
        self.red.sample_bilinear(uv.x, uv.y)
    }
}

// ---------------------------------------------------------------------------
// Surface height
// ---------------------------------------------------------------------------

#[inline]
fn wave_noise(p: Vec2, scene: &SceneParameters, texture: &WaterTexture) -> f32 {
    let q = p * scene.wave_frequency;
    let texel = texture.sample_red(Vec2::new(fract(q.x), fract(q.y)));
    scene.wave_amplitude * (texel * 2.0 - 1.0)
}

/// Row vector times the column-major matrix `[[c, s], [-s, c]]`.
#[inline]
fn rotate(p: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(p.x * c + p.y * s, -p.x * s + p.y * c)
}

/// Water surface height at `uv`: the water level plus two scrolling wave
/// layers, the second rotated by `wave_angle`.
pub fn water_height(uv: Vec2, scene: &SceneParameters, texture: &WaterTexture, time: f32) -> f32 {
    let t = time * scene.wave_speed;
    let first = wave_noise(uv + Vec2::splat(t), scene, texture);
    let second = wave_noise(rotate(uv, scene.wave_angle) - Vec2::new(t, 0.0), scene, texture);
    scene.water_level + first + second
}

// ---------------------------------------------------------------------------
// Compositing
// ---------------------------------------------------------------------------

/// Tint submerged terrain by depth and add animated shoreline foam.
///
/// `depth` is `max(0, water_height - terrain_height)`; a zero depth leaves
/// the color untouched.
pub fn apply_water_effects(
    terrain_color: Vec3,
    depth: f32,
    surface_height: f32,
    scene: &SceneParameters,
    time: f32,
) -> Vec3 {
    if depth <= 0.0 {
        return terrain_color;
    }
    let ratio = depth / surface_height;
    let water_lerp = ease_out(ratio, 1.0);
    let water_color = COASTAL_WATER.lerp(DEEP_WATER, ease_out(ratio, 2.0));
    let color = terrain_color.lerp(water_color, water_lerp);

    let foam = (1.0 - smoothstep(0.0, FOAM_DEPTH, depth))
        * ((time * scene.foam_speed + depth * scene.foam_frequency).sin() + 1.0)
        / 2.0;
    color + Vec3::splat(foam * scene.foam_intensity)
}
