//! Per-pixel shading of the composite heightfield.
//!
//! `shade` is a pure function of the pixel position and a read-only
//! `ShadingContext`; `render_frame` maps it over an RGBA8 buffer on the
//! compute task pool, one band of rows per task.
//!
//! Per pixel:
//! 1. terrain height and surface normal (water normal when submerged)
//! 2. biome color with hashed variation, then slope rock blending
//! 3. water surface height and soft shadow raymarch toward the sun
//! 4. water tint and foam over submerged terrain
//! 5. ambient + direct light, plus a specular highlight on water

pub mod biome;
pub mod hash;
pub mod lighting;
pub mod math;
pub mod normals;
pub mod shadow;
pub mod water;

mod tests;

use bevy::math::{Vec2, Vec3, Vec4};
use bevy::tasks::{ComputeTaskPool, ParallelSliceMut, TaskPool};

use terrain::HeightField;

use crate::scene::SceneParameters;
use crate::sun::Sun;

pub use shadow::ShadowSample;
pub use water::WaterTexture;

/// Rows shaded per task.
const ROWS_PER_TASK: usize = 16;

/// Everything one frame of shading reads.
#[derive(Clone, Copy)]
pub struct ShadingContext<'a> {
    pub heights: &'a HeightField,
    pub scene: &'a SceneParameters,
    pub sun: &'a Sun,
    pub water: &'a WaterTexture,
    /// Seconds since startup.
    pub time: f32,
}

/// Shade one pixel. `uv` is the terrain coordinate in `[0, 1]²` with `v`
/// pointing up; `frag` is the pixel coordinate used for dithering.
pub fn shade(uv: Vec2, frag: Vec2, ctx: &ShadingContext) -> Vec4 {
    let scene = ctx.scene;
    let terrain_height = ctx.heights.sample_bilinear(uv.x, uv.y);
    let normal = normals::surface_normal(
        ctx.heights,
        terrain_height,
        uv,
        scene,
        ctx.water,
        ctx.time,
    );

    let mut color = biome::classify_terrain(terrain_height, uv, frag, scene);
    color = biome::apply_slope(color, terrain_height, normal, uv, scene);

    let surface_height = water::water_height(uv, scene, ctx.water, ctx.time);
    let world_pos = Vec3::new(uv.x, terrain_height.max(surface_height), uv.y);
    let light_dir = lighting::light_direction(ctx.sun, world_pos);
    let shadow = shadow::raymarch_shadow(world_pos, light_dir, ctx.heights, scene);
    let visibility = lighting::visibility(normal, light_dir, &shadow);

    let depth = (surface_height - terrain_height).max(0.0);
    let submerged = depth > 0.0;
    if submerged {
        color = water::apply_water_effects(color, depth, surface_height, scene, ctx.time);
    }

    let specular = submerged.then(|| lighting::specular(normal, light_dir, world_pos, scene));
    let light = lighting::compose_light(scene, ctx.sun, visibility, specular);
    (color * light).extend(1.0)
}

/// Pack a linear `[0, 1]` color into RGBA8, clamping out-of-range channels.
#[inline]
pub fn to_rgba8(color: Vec4) -> [u8; 4] {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [
        channel(color.x),
        channel(color.y),
        channel(color.z),
        channel(color.w),
    ]
}

/// Shade a `width` x `height` RGBA8 buffer. Row 0 is the top of the image,
/// which is `uv.y` close to 1.
///
/// Does nothing if `pixels` is not exactly `width * height * 4` bytes.
pub fn render_frame(ctx: &ShadingContext, width: usize, height: usize, mut pixels: &mut [u8]) {
    let row_bytes = width * 4;
    if width == 0 || height == 0 || pixels.len() != row_bytes * height {
        return;
    }

    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    pixels.par_chunk_map_mut(pool, row_bytes * ROWS_PER_TASK, |chunk_index, chunk| {
        let first_row = chunk_index * ROWS_PER_TASK;
        for (offset, row) in chunk.chunks_exact_mut(row_bytes).enumerate() {
            let frag_y = (height - 1 - (first_row + offset)) as f32 + 0.5;
            for (x, texel) in row.chunks_exact_mut(4).enumerate() {
                let frag = Vec2::new(x as f32 + 0.5, frag_y);
                let uv = frag / Vec2::new(width as f32, height as f32);
                texel.copy_from_slice(&to_rgba8(shade(uv, frag, ctx)));
            }
        }
    });
}
