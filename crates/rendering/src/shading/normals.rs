//! Surface normals by central differences, for terrain and water.

use bevy::math::{Vec2, Vec3};

use terrain::HeightField;

use super::water::{water_height, WaterTexture, WATER_NORMAL_STEP};
use crate::scene::SceneParameters;

/// Terrain normal from four bilinear samples one texel apart.
pub fn terrain_normal(heights: &HeightField, uv: Vec2) -> Vec3 {
    if heights.is_empty() {
        return Vec3::Y;
    }
    let pixel = 1.0 / heights.width as f32;
    let left = heights.sample_bilinear(uv.x - pixel, uv.y);
    let right = heights.sample_bilinear(uv.x + pixel, uv.y);
    let down = heights.sample_bilinear(uv.x, uv.y - pixel);
    let up = heights.sample_bilinear(uv.x, uv.y + pixel);
    Vec3::new(left - right, 2.0 * pixel, down - up).normalize()
}

/// Normal of the animated water surface.
pub fn water_normal(uv: Vec2, scene: &SceneParameters, texture: &WaterTexture, time: f32) -> Vec3 {
    let step = WATER_NORMAL_STEP;
    let left = water_height(uv - Vec2::new(step, 0.0), scene, texture, time);
    let right = water_height(uv + Vec2::new(step, 0.0), scene, texture, time);
    let down = water_height(uv - Vec2::new(0.0, step), scene, texture, time);
    let up = water_height(uv + Vec2::new(0.0, step), scene, texture, time);
    Vec3::new(left - right, 2.0 * step, down - up).normalize()
}

/// Water normal below the water level, terrain normal otherwise.
pub fn surface_normal(
    heights: &HeightField,
    terrain_height: f32,
    uv: Vec2,
    scene: &SceneParameters,
    texture: &WaterTexture,
    time: f32,
) -> Vec3 {
    if terrain_height < scene.water_level {
        water_normal(uv, scene, texture, time)
    } else {
        terrain_normal(heights, uv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_x(size: usize, slope: f32) -> HeightField {
        let mut field = HeightField::new(size, size);
        for y in 0..size {
            for x in 0..size {
                *field.get_mut(x, y) = x as f32 * slope;
            }
        }
        field
    }

    #[test]
    fn test_flat_field_points_up() {
        let field = HeightField::new(16, 16);
        let n = terrain_normal(&field, Vec2::new(0.5, 0.5));
        assert!(n.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_ramp_tilts_away_from_uphill() {
        let field = ramp_x(32, 0.01);
        let n = terrain_normal(&field, Vec2::new(0.5, 0.5));
        assert!(n.x < 0.0, "{n}");
        assert!(n.y > 0.0);
        assert!(n.z.abs() < 1e-6);
        assert!((n.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_flat_water_normal_points_up() {
        let scene = SceneParameters::default();
        let n = water_normal(Vec2::new(0.3, 0.3), &scene, &WaterTexture::default(), 4.0);
        assert!(n.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_surface_normal_switches_at_water_level() {
        let scene = SceneParameters::default();
        let field = ramp_x(32, 0.01);
        let uv = Vec2::new(0.5, 0.5);
        let texture = WaterTexture::default();
        let dry = surface_normal(&field, scene.water_level, uv, &scene, &texture, 0.0);
        let wet = surface_normal(&field, scene.water_level - 0.01, uv, &scene, &texture, 0.0);
        assert_eq!(dry, terrain_normal(&field, uv));
        assert!(wet.abs_diff_eq(Vec3::Y, 1e-5));
    }
}
