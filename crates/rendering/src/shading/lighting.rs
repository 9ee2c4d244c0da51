//! Direct, ambient and specular light for one pixel.

use bevy::math::Vec3;

use super::shadow::ShadowSample;
use crate::scene::SceneParameters;
use crate::sun::Sun;

/// Fixed eye position for the water highlight.
pub const VIEW_POINT: Vec3 = Vec3::new(0.5, 0.5, 2.0);

/// Share of the shadow tint used as ambient light.
const AMBIENT_SCALE: f32 = 0.8;

#[inline]
pub fn light_direction(sun: &Sun, world_pos: Vec3) -> Vec3 {
    (sun.position - world_pos).normalize_or_zero()
}

/// Lambert term attenuated by the shadow sample.
#[inline]
pub fn visibility(normal: Vec3, light_dir: Vec3, shadow: &ShadowSample) -> f32 {
    let light_factor = normal.dot(light_dir).clamp(0.0, 1.0);
    shadow.factor() * light_factor
}

/// Blinn-Phong highlight toward `VIEW_POINT`.
pub fn specular(normal: Vec3, light_dir: Vec3, world_pos: Vec3, scene: &SceneParameters) -> f32 {
    let view_dir = (VIEW_POINT - world_pos).normalize_or_zero();
    let halfway = (light_dir + view_dir).normalize_or_zero();
    normal.dot(halfway).max(0.0).powf(scene.specular_power) * scene.specular_intensity
}

/// Total light reaching the pixel. `specular` is only passed for water.
pub fn compose_light(
    scene: &SceneParameters,
    sun: &Sun,
    visibility: f32,
    specular: Option<f32>,
) -> Vec3 {
    let ambient = scene.shadow_color() * AMBIENT_SCALE;
    let mut light = ambient + sun.color * visibility;
    if let Some(spec) = specular {
        light += sun.color * spec;
    }
    light
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_clamps_backfacing_light() {
        let shadow = ShadowSample::default();
        assert_eq!(visibility(Vec3::Y, Vec3::NEG_Y, &shadow), 0.0);
        assert_eq!(visibility(Vec3::Y, Vec3::Y, &shadow), 1.0);
    }

    #[test]
    fn test_full_shadow_halves_light_at_most() {
        let shadow = ShadowSample {
            occlusion: 1.0,
            intensity: 0.5,
            steps: 3,
        };
        assert_eq!(visibility(Vec3::Y, Vec3::Y, &shadow), 0.5);
    }

    #[test]
    fn test_ambient_only_in_darkness() {
        let scene = SceneParameters::default();
        let sun = Sun::default();
        let light = compose_light(&scene, &sun, 0.0, None);
        assert!(light.abs_diff_eq(scene.shadow_color() * 0.8, 1e-6));
    }

    #[test]
    fn test_specular_peaks_on_mirror_direction() {
        let scene = SceneParameters::default();
        let world_pos = Vec3::new(0.5, 0.5, 0.5);
        let view_dir = (VIEW_POINT - world_pos).normalize();
        // Light from the view direction: halfway equals the normal.
        let spec = specular(view_dir, view_dir, world_pos, &scene);
        assert!((spec - scene.specular_intensity).abs() < 1e-5);
    }
}
