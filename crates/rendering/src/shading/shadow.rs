//! Soft shadows by marching from the surface toward the sun over the
//! heightfield.

use bevy::math::Vec3;

use terrain::HeightField;

use super::math::smoothstep;
use crate::scene::SceneParameters;

/// Offset of the first sample, in step sizes, to avoid self-shadowing.
const START_OFFSET_STEPS: f32 = 5.0;

/// Fraction of the penetration depth added to the step while inside terrain.
const PENETRATION_STEP_SCALE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShadowSample {
    /// Maximum soft occlusion seen along the ray, in `[0, 1]`.
    pub occlusion: f32,
    /// Shadow strength, fading with the depth of the last terrain crossing.
    pub intensity: f32,
    /// Iterations actually taken.
    pub steps: u32,
}

impl ShadowSample {
    /// `1 - occlusion * intensity`, the multiplier on direct light.
    #[inline]
    pub fn factor(&self) -> f32 {
        1.0 - self.occlusion * self.intensity
    }
}

/// March from `surface` along `light_dir` (normalized) for at most
/// `scene.shadow_steps` iterations.
///
/// Occluders are the terrain raised to at least the water level. The loop
/// stops early once fully occluded. The intensity uses the penetration depth
/// of the most recent sample that was below the surface, even if later
/// samples came back out.
pub fn raymarch_shadow(
    surface: Vec3,
    light_dir: Vec3,
    heights: &HeightField,
    scene: &SceneParameters,
) -> ShadowSample {
    let step_size = scene.shadow_step_size;
    let penumbra = scene.shadow_penumbra;

    let mut p = surface + light_dir * step_size * START_OFFSET_STEPS;
    let mut in_shadow: f32 = 0.0;
    let mut dist = 0.0;
    let mut steps = 0;

    while steps < scene.shadow_steps {
        steps += 1;
        let ground = heights.sample_bilinear(p.x, p.z).max(scene.water_level);
        let occlusion = (ground - p.y).clamp(0.0, penumbra) / penumbra;
        in_shadow = in_shadow.max(occlusion);

        if ground > p.y {
            dist = p.y - ground;
            p += light_dir * step_size.max(dist * PENETRATION_STEP_SCALE);
        } else {
            p += light_dir * step_size;
        }

        if in_shadow >= 1.0 {
            break;
        }
    }

    let intensity = in_shadow * 0.5 * (1.0 - smoothstep(0.0, scene.shadow_intensity, dist.abs()));
    ShadowSample {
        occlusion: in_shadow,
        intensity,
        steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_filled(size: usize, value: f32) -> HeightField {
        let mut field = HeightField::new(size, size);
        field.values.fill(value);
        field
    }

    #[test]
    fn test_open_sky_is_unshadowed() {
        let scene = SceneParameters::default();
        let field = field_filled(16, 0.2);
        let sample = raymarch_shadow(Vec3::new(0.5, 0.2, 0.5), Vec3::Y, &field, &scene);
        assert_eq!(sample.occlusion, 0.0);
        assert_eq!(sample.factor(), 1.0);
        assert_eq!(sample.steps, scene.shadow_steps);
    }

    #[test]
    fn test_buried_ray_stops_early() {
        let scene = SceneParameters::default();
        let field = field_filled(16, 1.0);
        let dir = Vec3::new(1.0, 0.0, 0.0);
        let sample = raymarch_shadow(Vec3::new(0.5, 0.1, 0.5), dir, &field, &scene);
        assert_eq!(sample.occlusion, 1.0);
        assert_eq!(sample.steps, 1);
        // dist = 0.1 - 1.0 is well past the shadow_intensity fade
        assert_eq!(sample.intensity, 0.0);
    }

    #[test]
    fn test_shallow_occluder_casts_shadow() {
        let scene = SceneParameters::default();
        let field = field_filled(16, 0.3);
        let dir = Vec3::X;
        let sample = raymarch_shadow(Vec3::new(0.5, 0.29, 0.5), dir, &field, &scene);
        assert!((sample.occlusion - 0.5).abs() < 1e-4, "{}", sample.occlusion);
        assert!(sample.intensity > 0.0);
        assert!(sample.factor() < 1.0);
    }

    #[test]
    fn test_respects_step_cap() {
        for cap in [0, 1, 7, 225] {
            let scene = SceneParameters {
                shadow_steps: cap,
                ..Default::default()
            };
            let field = field_filled(8, 0.0);
            let sample = raymarch_shadow(Vec3::new(0.2, 0.5, 0.2), Vec3::Y, &field, &scene);
            assert!(sample.steps <= cap);
        }
    }

    #[test]
    fn test_water_level_acts_as_occluder() {
        let scene = SceneParameters {
            water_level: 0.5,
            ..Default::default()
        };
        let field = field_filled(8, 0.0);
        let sample = raymarch_shadow(Vec3::new(0.5, 0.2, 0.5), Vec3::X, &field, &scene);
        assert_eq!(sample.occlusion, 1.0);
    }
}
