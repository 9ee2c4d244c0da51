//! Base island synthesis: fBm noise carved by a radial mask.
//!
//! Each cell accumulates `octaves` layers of `NoiseField`, normalizes the sum
//! into [0, 1], bends it with `gradient_curve`, then subtracts the distance
//! from the grid center (scaled by `scale`, saturated at the corner distance)
//! so elevation falls off toward the edges. The output is not clamped: ocean
//! cells go negative and peaks may exceed 1. The compositor clamps later.

use bevy::prelude::*;

use crate::heightfield::{BaseHeightField, HeightField};
use crate::noise_field::NoiseField;
use crate::params::NoiseParameters;

// ---------------------------------------------------------------------------
// Per-cell building blocks
// ---------------------------------------------------------------------------

/// Normalized fractal noise in [0, 1] for cell `(x, y)` before island
/// shaping.
pub fn fractal_value(
    noise: &NoiseField,
    params: &NoiseParameters,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> f32 {
    let mut total = 0.0_f32;
    let mut frequency = 1.0_f32;
    let mut amplitude = 1.0_f32;
    let mut max_value = 0.0_f32;

    let nx = x as f32 / width as f32;
    let ny = y as f32 / height as f32;

    for _ in 0..params.octaves {
        total += noise.sample(nx * frequency * params.zoom, ny * frequency * params.zoom)
            * amplitude;
        max_value += amplitude;
        amplitude *= params.persistence;
        frequency *= params.lacunarity;
    }

    if max_value <= 0.0 {
        return 0.5;
    }
    (total / max_value + 1.0) * 0.5
}

/// Radial mask in [0, 1]: 1 at the grid center, 0 once the scaled distance
/// reaches the corner distance.
pub fn radial_gradient(x: usize, y: usize, width: usize, height: usize, scale: f32) -> f32 {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let dx = x as f32 - center_x;
    let dy = y as f32 - center_y;
    let distance = (dx * dx + dy * dy).sqrt();
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();
    if max_distance <= 0.0 {
        return 1.0;
    }
    let normalized = (distance / max_distance * scale).min(1.0);
    1.0 - normalized
}

/// Bend the elevation curve and carve the island silhouette.
#[inline]
pub fn shape_elevation(value: f32, gradient: f32, curve: f32) -> f32 {
    // Float error can push the normalized sum a hair below zero.
    value.max(0.0).powf(curve) - (1.0 - gradient)
}

// ---------------------------------------------------------------------------
// Whole-field generation
// ---------------------------------------------------------------------------

/// Generate a fresh `width x height` base field.
pub fn generate(
    noise: &NoiseField,
    width: usize,
    height: usize,
    params: &NoiseParameters,
) -> HeightField {
    let mut field = HeightField::new(width, height);
    generate_into(noise, params, &mut field);
    field
}

/// Regenerate `field` in place, keeping its size and allocation.
pub fn generate_into(noise: &NoiseField, params: &NoiseParameters, field: &mut HeightField) {
    let width = field.width;
    let height = field.height;
    for y in 0..height {
        for x in 0..width {
            let value = fractal_value(noise, params, x, y, width, height);
            let gradient = radial_gradient(x, y, width, height, params.scale);
            field.values[y * width + x] = shape_elevation(value, gradient, params.gradient_curve);
        }
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Rebuild the base layer whenever `NoiseParameters` change (including the
/// first frame, when the resource is freshly added).
pub fn regenerate_base_on_change(
    params: Res<NoiseParameters>,
    noise: Res<NoiseField>,
    mut base: ResMut<BaseHeightField>,
) {
    if !params.is_changed() {
        return;
    }

    let params = match params.validate() {
        Ok(()) => *params,
        Err(err) => {
            warn!("Invalid noise parameters ({err}); generating with clamped values");
            params.sanitized()
        }
    };

    let start = std::time::Instant::now();
    generate_into(&noise, &params, &mut base);
    let (lo, hi) = base.min_max();
    info!(
        "Regenerated {}x{} island (seed {}, octaves {}, scale {:.2}, persistence {:.2}, lacunarity {:.2}) in {:.1} ms, range [{:.3}, {:.3}]",
        base.width,
        base.height,
        noise.seed(),
        params.octaves,
        params.scale,
        params.persistence,
        params.lacunarity,
        start.elapsed().as_secs_f64() * 1000.0,
        lo,
        hi
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_dimensions_and_finite() {
        let noise = NoiseField::new(42);
        let field = generate(&noise, 64, 48, &NoiseParameters::default());
        assert_eq!(field.width, 64);
        assert_eq!(field.height, 48);
        assert_eq!(field.len(), 64 * 48);
        assert!(field.values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_generate_is_deterministic_per_instance() {
        let noise = NoiseField::new(3);
        let params = NoiseParameters::default();
        let a = generate(&noise, 32, 32, &params);
        let b = generate(&noise, 32, 32, &params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fractal_value_in_unit_range() {
        let noise = NoiseField::new(11);
        let params = NoiseParameters::default();
        for y in (0..64).step_by(7) {
            for x in (0..64).step_by(5) {
                let v = fractal_value(&noise, &params, x, y, 64, 64);
                assert!((0.0..=1.0).contains(&v), "fractal value {v} at ({x},{y})");
            }
        }
    }

    #[test]
    fn test_radial_gradient_center_and_corner() {
        assert_eq!(radial_gradient(32, 32, 64, 64, 1.0), 1.0);
        assert_eq!(radial_gradient(0, 0, 64, 64, 1.0), 0.0);
        // Larger scale saturates before the corner
        assert_eq!(radial_gradient(8, 8, 64, 64, 2.0), 0.0);
    }

    #[test]
    fn test_radial_gradient_decreases_with_distance() {
        let near = radial_gradient(36, 32, 64, 64, 1.6);
        let far = radial_gradient(50, 32, 64, 64, 1.6);
        assert!(near > far);
    }

    #[test]
    fn test_shape_elevation_reference_values() {
        // gradient 1 leaves the curved value in place
        assert!((shape_elevation(1.0, 1.0, 0.8) - 1.0).abs() < 1e-6);
        // gradient 0 pushes everything down by one
        assert!((shape_elevation(0.5, 0.0, 0.8) - (0.5f32.powf(0.8) - 1.0)).abs() < 1e-6);
        // tiny negative input does not produce NaN
        assert!(shape_elevation(-1e-7, 1.0, 0.8).is_finite());
    }

    #[test]
    fn test_scale_does_not_change_noise_pattern() {
        let noise = NoiseField::new(8);
        let small = NoiseParameters {
            scale: 0.5,
            ..Default::default()
        };
        let large = NoiseParameters {
            scale: 3.0,
            ..Default::default()
        };
        for (x, y) in [(3, 4), (20, 9), (31, 31), (60, 2)] {
            assert_eq!(
                fractal_value(&noise, &small, x, y, 64, 64),
                fractal_value(&noise, &large, x, y, 64, 64)
            );
        }
    }

    #[test]
    fn test_larger_scale_lowers_off_center_cells() {
        let noise = NoiseField::new(21);
        let a = generate(
            &noise,
            64,
            64,
            &NoiseParameters {
                scale: 1.0,
                ..Default::default()
            },
        );
        let b = generate(
            &noise,
            64,
            64,
            &NoiseParameters {
                scale: 2.0,
                ..Default::default()
            },
        );
        assert!(b.get(10, 32) < a.get(10, 32));
        assert_eq!(b.get(32, 32), a.get(32, 32));
    }

    #[test]
    fn test_generate_into_reuses_buffer() {
        let noise = NoiseField::new(1);
        let params = NoiseParameters::default();
        let mut field = HeightField::new(16, 16);
        generate_into(&noise, &params, &mut field);
        assert_eq!(field, generate(&noise, 16, 16, &params));
    }
}
