//! Fixed-size scalar grids and the three layers the pipeline keeps of them.
//!
//! The base layer is regenerated wholesale from `NoiseParameters`, the
//! modification layer accumulates brush stamps for the lifetime of the
//! process, and the composite layer is rebuilt from both every frame. Only the
//! composite is guaranteed to lie in [0, 1].

use bevy::prelude::*;

use crate::config::{GRID_HEIGHT, GRID_WIDTH};

/// Row-major grid of heights, `values[y * width + x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
}

impl HeightField {
    /// All-zero field of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[self.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut f32 {
        let i = self.index(x, y);
        &mut self.values[i]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn same_size(&self, other: &HeightField) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Bilinear lookup in normalized coordinates with repeat wrapping.
    ///
    /// Texel centers sit at `(i + 0.5) / width`, the same convention a
    /// linearly filtered GPU texture uses, so `u = 0.5 / width` returns the
    /// first texel exactly.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let fx = u * self.width as f32 - 0.5;
        let fy = v * self.height as f32 - 0.5;
        if !fx.is_finite() || !fy.is_finite() {
            return 0.0;
        }
        let x0f = fx.floor();
        let y0f = fy.floor();
        let tx = fx - x0f;
        let ty = fy - y0f;

        let x0 = wrap_index(x0f as i64, self.width);
        let x1 = wrap_index(x0f as i64 + 1, self.width);
        let y0 = wrap_index(y0f as i64, self.height);
        let y1 = wrap_index(y0f as i64 + 1, self.height);

        let h00 = self.get(x0, y0);
        let h10 = self.get(x1, y0);
        let h01 = self.get(x0, y1);
        let h11 = self.get(x1, y1);

        let top = h00 + (h10 - h00) * tx;
        let bottom = h01 + (h11 - h01) * tx;
        top + (bottom - top) * ty
    }

    /// Smallest and largest value in the field.
    pub fn min_max(&self) -> (f32, f32) {
        self.values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

#[inline]
fn wrap_index(i: i64, n: usize) -> usize {
    i.rem_euclid(n as i64) as usize
}

// ---------------------------------------------------------------------------
// Layer resources
// ---------------------------------------------------------------------------

/// Noise-generated island, rebuilt whenever `NoiseParameters` change.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct BaseHeightField(pub HeightField);

impl Default for BaseHeightField {
    fn default() -> Self {
        Self(HeightField::new(GRID_WIDTH, GRID_HEIGHT))
    }
}

/// Additive user edits. Starts at zero and lives as long as the process;
/// brush stamps are its only writer.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct ModificationLayer(pub HeightField);

impl Default for ModificationLayer {
    fn default() -> Self {
        Self(HeightField::new(GRID_WIDTH, GRID_HEIGHT))
    }
}

/// Per-frame `clamp(base + modification, 0, 1)`; the field shading samples.
#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct CompositeHeightField(pub HeightField);

impl Default for CompositeHeightField {
    fn default() -> Self {
        Self(HeightField::new(GRID_WIDTH, GRID_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: usize, height: usize) -> HeightField {
        let mut field = HeightField::new(width, height);
        for y in 0..height {
            for x in 0..width {
                *field.get_mut(x, y) = (y * width + x) as f32;
            }
        }
        field
    }

    #[test]
    fn test_new_is_zeroed() {
        let field = HeightField::new(8, 4);
        assert_eq!(field.len(), 32);
        assert!(field.values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_index_is_row_major() {
        let field = HeightField::new(8, 4);
        assert_eq!(field.index(3, 2), 19);
    }

    #[test]
    fn test_bilinear_at_texel_center_is_exact() {
        let field = ramp(4, 4);
        let u = (2.0 + 0.5) / 4.0;
        let v = (1.0 + 0.5) / 4.0;
        assert!((field.sample_bilinear(u, v) - field.get(2, 1)).abs() < 1e-5);
    }

    #[test]
    fn test_bilinear_between_texels_interpolates() {
        let field = ramp(4, 4);
        // Halfway between (1,1) and (2,1)
        let u = 2.0 / 4.0;
        let v = 1.5 / 4.0;
        let expected = (field.get(1, 1) + field.get(2, 1)) * 0.5;
        assert!((field.sample_bilinear(u, v) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_bilinear_wraps() {
        let field = ramp(4, 4);
        let a = field.sample_bilinear(0.3, 0.6);
        let b = field.sample_bilinear(1.3, -0.4);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn test_bilinear_non_finite_coordinates() {
        let field = ramp(4, 4);
        assert_eq!(field.sample_bilinear(f32::NAN, 0.5), 0.0);
    }

    #[test]
    fn test_min_max() {
        let field = ramp(4, 4);
        assert_eq!(field.min_max(), (0.0, 15.0));
    }

    #[test]
    fn test_layer_defaults_use_grid_size() {
        let base = BaseHeightField::default();
        assert_eq!(base.width, GRID_WIDTH);
        assert_eq!(base.height, GRID_HEIGHT);
    }
}
