//! Noise parameters for base island generation.
//!
//! Owned by the UI and the config file, read by the regeneration system.
//! Values are validated before generation; invalid input is clamped into the
//! accepted domain instead of reaching the synthesizer.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_GRADIENT_CURVE, DEFAULT_LACUNARITY, DEFAULT_NOISE_ZOOM, DEFAULT_OCTAVES,
    DEFAULT_PERSISTENCE, DEFAULT_SCALE, MAX_OCTAVES,
};
use crate::error::{check_positive, check_range, ParamError};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    /// Number of fractal layers, 1..=MAX_OCTAVES.
    pub octaves: u32,
    /// Radial falloff multiplier. Larger values shrink the island.
    pub scale: f32,
    /// Amplitude decay per octave, (0, 1].
    pub persistence: f32,
    /// Frequency growth per octave, >= 1.
    pub lacunarity: f32,
    /// Spatial frequency of the first octave over the whole grid.
    pub zoom: f32,
    /// Exponent applied to the normalized noise before island carving.
    pub gradient_curve: f32,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            scale: DEFAULT_SCALE,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            zoom: DEFAULT_NOISE_ZOOM,
            gradient_curve: DEFAULT_GRADIENT_CURVE,
        }
    }
}

impl NoiseParameters {
    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(ParamError::OutOfRange {
                field: "octaves",
                value: self.octaves as f32,
                expected: "[1, 16]",
            });
        }
        check_positive("scale", self.scale)?;
        check_range("persistence", self.persistence, f32::MIN_POSITIVE, 1.0, "(0, 1]")?;
        check_range("lacunarity", self.lacunarity, 1.0, f32::MAX, "[1, inf)")?;
        check_positive("zoom", self.zoom)?;
        check_positive("gradient_curve", self.gradient_curve)?;
        Ok(())
    }

    /// Copy with every field clamped into its accepted range. Non-finite
    /// values fall back to the defaults.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() {
                v.max(1e-4)
            } else {
                fallback
            }
        };
        Self {
            octaves: self.octaves.clamp(1, MAX_OCTAVES),
            scale: positive(self.scale, defaults.scale),
            persistence: if self.persistence.is_finite() {
                self.persistence.clamp(1e-4, 1.0)
            } else {
                defaults.persistence
            },
            lacunarity: if self.lacunarity.is_finite() {
                self.lacunarity.max(1.0)
            } else {
                defaults.lacunarity
            },
            zoom: positive(self.zoom, defaults.zoom),
            gradient_curve: positive(self.gradient_curve, defaults.gradient_curve),
        }
    }
}
