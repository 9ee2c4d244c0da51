//! Scene-wide shading parameters: biome thresholds, shadow tuning, water and
//! specular settings.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use terrain::error::{check_positive, check_range, ParamError};

/// Upper bound for `shadow_steps`. The raymarch is capped per pixel, so this
/// also bounds the worst-case frame cost.
pub const MAX_SHADOW_STEPS: u32 = 1000;

/// Flat set of tunables read by the shading pipeline for one frame.
///
/// Heights and levels are in the same normalized `[0, 1]` units as the
/// composite heightfield.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParameters {
    /// Amplitude of the per-pixel height jitter applied before biome lookup.
    pub terrain_variation: f32,
    pub water_level: f32,
    pub sand_level: f32,
    pub grass_level: f32,
    pub forest_level: f32,
    pub rock_level: f32,
    /// Slope (`1 - normal.y`) at which rock starts to show through.
    pub slope_start: f32,

    pub shadow_intensity: f32,
    pub shadow_steps: u32,
    pub shadow_penumbra: f32,
    pub shadow_step_size: f32,
    /// Ambient tint as RGB in `[0, 1]`.
    pub shadow_color: [f32; 3],

    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub wave_speed: f32,
    /// Rotation of the second wave layer, in radians.
    pub wave_angle: f32,

    pub specular_power: f32,
    pub specular_intensity: f32,

    pub biome_freq1: f32,
    pub biome_freq2: f32,

    pub foam_speed: f32,
    pub foam_frequency: f32,
    pub foam_intensity: f32,
}

impl Default for SceneParameters {
    fn default() -> Self {
        Self {
            terrain_variation: 0.015,
            water_level: 0.1,
            sand_level: 0.18,
            grass_level: 0.45,
            forest_level: 0.6,
            rock_level: 0.7,
            slope_start: 0.85,
            shadow_intensity: 0.5,
            shadow_steps: 225,
            shadow_penumbra: 0.02,
            shadow_step_size: 0.01,
            shadow_color: [0.35, 0.35, 0.45],
            wave_amplitude: 0.002,
            wave_frequency: 8.0,
            wave_speed: 0.01,
            wave_angle: 0.5,
            specular_power: 32.0,
            specular_intensity: 0.4,
            biome_freq1: 50.0,
            biome_freq2: 150.0,
            foam_speed: 5.0,
            foam_frequency: 500.0,
            foam_intensity: 0.25,
        }
    }
}

impl SceneParameters {
    #[inline]
    pub fn shadow_color(&self) -> Vec3 {
        Vec3::from_array(self.shadow_color)
    }

    pub fn validate(&self) -> Result<(), ParamError> {
        check_range("terrain_variation", self.terrain_variation, 0.0, 1.0, "[0, 1]")?;
        check_range("water_level", self.water_level, 0.0, 1.0, "[0, 1]")?;
        check_range("sand_level", self.sand_level, 0.0, 1.0, "[0, 1]")?;
        check_range("grass_level", self.grass_level, 0.0, 1.0, "[0, 1]")?;
        check_range("forest_level", self.forest_level, 0.0, 1.0, "[0, 1]")?;
        check_range("rock_level", self.rock_level, 0.0, 1.0, "[0, 1]")?;
        check_range("slope_start", self.slope_start, 0.0, 1.0, "[0, 1]")?;

        let levels = [
            ("sand_level", self.sand_level),
            ("grass_level", self.grass_level),
            ("forest_level", self.forest_level),
            ("rock_level", self.rock_level),
        ];
        for pair in levels.windows(2) {
            let (lower, lower_value) = pair[0];
            let (upper, upper_value) = pair[1];
            if lower_value > upper_value {
                return Err(ParamError::Misordered {
                    lower,
                    lower_value,
                    upper,
                    upper_value,
                });
            }
        }

        check_positive("shadow_intensity", self.shadow_intensity)?;
        if self.shadow_steps > MAX_SHADOW_STEPS {
            return Err(ParamError::OutOfRange {
                field: "shadow_steps",
                value: self.shadow_steps as f32,
                expected: "[0, 1000]",
            });
        }
        check_positive("shadow_penumbra", self.shadow_penumbra)?;
        check_positive("shadow_step_size", self.shadow_step_size)?;
        for (field, value) in [
            ("shadow_color.r", self.shadow_color[0]),
            ("shadow_color.g", self.shadow_color[1]),
            ("shadow_color.b", self.shadow_color[2]),
        ] {
            check_range(field, value, 0.0, 1.0, "[0, 1]")?;
        }

        check_range("wave_amplitude", self.wave_amplitude, 0.0, 1.0, "[0, 1]")?;
        check_positive("wave_frequency", self.wave_frequency)?;
        for (field, value) in [
            ("wave_speed", self.wave_speed),
            ("wave_angle", self.wave_angle),
            ("foam_speed", self.foam_speed),
            ("foam_frequency", self.foam_frequency),
        ] {
            if !value.is_finite() {
                return Err(ParamError::NotFinite { field, value });
            }
        }

        check_positive("specular_power", self.specular_power)?;
        check_range("specular_intensity", self.specular_intensity, 0.0, 10.0, "[0, 10]")?;
        check_positive("biome_freq1", self.biome_freq1)?;
        check_positive("biome_freq2", self.biome_freq2)?;
        check_range("foam_intensity", self.foam_intensity, 0.0, 1.0, "[0, 1]")?;
        Ok(())
    }

    /// Clamp every field into its valid domain. Non-finite values fall back
    /// to the default; misordered levels are pushed up to their lower
    /// neighbour.
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let unit = |v: f32, fallback: f32| {
            if v.is_finite() {
                v.clamp(0.0, 1.0)
            } else {
                fallback
            }
        };
        let positive = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        let finite = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };

        let sand_level = unit(self.sand_level, d.sand_level);
        let grass_level = unit(self.grass_level, d.grass_level).max(sand_level);
        let forest_level = unit(self.forest_level, d.forest_level).max(grass_level);
        let rock_level = unit(self.rock_level, d.rock_level).max(forest_level);

        Self {
            terrain_variation: unit(self.terrain_variation, d.terrain_variation),
            water_level: unit(self.water_level, d.water_level),
            sand_level,
            grass_level,
            forest_level,
            rock_level,
            slope_start: unit(self.slope_start, d.slope_start),
            shadow_intensity: positive(self.shadow_intensity, d.shadow_intensity),
            shadow_steps: self.shadow_steps.min(MAX_SHADOW_STEPS),
            shadow_penumbra: positive(self.shadow_penumbra, d.shadow_penumbra),
            shadow_step_size: positive(self.shadow_step_size, d.shadow_step_size),
            shadow_color: [
                unit(self.shadow_color[0], d.shadow_color[0]),
                unit(self.shadow_color[1], d.shadow_color[1]),
                unit(self.shadow_color[2], d.shadow_color[2]),
            ],
            wave_amplitude: unit(self.wave_amplitude, d.wave_amplitude),
            wave_frequency: positive(self.wave_frequency, d.wave_frequency),
            wave_speed: finite(self.wave_speed, d.wave_speed),
            wave_angle: finite(self.wave_angle, d.wave_angle),
            specular_power: positive(self.specular_power, d.specular_power),
            specular_intensity: if self.specular_intensity.is_finite() {
                self.specular_intensity.clamp(0.0, 10.0)
            } else {
                d.specular_intensity
            },
            biome_freq1: positive(self.biome_freq1, d.biome_freq1),
            biome_freq2: positive(self.biome_freq2, d.biome_freq2),
            foam_speed: finite(self.foam_speed, d.foam_speed),
            foam_frequency: finite(self.foam_frequency, d.foam_frequency),
            foam_intensity: unit(self.foam_intensity, d.foam_intensity),
        }
    }
}
