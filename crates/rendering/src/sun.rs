use bevy::prelude::*;

/// Default sun height above the terrain plane.
pub const DEFAULT_SUN_HEIGHT: f32 = 2.0;

const SUNRISE: Vec3 = Vec3::new(0.6, 0.7, 1.0);
const MIDDAY: Vec3 = Vec3::new(1.0, 1.0, 0.95);
const SUNSET: Vec3 = Vec3::new(1.0, 0.6, 0.4);

/// The single point light. `x`/`z` are horizontal in normalized terrain
/// space, `y` is the height. `color` is always derived from `position.x`.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Sun {
    pub position: Vec3,
    pub color: Vec3,
}

impl Default for Sun {
    fn default() -> Self {
        Self::at(0.5, 0.5, DEFAULT_SUN_HEIGHT)
    }
}

impl Sun {
    /// Sun above normalized terrain point `(x, z)` at height `y`.
    pub fn at(x: f32, z: f32, y: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            color: sun_color_for_x(x),
        }
    }

    /// Move horizontally, keeping the current height.
    pub fn follow(&mut self, x: f32, z: f32) {
        *self = Self::at(x, z, self.position.y);
    }

    pub fn set_height(&mut self, y: f32) {
        self.position.y = y;
    }
}

/// Sunrise → midday → sunset gradient across the horizontal axis.
pub fn sun_color_for_x(x: f32) -> Vec3 {
    if x < 0.5 {
        SUNRISE.lerp(MIDDAY, x * 2.0)
    } else {
        MIDDAY.lerp(SUNSET, (x - 0.5) * 2.0)
    }
}
