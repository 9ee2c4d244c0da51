//! Types and constants for the terrain display.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use terrain::config::{GRID_HEIGHT, GRID_WIDTH};

/// Background shown around the image and behind the egui panel.
pub const CLEAR_COLOR: Color = Color::srgb(0.44, 0.68, 0.73);

/// Resolution of the shaded image. Independent of the window size; the
/// sprite stretches it with linear filtering.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH as u32,
            height: GRID_HEIGHT as u32,
        }
    }
}

/// Handle to the image the shading system writes each frame.
#[derive(Resource, Debug, Clone)]
pub struct TerrainView {
    pub image: Handle<Image>,
}

/// Marker for the full-window sprite showing the terrain image.
#[derive(Component)]
pub struct TerrainSprite;
