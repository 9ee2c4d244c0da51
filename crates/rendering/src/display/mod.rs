//! Terrain display: a CPU-shaded image stretched over the whole window.
//!
//! Every frame, after the composite is rebuilt, the shading pipeline writes
//! into the pixel buffer of one `Image` asset. A single `Sprite` sized to the
//! window shows it through a 2D camera.

mod image_gen;
mod systems;
mod types;
mod water_texture;

pub use systems::DisplayPlugin;
pub use types::{DisplaySettings, TerrainSprite, TerrainView, CLEAR_COLOR};
pub use water_texture::{WaterTextureHandle, WATER_TEXTURE_PATH};
