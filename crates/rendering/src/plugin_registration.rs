use bevy::prelude::*;

use crate::*;

/// Register all rendering plugins.
///
/// Each plugin is registered on its own line. Systems inside them place
/// themselves in the matching `TerrainSet` phase.
pub(crate) fn register_rendering_plugins(app: &mut App) {
    app.add_plugins(input::TerrainInputPlugin);
    app.add_plugins(display::DisplayPlugin);
    app.add_plugins(screenshot::ScreenshotPlugin);
}
