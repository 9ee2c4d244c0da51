//! Shading, display and pointer handling for the island sculptor.

use bevy::prelude::*;

pub mod display;
pub mod egui_input_guard;
pub mod input;
pub mod scene;
pub mod screenshot;
pub mod shading;
pub mod sun;

mod plugin_registration;

pub use scene::SceneParameters;
pub use shading::{render_frame, shade, ShadingContext, ShadowSample, WaterTexture};
pub use sun::Sun;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneParameters>().init_resource::<Sun>();
        plugin_registration::register_rendering_plugins(app);
    }
}
