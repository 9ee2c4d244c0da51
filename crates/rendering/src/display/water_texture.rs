//! Loads the wave noise texture through the asset server and swaps it into
//! the `WaterTexture` resource once decoded.

use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::shading::WaterTexture;

/// Asset path of the wave noise texture, relative to the assets folder.
pub const WATER_TEXTURE_PATH: &str = "textures/water_noise.png";

/// Pending load. Removed once the texture is installed or has failed.
#[derive(Resource, Debug, Clone)]
pub struct WaterTextureHandle(pub Handle<Image>);

pub(crate) fn request_water_texture(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load(WATER_TEXTURE_PATH);
    commands.insert_resource(WaterTextureHandle(handle));
}

/// Poll the pending load. On any failure the flat fallback stays in place.
pub(crate) fn install_water_texture(
    mut commands: Commands,
    pending: Res<WaterTextureHandle>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut water: ResMut<WaterTexture>,
) {
    match asset_server.load_state(&pending.0) {
        LoadState::Loaded => {
            match images.get(&pending.0).and_then(WaterTexture::from_image) {
                Some(texture) => {
                    info!(
                        "Loaded water texture {} ({}x{})",
                        WATER_TEXTURE_PATH,
                        texture.width(),
                        texture.height()
                    );
                    *water = texture;
                }
                None => warn!(
                    "Water texture {} has an unsupported format; waves stay flat",
                    WATER_TEXTURE_PATH
                ),
            }
            commands.remove_resource::<WaterTextureHandle>();
        }
        LoadState::Failed(err) => {
            warn!("Failed to load water texture {WATER_TEXTURE_PATH}: {err}; waves stay flat");
            commands.remove_resource::<WaterTextureHandle>();
        }
        _ => {}
    }
}
