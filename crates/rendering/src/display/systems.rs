//! ECS systems for the terrain display.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use terrain::{CompositeHeightField, TerrainSet};

use super::image_gen::create_blank_image;
use super::types::{DisplaySettings, TerrainSprite, TerrainView, CLEAR_COLOR};
use super::water_texture::{install_water_texture, request_water_texture, WaterTextureHandle};
use crate::scene::SceneParameters;
use crate::shading::{render_frame, ShadingContext, WaterTexture};
use crate::sun::Sun;

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct DisplayPlugin;

impl Plugin for DisplayPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(CLEAR_COLOR))
            .init_resource::<DisplaySettings>()
            .init_resource::<WaterTexture>()
            .add_systems(
                Startup,
                (
                    (create_view_image, spawn_terrain_sprite).chain(),
                    request_water_texture,
                ),
            )
            .add_systems(
                Update,
                install_water_texture.run_if(resource_exists::<WaterTextureHandle>),
            )
            .add_systems(
                Update,
                (fit_sprite_to_window, shade_terrain_image)
                    .chain()
                    .in_set(TerrainSet::Shade),
            );
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Allocate the display image at the configured resolution.
fn create_view_image(
    mut commands: Commands,
    settings: Res<DisplaySettings>,
    mut images: ResMut<Assets<Image>>,
) {
    let image = images.add(create_blank_image(settings.width, settings.height));
    commands.insert_resource(TerrainView { image });
}

/// Spawn the 2D camera and the sprite that shows the shaded image.
fn spawn_terrain_sprite(mut commands: Commands, view: Res<TerrainView>) {
    commands.spawn(Camera2d);
    commands.spawn((
        Sprite {
            image: view.image.clone(),
            ..default()
        },
        TerrainSprite,
    ));
}

/// Stretch the sprite over the whole primary window.
fn fit_sprite_to_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sprites: Query<&mut Sprite, With<TerrainSprite>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = window.size();
    for mut sprite in &mut sprites {
        if sprite.custom_size != Some(size) {
            sprite.custom_size = Some(size);
        }
    }
}

/// Shade the composite into the display image.
///
/// Invalid scene parameters are reported once per change and replaced by
/// their sanitized form for shading.
fn shade_terrain_image(
    view: Option<Res<TerrainView>>,
    composite: Res<CompositeHeightField>,
    scene: Res<SceneParameters>,
    sun: Res<Sun>,
    water: Res<WaterTexture>,
    time: Res<Time>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(view) = view else {
        return;
    };
    let Some(image) = images.get_mut(&view.image) else {
        return;
    };

    let scene_params = match scene.validate() {
        Ok(()) => *scene,
        Err(err) => {
            if scene.is_changed() {
                warn!("Invalid scene parameters, shading with sanitized values: {err}");
            }
            scene.sanitized()
        }
    };

    let width = image.width() as usize;
    let height = image.height() as usize;
    let ctx = ShadingContext {
        heights: &composite,
        scene: &scene_params,
        sun: &sun,
        water: &water,
        time: time.elapsed_secs(),
    };
    render_frame(&ctx, width, height, &mut image.data);
}
