//! Render target allocation.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Create a black, opaque RGBA image the shading system can write into.
///
/// Kept in the main world as well so the pixel buffer stays writable after
/// upload.
pub(crate) fn create_blank_image(width: u32, height: u32) -> Image {
    let width = width.max(1);
    let height = height.max(1);
    let mut data = vec![0u8; width as usize * height as usize * 4];
    for texel in data.chunks_exact_mut(4) {
        texel[3] = 255;
    }
    let mut image = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = bevy::image::ImageSampler::linear();
    image
}
