//! Tests for the full per-pixel shading path.

#[cfg(test)]
mod tests {
    use bevy::math::{Vec2, Vec3, Vec4};

    use terrain::HeightField;

    use crate::scene::SceneParameters;
    use crate::shading::biome::{classify_terrain, Biome};
    use crate::shading::{render_frame, shade, to_rgba8, ShadingContext, WaterTexture};
    use crate::sun::Sun;

    fn plateau(size: usize, value: f32) -> HeightField {
        let mut field = HeightField::new(size, size);
        field.values.fill(value);
        field
    }

    #[test]
    fn test_shade_output_is_opaque_and_finite() {
        let heights = plateau(32, 0.5);
        let scene = SceneParameters::default();
        let sun = Sun::default();
        let water = WaterTexture::default();
        let ctx = ShadingContext {
            heights: &heights,
            scene: &scene,
            sun: &sun,
            water: &water,
            time: 1.5,
        };
        for i in 0..20 {
            let uv = Vec2::new(i as f32 / 20.0, 1.0 - i as f32 / 20.0);
            let c = shade(uv, uv * 512.0, &ctx);
            assert_eq!(c.w, 1.0);
            assert!(c.is_finite(), "{c}");
        }
    }

    #[test]
    fn test_dry_flat_pixel_is_biome_times_light() {
        // Flat land at 0.5: normal is straight up, no water, no occluders
        // above the surface, so only ambient + Lambert remain.
        let heights = plateau(16, 0.5);
        let scene = SceneParameters {
            terrain_variation: 0.0,
            ..Default::default()
        };
        let sun = Sun::at(0.5, 0.5, 2.0);
        let water = WaterTexture::default();
        let ctx = ShadingContext {
            heights: &heights,
            scene: &scene,
            sun: &sun,
            water: &water,
            time: 0.0,
        };
        let uv = Vec2::new(0.5, 0.5);
        let frag = Vec2::new(8.5, 8.5);
        let c = shade(uv, frag, &ctx);

        let base = classify_terrain(0.5, uv, frag, &scene);
        // Sun is directly overhead: lambert = 1.
        let light = scene.shadow_color() * 0.8 + sun.color;
        let expected = (base * light).extend(1.0);
        assert!(c.abs_diff_eq(expected, 1e-5), "{c} vs {expected}");
    }

    #[test]
    fn test_submerged_pixel_is_water_tinted() {
        let heights = plateau(16, 0.0);
        let scene = SceneParameters {
            foam_intensity: 0.0,
            ..Default::default()
        };
        let sun = Sun::default();
        let water = WaterTexture::default();
        let ctx = ShadingContext {
            heights: &heights,
            scene: &scene,
            sun: &sun,
            water: &water,
            time: 0.0,
        };
        let c = shade(Vec2::new(0.25, 0.75), Vec2::new(3.5, 12.5), &ctx);
        // Deep ratio 1 gives the ocean color; blue dominates red.
        assert!(c.z > c.x, "{c}");
        let sand = Biome::Sand.color(0.0);
        assert!(c.truncate() != sand);
    }

    #[test]
    fn test_to_rgba8_clamps() {
        assert_eq!(to_rgba8(Vec4::new(-1.0, 0.5, 2.0, 1.0)), [0, 128, 255, 255]);
        assert_eq!(to_rgba8(Vec4::ZERO), [0, 0, 0, 0]);
    }

    #[test]
    fn test_render_frame_matches_shade_and_flips_rows() {
        let mut heights = HeightField::new(8, 8);
        // Higher ground toward the top of the image.
        for y in 0..8 {
            for x in 0..8 {
                *heights.get_mut(x, y) = y as f32 / 8.0;
            }
        }
        let scene = SceneParameters::default();
        let sun = Sun::default();
        let water = WaterTexture::default();
        let ctx = ShadingContext {
            heights: &heights,
            scene: &scene,
            sun: &sun,
            water: &water,
            time: 0.25,
        };

        let (w, h) = (20, 40);
        let mut pixels = vec![0u8; w * h * 4];
        render_frame(&ctx, w, h, &mut pixels);

        for (row, col) in [(0usize, 0usize), (0, 19), (17, 5), (39, 0), (39, 19)] {
            let frag = Vec2::new(col as f32 + 0.5, (h - 1 - row) as f32 + 0.5);
            let uv = frag / Vec2::new(w as f32, h as f32);
            let expected = to_rgba8(shade(uv, frag, &ctx));
            let i = (row * w + col) * 4;
            assert_eq!(&pixels[i..i + 4], &expected, "pixel ({col},{row})");
        }
    }

    #[test]
    fn test_render_frame_ignores_mismatched_buffer() {
        let heights = plateau(4, 0.3);
        let scene = SceneParameters::default();
        let sun = Sun::default();
        let water = WaterTexture::default();
        let ctx = ShadingContext {
            heights: &heights,
            scene: &scene,
            sun: &sun,
            water: &water,
            time: 0.0,
        };
        let mut pixels = vec![7u8; 10];
        render_frame(&ctx, 4, 4, &mut pixels);
        assert!(pixels.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_sun_color_tints_direct_light() {
        let heights = plateau(8, 0.5);
        let scene = SceneParameters::default();
        let water = WaterTexture::default();
        let red_sun = Sun {
            position: Vec3::new(0.5, 2.0, 0.5),
            color: Vec3::new(1.0, 0.0, 0.0),
        };
        let ctx = ShadingContext {
            heights: &heights,
            scene: &scene,
            sun: &red_sun,
            water: &water,
            time: 0.0,
        };
        let c = shade(Vec2::splat(0.5), Vec2::splat(4.5), &ctx);
        let base = classify_terrain(0.5, Vec2::splat(0.5), Vec2::splat(4.5), &scene);
        // Green and blue only receive ambient light.
        assert!((c.y - base.y * scene.shadow_color()[1] * 0.8).abs() < 1e-5);
    }
}
