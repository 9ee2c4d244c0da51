//! Parameter panel: sliders for every terrain, scene, brush and sun tunable.
//!
//! Provides an egui window with sections:
//! - Terrain (noise octaves, scale, persistence, lacunarity, zoom, curve)
//! - Biomes (band levels, slope, variation)
//! - Shadows, Water, Lighting
//! - Brush (size, intensity)
//! - Keybind (Tab) to toggle the panel

use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::egui_input_guard::egui_wants_keyboard;
use rendering::{SceneParameters, Sun};
use terrain::{BrushSettings, NoiseParameters};

// =============================================================================
// Slider ranges
// =============================================================================

pub(crate) const OCTAVES: RangeInclusive<u32> = 1..=8;
pub(crate) const SCALE: RangeInclusive<f32> = 0.1..=5.0;
pub(crate) const PERSISTENCE: RangeInclusive<f32> = 0.05..=1.0;
pub(crate) const LACUNARITY: RangeInclusive<f32> = 1.0..=4.0;
pub(crate) const ZOOM: RangeInclusive<f32> = 0.5..=20.0;
pub(crate) const GRADIENT_CURVE: RangeInclusive<f32> = 0.1..=3.0;

pub(crate) const UNIT: RangeInclusive<f32> = 0.0..=1.0;
pub(crate) const TERRAIN_VARIATION: RangeInclusive<f32> = 0.0..=0.1;
pub(crate) const BIOME_FREQ: RangeInclusive<f32> = 1.0..=400.0;

pub(crate) const SHADOW_INTENSITY: RangeInclusive<f32> = 0.01..=2.0;
pub(crate) const SHADOW_STEPS: RangeInclusive<u32> = 0..=500;
pub(crate) const SHADOW_PENUMBRA: RangeInclusive<f32> = 0.001..=0.1;
pub(crate) const SHADOW_STEP_SIZE: RangeInclusive<f32> = 0.001..=0.05;

pub(crate) const WAVE_AMPLITUDE: RangeInclusive<f32> = 0.0..=0.01;
pub(crate) const WAVE_FREQUENCY: RangeInclusive<f32> = 0.5..=32.0;
pub(crate) const WAVE_SPEED: RangeInclusive<f32> = 0.0..=0.1;
pub(crate) const WAVE_ANGLE: RangeInclusive<f32> = 0.0..=TAU;
pub(crate) const FOAM_SPEED: RangeInclusive<f32> = 0.0..=20.0;
pub(crate) const FOAM_FREQUENCY: RangeInclusive<f32> = 0.0..=1000.0;

pub(crate) const SUN_HEIGHT: RangeInclusive<f32> = 0.1..=5.0;
pub(crate) const SPECULAR_POWER: RangeInclusive<f32> = 1.0..=256.0;
pub(crate) const SPECULAR_INTENSITY: RangeInclusive<f32> = 0.0..=2.0;

pub(crate) const BRUSH_SIZE: RangeInclusive<f32> = 1.0..=150.0;
pub(crate) const BRUSH_INTENSITY: RangeInclusive<f32> = 0.001..=0.05;

// =============================================================================
// Resources
// =============================================================================

/// Whether the parameter panel is visible.
#[derive(Resource)]
pub struct ParameterPanelVisible(pub bool);

impl Default for ParameterPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

// =============================================================================
// Systems
// =============================================================================

/// Renders the parameter window.
///
/// Every section edits a copy and writes it back with `set_if_neq`, so an
/// untouched `NoiseParameters` never triggers a regeneration.
pub fn parameter_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<ParameterPanelVisible>,
    mut noise: ResMut<NoiseParameters>,
    mut scene: ResMut<SceneParameters>,
    mut brush: ResMut<BrushSettings>,
    mut sun: ResMut<Sun>,
) {
    if !visible.0 {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    let mut noise_edit = *noise;
    let mut scene_edit = *scene;
    let mut brush_edit = *brush;
    let mut sun_height = sun.position.y;

    let mut open = true;
    egui::Window::new("Island")
        .open(&mut open)
        .resizable(false)
        .default_width(300.0)
        .default_pos(egui::pos2(12.0, 12.0))
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                terrain_section(ui, &mut noise_edit);
                biome_section(ui, &mut scene_edit);
                shadow_section(ui, &mut scene_edit);
                water_section(ui, &mut scene_edit);
                lighting_section(ui, &mut scene_edit, &mut sun_height);
                brush_section(ui, &mut brush_edit);
                ui.separator();
                ui.weak("Left drag: raise  |  Middle/Right drag: lower");
                ui.weak("Tab: hide panel  |  F12: screenshot");
            });
        });

    noise.set_if_neq(noise_edit);
    scene.set_if_neq(scene_edit);
    brush.set_if_neq(brush_edit);
    if sun.position.y != sun_height {
        sun.set_height(sun_height);
    }
    if !open {
        visible.0 = false;
    }
}

/// Tab shows or hides the panel.
pub fn panel_keybinds(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut visible: ResMut<ParameterPanelVisible>,
) {
    if keys.just_pressed(KeyCode::Tab) && !egui_wants_keyboard(&mut contexts) {
        visible.0 = !visible.0;
    }
}

// =============================================================================
// Sections
// =============================================================================

fn slider(
    ui: &mut egui::Ui,
    value: &mut f32,
    range: RangeInclusive<f32>,
    label: &str,
    decimals: usize,
) {
    ui.add(
        egui::Slider::new(value, range)
            .text(label)
            .fixed_decimals(decimals),
    );
}

fn terrain_section(ui: &mut egui::Ui, noise: &mut NoiseParameters) {
    egui::CollapsingHeader::new("Terrain")
        .default_open(true)
        .show(ui, |ui| {
            ui.add(egui::Slider::new(&mut noise.octaves, OCTAVES).text("Octaves"));
            slider(ui, &mut noise.scale, SCALE, "Scale", 2);
            slider(ui, &mut noise.persistence, PERSISTENCE, "Persistence", 2);
            slider(ui, &mut noise.lacunarity, LACUNARITY, "Lacunarity", 2);
            slider(ui, &mut noise.zoom, ZOOM, "Noise zoom", 2);
            slider(ui, &mut noise.gradient_curve, GRADIENT_CURVE, "Gradient curve", 2);
        });
}

fn biome_section(ui: &mut egui::Ui, scene: &mut SceneParameters) {
    egui::CollapsingHeader::new("Biomes").show(ui, |ui| {
        slider(ui, &mut scene.water_level, UNIT, "Water level", 2);
        slider(ui, &mut scene.sand_level, UNIT, "Sand level", 2);
        slider(ui, &mut scene.grass_level, UNIT, "Grass level", 2);
        slider(ui, &mut scene.forest_level, UNIT, "Forest level", 2);
        slider(ui, &mut scene.rock_level, UNIT, "Rock level", 2);
        slider(ui, &mut scene.slope_start, UNIT, "Slope start", 2);
        slider(ui, &mut scene.terrain_variation, TERRAIN_VARIATION, "Variation", 3);
        slider(ui, &mut scene.biome_freq1, BIOME_FREQ, "Biome freq 1", 0);
        slider(ui, &mut scene.biome_freq2, BIOME_FREQ, "Biome freq 2", 0);
    });
}

fn shadow_section(ui: &mut egui::Ui, scene: &mut SceneParameters) {
    egui::CollapsingHeader::new("Shadows").show(ui, |ui| {
        slider(ui, &mut scene.shadow_intensity, SHADOW_INTENSITY, "Intensity", 2);
        ui.add(egui::Slider::new(&mut scene.shadow_steps, SHADOW_STEPS).text("Steps"));
        slider(ui, &mut scene.shadow_penumbra, SHADOW_PENUMBRA, "Penumbra", 3);
        slider(ui, &mut scene.shadow_step_size, SHADOW_STEP_SIZE, "Step size", 3);
        let [r, g, b] = &mut scene.shadow_color;
        slider(ui, r, UNIT, "Tint R", 2);
        slider(ui, g, UNIT, "Tint G", 2);
        slider(ui, b, UNIT, "Tint B", 2);
    });
}

fn water_section(ui: &mut egui::Ui, scene: &mut SceneParameters) {
    egui::CollapsingHeader::new("Water").show(ui, |ui| {
        slider(ui, &mut scene.wave_amplitude, WAVE_AMPLITUDE, "Wave amplitude", 4);
        slider(ui, &mut scene.wave_frequency, WAVE_FREQUENCY, "Wave frequency", 2);
        slider(ui, &mut scene.wave_speed, WAVE_SPEED, "Wave speed", 3);
        slider(ui, &mut scene.wave_angle, WAVE_ANGLE, "Wave angle", 2);
        slider(ui, &mut scene.foam_speed, FOAM_SPEED, "Foam speed", 2);
        slider(ui, &mut scene.foam_frequency, FOAM_FREQUENCY, "Foam frequency", 0);
        slider(ui, &mut scene.foam_intensity, UNIT, "Foam intensity", 2);
    });
}

fn lighting_section(ui: &mut egui::Ui, scene: &mut SceneParameters, sun_height: &mut f32) {
    egui::CollapsingHeader::new("Lighting").show(ui, |ui| {
        slider(ui, sun_height, SUN_HEIGHT, "Sun height", 2);
        slider(ui, &mut scene.specular_power, SPECULAR_POWER, "Specular power", 0);
        slider(ui, &mut scene.specular_intensity, SPECULAR_INTENSITY, "Specular intensity", 2);
    });
}

fn brush_section(ui: &mut egui::Ui, brush: &mut BrushSettings) {
    egui::CollapsingHeader::new("Brush")
        .default_open(true)
        .show(ui, |ui| {
            slider(ui, &mut brush.radius, BRUSH_SIZE, "Size", 0);
            slider(ui, &mut brush.intensity, BRUSH_INTENSITY, "Intensity", 3);
        });
}
