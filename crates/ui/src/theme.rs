use bevy_egui::{egui, EguiContexts};

/// Sea-toned fill at partial opacity, so the island shows through the panel.
const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(14, 33, 41, 200);

pub fn apply_island_theme(mut contexts: EguiContexts) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = PANEL_FILL;
    visuals.window_shadow = egui::Shadow::NONE;
    ctx.set_visuals(visuals);
}
