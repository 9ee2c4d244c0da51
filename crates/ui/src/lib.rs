use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod parameter_panel;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<parameter_panel::ParameterPanelVisible>()
            .add_systems(Startup, theme::apply_island_theme)
            .add_systems(
                Update,
                (
                    parameter_panel::panel_keybinds,
                    parameter_panel::parameter_panel_ui,
                )
                    .chain()
                    .before(terrain::TerrainSet::Input),
            );
    }
}
