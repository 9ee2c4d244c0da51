//! Pointer translation into sun movement and brush events.
//!
//! Screen positions are normalized with `y` flipped so that `(0, 0)` is the
//! bottom-left of the window, matching terrain `uv` space. Grid cells are
//! `floor(n * size)` clamped to the grid.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use terrain::config::{GRID_HEIGHT, GRID_WIDTH};
use terrain::{ActiveStroke, BrushMode, BrushStampEvent, TerrainSet};

use crate::egui_input_guard::egui_wants_pointer;
use crate::sun::Sun;

pub struct TerrainInputPlugin;

impl Plugin for TerrainInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            handle_pointer.in_set(TerrainSet::Input),
        );
    }
}

// ---------------------------------------------------------------------------
// Coordinate mapping
// ---------------------------------------------------------------------------

/// Window cursor position (origin top-left, in logical pixels) to normalized
/// terrain coordinates with `y` pointing up. `None` for a degenerate window.
pub fn normalized_cursor(cursor: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / window_size.x,
        1.0 - cursor.y / window_size.y,
    ))
}

/// Normalized coordinates to a grid cell, clamped into the grid.
pub fn grid_cell(normalized: Vec2, width: usize, height: usize) -> (i32, i32) {
    let max_x = width.saturating_sub(1) as f32;
    let max_y = height.saturating_sub(1) as f32;
    let x = (normalized.x * width as f32).floor().clamp(0.0, max_x);
    let y = (normalized.y * height as f32).floor().clamp(0.0, max_y);
    (x as i32, y as i32)
}

/// Left mouse raises terrain; middle or right lowers it.
pub fn brush_mode_for(button: MouseButton) -> Option<BrushMode> {
    match button {
        MouseButton::Left => Some(BrushMode::Add),
        MouseButton::Middle | MouseButton::Right => Some(BrushMode::Remove),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Move the sun with the cursor, start and stop strokes, and stamp on every
/// pointer sample while a stroke is held.
fn handle_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut moved: EventReader<CursorMoved>,
    mut contexts: EguiContexts,
    mut sun: ResMut<Sun>,
    mut stroke: ResMut<ActiveStroke>,
    mut stamps: EventWriter<BrushStampEvent>,
) {
    let cursor_moved = moved.read().count() > 0;

    // Releasing ends the stroke even over the panel.
    if stroke.active && brush_mode_for_held(&buttons).is_none() {
        stroke.active = false;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some(n) = normalized_cursor(cursor, window.size()) else {
        return;
    };
    if egui_wants_pointer(&mut contexts) {
        return;
    }

    if cursor_moved {
        sun.follow(n.x, n.y);
    }

    let (grid_x, grid_y) = grid_cell(n, GRID_WIDTH, GRID_HEIGHT);
    let pressed = buttons.get_just_pressed().find_map(|&b| brush_mode_for(b));

    if let Some(mode) = pressed {
        *stroke = ActiveStroke {
            active: true,
            grid_x,
            grid_y,
            mode,
        };
        stamps.send(BrushStampEvent {
            grid_x,
            grid_y,
            mode,
        });
        return;
    }

    if stroke.active && cursor_moved {
        stroke.grid_x = grid_x;
        stroke.grid_y = grid_y;
        stamps.send(BrushStampEvent {
            grid_x,
            grid_y,
            mode: stroke.mode,
        });
    }
}

/// Mode of any sculpting button still held down.
fn brush_mode_for_held(buttons: &ButtonInput<MouseButton>) -> Option<BrushMode> {
    buttons.get_pressed().find_map(|&b| brush_mode_for(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_cursor_flips_y() {
        let size = Vec2::new(1024.0, 512.0);
        assert_eq!(normalized_cursor(Vec2::ZERO, size), Some(Vec2::new(0.0, 1.0)));
        assert_eq!(
            normalized_cursor(Vec2::new(512.0, 512.0), size),
            Some(Vec2::new(0.5, 0.0))
        );
        assert_eq!(normalized_cursor(Vec2::ONE, Vec2::ZERO), None);
    }

    #[test]
    fn test_grid_cell_floors() {
        assert_eq!(grid_cell(Vec2::new(0.5, 0.25), 512, 512), (256, 128));
        assert_eq!(grid_cell(Vec2::new(0.0019, 0.0), 512, 512), (0, 0));
    }

    #[test]
    fn test_grid_cell_clamps_to_grid() {
        assert_eq!(grid_cell(Vec2::new(1.0, 1.0), 512, 512), (511, 511));
        assert_eq!(grid_cell(Vec2::new(-0.3, 2.0), 512, 512), (0, 511));
    }

    #[test]
    fn test_top_left_corner_maps_to_top_row() {
        let n = normalized_cursor(Vec2::new(0.0, 0.0), Vec2::new(800.0, 800.0)).unwrap();
        assert_eq!(grid_cell(n, 512, 512), (0, 511));
    }

    #[test]
    fn test_button_modes() {
        assert_eq!(brush_mode_for(MouseButton::Left), Some(BrushMode::Add));
        assert_eq!(brush_mode_for(MouseButton::Middle), Some(BrushMode::Remove));
        assert_eq!(brush_mode_for(MouseButton::Right), Some(BrushMode::Remove));
        assert_eq!(brush_mode_for(MouseButton::Back), None);
    }
}
