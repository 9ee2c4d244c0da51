//! Brush sculpting into the modification layer.
//!
//! A stamp raises or lowers every cell inside an open disk with linear
//! falloff. The intensity is modulated by a low-frequency sample of the shared
//! `NoiseField` so brush edges read as organic rather than perfectly round.
//! Stamps accumulate: holding the pointer still keeps sculpting, because the
//! editor stamps once per pointer sample and once more per frame while a
//! stroke is active.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{
    BRUSH_MODULATION_SCALE, BRUSH_MODULATION_STRENGTH, DEFAULT_BRUSH_INTENSITY,
    DEFAULT_BRUSH_RADIUS,
};
use crate::error::{check_positive, ParamError};
use crate::heightfield::{HeightField, ModificationLayer};
use crate::noise_field::NoiseField;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BrushMode {
    #[default]
    Add,
    Remove,
}

impl BrushMode {
    #[inline]
    fn sign(self) -> f32 {
        match self {
            BrushMode::Add => 1.0,
            BrushMode::Remove => -1.0,
        }
    }
}

/// One application of the brush at a grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStamp {
    pub center_x: i32,
    pub center_y: i32,
    pub radius: f32,
    pub intensity: f32,
    pub mode: BrushMode,
}

/// Summary of a stamp, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StampReport {
    /// Cells whose value was changed.
    pub cells_touched: usize,
}

/// Brush size and strength, adjusted from the UI.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushSettings {
    /// Radius in grid cells.
    pub radius: f32,
    /// Height change per stamp at the brush center (before modulation).
    pub intensity: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: DEFAULT_BRUSH_RADIUS,
            intensity: DEFAULT_BRUSH_INTENSITY,
        }
    }
}

impl BrushSettings {
    pub fn validate(&self) -> Result<(), ParamError> {
        check_positive("brush_radius", self.radius)?;
        if !self.intensity.is_finite() {
            return Err(ParamError::NotFinite {
                field: "brush_intensity",
                value: self.intensity,
            });
        }
        Ok(())
    }

    pub fn stamp_at(&self, grid_x: i32, grid_y: i32, mode: BrushMode) -> BrushStamp {
        BrushStamp {
            center_x: grid_x,
            center_y: grid_y,
            radius: self.radius,
            intensity: self.intensity,
            mode,
        }
    }
}

/// A pointer sample that should stamp once.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BrushStampEvent {
    pub grid_x: i32,
    pub grid_y: i32,
    pub mode: BrushMode,
}

/// Drag state owned by the input layer. While `active`, the editor stamps
/// at the last known position every frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ActiveStroke {
    pub active: bool,
    pub grid_x: i32,
    pub grid_y: i32,
    pub mode: BrushMode,
}

// ---------------------------------------------------------------------------
// Stamp application
// ---------------------------------------------------------------------------

/// Apply one stamp to `modification`.
///
/// Only the bounding box of the disk (clipped to the grid) is visited. Cells
/// at or beyond `radius` are untouched. There is no floor on `Remove`: the
/// layer may go arbitrarily negative and the compositor clamps at display
/// time.
pub fn apply_stamp(
    modification: &mut HeightField,
    noise: &NoiseField,
    stamp: &BrushStamp,
) -> StampReport {
    let mut report = StampReport::default();
    if !stamp.radius.is_finite() || stamp.radius <= 0.0 || modification.is_empty() {
        return report;
    }

    // A disk wider than the grid covers all of it; clamping keeps the
    // bounding box arithmetic in range for any finite radius.
    let grid_extent = modification.width.max(modification.height) as f32;
    let reach = stamp.radius.ceil().min(grid_extent) as i64;
    let cx = stamp.center_x as i64;
    let cy = stamp.center_y as i64;
    let max_x = modification.width as i64 - 1;
    let max_y = modification.height as i64 - 1;

    let start_x = (cx - reach).max(0);
    let end_x = (cx + reach).min(max_x);
    let start_y = (cy - reach).max(0);
    let end_y = (cy + reach).min(max_y);
    if start_x > end_x || start_y > end_y {
        return report;
    }

    let sign = stamp.mode.sign();
    for y in start_y..=end_y {
        for x in start_x..=end_x {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance >= stamp.radius {
                continue;
            }

            let falloff = 1.0 - distance / stamp.radius;
            let modulation = noise.sample(
                x as f32 / BRUSH_MODULATION_SCALE,
                y as f32 / BRUSH_MODULATION_SCALE,
            );
            let effective =
                stamp.intensity + stamp.intensity * modulation * BRUSH_MODULATION_STRENGTH;

            *modification.get_mut(x as usize, y as usize) += sign * effective * falloff;
            report.cells_touched += 1;
        }
    }
    report
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Stamp once per pointer sample, then once more if a stroke is held.
pub fn apply_brush_strokes(
    mut events: EventReader<BrushStampEvent>,
    stroke: Res<ActiveStroke>,
    settings: Res<BrushSettings>,
    noise: Res<NoiseField>,
    mut modification: ResMut<ModificationLayer>,
) {
    if let Err(err) = settings.validate() {
        if !events.is_empty() || stroke.active {
            warn!("Ignoring brush input: {err}");
        }
        events.clear();
        return;
    }

    for event in events.read() {
        let stamp = settings.stamp_at(event.grid_x, event.grid_y, event.mode);
        let report = apply_stamp(&mut modification, &noise, &stamp);
        trace!(
            "Stamp {:?} at ({}, {}) touched {} cells",
            stamp.mode,
            stamp.center_x,
            stamp.center_y,
            report.cells_touched
        );
    }

    if stroke.active {
        let stamp = settings.stamp_at(stroke.grid_x, stroke.grid_y, stroke.mode);
        apply_stamp(&mut modification, &noise, &stamp);
    }
}
