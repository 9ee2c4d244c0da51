//! Island heightfield core: noise synthesis, brush editing and the per-frame
//! composite consumed by the renderer.

use bevy::prelude::*;

pub mod compositing;
pub mod config;
pub mod editing;
pub mod error;
pub mod heightfield;
pub mod noise_field;
pub mod params;
pub mod synthesis;

pub use editing::{ActiveStroke, BrushMode, BrushSettings, BrushStamp, BrushStampEvent};
pub use error::ParamError;
pub use heightfield::{BaseHeightField, CompositeHeightField, HeightField, ModificationLayer};
pub use noise_field::NoiseField;
pub use params::NoiseParameters;

// ---------------------------------------------------------------------------
// Frame phases
// ---------------------------------------------------------------------------

/// Ordered per-frame phases in the `Update` schedule.
///
/// ```text
/// Input  →  Regenerate  →  Edit  →  Composite  →  Shade
/// ```
///
/// The modification layer is only written during `Edit` and only read during
/// `Composite`, so the composite always sees a complete frame of edits. The
/// renderer places its shading system in `Shade`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainSet {
    /// Pointer and keyboard translation into brush events and parameters.
    Input,
    /// Base field rebuild on parameter change.
    Regenerate,
    /// Brush stamps.
    Edit,
    /// Base + modification merge.
    Composite,
    /// Per-pixel shading of the composite.
    Shade,
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NoiseField>()
            .init_resource::<NoiseParameters>()
            .init_resource::<BrushSettings>()
            .init_resource::<ActiveStroke>()
            .init_resource::<BaseHeightField>()
            .init_resource::<ModificationLayer>()
            .init_resource::<CompositeHeightField>()
            .add_event::<BrushStampEvent>()
            .configure_sets(
                Update,
                (
                    TerrainSet::Input,
                    TerrainSet::Regenerate,
                    TerrainSet::Edit,
                    TerrainSet::Composite,
                    TerrainSet::Shade,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                synthesis::regenerate_base_on_change.in_set(TerrainSet::Regenerate),
            )
            .add_systems(
                Update,
                editing::apply_brush_strokes.in_set(TerrainSet::Edit),
            )
            .add_systems(
                Update,
                compositing::composite_layers.in_set(TerrainSet::Composite),
            );
    }
}
