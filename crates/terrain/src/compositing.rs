//! Per-frame merge of the base and modification layers.

use bevy::prelude::*;

use crate::config::{MAX_HEIGHT, MIN_HEIGHT};
use crate::heightfield::{BaseHeightField, CompositeHeightField, HeightField, ModificationLayer};

/// `clamp(base + modification, 0, 1)` for one cell. NaN maps to the floor.
#[inline]
pub fn composite_cell(base: f32, modification: f32) -> f32 {
    let sum = base + modification;
    if sum.is_nan() {
        return MIN_HEIGHT;
    }
    sum.clamp(MIN_HEIGHT, MAX_HEIGHT)
}

/// Allocate and return the composite of two equally sized fields.
pub fn composite(base: &HeightField, modification: &HeightField) -> HeightField {
    let mut out = HeightField::new(base.width, base.height);
    composite_into(base, modification, &mut out);
    out
}

/// Hot-loop variant writing into a preallocated field.
///
/// Mismatched sizes are resolved by resizing `out` to `base`; cells missing
/// from `modification` count as zero.
pub fn composite_into(base: &HeightField, modification: &HeightField, out: &mut HeightField) {
    if !out.same_size(base) {
        *out = HeightField::new(base.width, base.height);
    }
    if base.same_size(modification) {
        for ((o, &b), &m) in out
            .values
            .iter_mut()
            .zip(&base.values)
            .zip(&modification.values)
        {
            *o = composite_cell(b, m);
        }
    } else {
        for (i, (o, &b)) in out.values.iter_mut().zip(&base.values).enumerate() {
            let m = modification.values.get(i).copied().unwrap_or(0.0);
            *o = composite_cell(b, m);
        }
    }
}

/// Rebuild the composite field. Runs every frame after editing.
pub fn composite_layers(
    base: Res<BaseHeightField>,
    modification: Res<ModificationLayer>,
    mut composite: ResMut<CompositeHeightField>,
) {
    composite_into(&base, &modification, &mut composite);
}
