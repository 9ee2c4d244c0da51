// ---------------------------------------------------------------------------
// ParamError: validation failures for externally owned parameter structs
// ---------------------------------------------------------------------------

use thiserror::Error;

/// A parameter that failed validation at the configuration boundary.
///
/// Parameter structs are mutated by sliders and config files, so they are
/// checked before they reach the synthesizer or the shading pipeline. The
/// owning system logs the error and continues with sanitized values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Value is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    /// Value falls outside the accepted range.
    #[error("{field} = {value} is outside {expected}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
    /// Two related values are in the wrong order.
    #[error("{lower} ({lower_value}) must not exceed {upper} ({upper_value})")]
    Misordered {
        lower: &'static str,
        lower_value: f32,
        upper: &'static str,
        upper_value: f32,
    },
}

impl ParamError {
    /// Name of the offending field (the lower one for ordering errors).
    pub fn field(&self) -> &'static str {
        match self {
            ParamError::NotFinite { field, .. } | ParamError::OutOfRange { field, .. } => field,
            ParamError::Misordered { lower, .. } => lower,
        }
    }
}

/// Check that `value` is finite and inside `[min, max]`.
pub fn check_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
    expected: &'static str,
) -> Result<(), ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { field, value });
    }
    if value < min || value > max {
        return Err(ParamError::OutOfRange {
            field,
            value,
            expected,
        });
    }
    Ok(())
}

/// Check that `value` is finite and strictly greater than zero.
pub fn check_positive(field: &'static str, value: f32) -> Result<(), ParamError> {
    if !value.is_finite() {
        return Err(ParamError::NotFinite { field, value });
    }
    if value <= 0.0 {
        return Err(ParamError::OutOfRange {
            field,
            value,
            expected: "(0, inf)",
        });
    }
    Ok(())
}
