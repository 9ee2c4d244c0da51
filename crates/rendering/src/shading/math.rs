//! Scalar helpers with shader semantics.

/// `x - floor(x)`, always in `[0, 1)` for finite input.
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Hermite interpolation between two edges, clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// `clamp(1 - (1 - x)^factor, 0, 1)`.
#[inline]
pub fn ease_out(x: f32, factor: f32) -> f32 {
    (1.0 - (1.0 - x).powf(factor)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fract_negative() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert_eq!(fract(3.0), 0.0);
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
    }

    #[test]
    fn test_ease_out() {
        assert_eq!(ease_out(0.0, 2.0), 0.0);
        assert_eq!(ease_out(1.0, 2.0), 1.0);
        assert!((ease_out(0.5, 2.0) - 0.75).abs() < 1e-6);
        // Ratios above one clamp instead of overshooting.
        assert_eq!(ease_out(3.0, 1.0), 1.0);
    }
}
