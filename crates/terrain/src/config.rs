pub const GRID_WIDTH: usize = 512;
pub const GRID_HEIGHT: usize = 512;

/// Spatial frequency applied to normalized grid coordinates before the
/// first octave is sampled.
pub const DEFAULT_NOISE_ZOOM: f32 = 5.0;
/// Exponent that biases the elevation curve before the radial mask is
/// subtracted.
pub const DEFAULT_GRADIENT_CURVE: f32 = 0.8;

pub const DEFAULT_OCTAVES: u32 = 4;
pub const DEFAULT_SCALE: f32 = 1.6;
pub const DEFAULT_PERSISTENCE: f32 = 0.5;
pub const DEFAULT_LACUNARITY: f32 = 2.0;

/// Upper bound on octaves accepted at the parameter boundary.
pub const MAX_OCTAVES: u32 = 16;

/// Grid cells per noise unit for the brush edge modulation texture.
pub const BRUSH_MODULATION_SCALE: f32 = 50.0;
/// How strongly the modulation texture bends the brush intensity.
pub const BRUSH_MODULATION_STRENGTH: f32 = 0.5;

pub const DEFAULT_BRUSH_RADIUS: f32 = 50.0;
pub const DEFAULT_BRUSH_INTENSITY: f32 = 0.005;

/// Composite heights are clamped into this range before shading.
pub const MIN_HEIGHT: f32 = 0.0;
pub const MAX_HEIGHT: f32 = 1.0;
