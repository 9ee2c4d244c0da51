// ---------------------------------------------------------------------------
// Startup configuration file
// ---------------------------------------------------------------------------
//
// An optional JSON document overriding the default resources. Every section
// is optional; missing fields fall back to the defaults of the matching
// resource.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use rendering::display::DisplaySettings;
use rendering::sun::DEFAULT_SUN_HEIGHT;
use rendering::{SceneParameters, Sun};
use terrain::{BrushSettings, NoiseField, NoiseParameters, ParamError};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "ISLAND_CONFIG";

/// File read from the working directory when the variable is unset.
pub const DEFAULT_CONFIG_PATH: &str = "island.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandConfig {
    /// Noise seed; `None` draws one from entropy.
    pub seed: Option<i32>,
    pub noise: NoiseParameters,
    pub scene: SceneParameters,
    pub brush: BrushSettings,
    pub sun_height: f32,
    pub display: DisplaySettings,
}

impl Default for IslandConfig {
    fn default() -> Self {
        Self {
            seed: None,
            noise: NoiseParameters::default(),
            scene: SceneParameters::default(),
            brush: BrushSettings::default(),
            sun_height: DEFAULT_SUN_HEIGHT,
            display: DisplaySettings::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl IslandConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// First failing check across every section.
    pub fn validate(&self) -> Result<(), ParamError> {
        self.noise.validate()?;
        self.scene.validate()?;
        self.brush.validate()?;
        terrain::error::check_positive("sun_height", self.sun_height)?;
        if self.display.width == 0 || self.display.height == 0 {
            return Err(ParamError::OutOfRange {
                field: "display",
                value: self.display.width.min(self.display.height) as f32,
                expected: "a non-empty resolution",
            });
        }
        Ok(())
    }

    /// Copy with every section clamped into range.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let brush = match self.brush.validate() {
            Ok(()) => self.brush,
            Err(_) => defaults.brush,
        };
        let sun_height = if self.sun_height.is_finite() && self.sun_height > 0.0 {
            self.sun_height
        } else {
            defaults.sun_height
        };
        let display = DisplaySettings {
            width: self.display.width.max(1),
            height: self.display.height.max(1),
        };
        Self {
            seed: self.seed,
            noise: self.noise.sanitized(),
            scene: self.scene.sanitized(),
            brush,
            sun_height,
            display,
        }
    }

    /// Insert the configured resources into `app`.
    pub fn insert_into(&self, app: &mut App) {
        let field = match self.seed {
            Some(seed) => NoiseField::new(seed),
            None => NoiseField::from_entropy(),
        };
        app.insert_resource(field)
            .insert_resource(self.noise)
            .insert_resource(self.scene)
            .insert_resource(self.brush)
            .insert_resource(Sun::at(0.5, 0.5, self.sun_height))
            .insert_resource(self.display);
    }
}

/// Config path and whether it was named explicitly.
fn config_path() -> (PathBuf, bool) {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => (PathBuf::from(path), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    }
}

/// Read the config for this run. A missing default file is not an error;
/// a missing file named by the environment variable is.
pub fn resolve_config(path: &Path, explicit: bool) -> Result<Option<IslandConfig>, ConfigError> {
    if !explicit && !path.exists() {
        return Ok(None);
    }
    IslandConfig::load(path).map(Some)
}

/// Validated form of `config`, sanitized when any section is out of range.
pub fn checked(config: IslandConfig, path: &Path) -> IslandConfig {
    match config.validate() {
        Ok(()) => config,
        Err(err) => {
            warn!("{}: {err}; using sanitized values", path.display());
            config.sanitized()
        }
    }
}

/// Load the config file, if any, and insert its resources. Unreadable files
/// fall back to the defaults.
pub fn apply_startup_config(app: &mut App) {
    let (path, explicit) = config_path();
    match resolve_config(&path, explicit) {
        Ok(Some(config)) => {
            info!("Loaded config from {}", path.display());
            checked(config, &path).insert_into(app);
        }
        Ok(None) => {}
        Err(err) => warn!("{err}; using defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "island_config_{}_{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = IslandConfig::from_json(Path::new("mem"), "{}").unwrap();
        assert_eq!(config, IslandConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let json = r#"{ "seed": 42, "noise": { "octaves": 6 }, "brush": { "radius": 12.0 } }"#;
        let config = IslandConfig::from_json(Path::new("mem"), json).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.noise.octaves, 6);
        assert_eq!(config.noise.scale, NoiseParameters::default().scale);
        assert_eq!(config.brush.radius, 12.0);
        assert_eq!(config.brush.intensity, BrushSettings::default().intensity);
        assert_eq!(config.scene, SceneParameters::default());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = IslandConfig::from_json(Path::new("bad.json"), "{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_missing_default_file_is_silent() {
        let path = std::env::temp_dir().join("island_config_does_not_exist.json");
        assert!(resolve_config(&path, false).unwrap().is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let path = std::env::temp_dir().join("island_config_does_not_exist_either.json");
        let err = resolve_config(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_out_of_range_value_is_rejected_then_sanitized() {
        let path = temp_config("octaves", r#"{ "noise": { "octaves": 99 } }"#);
        let config = resolve_config(&path, true).unwrap().unwrap();
        assert_eq!(config.validate().unwrap_err().field(), "octaves");

        let config = checked(config, &path);
        assert!(config.validate().is_ok());
        assert_eq!(config.noise.octaves, terrain::config::MAX_OCTAVES);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_valid_file_round_trips_through_disk() {
        let path = temp_config("valid", r#"{ "seed": 7, "sun_height": 3.5 }"#);
        let config = resolve_config(&path, true).unwrap().unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.sun_height, 3.5);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_insert_into_overrides_plugin_defaults() {
        let config = IslandConfig {
            seed: Some(11),
            sun_height: 4.0,
            ..Default::default()
        };
        let mut app = App::new();
        config.insert_into(&mut app);
        app.init_resource::<Sun>();

        let world = app.world();
        assert_eq!(world.resource::<NoiseField>().seed(), 11);
        assert_eq!(world.resource::<Sun>().position.y, 4.0);
    }
}
