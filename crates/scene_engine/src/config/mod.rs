//! Configuration system
//!
//! Every configuration type can be read from and written to `.toml` or `.ron`
//! files through the [`Config`] trait. [`ViewerConfig`] gathers the settings of
//! each subsystem into one document.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::animation::AnimationConfig;
use crate::controls::ControlsConfig;
use crate::render::CameraConfig;
use crate::scene::SceneConfig;
use crate::viewport::ViewportConfig;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside the range the scene can be built with
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete viewer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// What to build and how to light it
    pub scene: SceneConfig,
    /// Initial camera placement and projection
    pub camera: CameraConfig,
    /// Orbit control tuning
    pub controls: ControlsConfig,
    /// Per-frame animation settings
    pub animation: AnimationConfig,
    /// Output surface sizing
    pub viewport: ViewportConfig,
}

impl Config for ViewerConfig {}

impl ViewerConfig {
    /// Load and validate a viewer configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every subsystem's settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate()?;
        self.camera.validate()?;
        self.controls.validate()?;
        self.animation.validate()?;
        self.viewport.validate()
    }
}

/// Shorthand for building an [`ConfigError::Invalid`] when `condition` fails
pub(crate) fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), ConfigError> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message()))
    }
}
