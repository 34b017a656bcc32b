//! Lighting system

use serde::{Deserialize, Serialize};

use super::Color;
use crate::config::{ensure, ConfigError};
use crate::foundation::math::Vec3;

/// Directional light (like sunlight), shining from `position` towards the origin
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light position
    pub position: Vec3,
    /// Light color
    pub color: Color,
    /// Light intensity
    pub intensity: f32,
}

impl Light {
    /// Create a directional light placed at `position` and aimed at the origin
    pub fn directional(position: Vec3, color: Color, intensity: f32) -> Self {
        Self { position, color, intensity }
    }
}

/// Lighting environment containing multiple lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightingEnvironment {
    /// List of lights in the scene
    pub lights: Vec<Light>,
    /// Ambient light color
    pub ambient_color: Color,
    /// Ambient light intensity
    pub ambient_intensity: f32,
}

impl Default for LightingEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl LightingEnvironment {
    /// Create a new empty lighting environment
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient_color: Color::WHITE,
            ambient_intensity: 0.0,
        }
    }

    /// Add a light to the environment
    #[must_use]
    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Set ambient lighting
    #[must_use]
    pub fn with_ambient(mut self, color: Color, intensity: f32) -> Self {
        self.ambient_color = color;
        self.ambient_intensity = intensity;
        self
    }

    /// Build the environment described by a [`LightingConfig`]
    pub fn from_config(config: &LightingConfig) -> Self {
        Self::new()
            .with_ambient(config.ambient_color, config.ambient_intensity)
            .add_light(Light::directional(
                config.directional_position,
                config.directional_color,
                config.directional_intensity,
            ))
    }
}

/// Ambient + key light settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Ambient light color
    pub ambient_color: Color,
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Directional light color
    pub directional_color: Color,
    /// Directional light intensity
    pub directional_intensity: f32,
    /// Directional light position (it shines towards the origin)
    pub directional_position: Vec3,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color::WHITE,
            ambient_intensity: 0.5,
            directional_color: Color::WHITE,
            directional_intensity: 1.0,
            directional_position: Vec3::new(2.0, 2.0, 2.0),
        }
    }
}

impl LightingConfig {
    /// Intensities must be non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.ambient_intensity >= 0.0 && self.directional_intensity >= 0.0, || {
            "light intensities must be non-negative".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_config_builds_ambient_plus_directional() {
        let env = LightingEnvironment::from_config(&LightingConfig::default());
        assert_relative_eq!(env.ambient_intensity, 0.5);
        assert_eq!(env.lights.len(), 1);
        assert_eq!(env.lights[0].position, Vec3::new(2.0, 2.0, 2.0));
        assert_relative_eq!(env.lights[0].intensity, 1.0);
    }
}
