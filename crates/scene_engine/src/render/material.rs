//! Surface material descriptions

use super::Color;

/// Standard (metal/rough) material parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color (albedo)
    pub color: Color,
    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metalness: f32,
    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
    /// Optional name for debugging
    pub name: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            name: None,
        }
    }
}

impl Material {
    /// Create a white, fully rough material
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base color
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the metallic factor (clamped to `[0, 1]`)
    #[must_use]
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness factor (clamped to `[0, 1]`)
    #[must_use]
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Set the material name for debugging
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_surface_factors() {
        let material = Material::new()
            .with_color(Color::from_hex(0x3498db))
            .with_metalness(1.5)
            .with_roughness(-0.2)
            .with_name("skin");
        assert_eq!(material.metalness, 1.0);
        assert_eq!(material.roughness, 0.0);
        assert_eq!(material.name.as_deref(), Some("skin"));
    }
}
