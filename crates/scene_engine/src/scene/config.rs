//! Scene construction settings

use serde::{Deserialize, Serialize};

use crate::config::{ensure, ConfigError};
use crate::foundation::math::Vec3;
use crate::render::{Color, LightingConfig, MAX_SEGMENTS};

/// Which scene to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SceneVariant {
    /// A single spinning cube
    Cube,
    /// A spinning cube next to a spinning sphere
    CubeAndSphere,
    /// A composite humanoid figure turning in place
    #[default]
    Humanoid,
}

/// Surface finish shared by the primitive configs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Base color
    pub color: Color,
    /// Metallic factor in `[0, 1]`
    pub metalness: f32,
    /// Roughness factor in `[0, 1]`
    pub roughness: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

impl SurfaceConfig {
    fn validate(&self, owner: &str) -> Result<(), ConfigError> {
        ensure((0.0..=1.0).contains(&self.metalness) && (0.0..=1.0).contains(&self.roughness), || {
            format!("{owner}: metalness and roughness must be within [0, 1]")
        })
    }
}

/// Cube settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Edge length
    pub size: f32,
    /// Center position
    pub position: Vec3,
    /// Spin rates in radians per second
    pub spin: Vec3,
    /// Whether periodic recoloring applies
    pub recolor: bool,
    /// Surface finish
    pub surface: SurfaceConfig,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            size: 1.0,
            surface: SurfaceConfig {
                color: Color::from_hex(0x44aa88),
                metalness: 0.3,
                roughness: 0.4,
            },
            position: Vec3::new(0.0, 1.0, 0.0),
            spin: Vec3::new(0.5, 0.5, 0.0),
            recolor: true,
        }
    }
}

/// Sphere settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    /// Radius
    pub radius: f32,
    /// Segments around the equator
    pub width_segments: u32,
    /// Segments from pole to pole
    pub height_segments: u32,
    /// Center position
    pub position: Vec3,
    /// Spin rates in radians per second
    pub spin: Vec3,
    /// Whether periodic recoloring applies
    pub recolor: bool,
    /// Surface finish
    pub surface: SurfaceConfig,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 0.75,
            width_segments: 32,
            height_segments: 32,
            surface: SurfaceConfig {
                color: Color::from_hex(0xe74c3c),
                metalness: 0.5,
                roughness: 0.2,
            },
            position: Vec3::new(2.0, 1.0, 0.0),
            spin: Vec3::new(0.0, 0.5, 0.0),
            recolor: true,
        }
    }
}

/// Humanoid figure settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HumanoidConfig {
    /// Uniform scale applied to the whole figure (1.0 = about 1.95 units tall)
    pub scale: f32,
    /// Position of the figure's feet
    pub position: Vec3,
    /// Spin rates in radians per second
    pub spin: Vec3,
    /// Whether periodic recoloring applies
    pub recolor: bool,
    /// Surface finish shared by every body part
    pub surface: SurfaceConfig,
}

impl Default for HumanoidConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            surface: SurfaceConfig {
                color: Color::from_hex(0x3498db),
                metalness: 0.2,
                roughness: 0.8,
            },
            position: Vec3::zeros(),
            spin: Vec3::new(0.0, 0.5, 0.0),
            recolor: false,
        }
    }
}

/// Everything the scene builder needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Which objects to build
    pub variant: SceneVariant,
    /// Clear color
    pub background: Color,
    /// Ambient and key light
    pub lighting: LightingConfig,
    /// Cube settings (`Cube`, `CubeAndSphere`)
    pub cube: CubeConfig,
    /// Sphere settings (`CubeAndSphere`)
    pub sphere: SphereConfig,
    /// Humanoid settings (`Humanoid`)
    pub humanoid: HumanoidConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            variant: SceneVariant::default(),
            background: Color::from_hex(0x111111),
            lighting: LightingConfig::default(),
            cube: CubeConfig::default(),
            sphere: SphereConfig::default(),
            humanoid: HumanoidConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Check the settings of the objects the variant actually builds
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lighting.validate()?;
        let finite = |v: &Vec3| v.iter().all(|c| c.is_finite());

        if matches!(self.variant, SceneVariant::Cube | SceneVariant::CubeAndSphere) {
            let cube = &self.cube;
            ensure(cube.size.is_finite() && cube.size > 0.0, || format!("cube size must be positive, got {}", cube.size))?;
            ensure(finite(&cube.position) && finite(&cube.spin), || "cube position and spin must be finite".to_string())?;
            cube.surface.validate("cube")?;
        }
        if self.variant == SceneVariant::CubeAndSphere {
            let sphere = &self.sphere;
            ensure(sphere.radius.is_finite() && sphere.radius > 0.0, || {
                format!("sphere radius must be positive, got {}", sphere.radius)
            })?;
            ensure(
                (3..=MAX_SEGMENTS).contains(&sphere.width_segments)
                    && (2..=MAX_SEGMENTS).contains(&sphere.height_segments),
                || {
                    format!(
                        "sphere segments must be 3..={MAX_SEGMENTS} wide and 2..={MAX_SEGMENTS} high, got {}x{}",
                        sphere.width_segments, sphere.height_segments
                    )
                },
            )?;
            ensure(finite(&sphere.position) && finite(&sphere.spin), || "sphere position and spin must be finite".to_string())?;
            sphere.surface.validate("sphere")?;
        }
        if self.variant == SceneVariant::Humanoid {
            let humanoid = &self.humanoid;
            ensure(humanoid.scale.is_finite() && humanoid.scale > 0.0, || {
                format!("humanoid scale must be positive, got {}", humanoid.scale)
            })?;
            ensure(finite(&humanoid.position) && finite(&humanoid.spin), || {
                "humanoid position and spin must be finite".to_string()
            })?;
            humanoid.surface.validate("humanoid")?;
        }
        Ok(())
    }
}
