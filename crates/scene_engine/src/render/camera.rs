//! # 3D Camera System
//!
//! Perspective camera state shared by the viewport adapter (aspect ratio),
//! the orbit controls (position and target) and the output surface (matrices).
//!
//! ## Design Principles
//! - **Library-agnostic**: No surface-specific types in camera math
//! - **Explicit mutation**: Only the viewport and the controls write to it
//! - **Right-handed, Y-up**: Matches the scene's world coordinates

use serde::{Deserialize, Serialize};

use crate::config::{ensure, ConfigError};
use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// 3D perspective camera
///
/// Represents a camera in 3D space with position, look-at target and
/// projection parameters.
///
/// # Coordinate System
/// Standard right-handed Y-up coordinates:
/// - X+ = Right
/// - Y+ = Up
/// - Z+ = Towards the viewer
///
/// # Performance Notes
/// Matrices are computed on demand. The scene has a single camera and a
/// handful of objects, so caching is not worth the invalidation bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height) for projection calculations
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera with standard Y-up orientation
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees (converted to radians internally)
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// # Example
    /// ```rust
    /// use scene_engine::foundation::math::Vec3;
    /// use scene_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(
    ///     Vec3::new(0.0, 2.0, 5.0),  // 5 units back, 2 up
    ///     75.0,                       // 75-degree field of view
    ///     16.0 / 9.0,                 // Widescreen aspect ratio
    ///     0.1,
    ///     1000.0,
    /// );
    /// assert_eq!(camera.target, Vec3::zeros());
    /// ```
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Build a camera from configuration for a viewport of the given aspect ratio
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self::perspective(config.position, config.fov_degrees, aspect, config.near, config.far);
        camera.set_target(config.target);
        camera
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Update camera aspect ratio for viewport changes
    ///
    /// Only logs changes larger than 0.01 to keep resize storms quiet; the
    /// value itself is always stored exactly.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Distance between the camera and its target
    pub fn distance_to_target(&self) -> f32 {
        (self.position - self.target).magnitude()
    }

    /// World-to-camera transformation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(self.position), &Point3::from(self.target), &self.up)
    }

    /// Perspective projection using the current aspect ratio
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined `projection * view` matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

/// Initial camera placement and projection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Starting position
    pub position: Vec3,
    /// Look-at point (also the orbit pivot)
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 2.0, 5.0),
            target: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl CameraConfig {
    /// Check projection parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.fov_degrees > 0.0 && self.fov_degrees < 180.0, || {
            format!("camera fov must be in (0, 180) degrees, got {}", self.fov_degrees)
        })?;
        ensure(self.near > 0.0 && self.near < self.far, || {
            format!("camera planes must satisfy 0 < near < far, got near={} far={}", self.near, self.far)
        })?;
        ensure(self.position != self.target, || "camera position and target must differ".to_string())
    }
}
