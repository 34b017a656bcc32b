//! Orbit camera controller
//!
//! Pointer drags orbit the camera around a fixed look-at target and wheel
//! steps move it closer or further away. Input only moves a spherical goal;
//! [`OrbitControls::update`] moves the camera towards that goal once per
//! frame, so motion eases out instead of jumping.

use serde::{Deserialize, Serialize};

use crate::config::{ensure, ConfigError};
use crate::foundation::math::{constants::PI, constants::TAU, utils, Vec3};
use crate::render::Camera;

/// Keeps the polar angle away from the poles, where the view direction
/// would be parallel to the up vector
const POLAR_EPSILON: f32 = 1e-4;

/// Base per-step dolly scale
const DOLLY_BASE: f32 = 0.95;

/// Steps shorter than this are not reported as movement
const MOVE_EPSILON: f32 = 1e-6;

/// Orbit controller settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Ease towards the goal instead of snapping
    pub enable_damping: bool,
    /// Fraction of the remaining distance covered each frame, in `[0, 1)`
    pub damping_factor: f32,
    /// Multiplier for drag rotation
    pub rotate_speed: f32,
    /// Exponent applied to the per-step dolly scale
    pub zoom_speed: f32,
    /// Closest allowed distance to the target
    pub min_distance: f32,
    /// Furthest allowed distance from the target
    pub max_distance: f32,
    /// Smallest polar angle in radians (0 = looking straight down)
    pub min_polar_angle: f32,
    /// Largest polar angle in radians (PI = looking straight up)
    pub max_polar_angle: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.5,
            max_distance: 100.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }
}

impl ControlsConfig {
    /// Check the damping factor and the distance and angle ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure((0.0..1.0).contains(&self.damping_factor), || {
            format!("damping_factor must be in [0, 1), got {}", self.damping_factor)
        })?;
        ensure(self.rotate_speed.is_finite() && self.zoom_speed.is_finite(), || {
            "rotate_speed and zoom_speed must be finite".to_string()
        })?;
        ensure(self.min_distance > 0.0 && self.min_distance <= self.max_distance, || {
            format!(
                "distance range must satisfy 0 < min <= max, got [{}, {}]",
                self.min_distance, self.max_distance
            )
        })?;
        ensure(
            (0.0..=PI).contains(&self.min_polar_angle)
                && (0.0..=PI).contains(&self.max_polar_angle)
                && self.min_polar_angle <= self.max_polar_angle,
            || "polar angle range must lie within [0, PI]".to_string(),
        )
    }
}

/// Spherical coordinates around the orbit target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the target
    pub radius: f32,
    /// Angle from +Y in radians
    pub polar: f32,
    /// Angle around +Y in radians, measured from +Z towards +X
    pub azimuth: f32,
}

impl Spherical {
    /// Spherical coordinates of an offset vector
    pub fn from_offset(offset: &Vec3) -> Self {
        let radius = offset.magnitude();
        if radius == 0.0 {
            return Self { radius, polar: 0.0, azimuth: 0.0 };
        }
        Self {
            radius,
            polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            azimuth: offset.x.atan2(offset.z),
        }
    }

    /// Cartesian offset from the target
    pub fn to_offset(self) -> Vec3 {
        let sin_polar = self.polar.sin();
        Vec3::new(
            self.radius * sin_polar * self.azimuth.sin(),
            self.radius * self.polar.cos(),
            self.radius * sin_polar * self.azimuth.cos(),
        )
    }
}

/// Damped orbit/zoom controller for a [`Camera`]
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: ControlsConfig,
    target: Vec3,
    goal: Spherical,
}

impl OrbitControls {
    /// Orbit around the camera's current target, starting from its current position
    pub fn new(config: ControlsConfig, camera: &Camera) -> Self {
        let mut controls = Self {
            goal: Spherical::from_offset(&(camera.position - camera.target)),
            target: camera.target,
            config,
        };
        controls.clamp_goal();
        controls
    }

    /// Look-at point the camera orbits around
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Where the camera is heading
    pub fn goal(&self) -> Spherical {
        self.goal
    }

    /// World position the camera is converging to
    pub fn goal_position(&self) -> Vec3 {
        self.target + self.goal.to_offset()
    }

    /// Settings in use
    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    /// Orbit by a pointer drag of `(dx, dy)` pixels
    ///
    /// A drag across the full viewport height turns the camera by one full
    /// revolution (times `rotate_speed`).
    #[allow(clippy::cast_precision_loss)]
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: u32) {
        if viewport_height == 0 {
            return;
        }
        let per_pixel = TAU / viewport_height as f32 * self.config.rotate_speed;
        self.goal.azimuth -= dx * per_pixel;
        self.goal.polar -= dy * per_pixel;
        self.clamp_goal();
        log::trace!("Orbit goal: {:?}", self.goal);
    }

    /// Zoom by one wheel step; positive deltas move away from the target
    pub fn dolly(&mut self, delta: f32) {
        let scale = DOLLY_BASE.powf(self.config.zoom_speed);
        if delta > 0.0 {
            self.goal.radius /= scale;
        } else if delta < 0.0 {
            self.goal.radius *= scale;
        }
        self.clamp_goal();
    }

    /// Advance the camera towards the goal; returns whether it moved
    ///
    /// With damping the camera covers `damping_factor` of the remaining
    /// distance, so it never overshoots the goal.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let goal = self.goal_position();
        let next = if self.config.enable_damping {
            utils::lerp_vec3(&camera.position, &goal, self.config.damping_factor)
        } else {
            goal
        };

        let moved = (next - camera.position).magnitude() > MOVE_EPSILON;
        if moved {
            camera.set_position(next);
        }
        if camera.target != self.target {
            camera.set_target(self.target);
        }
        moved
    }

    fn clamp_goal(&mut self) {
        let min_polar = self.config.min_polar_angle.max(POLAR_EPSILON);
        let max_polar = self.config.max_polar_angle.min(PI - POLAR_EPSILON);
        self.goal.polar = self.goal.polar.clamp(min_polar, max_polar.max(min_polar));
        self.goal.radius = self.goal.radius.clamp(self.config.min_distance, self.config.max_distance);
    }
}
