//! Viewport adapter
//!
//! Keeps the camera projection and the output surface in step with the host
//! container. Only the latest size matters; there is no resize history.

use serde::{Deserialize, Serialize};

use crate::config::{ensure, ConfigError};
use crate::render::{Camera, OutputSurface};

/// Current drawable size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportDimensions {
    /// Logical width in pixels
    pub width: u32,
    /// Logical height in pixels
    pub height: u32,
    /// Device pixel ratio after clamping
    pub pixel_ratio: f32,
}

impl ViewportDimensions {
    /// Width divided by height
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Upper bound for the device pixel ratio
    pub max_pixel_ratio: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { max_pixel_ratio: 2.0 }
    }
}

impl ViewportConfig {
    /// The pixel ratio cap must be at least 1
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.max_pixel_ratio.is_finite() && self.max_pixel_ratio >= 1.0, || {
            format!("max_pixel_ratio must be >= 1, got {}", self.max_pixel_ratio)
        })
    }
}

/// Owns the projection parameters derived from the host size
#[derive(Debug)]
pub struct Viewport {
    config: ViewportConfig,
    dimensions: Option<ViewportDimensions>,
}

impl Viewport {
    /// Create a viewport that has not been sized yet
    pub fn new(config: ViewportConfig) -> Self {
        Self { config, dimensions: None }
    }

    /// Pixel ratio actually used for a given device ratio
    pub fn effective_pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.config.max_pixel_ratio)
        } else {
            1.0
        }
    }

    /// Apply a new host size to the camera and the surface
    ///
    /// Returns `false` and changes nothing when either side is zero
    /// (minimised host window).
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        device_pixel_ratio: f32,
        camera: &mut Camera,
        surface: &mut dyn OutputSurface,
    ) -> bool {
        if width == 0 || height == 0 {
            log::debug!("Ignoring zero-sized resize ({}x{})", width, height);
            return false;
        }

        let dimensions = ViewportDimensions {
            width,
            height,
            pixel_ratio: self.effective_pixel_ratio(device_pixel_ratio),
        };

        camera.set_aspect_ratio(dimensions.aspect());
        surface.set_size(width, height);
        surface.set_pixel_ratio(dimensions.pixel_ratio);

        log::debug!(
            "Viewport resized to {}x{} @{}x (aspect {:.3})",
            width,
            height,
            dimensions.pixel_ratio,
            camera.aspect
        );
        self.dimensions = Some(dimensions);
        true
    }

    /// Last applied size, if any
    pub fn dimensions(&self) -> Option<ViewportDimensions> {
        self.dimensions
    }

    /// Physical pixel buffer size
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn drawing_buffer_size(&self) -> Option<(u32, u32)> {
        self.dimensions.map(|d| {
            let scale = |v: u32| (v as f32 * d.pixel_ratio).round() as u32;
            (scale(d.width), scale(d.height))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::HeadlessSurface;
    use approx::assert_relative_eq;

    #[test]
    fn resize_updates_aspect_and_buffer() {
        let mut viewport = Viewport::new(ViewportConfig::default());
        let mut camera = Camera::default();
        let mut surface = HeadlessSurface::new();

        assert!(viewport.resize(800, 600, 1.0, &mut camera, &mut surface));
        assert!(viewport.resize(1024, 768, 1.0, &mut camera, &mut surface));

        assert_relative_eq!(camera.aspect, 1024.0 / 768.0);
        assert_eq!(surface.size(), (1024, 768));
        assert_eq!(viewport.drawing_buffer_size(), Some((1024, 768)));
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let mut viewport = Viewport::new(ViewportConfig::default());
        let mut camera = Camera::default();
        let mut surface = HeadlessSurface::new();

        viewport.resize(640, 480, 3.0, &mut camera, &mut surface);
        assert_relative_eq!(surface.pixel_ratio(), 2.0);
        assert_eq!(viewport.drawing_buffer_size(), Some((1280, 960)));
        assert_eq!(surface.buffer_size(), (1280, 960));
    }

    #[test]
    fn zero_size_is_ignored() {
        let mut viewport = Viewport::new(ViewportConfig::default());
        let mut camera = Camera::default();
        let mut surface = HeadlessSurface::new();

        viewport.resize(800, 600, 1.0, &mut camera, &mut surface);
        assert!(!viewport.resize(0, 600, 1.0, &mut camera, &mut surface));
        assert_relative_eq!(camera.aspect, 800.0 / 600.0);
        assert_eq!(viewport.dimensions().unwrap().width, 800);
    }

    #[test]
    fn invalid_cap_is_rejected() {
        assert!(ViewportConfig { max_pixel_ratio: 0.5 }.validate().is_err());
    }
}
