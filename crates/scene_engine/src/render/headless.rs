//! In-memory output surface
//!
//! Walks the scene exactly like a GPU surface would (one draw per mesh,
//! world matrices composed through groups) but only records what it would
//! have drawn. Used by the demo host and by tests.

use super::{Camera, OutputSurface, RenderError, RenderResult};
use crate::foundation::math::Vec3;
use crate::scene::Scene;

/// What the last render pass drew
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameRecord {
    /// One per visible mesh
    pub draw_calls: usize,
    /// Triangles submitted across all draws
    pub triangles: usize,
    /// Camera position used for the pass
    pub camera_position: Vec3,
    /// Aspect ratio used for the pass
    pub aspect: f32,
}

/// Surface that records frames instead of drawing them
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    frames_rendered: u64,
    last_frame: Option<FrameRecord>,
    disposed: bool,
}

impl HeadlessSurface {
    /// Create a surface with an empty buffer
    pub fn new() -> Self {
        Self {
            pixel_ratio: 1.0,
            ..Self::default()
        }
    }

    /// Logical size last set
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel ratio last set
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Physical pixel buffer size (`size * pixel_ratio`, rounded)
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f32 * self.pixel_ratio).round() as u32;
        (scale(self.width), scale(self.height))
    }

    /// Number of successful render passes
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Record of the most recent render pass
    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.last_frame.as_ref()
    }

    /// Whether `dispose()` has been called
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl OutputSurface for HeadlessSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        log::debug!("Headless surface resized to {}x{}", width, height);
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> RenderResult<()> {
        if self.disposed {
            return Err(RenderError::Disposed);
        }
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::RenderingFailed("surface has zero area".to_string()));
        }

        let view_projection = camera.view_projection_matrix();
        let mut record = FrameRecord {
            camera_position: camera.position,
            aspect: camera.aspect,
            ..FrameRecord::default()
        };

        for draw in scene.draw_list() {
            let mvp = view_projection * draw.world_matrix;
            if mvp.iter().any(|v| !v.is_finite()) {
                return Err(RenderError::RenderingFailed(format!("non-finite transform for '{}'", draw.name)));
            }
            let geometry = scene
                .resources
                .geometry(draw.geometry)
                .ok_or_else(|| RenderError::RenderingFailed(format!("geometry of '{}' was released", draw.name)))?;
            if scene.resources.material(draw.material).is_none() {
                return Err(RenderError::RenderingFailed(format!("material of '{}' was released", draw.name)));
            }
            record.draw_calls += 1;
            record.triangles += geometry.mesh.triangle_count();
        }

        log::trace!("Headless frame: {} draws, {} triangles", record.draw_calls, record.triangles);
        self.frames_rendered += 1;
        self.last_frame = Some(record);
        Ok(())
    }

    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.last_frame = None;
            log::debug!("Headless surface disposed after {} frames", self.frames_rendered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneBuilder, SceneConfig, SceneVariant};

    fn humanoid_scene() -> Scene {
        let config = SceneConfig { variant: SceneVariant::Humanoid, ..SceneConfig::default() };
        SceneBuilder::build(&config)
    }

    #[test]
    fn renders_one_draw_per_mesh() {
        let scene = humanoid_scene();
        let mut surface = HeadlessSurface::new();
        surface.set_size(800, 600);
        surface.render(&scene, &Camera::default()).unwrap();

        let frame = surface.last_frame().unwrap();
        assert_eq!(frame.draw_calls, 6);
        assert!(frame.triangles > 0);
        assert_eq!(surface.frames_rendered(), 1);
    }

    #[test]
    fn buffer_size_scales_with_pixel_ratio() {
        let mut surface = HeadlessSurface::new();
        surface.set_size(1024, 768);
        surface.set_pixel_ratio(2.0);
        assert_eq!(surface.buffer_size(), (2048, 1536));
    }

    #[test]
    fn render_after_dispose_fails() {
        let scene = humanoid_scene();
        let mut surface = HeadlessSurface::new();
        surface.set_size(10, 10);
        surface.dispose();
        assert_eq!(surface.render(&scene, &Camera::default()), Err(RenderError::Disposed));
    }

    #[test]
    fn zero_area_surface_cannot_render() {
        let scene = humanoid_scene();
        let mut surface = HeadlessSurface::new();
        assert!(matches!(surface.render(&scene, &Camera::default()), Err(RenderError::RenderingFailed(_))));
    }
}
