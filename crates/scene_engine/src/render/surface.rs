//! Output surface abstraction
//!
//! The scene core never talks to a graphics API directly. Whatever the host
//! provides as a drawable target (a canvas, a swapchain, an offscreen buffer)
//! is wrapped in an [`OutputSurface`].

use thiserror::Error;

use super::Camera;
use crate::scene::Scene;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A rendering operation failed during execution
    ///
    /// Affects only the frame it happened in; the animation loop keeps going.
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// The drawable target went away (context loss, detached canvas)
    #[error("Surface lost: {0}")]
    SurfaceLost(String),

    /// The surface was used after `dispose()`
    #[error("Surface has been disposed")]
    Disposed,
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Drawable target the render pass writes into
///
/// Implementations are attached to the host container when constructed.
pub trait OutputSurface {
    /// Resize the pixel buffer to the given CSS/logical size
    fn set_size(&mut self, width: u32, height: u32);

    /// Set the device pixel ratio used for the backing buffer
    fn set_pixel_ratio(&mut self, ratio: f32);

    /// Draw the scene as seen through `camera`
    fn render(&mut self, scene: &Scene, camera: &Camera) -> RenderResult<()>;

    /// Release the drawable and any backend resources it holds
    fn dispose(&mut self);
}
