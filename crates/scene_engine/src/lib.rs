//! # Scene Engine
//!
//! Animated 3D scene core with damped orbit camera controls. Drawing and
//! frame scheduling are provided by the host through traits, so the same
//! core runs in a window, a browser canvas or a test harness.
//!
//! ## Features
//!
//! - **Configurable scenes**: cube, cube + sphere or a composite humanoid figure
//! - **Deterministic animation**: rotation and recoloring are functions of elapsed time
//! - **Orbit controls**: pointer drag and wheel zoom with exponential damping
//! - **Explicit lifecycle**: start, stop and idempotent dispose with resource accounting
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::prelude::*;
//!
//! struct Window { next: u64 }
//!
//! impl FrameScheduler for Window {
//!     fn request_frame(&mut self) -> FrameRequestId {
//!         self.next += 1;
//!         FrameRequestId(self.next)
//!     }
//!     fn cancel_frame(&mut self, _id: FrameRequestId) {}
//! }
//!
//! impl HostWindow for Window {
//!     fn inner_size(&self) -> (u32, u32) { (800, 600) }
//!     fn device_pixel_ratio(&self) -> f32 { 1.0 }
//!     fn add_resize_listener(&mut self) -> ListenerId { ListenerId(1) }
//!     fn remove_resize_listener(&mut self, _id: ListenerId) {}
//! }
//!
//! let mut viewer = SceneManager::new(ViewerConfig::default(), Window { next: 0 }, HeadlessSurface::new())?;
//! viewer.start()?;
//! viewer.on_frame(FrameRequestId(1));
//! assert_eq!(viewer.surface().frames_rendered(), 1);
//!
//! let report = viewer.dispose();
//! assert!(report.stopped);
//! # Ok::<(), ViewerError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod render;
pub mod scene;
pub mod viewport;
pub mod controls;
pub mod input;
pub mod host;
pub mod animation;
pub mod app;

pub use app::{DisposeReport, FrameOutcome, FrameReport, SceneManager, ViewerError, ViewerResult};

/// Common imports for hosts
pub mod prelude {
    pub use crate::{
        animation::{AnimationConfig, AnimationLoop, SceneAnimator},
        app::{DisposeReport, FrameOutcome, FrameReport, SceneManager, ViewerError, ViewerResult},
        config::{Config, ConfigError, ViewerConfig},
        controls::{ControlsConfig, OrbitControls},
        foundation::{
            math::{Transform, Vec2, Vec3},
            time::{Clock, FrameTimer, ManualClock, SystemClock},
        },
        host::{FrameRequestId, FrameScheduler, HostWindow, ListenerId},
        input::{PointerButton, PointerEvent},
        render::{Camera, Color, HeadlessSurface, OutputSurface, RenderError, RenderResult},
        scene::{Scene, SceneBuilder, SceneConfig, SceneVariant},
        viewport::{Viewport, ViewportConfig},
    };
}
