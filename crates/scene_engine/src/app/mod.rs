//! Lifecycle manager
//!
//! [`SceneManager`] owns one scene, one camera and the subsystems that act on
//! them, and wires them to a host window and an output surface. The host
//! calls [`SceneManager::on_frame`] for every frame callback it delivers and
//! forwards resize and pointer events as they arrive.

use thiserror::Error;

use crate::animation::{AnimationLoop, AnimationReport, FrameTime, SceneAnimator};
use crate::config::{ConfigError, ViewerConfig};
use crate::controls::OrbitControls;
use crate::foundation::time::{Clock, SystemClock};
use crate::host::{FrameRequestId, HostWindow, ListenerId};
use crate::input::{PointerEvent, PointerTracker};
use crate::render::{Camera, OutputSurface, RenderError};
use crate::scene::{ReleaseReport, Scene, SceneBuilder};
use crate::viewport::Viewport;

/// Lifecycle errors
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Settings rejected at construction
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rendering failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The manager was used after `dispose()`
    #[error("Scene manager has been disposed")]
    Disposed,
}

/// Result type for lifecycle operations
pub type ViewerResult<T> = Result<T, ViewerError>;

/// Everything that happened in one accepted frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Clock reading and frame number
    pub time: FrameTime,
    /// Scene changes made by the animator
    pub animation: AnimationReport,
    /// Whether the orbit controls moved the camera
    pub camera_moved: bool,
}

/// Result of handing one frame callback to the manager
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Stale callback, stopped loop or disposed manager; nothing ran
    Ignored,
    /// The frame ran and rendered
    Rendered(FrameReport),
    /// The frame ran but the render call failed; the loop keeps going
    RenderFailed(FrameReport, RenderError),
}

/// What `dispose()` cleaned up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisposeReport {
    /// The animation loop was running and got stopped
    pub stopped: bool,
    /// The resize listener was removed
    pub listener_removed: bool,
    /// The output surface was released
    pub surface_disposed: bool,
    /// Geometries and materials released
    pub released: ReleaseReport,
}

/// Owns the scene session for one host container
pub struct SceneManager<H: HostWindow, S: OutputSurface> {
    host: H,
    surface: S,
    scene: Scene,
    camera: Camera,
    viewport: Viewport,
    controls: OrbitControls,
    pointer: PointerTracker,
    animation: AnimationLoop,
    animator: SceneAnimator,
    resize_listener: Option<ListenerId>,
    render_failures: u64,
    disposed: bool,
}

impl<H: HostWindow, S: OutputSurface> SceneManager<H, S> {
    /// Build the scene and attach it to `host` and `surface`, timed by the wall clock
    pub fn new(config: ViewerConfig, host: H, surface: S) -> ViewerResult<Self> {
        Self::with_clock(config, host, surface, Box::new(SystemClock::new()))
    }

    /// Same as [`SceneManager::new`] with an explicit time source
    pub fn with_clock(config: ViewerConfig, mut host: H, mut surface: S, clock: Box<dyn Clock>) -> ViewerResult<Self> {
        config.validate()?;
        log::info!("Initializing scene manager ({:?} scene)", config.scene.variant);

        let scene = SceneBuilder::build(&config.scene);

        let (width, height) = host.inner_size();
        #[allow(clippy::cast_precision_loss)]
        let aspect = if height > 0 { width as f32 / height as f32 } else { 1.0 };
        let mut camera = Camera::from_config(&config.camera, aspect);

        let mut viewport = Viewport::new(config.viewport.clone());
        if !viewport.resize(width, height, host.device_pixel_ratio(), &mut camera, &mut surface) {
            log::warn!("Host container has no area yet ({}x{})", width, height);
        }

        let controls = OrbitControls::new(config.controls.clone(), &camera);
        let resize_listener = Some(host.add_resize_listener());

        Ok(Self {
            host,
            surface,
            scene,
            camera,
            viewport,
            controls,
            pointer: PointerTracker::new(),
            animation: AnimationLoop::new(clock),
            animator: SceneAnimator::new(&config.animation),
            resize_listener,
            render_failures: 0,
            disposed: false,
        })
    }

    /// Start the animation loop; `Ok(false)` if it was already running
    pub fn start(&mut self) -> ViewerResult<bool> {
        if self.disposed {
            return Err(ViewerError::Disposed);
        }
        Ok(self.animation.start(&mut self.host))
    }

    /// Stop the animation loop; returns `false` if it was not running
    pub fn stop(&mut self) -> bool {
        self.animation.stop(&mut self.host)
    }

    /// Run one frame for the host callback `id`
    pub fn on_frame(&mut self, id: FrameRequestId) -> FrameOutcome {
        if self.disposed {
            return FrameOutcome::Ignored;
        }
        let Some(time) = self.animation.begin_frame(id, &mut self.host) else {
            return FrameOutcome::Ignored;
        };

        let animation = self.animator.apply(&mut self.scene, time.elapsed);
        let camera_moved = self.controls.update(&mut self.camera);
        let report = FrameReport { time, animation, camera_moved };

        match self.surface.render(&self.scene, &self.camera) {
            Ok(()) => {
                log::trace!("Frame {} rendered at t={:.3}", time.frame_index, time.elapsed);
                FrameOutcome::Rendered(report)
            }
            Err(error) => {
                self.render_failures += 1;
                log::error!("Frame {} failed to render: {}", time.frame_index, error);
                FrameOutcome::RenderFailed(report, error)
            }
        }
    }

    /// Render the current state once, outside the frame loop
    ///
    /// Lets a stopped viewer repaint after a resize.
    pub fn redraw(&mut self) -> ViewerResult<()> {
        if self.disposed {
            return Err(ViewerError::Disposed);
        }
        self.surface.render(&self.scene, &self.camera)?;
        Ok(())
    }

    /// Apply a host resize; returns `false` when ignored
    pub fn handle_resize(&mut self, width: u32, height: u32, device_pixel_ratio: f32) -> bool {
        if self.disposed {
            return false;
        }
        self.viewport
            .resize(width, height, device_pixel_ratio, &mut self.camera, &mut self.surface)
    }

    /// Feed a pointer event; returns whether it moved the orbit goal
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        if self.disposed {
            return false;
        }
        let Some(delta) = self.pointer.handle(event) else {
            return false;
        };
        let height = self
            .viewport
            .dimensions()
            .map_or_else(|| self.host.inner_size().1, |d| d.height);
        self.controls.rotate(delta.x, delta.y, height);
        true
    }

    /// Feed one wheel step (positive zooms out)
    pub fn handle_wheel(&mut self, delta: f32) {
        if !self.disposed {
            self.controls.dolly(delta);
        }
    }

    /// Stop, detach and release everything the session allocated
    ///
    /// Safe to call without a prior `start()`. Later calls do nothing and
    /// return an empty report.
    pub fn dispose(&mut self) -> DisposeReport {
        if self.disposed {
            log::warn!("Scene manager already disposed");
            return DisposeReport::default();
        }

        let stopped = self.stop();
        let listener_removed = match self.resize_listener.take() {
            Some(id) => {
                self.host.remove_resize_listener(id);
                true
            }
            None => false,
        };
        self.surface.dispose();
        let released = self.scene.release_resources();
        self.disposed = true;

        let report = DisposeReport {
            stopped,
            listener_removed,
            surface_disposed: true,
            released,
        };
        log::info!("Scene manager disposed: {:?}", report);
        report
    }

    /// The scene being animated
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Current camera state
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Viewport adapter
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Orbit controls
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Host window
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host window, for hosts that are driven from outside
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Output surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Whether a frame is pending
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Whether `dispose()` has run
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Frames run so far
    pub fn frame_count(&self) -> u64 {
        self.animation.frame_count()
    }

    /// Frames whose render call failed
    pub fn render_failures(&self) -> u64 {
        self.render_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::foundation::time::ManualClock;
    use crate::host::FrameScheduler;
    use crate::input::PointerButton;
    use crate::render::{HeadlessSurface, RenderResult};
    use crate::scene::SceneVariant;

    #[derive(Debug, Default)]
    struct StubHost {
        next_id: u64,
        pending: Vec<FrameRequestId>,
        listeners: u32,
    }

    impl FrameScheduler for StubHost {
        fn request_frame(&mut self) -> FrameRequestId {
            self.next_id += 1;
            let id = FrameRequestId(self.next_id);
            self.pending.push(id);
            id
        }

        fn cancel_frame(&mut self, id: FrameRequestId) {
            self.pending.retain(|pending| *pending != id);
        }
    }

    impl HostWindow for StubHost {
        fn inner_size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn device_pixel_ratio(&self) -> f32 {
            1.0
        }

        fn add_resize_listener(&mut self) -> ListenerId {
            self.listeners += 1;
            ListenerId(1)
        }

        fn remove_resize_listener(&mut self, _id: ListenerId) {
            self.listeners -= 1;
        }
    }

    /// Surface that fails every other frame
    #[derive(Debug, Default)]
    struct FlakySurface {
        calls: u32,
    }

    impl OutputSurface for FlakySurface {
        fn set_size(&mut self, _width: u32, _height: u32) {}

        fn set_pixel_ratio(&mut self, _ratio: f32) {}

        fn render(&mut self, _scene: &Scene, _camera: &Camera) -> RenderResult<()> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                Err(RenderError::SurfaceLost("context lost".to_string()))
            } else {
                Ok(())
            }
        }

        fn dispose(&mut self) {}
    }

    fn next_frame<S: OutputSurface>(manager: &mut SceneManager<StubHost, S>) -> FrameOutcome {
        let id = *manager.host().pending.last().unwrap();
        manager.host_mut().pending.clear();
        manager.on_frame(id)
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = ViewerConfig::default();
        config.animation.color_interval = 0.0;
        let result = SceneManager::new(config, StubHost::default(), HeadlessSurface::new());
        assert!(matches!(result, Err(ViewerError::Config(_))));
    }

    #[test]
    fn render_failure_does_not_stop_the_loop() {
        let mut manager = SceneManager::with_clock(
            ViewerConfig::default(),
            StubHost::default(),
            FlakySurface::default(),
            Box::new(ManualClock::new()),
        )
        .unwrap();
        manager.start().unwrap();

        assert!(matches!(next_frame(&mut manager), FrameOutcome::Rendered(_)));
        assert!(matches!(next_frame(&mut manager), FrameOutcome::RenderFailed(_, RenderError::SurfaceLost(_))));
        assert!(matches!(next_frame(&mut manager), FrameOutcome::Rendered(_)));
        assert!(manager.is_running());
        assert_eq!(manager.render_failures(), 1);
    }

    #[test]
    fn dispose_without_start_only_releases_resources() {
        let mut config = ViewerConfig::default();
        config.scene.variant = SceneVariant::Humanoid;
        let mut manager = SceneManager::new(config, StubHost::default(), HeadlessSurface::new()).unwrap();

        let report = manager.dispose();
        assert!(!report.stopped);
        assert!(report.listener_removed);
        assert_eq!(report.released, ReleaseReport { geometries: 6, materials: 1 });
        assert_eq!(manager.host().listeners, 0);
        assert!(manager.surface().is_disposed());
    }

    #[test]
    fn disposed_manager_refuses_to_start() {
        let mut manager = SceneManager::new(ViewerConfig::default(), StubHost::default(), HeadlessSurface::new()).unwrap();
        manager.dispose();
        assert!(matches!(manager.start(), Err(ViewerError::Disposed)));
        assert!(matches!(manager.redraw(), Err(ViewerError::Disposed)));
        assert_eq!(manager.dispose(), DisposeReport::default());
    }

    #[test]
    fn drag_moves_the_camera_over_following_frames() {
        let mut manager = SceneManager::with_clock(
            ViewerConfig::default(),
            StubHost::default(),
            HeadlessSurface::new(),
            Box::new(ManualClock::new()),
        )
        .unwrap();
        manager.start().unwrap();
        let before = manager.camera().position;

        manager.handle_pointer(PointerEvent::Down { button: PointerButton::Primary, position: Vec2::new(100.0, 100.0) });
        assert!(manager.handle_pointer(PointerEvent::Move { position: Vec2::new(160.0, 100.0) }));

        match next_frame(&mut manager) {
            FrameOutcome::Rendered(report) => assert!(report.camera_moved),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_ne!(manager.camera().position, before);
    }
}
