//! Full viewer session against a scripted host

use approx::assert_relative_eq;
use scene_engine::animation::color_for;
use scene_engine::prelude::*;
use scene_engine::scene::CubeConfig;

/// Host that queues frame requests and records listener bookkeeping
#[derive(Debug, Default)]
struct ScriptedHost {
    size: (u32, u32),
    pixel_ratio: f32,
    next_id: u64,
    pending: Option<FrameRequestId>,
    requests: usize,
    cancels: usize,
    listeners: Vec<ListenerId>,
}

impl ScriptedHost {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            pixel_ratio: 1.0,
            ..Self::default()
        }
    }
}

impl FrameScheduler for ScriptedHost {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        self.requests += 1;
        let id = FrameRequestId(self.next_id);
        self.pending = Some(id);
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if self.pending == Some(id) {
            self.pending = None;
            self.cancels += 1;
        }
    }
}

impl HostWindow for ScriptedHost {
    fn inner_size(&self) -> (u32, u32) {
        self.size
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.listeners.len() as u64 + 1);
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|listener| *listener != id);
    }
}

type Viewer = SceneManager<ScriptedHost, HeadlessSurface>;

fn cube_viewer(clock: &ManualClock) -> Viewer {
    scene_engine::foundation::logging::init_for_tests();
    let mut config = ViewerConfig::default();
    config.scene.variant = SceneVariant::Cube;
    config.scene.cube = CubeConfig {
        size: 2.0,
        position: Vec3::zeros(),
        spin: Vec3::new(0.5, 0.5, 0.0),
        ..CubeConfig::default()
    };
    SceneManager::with_clock(config, ScriptedHost::new(800, 600), HeadlessSurface::new(), Box::new(clock.clone()))
        .unwrap()
}

/// Deliver the pending frame callback, if any
fn pump(viewer: &mut Viewer) -> FrameOutcome {
    match viewer.host_mut().pending.take() {
        Some(id) => viewer.on_frame(id),
        None => FrameOutcome::Ignored,
    }
}

#[test]
fn cube_rotation_follows_the_clock() {
    let clock = ManualClock::new();
    let mut viewer = cube_viewer(&clock);
    viewer.start().unwrap();

    clock.set(2.0);
    assert!(matches!(pump(&mut viewer), FrameOutcome::Rendered(_)));

    let cube = viewer.scene().find("cube").unwrap();
    assert_relative_eq!(cube.transform.rotation.x, 1.0);
    assert_relative_eq!(cube.transform.rotation.y, 1.0);
}

#[test]
fn double_start_keeps_one_loop() {
    let clock = ManualClock::new();
    let mut viewer = cube_viewer(&clock);

    assert!(viewer.start().unwrap());
    assert!(!viewer.start().unwrap());
    assert_eq!(viewer.host().requests, 1);

    for _ in 0..5 {
        pump(&mut viewer);
    }
    // One successor per frame, never more
    assert_eq!(viewer.host().requests, 6);
    assert_eq!(viewer.surface().frames_rendered(), 5);
}

#[test]
fn resize_keeps_aspect_and_buffer_in_sync() {
    let clock = ManualClock::new();
    let mut viewer = cube_viewer(&clock);
    assert_relative_eq!(viewer.camera().aspect, 800.0 / 600.0);

    assert!(viewer.handle_resize(1024, 768, 1.0));
    assert_relative_eq!(viewer.camera().aspect, 1024.0 / 768.0);
    assert_eq!(viewer.surface().size(), (1024, 768));
    assert_eq!(viewer.viewport().drawing_buffer_size(), Some((1024, 768)));

    assert!(viewer.handle_resize(1920, 1080, 3.0));
    assert_relative_eq!(viewer.camera().aspect, 1920.0 / 1080.0);
    assert_eq!(viewer.surface().buffer_size(), (3840, 2160));

    // Minimised window
    assert!(!viewer.handle_resize(0, 0, 1.0));
    assert_relative_eq!(viewer.camera().aspect, 1920.0 / 1080.0);
}

#[test]
fn resize_is_visible_to_the_next_frame() {
    let clock = ManualClock::new();
    let mut viewer = cube_viewer(&clock);
    viewer.start().unwrap();

    viewer.handle_resize(1000, 500, 1.0);
    pump(&mut viewer);
    assert_relative_eq!(viewer.surface().last_frame().unwrap().aspect, 2.0);
}

#[test]
fn colors_change_on_interval_boundaries() {
    let clock = ManualClock::new();
    let mut viewer = cube_viewer(&clock);
    viewer.start().unwrap();

    let mut changes = Vec::new();
    for step in 1..=40 {
        clock.set(step as f32 * 0.1);
        if let FrameOutcome::Rendered(report) = pump(&mut viewer) {
            if let Some(bucket) = report.animation.color_bucket {
                changes.push((report.time.elapsed, bucket));
            }
        }
    }

    assert_eq!(changes.iter().map(|(_, bucket)| *bucket).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    for (elapsed, bucket) in &changes {
        assert!(*elapsed >= *bucket as f32);
    }

    let material = viewer.scene().recolorable_materials()[0];
    let color = viewer.scene().resources.material(material).unwrap().color;
    assert!(color.is_valid());
    assert_eq!(color, color_for(AnimationConfig::default().color_seed, 4, 0));
}

#[test]
fn camera_is_static_without_input_and_converges_after_drag() {
    let clock = ManualClock::new();
    let mut viewer = cube_viewer(&clock);
    viewer.start().unwrap();
    let start = viewer.camera().position;

    for _ in 0..10 {
        pump(&mut viewer);
    }
    assert_relative_eq!(viewer.camera().position, start, epsilon = 1e-5);

    viewer.handle_pointer(PointerEvent::Down { button: PointerButton::Primary, position: Vec2::new(400.0, 300.0) });
    viewer.handle_pointer(PointerEvent::Move { position: Vec2::new(460.0, 290.0) });
    viewer.handle_pointer(PointerEvent::Up { button: PointerButton::Primary, position: Vec2::new(460.0, 290.0) });
    viewer.handle_wheel(1.0);
    let goal = viewer.controls().goal_position();

    for _ in 0..400 {
        pump(&mut viewer);
    }
    assert_relative_eq!(viewer.camera().position, goal, epsilon = 1e-3);
    assert_eq!(viewer.camera().target, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn stop_then_dispose_releases_everything_once() {
    let clock = ManualClock::new();
    let mut viewer = cube_viewer(&clock);
    viewer.start().unwrap();
    pump(&mut viewer);

    let in_flight = viewer.host().pending.unwrap();
    assert!(viewer.stop());
    assert_eq!(viewer.host().cancels, 1);
    assert_eq!(viewer.on_frame(in_flight), FrameOutcome::Ignored);

    let report = viewer.dispose();
    assert!(!report.stopped);
    assert!(report.listener_removed);
    assert!(report.surface_disposed);
    assert_eq!(report.released.geometries, 1);
    assert_eq!(report.released.materials, 1);

    let stats = viewer.scene().resources.stats();
    assert!(stats.is_balanced());
    assert_eq!(stats.live_geometries(), 0);
    assert!(viewer.host().listeners.is_empty());

    assert_eq!(viewer.dispose(), DisposeReport::default());
    assert_eq!(viewer.scene().resources.stats(), stats);
}

#[test]
fn humanoid_session_releases_shared_material_once() {
    let mut config = ViewerConfig::default();
    config.scene.variant = SceneVariant::Humanoid;
    let mut viewer = SceneManager::new(config, ScriptedHost::new(640, 480), HeadlessSurface::new()).unwrap();
    viewer.start().unwrap();
    pump(&mut viewer);
    assert_eq!(viewer.surface().last_frame().unwrap().draw_calls, 6);

    let report = viewer.dispose();
    assert!(report.stopped);
    assert_eq!(report.released.geometries, 6);
    assert_eq!(report.released.materials, 1);
    assert!(viewer.scene().resources.stats().is_balanced());
    assert!(viewer.host().pending.is_none());
}
