//! Headless viewer demo
//!
//! Runs a scripted session against a simulated window and the headless
//! surface: the scene animates, the window is resized and minimised, the
//! camera is dragged and zoomed, then the viewer is stopped and disposed.
//!
//! Usage: `viewer_demo [CONFIG.toml|CONFIG.ron] [--frames N] [--seed N]`

mod host;

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scene_engine::prelude::*;
use thiserror::Error;

use host::SimulatedWindow;

/// Simulated display refresh interval
const FRAME_STEP: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 600;

#[derive(Error, Debug)]
enum AppError {
    #[error("{0}\nusage: viewer_demo [CONFIG.toml|CONFIG.ron] [--frames N] [--seed N]")]
    Usage(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Viewer(#[from] ViewerError),
}

#[derive(Debug)]
struct Options {
    config: Option<PathBuf>,
    frames: u64,
    seed: u64,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, AppError> {
    let mut options = Options {
        config: None,
        frames: DEFAULT_FRAMES,
        seed: 7,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--frames" | "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| AppError::Usage(format!("{arg} needs a value")))?;
                let parsed = value
                    .parse::<u64>()
                    .map_err(|e| AppError::Usage(format!("{arg} {value}: {e}")))?;
                if arg == "--frames" {
                    options.frames = parsed;
                } else {
                    options.seed = parsed;
                }
            }
            flag if flag.starts_with("--") => return Err(AppError::Usage(format!("unknown option {flag}"))),
            path if options.config.is_none() => options.config = Some(PathBuf::from(path)),
            extra => return Err(AppError::Usage(format!("unexpected argument {extra}"))),
        }
    }
    Ok(options)
}

type Viewer = SceneManager<SimulatedWindow, HeadlessSurface>;

/// Frame rate on the session's own timeline
#[allow(clippy::cast_precision_loss)]
fn simulated_fps(frames: u64, seconds: f32) -> f32 {
    if seconds > 0.0 {
        frames as f32 / seconds
    } else {
        0.0
    }
}

/// Resize the window and deliver the event if a listener is registered
fn resize(viewer: &mut Viewer, width: u32, height: u32, pixel_ratio: f32) {
    if viewer.host_mut().set_size(width, height, pixel_ratio) {
        let applied = viewer.handle_resize(width, height, pixel_ratio);
        log::info!("Window resized to {}x{} @{} (applied: {})", width, height, pixel_ratio, applied);
    }
}

/// Scripted user activity for one frame
fn script(viewer: &mut Viewer, frame: u64, rng: &mut StdRng, pointer: &mut Vec2) {
    match frame {
        120 => resize(viewer, 1024, 768, 2.5),
        180 => {
            *pointer = Vec2::new(512.0, 384.0);
            viewer.handle_pointer(PointerEvent::Down { button: PointerButton::Primary, position: *pointer });
        }
        181..=239 => {
            *pointer += Vec2::new(rng.gen_range(2.0..8.0), rng.gen_range(-2.0..2.0));
            viewer.handle_pointer(PointerEvent::Move { position: *pointer });
        }
        240 => {
            viewer.handle_pointer(PointerEvent::Up { button: PointerButton::Primary, position: *pointer });
        }
        300..=309 => viewer.handle_wheel(-1.0),
        330..=334 => viewer.handle_wheel(1.0),
        400 => resize(viewer, 0, 0, 2.5),
        420 => resize(viewer, 1280, 720, 1.0),
        _ => {}
    }
}

fn run(options: &Options) -> Result<(), AppError> {
    let config = match &options.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            ViewerConfig::load(path)?
        }
        None => ViewerConfig::default(),
    };

    let clock = ManualClock::new();
    let window = SimulatedWindow::new(1280, 720, 1.0);
    let mut viewer = SceneManager::with_clock(config, window, HeadlessSurface::new(), Box::new(clock.clone()))?;

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut pointer = Vec2::zeros();
    let mut timer = FrameTimer::new();

    viewer.start()?;
    for frame in 0..options.frames {
        script(&mut viewer, frame, &mut rng, &mut pointer);
        clock.advance(FRAME_STEP);

        let Some(id) = viewer.host_mut().take_pending_frame() else {
            log::warn!("No frame pending at frame {}", frame);
            break;
        };
        match viewer.on_frame(id) {
            FrameOutcome::Rendered(report) => {
                if let Some(bucket) = report.animation.color_bucket {
                    log::info!(
                        "t={:.2}s: color bucket {} ({} materials recolored)",
                        report.time.elapsed,
                        bucket,
                        report.animation.recolored
                    );
                }
            }
            FrameOutcome::RenderFailed(report, error) => {
                log::warn!("Frame {} dropped: {}", report.time.frame_index, error);
            }
            FrameOutcome::Ignored => {}
        }
        timer.tick();
    }

    viewer.stop();
    viewer.redraw()?;

    let camera = viewer.camera();
    log::info!(
        "Ran {} frames ({} failed) at {:.0} simulated fps; camera at {:?}, {:.2} from target",
        viewer.frame_count(),
        viewer.render_failures(),
        simulated_fps(viewer.frame_count(), clock.now()),
        camera.position,
        camera.distance_to_target()
    );
    if timer.average_fps() > 0.0 {
        log::debug!("Wall-clock cost: {:.3} ms per frame", 1000.0 / timer.average_fps());
    }
    if let Some(frame) = viewer.surface().last_frame() {
        log::info!(
            "Last frame: {} draw calls, {} triangles, buffer {:?}",
            frame.draw_calls,
            frame.triangles,
            viewer.surface().buffer_size()
        );
    }

    let report = viewer.dispose();
    let stats = viewer.scene().resources.stats();
    log::info!(
        "Disposed: released {} geometries and {} materials, {} listeners left, balanced: {}",
        report.released.geometries,
        report.released.materials,
        viewer.host().listener_count(),
        stats.is_balanced()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    scene_engine::foundation::logging::init();

    log::info!("Starting viewer demo");
    let options = parse_args(std::env::args().skip(1))?;

    match run(&options) {
        Ok(()) => {
            log::info!("Viewer demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Viewer demo failed: {}", e);
            Err(e.into())
        }
    }
}
