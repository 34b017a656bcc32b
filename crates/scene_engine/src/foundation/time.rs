//! Time management utilities
//!
//! The animation loop reads elapsed time through the [`Clock`] trait so that
//! per-frame updates can be replayed deterministically in tests.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic elapsed-time source
///
/// Elapsed time is measured from the first read and is never reset during a
/// session. Implementations must never return a value smaller than a
/// previous one.
pub trait Clock {
    /// Seconds elapsed since the clock started
    fn elapsed_secs(&mut self) -> f32;
}

/// Wall-clock time source
///
/// Starts counting on the first call to [`Clock::elapsed_secs`], matching
/// the behaviour of an auto-starting frame clock.
#[derive(Debug, Default)]
pub struct SystemClock {
    start_time: Option<Instant>,
}

impl SystemClock {
    /// Create a clock that has not started yet
    pub fn new() -> Self {
        Self { start_time: None }
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&mut self) -> f32 {
        let start = *self.start_time.get_or_insert_with(Instant::now);
        start.elapsed().as_secs_f32()
    }
}

/// Manually advanced clock for tests and replays
///
/// Cloning yields another handle to the same time value, so a test can keep
/// one handle while the animation loop owns the other.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f32>>,
}

impl ManualClock {
    /// Create a clock at t = 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `seconds` (negative values are ignored)
    pub fn advance(&self, seconds: f32) {
        if seconds > 0.0 {
            self.now.set(self.now.get() + seconds);
        }
    }

    /// Jump to an absolute time; moving backwards is ignored
    pub fn set(&self, seconds: f32) {
        if seconds > self.now.get() {
            self.now.set(seconds);
        }
    }

    /// Current time without going through the trait
    pub fn now(&self) -> f32 {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&mut self) -> f32 {
        self.now.get()
    }
}

/// Frame timer used for statistics (FPS reporting)
#[derive(Debug)]
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed: Duration = now.duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_handles_share_time() {
        let clock = ManualClock::new();
        let mut owned = clock.clone();
        clock.advance(1.5);
        assert_eq!(owned.elapsed_secs(), 1.5);
    }

    #[test]
    fn manual_clock_is_monotonic() {
        let clock = ManualClock::new();
        clock.set(2.0);
        clock.set(1.0);
        clock.advance(-3.0);
        assert_eq!(clock.now(), 2.0);
    }

    #[test]
    fn system_clock_starts_on_first_read() {
        let mut clock = SystemClock::new();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let first = clock.elapsed_secs();
        assert!(first < 0.015);
        let second = clock.elapsed_secs();
        assert!(second >= first);
    }

    #[test]
    fn frame_timer_counts_frames() {
        let mut timer = FrameTimer::new();
        timer.tick();
        timer.tick();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.delta_time() >= 0.0);
    }
}
