//! Frame loop state machine
//!
//! Replaces a self-rescheduling callback with explicit states. The host
//! delivers frame callbacks by id; only the currently pending id is
//! accepted, so a callback that was already dispatched when `stop()` ran
//! completes without scheduling a successor.

use crate::foundation::time::Clock;
use crate::host::{FrameRequestId, FrameScheduler};

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame requested
    Stopped,
    /// Waiting for the callback of `pending`
    Running {
        /// The single outstanding frame request
        pending: FrameRequestId,
    },
}

/// Time information handed to one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started
    pub elapsed: f32,
    /// Frames begun so far in this session, starting at 0
    pub frame_index: u64,
}

/// Drives per-frame callbacks through a host scheduler
pub struct AnimationLoop {
    state: LoopState,
    clock: Box<dyn Clock>,
    frames: u64,
}

impl std::fmt::Debug for AnimationLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationLoop")
            .field("state", &self.state)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl AnimationLoop {
    /// Create a stopped loop reading time from `clock`
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            state: LoopState::Stopped,
            clock,
            frames: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether a frame is pending
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running { .. })
    }

    /// Frames begun so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Request the first frame; returns `false` if already running
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.is_running() {
            log::debug!("Animation loop already running");
            return false;
        }
        let pending = scheduler.request_frame();
        self.state = LoopState::Running { pending };
        log::info!("Animation loop started");
        true
    }

    /// Cancel the pending frame; returns `false` if already stopped
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) -> bool {
        match self.state {
            LoopState::Stopped => false,
            LoopState::Running { pending } => {
                scheduler.cancel_frame(pending);
                self.state = LoopState::Stopped;
                log::info!("Animation loop stopped after {} frames", self.frames);
                true
            }
        }
    }

    /// Accept the callback for `id`
    ///
    /// Schedules the successor frame first, then reads the clock. Returns
    /// `None` for stale ids and for callbacks arriving after `stop()`.
    pub fn begin_frame(&mut self, id: FrameRequestId, scheduler: &mut dyn FrameScheduler) -> Option<FrameTime> {
        match self.state {
            LoopState::Running { pending } if pending == id => {
                let next = scheduler.request_frame();
                self.state = LoopState::Running { pending: next };

                let time = FrameTime {
                    elapsed: self.clock.elapsed_secs(),
                    frame_index: self.frames,
                };
                self.frames += 1;
                Some(time)
            }
            _ => {
                log::trace!("Ignoring stale frame callback {:?}", id);
                None
            }
        }
    }
}
