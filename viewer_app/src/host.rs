//! Simulated host window
//!
//! Stands in for a browser tab or native window: it hands out frame request
//! ids, keeps at most one callback pending, and reports a size that the demo
//! script changes over time.

use scene_engine::host::{FrameRequestId, FrameScheduler, HostWindow, ListenerId};

pub struct SimulatedWindow {
    size: (u32, u32),
    pixel_ratio: f32,
    next_request: u64,
    pending: Option<FrameRequestId>,
    next_listener: u64,
    listeners: Vec<ListenerId>,
}

impl SimulatedWindow {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            size: (width, height),
            pixel_ratio,
            next_request: 0,
            pending: None,
            next_listener: 0,
            listeners: Vec::new(),
        }
    }

    /// Change the window size; returns whether anyone is listening
    pub fn set_size(&mut self, width: u32, height: u32, pixel_ratio: f32) -> bool {
        self.size = (width, height);
        self.pixel_ratio = pixel_ratio;
        !self.listeners.is_empty()
    }

    /// Take the pending callback, as the display refresh would
    pub fn take_pending_frame(&mut self) -> Option<FrameRequestId> {
        self.pending.take()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl FrameScheduler for SimulatedWindow {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_request += 1;
        let id = FrameRequestId(self.next_request);
        if let Some(previous) = self.pending.replace(id) {
            log::warn!("Frame {:?} replaced before it was delivered", previous);
        }
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

impl HostWindow for SimulatedWindow {
    fn inner_size(&self) -> (u32, u32) {
        self.size
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|listener| *listener != id);
    }
}
