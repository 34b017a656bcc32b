//! Host capabilities
//!
//! The scene core runs inside a host (browser tab, native window, test
//! harness) that owns the display-refresh callback and the container size.
//! The host calls back into [`crate::app::SceneManager`]; the core only asks
//! for frames and resize notifications through these traits.

/// Handle for a requested display-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Handle for a registered resize listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Display-refresh scheduling primitive
pub trait FrameScheduler {
    /// Ask for one callback before the next repaint
    fn request_frame(&mut self) -> FrameRequestId;

    /// Withdraw a pending request; unknown ids are ignored
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// The window or container the scene is displayed in
pub trait HostWindow: FrameScheduler {
    /// Current logical size in pixels
    fn inner_size(&self) -> (u32, u32);

    /// Device pixel ratio of the display
    fn device_pixel_ratio(&self) -> f32;

    /// Start delivering resize notifications
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Stop delivering resize notifications for `id`
    fn remove_resize_listener(&mut self, id: ListenerId);
}
