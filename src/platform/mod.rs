//! Platform abstraction layer
//!
//! The session asks a `FrameScheduler` for the next frame callback and
//! cancels it on reset. Browsers back this with `requestAnimationFrame`;
//! native runs and tests use `ManualScheduler` and pump frames themselves.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Handle to a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Host-side source of frame callbacks
pub trait FrameScheduler {
    /// Schedule one more frame callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<FrameHandle>;

    /// Release a scheduled callback so it never fires
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler whose frames fire only when the owner pumps them
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameHandle>,
    /// Every handle ever requested, in order
    pub requested: Vec<FrameHandle>,
    /// Every handle cancelled, in order
    pub cancelled: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending callback, if any. The caller then runs the frame.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled.push(handle);
    }
}
