//! `requestAnimationFrame` scheduler for the browser

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameHandle, FrameScheduler};
use crate::error::{Error, Result};

/// The frame callback, shared between the scheduler and the closure itself
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub struct RafScheduler {
    window: web_sys::Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::MissingBrowserObject("window"))?;
        Ok(Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        })
    }

    /// Slot the frame closure is installed into once it exists
    pub fn callback(&self) -> FrameCallback {
        self.callback.clone()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}
