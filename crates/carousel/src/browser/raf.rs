//! `requestAnimationFrame` scheduler.
//!
//! One frame is in flight at a time, which is all the scroll animator ever
//! asks for. Fired frames are handed to the [`FrameSink`], which the slider
//! points at its carousel after mounting.

use carousel_core::{FrameToken, Scheduler};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{trace, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Performance, Window};

/// Receives fired frame tokens.
pub type FrameSink = Rc<RefCell<Option<Box<dyn FnMut(FrameToken)>>>>;

/// Scheduler backed by the browser's animation frames and `performance.now()`.
pub struct RafScheduler {
    window: Window,
    performance: Option<Performance>,
    next_id: u64,
    in_flight: Rc<Cell<Option<FrameToken>>>,
    handle: Option<i32>,
    callback: Closure<dyn FnMut(f64)>,
    sink: FrameSink,
}

impl std::fmt::Debug for RafScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RafScheduler")
            .field("next_id", &self.next_id)
            .field("in_flight", &self.in_flight.get())
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl RafScheduler {
    /// Create a scheduler for `window`.
    pub fn new(window: Window) -> Self {
        let sink: FrameSink = Rc::default();
        let in_flight: Rc<Cell<Option<FrameToken>>> = Rc::default();
        let callback = {
            let sink = Rc::clone(&sink);
            let in_flight = Rc::clone(&in_flight);
            Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
                let Some(token) = in_flight.take() else {
                    return;
                };
                match sink.try_borrow_mut() {
                    Ok(mut slot) => {
                        if let Some(deliver) = slot.as_mut() {
                            deliver(token);
                        }
                    }
                    Err(_) => trace!(?token, "frame sink busy"),
                }
            })
        };
        Self {
            performance: window.performance(),
            window,
            next_id: 0,
            in_flight,
            handle: None,
            callback,
            sink,
        }
    }

    /// Where fired frames are delivered.
    pub fn frame_sink(&self) -> FrameSink {
        Rc::clone(&self.sink)
    }
}

impl Scheduler for RafScheduler {
    fn now_ms(&self) -> f64 {
        self.performance.as_ref().map_or(0.0, Performance::now)
    }

    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken::new(self.next_id);
        self.next_id += 1;
        self.in_flight.set(Some(token));
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(handle) => self.handle = Some(handle),
            Err(err) => {
                warn!(?err, "requestAnimationFrame failed");
                self.handle = None;
            }
        }
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.in_flight.get() != Some(token) {
            return;
        }
        self.in_flight.set(None);
        if let Some(handle) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(handle) {
                warn!(?err, "cancelAnimationFrame failed");
            }
        }
    }
}
