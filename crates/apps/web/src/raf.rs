//! `requestAnimationFrame` implementation of the runtime scheduler
//! capability.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use runtime::scheduler::{FrameCallback, FrameScheduler};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// Schedules callbacks on the browser's animation frame clock.
///
/// Each closure is held until it fires or is cancelled, so the browser
/// never invokes a dropped callback and cancelled frames never leak.
#[derive(Clone)]
pub struct RafScheduler {
    window: Window,
    live: Rc<RefCell<HashMap<i32, Closure<dyn FnMut(f64)>>>>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            live: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_next_frame(&self, callback: FrameCallback) -> i32 {
        let live = self.live.clone();
        let id_cell = Rc::new(Cell::new(0i32));
        let own_id = id_cell.clone();
        let mut callback = Some(callback);
        let hook = Closure::wrap(Box::new(move |now_ms: f64| {
            // Keep the closure alive until this call returns; the browser
            // is executing it right now.
            let _keep = live.borrow_mut().remove(&own_id.get());
            if let Some(callback) = callback.take() {
                callback(now_ms);
            }
        }) as Box<dyn FnMut(f64)>);

        let id = match self.window.request_animation_frame(hook.as_ref().unchecked_ref()) {
            Ok(id) => id,
            Err(_) => return 0,
        };
        id_cell.set(id);
        self.live.borrow_mut().insert(id, hook);
        id
    }

    fn cancel(&self, handle: i32) {
        if self.live.borrow_mut().remove(&handle).is_some() {
            let _ = self.window.cancel_animation_frame(handle);
        }
    }
}
