use std::cell::RefCell;
use std::rc::Rc;

/// A boxed frame callback receiving the scheduler's timestamp in
/// milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Display-refresh scheduling capability.
///
/// The animation loop never talks to the platform directly; it requests
/// the next frame through this trait and cancels through it on teardown.
/// The deterministic [`ManualScheduler`] drives the loop in unit tests;
/// the browser implementation lives with the web app.
pub trait FrameScheduler {
    /// Opaque handle identifying one scheduled callback.
    type Handle;

    /// Schedules `callback` to run at the next display refresh.
    fn request_next_frame(&self, callback: FrameCallback) -> Self::Handle;

    /// Cancels a previously scheduled callback. Handles that already fired
    /// are ignored.
    fn cancel(&self, handle: Self::Handle);
}

/// Manual-tick scheduler for deterministic tests.
///
/// Callbacks queue in request order and only run when the test calls
/// [`ManualScheduler::fire_next`] with an explicit timestamp.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    next_id: u64,
    queue: Vec<(u64, FrameCallback)>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for a tick.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Total callbacks cancelled before they fired.
    pub fn cancelled(&self) -> u64 {
        self.inner.borrow().cancelled
    }

    /// Runs the oldest pending callback at `now_ms`. Returns `false` when
    /// the queue was empty.
    pub fn fire_next(&self, now_ms: f64) -> bool {
        let next = {
            let mut inner = self.inner.borrow_mut();
            if inner.queue.is_empty() {
                None
            } else {
                Some(inner.queue.remove(0).1)
            }
        };
        match next {
            Some(callback) => {
                callback(now_ms);
                true
            }
            None => false,
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_next_frame(&self, callback: FrameCallback) -> u64 {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.queue.push((id, callback));
        id
    }

    fn cancel(&self, handle: u64) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.queue.len();
        inner.queue.retain(|(id, _)| *id != handle);
        if inner.queue.len() != before {
            inner.cancelled += 1;
        }
    }
}
