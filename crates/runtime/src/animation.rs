use std::cell::RefCell;
use std::rc::Rc;

use crate::frame::{FrameClock, FrameTiming};
use crate::scheduler::FrameScheduler;

/// Continuous self-rescheduling frame loop.
///
/// Each tick derives [`FrameTiming`] from the scheduler's timestamp,
/// invokes the frame callback, and requests the next frame while still
/// running. The clock starts on the first tick so elapsed time never
/// includes mount latency. `stop()` cancels the pending request; there is
/// no other state beyond running/stopped.
pub struct AnimationLoop<S: FrameScheduler + Clone + 'static> {
    core: Rc<RefCell<LoopCore<S>>>,
}

struct LoopCore<S: FrameScheduler> {
    scheduler: S,
    clock: Option<FrameClock>,
    pending: Option<S::Handle>,
    running: bool,
    on_frame: Box<dyn FnMut(FrameTiming)>,
}

impl<S: FrameScheduler + Clone + 'static> AnimationLoop<S> {
    pub fn new(scheduler: S, on_frame: Box<dyn FnMut(FrameTiming)>) -> Self {
        Self {
            core: Rc::new(RefCell::new(LoopCore {
                scheduler,
                clock: None,
                pending: None,
                running: false,
                on_frame,
            })),
        }
    }

    /// Starts the loop. A second call while running is a no-op.
    pub fn start(&self) {
        {
            let mut core = self.core.borrow_mut();
            if core.running {
                return;
            }
            core.running = true;
        }
        Self::schedule(&self.core);
    }

    /// Stops the loop and cancels the pending frame request. Idempotent;
    /// a later `start` begins a fresh clock.
    pub fn stop(&self) {
        let (scheduler, pending) = {
            let mut core = self.core.borrow_mut();
            core.running = false;
            core.clock = None;
            (core.scheduler.clone(), core.pending.take())
        };
        if let Some(handle) = pending {
            scheduler.cancel(handle);
        }
    }

    pub fn is_running(&self) -> bool {
        self.core.borrow().running
    }

    fn schedule(core: &Rc<RefCell<LoopCore<S>>>) {
        let weak = Rc::downgrade(core);
        let scheduler = core.borrow().scheduler.clone();
        let handle = scheduler.request_next_frame(Box::new(move |now_ms| {
            let Some(core) = weak.upgrade() else { return };

            let timing = {
                let mut c = core.borrow_mut();
                if !c.running {
                    return;
                }
                c.pending = None;
                let clock = *c.clock.get_or_insert_with(|| FrameClock::started_at(now_ms));
                clock.timing(now_ms)
            };

            // The frame callback is detached for the duration of the call
            // so it may call back into the loop (e.g. stop it).
            let mut on_frame = {
                let mut c = core.borrow_mut();
                std::mem::replace(&mut c.on_frame, Box::new(|_| {}))
            };
            on_frame(timing);
            core.borrow_mut().on_frame = on_frame;

            if core.borrow().running {
                Self::schedule(&core);
            }
        }));
        store_pending(core, handle);
    }
}

fn store_pending<S: FrameScheduler>(core: &Rc<RefCell<LoopCore<S>>>, handle: S::Handle) {
    let mut c = core.borrow_mut();
    if c.running {
        c.pending = Some(handle);
    } else {
        // A stop raced the request; cancel immediately so nothing leaks.
        c.scheduler.cancel(handle);
    }
}

impl<S: FrameScheduler + Clone + 'static> Clone for AnimationLoop<S> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AnimationLoop;
    use crate::frame::FrameTiming;
    use crate::scheduler::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_loop(
        sched: &ManualScheduler,
    ) -> (AnimationLoop<ManualScheduler>, Rc<RefCell<Vec<FrameTiming>>>) {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        let animation = AnimationLoop::new(
            sched.clone(),
            Box::new(move |timing| sink.borrow_mut().push(timing)),
        );
        (animation, frames)
    }

    #[test]
    fn frames_observe_elapsed_from_first_tick() {
        let sched = ManualScheduler::new();
        let (animation, frames) = recording_loop(&sched);

        animation.start();
        assert_eq!(sched.pending(), 1);

        assert!(sched.fire_next(1_000.0));
        assert!(sched.fire_next(1_016.0));
        assert!(sched.fire_next(1_032.0));

        let elapsed: Vec<f64> = frames.borrow().iter().map(|f| f.elapsed_ms).collect();
        assert_eq!(elapsed, vec![0.0, 16.0, 32.0]);
        // The loop keeps rescheduling itself.
        assert_eq!(sched.pending(), 1);
    }

    #[test]
    fn stop_cancels_the_pending_frame() {
        let sched = ManualScheduler::new();
        let (animation, frames) = recording_loop(&sched);

        animation.start();
        animation.stop();

        assert!(!animation.is_running());
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.cancelled(), 1);
        assert!(!sched.fire_next(0.0));
        assert!(frames.borrow().is_empty());
    }

    #[test]
    fn stop_is_idempotent() {
        let sched = ManualScheduler::new();
        let (animation, _frames) = recording_loop(&sched);

        animation.start();
        animation.stop();
        animation.stop();
        assert_eq!(sched.cancelled(), 1);
    }

    #[test]
    fn stopping_inside_a_frame_halts_rescheduling() {
        let sched = ManualScheduler::new();
        let slot: Rc<RefCell<Option<AnimationLoop<ManualScheduler>>>> =
            Rc::new(RefCell::new(None));

        let handle = slot.clone();
        let animation = AnimationLoop::new(
            sched.clone(),
            Box::new(move |_| {
                if let Some(animation) = handle.borrow().as_ref() {
                    animation.stop();
                }
            }),
        );
        *slot.borrow_mut() = Some(animation.clone());

        animation.start();
        assert!(sched.fire_next(100.0));
        assert!(!animation.is_running());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn restart_begins_a_fresh_clock() {
        let sched = ManualScheduler::new();
        let (animation, frames) = recording_loop(&sched);

        animation.start();
        assert!(sched.fire_next(500.0));
        animation.stop();

        animation.start();
        assert!(sched.fire_next(9_000.0));

        let elapsed: Vec<f64> = frames.borrow().iter().map(|f| f.elapsed_ms).collect();
        assert_eq!(elapsed, vec![0.0, 0.0]);
    }
}
