use std::f64::consts::TAU;

/// Wall-clock milliseconds for one nominal rotation cycle.
pub const ROTATION_PERIOD_MS: f64 = 18_000.0;
/// Damping applied to the nominal rotation rate.
pub const ROTATION_DAMPING: f64 = 0.6;

/// Per-frame timing handed to the renderer.
///
/// This is the single timebase for the component. It is intentionally
/// small and pure so any frame can be recomputed for any instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTiming {
    /// Milliseconds since the animation started.
    pub elapsed_ms: f64,
    /// Sphere rotation at this instant (radians).
    pub rotation_rad: f64,
}

impl FrameTiming {
    pub fn at(elapsed_ms: f64) -> Self {
        Self {
            elapsed_ms,
            rotation_rad: rotation_at(elapsed_ms),
        }
    }
}

/// Sphere rotation as a pure function of elapsed time.
pub fn rotation_at(elapsed_ms: f64) -> f64 {
    (elapsed_ms / ROTATION_PERIOD_MS) * TAU * ROTATION_DAMPING
}

/// Captures the animation start instant and derives per-frame timing from
/// the scheduler's timestamps.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameClock {
    start_ms: f64,
}

impl FrameClock {
    pub fn started_at(start_ms: f64) -> Self {
        Self { start_ms }
    }

    pub fn timing(&self, now_ms: f64) -> FrameTiming {
        FrameTiming::at(now_ms - self.start_ms)
    }
}
