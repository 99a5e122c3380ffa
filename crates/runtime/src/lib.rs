pub mod animation;
pub mod frame;
pub mod scheduler;

pub use animation::AnimationLoop;
pub use frame::{FrameClock, FrameTiming, rotation_at};
pub use scheduler::{FrameCallback, FrameScheduler, ManualScheduler};
