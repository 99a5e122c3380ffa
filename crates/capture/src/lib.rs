pub mod chunk;
pub mod controller;
pub mod encoding;
pub mod error;

pub use chunk::MediaChunk;
pub use controller::{CaptureController, CapturePhase, CaptureResult};
pub use encoding::{ENCODING_CANDIDATES, negotiate};
pub use error::CaptureError;

/// Default clip length in milliseconds.
pub const DEFAULT_CLIP_MS: f64 = 12_000.0;
/// Frame rate requested from the canvas stream tap.
pub const CAPTURE_FPS: f64 = 60.0;
/// Target video bitrate handed to the encoder, in bits per second.
pub const CAPTURE_BITRATE: u32 = 6_000_000;
