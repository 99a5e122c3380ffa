use thiserror::Error;

/// Terminal failure reasons for one capture attempt.
///
/// Nothing here is retried; each failure is surfaced to the caller exactly
/// once with a human-readable reason. A conflict never disturbs the
/// session that is already running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// A session is already recording or finalizing.
    #[error("recording already in progress")]
    AlreadyRecording,
    /// The rendering surface is missing or refused to open a frame stream.
    #[error("rendering surface unavailable for recording")]
    SurfaceUnavailable,
    /// The surface cannot be tapped as a live stream in this environment.
    #[error("canvas frame streaming is not supported in this environment")]
    StreamingUnsupported,
    /// No candidate container/codec combination is supported.
    #[error("no supported video encoding found")]
    EncodingUnsupported,
    /// The encoder could not be constructed or started.
    #[error("failed to initialize the video encoder: {0}")]
    EncoderInit(String),
    /// The encoder failed while a session was active.
    #[error("recording error: {0}")]
    EncoderRuntime(String),
}
