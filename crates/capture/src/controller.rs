use crate::chunk::MediaChunk;
use crate::error::CaptureError;

/// Capture lifecycle phases.
///
/// `Idle -> Recording -> Finalizing -> Idle` on the success path;
/// `Recording` drops straight back to `Idle` on abort.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CapturePhase {
    Idle,
    Recording,
    Finalizing,
}

/// A finalized clip: every non-empty chunk in arrival order, plus the
/// MIME type the session was encoded with. Produced exactly once per
/// completed session; ownership transfers to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult<C> {
    pub chunks: Vec<C>,
    pub mime_type: String,
}

impl<C: AsRef<[u8]>> CaptureResult<C> {
    /// Concatenates the chunks into one contiguous payload.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = Vec::new();
        for chunk in &self.chunks {
            out.extend_from_slice(chunk.as_ref());
        }
        out
    }
}

struct Session<C> {
    chunks: Vec<C>,
    mime_type: String,
}

/// Owns the single capture session and enforces its state machine.
///
/// The platform layer feeds chunk/error/stop events in; this type
/// guarantees at most one active session, buffers chunks in arrival order,
/// and releases at most one result per session. It knows nothing about the
/// encoder itself, so tests drive it with plain byte chunks.
pub struct CaptureController<C> {
    phase: CapturePhase,
    session: Option<Session<C>>,
}

impl<C: MediaChunk> CaptureController<C> {
    pub fn new() -> Self {
        Self {
            phase: CapturePhase::Idle,
            session: None,
        }
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// True while a session is recording or finalizing.
    pub fn is_active(&self) -> bool {
        self.phase != CapturePhase::Idle
    }

    /// Opens a session. Fails with a conflict while one is active, leaving
    /// the active session untouched.
    pub fn begin(&mut self, mime_type: impl Into<String>) -> Result<(), CaptureError> {
        if self.is_active() {
            return Err(CaptureError::AlreadyRecording);
        }
        self.session = Some(Session {
            chunks: Vec::new(),
            mime_type: mime_type.into(),
        });
        self.phase = CapturePhase::Recording;
        Ok(())
    }

    /// Buffers one encoded fragment. Empty fragments, and fragments that
    /// arrive when no session is active, are dropped.
    pub fn push_chunk(&mut self, chunk: C) {
        if !self.is_active() || chunk.is_empty() {
            return;
        }
        if let Some(session) = self.session.as_mut() {
            session.chunks.push(chunk);
        }
    }

    /// Moves a recording session into finalization. Returns `false` when
    /// there is nothing left to finalize, which makes repeated stop
    /// requests harmless.
    pub fn begin_finalize(&mut self) -> bool {
        if self.phase != CapturePhase::Recording {
            return false;
        }
        self.phase = CapturePhase::Finalizing;
        true
    }

    /// Completes a finalizing session, handing the buffered chunks to the
    /// caller.
    ///
    /// Yields `None` unless a session was finalizing, so a stray stop
    /// event after an abort settles nothing.
    pub fn complete(&mut self) -> Option<CaptureResult<C>> {
        if self.phase != CapturePhase::Finalizing {
            return None;
        }
        self.phase = CapturePhase::Idle;
        self.session.take().map(|session| CaptureResult {
            chunks: session.chunks,
            mime_type: session.mime_type,
        })
    }

    /// Discards the session after an encoder failure and returns the error
    /// to report to the pending caller.
    pub fn abort(&mut self, reason: impl Into<String>) -> CaptureError {
        self.phase = CapturePhase::Idle;
        self.session = None;
        CaptureError::EncoderRuntime(reason.into())
    }
}

impl<C: MediaChunk> Default for CaptureController<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{CaptureController, CapturePhase};
    use crate::error::CaptureError;
    use pretty_assertions::assert_eq;

    fn recording(mime: &str) -> CaptureController<Vec<u8>> {
        let mut controller = CaptureController::new();
        controller.begin(mime).expect("idle controller accepts begin");
        controller
    }

    #[test]
    fn full_lifecycle_yields_one_ordered_result() {
        let mut controller = recording("video/webm");
        controller.push_chunk(b"alpha-".to_vec());
        controller.push_chunk(b"beta-".to_vec());
        controller.push_chunk(b"gamma".to_vec());

        assert!(controller.begin_finalize());
        let result = controller.complete().expect("finalizing session completes");
        assert_eq!(result.mime_type, "video/webm");
        assert_eq!(result.into_bytes(), b"alpha-beta-gamma".to_vec());

        assert_eq!(controller.phase(), CapturePhase::Idle);
        assert_eq!(controller.complete(), None);
    }

    #[test]
    fn second_begin_conflicts_without_disturbing_the_session() {
        let mut controller = recording("video/webm");
        controller.push_chunk(b"kept".to_vec());

        assert_eq!(
            controller.begin("video/webm; codecs=vp9"),
            Err(CaptureError::AlreadyRecording)
        );

        controller.begin_finalize();
        let result = controller.complete().expect("original session survives");
        assert_eq!(result.into_bytes(), b"kept".to_vec());
    }

    #[test]
    fn finalize_requests_are_idempotent() {
        let mut controller = recording("video/webm");
        assert!(controller.begin_finalize());
        assert!(!controller.begin_finalize());
        assert!(!controller.begin_finalize());
        assert!(controller.complete().is_some());
    }

    #[test]
    fn complete_without_finalize_produces_nothing() {
        let mut controller = recording("video/webm");
        controller.push_chunk(b"data".to_vec());
        assert_eq!(controller.complete(), None);
        assert_eq!(controller.phase(), CapturePhase::Recording);
    }

    #[test]
    fn empty_chunks_are_dropped() {
        let mut controller = recording("video/webm");
        controller.push_chunk(Vec::new());
        controller.push_chunk(b"payload".to_vec());
        controller.push_chunk(Vec::new());

        controller.begin_finalize();
        let result = controller.complete().expect("session completes");
        assert_eq!(result.chunks.len(), 1);
        assert_eq!(result.into_bytes(), b"payload".to_vec());
    }

    #[test]
    fn chunks_outside_a_session_are_dropped() {
        let mut controller: CaptureController<Vec<u8>> = CaptureController::new();
        controller.push_chunk(b"stray".to_vec());

        controller.begin("video/webm").expect("begin after stray chunk");
        controller.begin_finalize();
        let result = controller.complete().expect("session completes");
        assert!(result.chunks.is_empty());
    }

    #[test]
    fn abort_resets_and_allows_a_fresh_session() {
        let mut controller = recording("video/webm");
        controller.push_chunk(b"doomed".to_vec());

        let err = controller.abort("encoder died");
        assert_eq!(err, CaptureError::EncoderRuntime("encoder died".into()));
        assert_eq!(controller.phase(), CapturePhase::Idle);
        // The stop event that trails an abort settles nothing.
        assert!(!controller.begin_finalize());
        assert_eq!(controller.complete(), None);

        controller.begin("video/webm").expect("idle after abort");
        controller.push_chunk(b"fresh".to_vec());
        controller.begin_finalize();
        assert_eq!(
            controller.complete().expect("new session completes").into_bytes(),
            b"fresh".to_vec()
        );
    }

    #[test]
    fn restart_after_completion_succeeds() {
        let mut controller = recording("video/webm");
        controller.begin_finalize();
        controller.complete();

        assert!(controller.begin("video/webm; codecs=vp8").is_ok());
        assert_eq!(controller.phase(), CapturePhase::Recording);
    }
}
