//! Clip capture over the browser's MediaRecorder.
//!
//! The platform-agnostic state machine in the `capture` crate owns the
//! session lifecycle; this module wires it to the canvas stream tap, the
//! encoder callbacks, and the one-shot duration timer, and settles the
//! caller's promise exactly once per session.

use std::cell::RefCell;
use std::rc::Rc;

use capture::{CAPTURE_BITRATE, CAPTURE_FPS, CaptureController, CaptureError, negotiate};
use js_sys::{Function, Promise};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, HtmlCanvasElement, MediaRecorder, MediaRecorderErrorEvent,
    MediaRecorderOptions, RecordingState, Window,
};

/// One armed MediaRecorder plus everything needed to settle the caller's
/// promise. Dropped in full when the session ends, which also releases the
/// event closures.
struct MediaSession {
    recorder: MediaRecorder,
    timeout_id: Option<i32>,
    resolve: Function,
    reject: Function,
    _on_data: Closure<dyn FnMut(BlobEvent)>,
    _on_error: Closure<dyn FnMut(MediaRecorderErrorEvent)>,
    _on_stop: Closure<dyn FnMut(web_sys::Event)>,
    _on_timeout: Closure<dyn FnMut()>,
}

/// Records the live canvas stream into a single tagged blob.
pub struct ClipRecorder {
    window: Window,
    controller: CaptureController<Blob>,
    session: Option<MediaSession>,
}

impl ClipRecorder {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            controller: CaptureController::new(),
            session: None,
        }
    }

    /// Starts a capture session. The returned promise resolves with the
    /// finalized blob when the duration elapses (or [`ClipRecorder::stop`]
    /// runs first) and rejects on encoder failure.
    pub fn start(
        this: &Rc<RefCell<ClipRecorder>>,
        canvas: &HtmlCanvasElement,
        duration_ms: f64,
    ) -> Result<Promise, CaptureError> {
        if this.borrow().controller.is_active() {
            return Err(CaptureError::AlreadyRecording);
        }
        if !js_sys::Reflect::has(canvas.as_ref(), &JsValue::from_str("captureStream"))
            .unwrap_or(false)
        {
            return Err(CaptureError::StreamingUnsupported);
        }
        let mime = negotiate(MediaRecorder::is_type_supported)
            .ok_or(CaptureError::EncodingUnsupported)?;

        let stream = canvas
            .capture_stream_with_frame_request_rate(CAPTURE_FPS)
            .map_err(|_| CaptureError::SurfaceUnavailable)?;

        let options = MediaRecorderOptions::new();
        options.set_mime_type(mime);
        options.set_video_bits_per_second(CAPTURE_BITRATE);
        let recorder =
            MediaRecorder::new_with_media_stream_and_media_recorder_options(&stream, &options)
                .map_err(|err| CaptureError::EncoderInit(describe_js(&err)))?;

        let mut resolve_slot = None;
        let mut reject_slot = None;
        let promise = Promise::new(&mut |resolve, reject| {
            resolve_slot = Some(resolve);
            reject_slot = Some(reject);
        });
        let (resolve, reject) = match (resolve_slot, reject_slot) {
            (Some(resolve), Some(reject)) => (resolve, reject),
            _ => {
                return Err(CaptureError::EncoderInit(
                    "promise executor did not run".into(),
                ));
            }
        };

        let on_data = {
            let this = Rc::clone(this);
            Closure::wrap(Box::new(move |event: BlobEvent| {
                if let Some(blob) = event_blob(&event) {
                    this.borrow_mut().controller.push_chunk(blob);
                }
            }) as Box<dyn FnMut(BlobEvent)>)
        };
        let on_error = {
            let this = Rc::clone(this);
            Closure::wrap(Box::new(move |event: MediaRecorderErrorEvent| {
                this.borrow_mut().fail(&event_error_message(&event));
            }) as Box<dyn FnMut(MediaRecorderErrorEvent)>)
        };
        let on_stop = {
            let this = Rc::clone(this);
            Closure::wrap(Box::new(move |_event: web_sys::Event| {
                this.borrow_mut().finish();
            }) as Box<dyn FnMut(web_sys::Event)>)
        };
        let on_timeout = {
            let this = Rc::clone(this);
            Closure::wrap(Box::new(move || {
                this.borrow_mut().clip_elapsed();
            }) as Box<dyn FnMut()>)
        };

        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));
        recorder.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

        let mut state = this.borrow_mut();
        state.controller.begin(mime)?;

        if let Err(err) = recorder.start() {
            let _ = state.controller.abort("encoder failed to start");
            return Err(CaptureError::EncoderInit(describe_js(&err)));
        }

        let timeout_id = match state
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                on_timeout.as_ref().unchecked_ref(),
                duration_ms.max(0.0) as i32,
            ) {
            Ok(id) => Some(id),
            Err(err) => {
                // The recorder stop event will find an idle controller and
                // settle nothing.
                let _ = recorder.stop();
                let _ = state.controller.abort("duration timer unavailable");
                return Err(CaptureError::EncoderInit(describe_js(&err)));
            }
        };

        state.session = Some(MediaSession {
            recorder,
            timeout_id,
            resolve,
            reject,
            _on_data: on_data,
            _on_error: on_error,
            _on_stop: on_stop,
            _on_timeout: on_timeout,
        });

        Ok(promise)
    }

    /// Ends an active capture early. No-op when idle; safe to repeat.
    pub fn stop(&mut self) {
        if !self.controller.is_active() {
            return;
        }
        self.clear_timer();
        self.finalize_now();
    }

    /// The duration timer fired: the timer handle is spent, finalize.
    fn clip_elapsed(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.timeout_id = None;
        }
        self.finalize_now();
    }

    /// Requests encoder shutdown once; the recorder's stop event carries
    /// out the actual finalization.
    fn finalize_now(&mut self) {
        if !self.controller.begin_finalize() {
            return;
        }
        if let Some(session) = self.session.as_ref() {
            if session.recorder.state() == RecordingState::Recording {
                let _ = session.recorder.stop();
            }
        }
    }

    /// Recorder `stop` event: assemble the blob and resolve the caller.
    /// A stop that trails an abort finds an idle controller and settles
    /// nothing.
    fn finish(&mut self) {
        self.controller.begin_finalize();
        let Some(result) = self.controller.complete() else {
            return;
        };
        let Some(session) = self.session.take() else {
            return;
        };
        match assemble_blob(&result.chunks, &result.mime_type) {
            Ok(blob) => {
                let _ = session.resolve.call1(&JsValue::NULL, &blob);
            }
            Err(err) => {
                let reason = format!("failed to assemble the clip: {}", describe_js(&err));
                crate::warn(&reason);
                let _ = session
                    .reject
                    .call1(&JsValue::NULL, &js_sys::Error::new(&reason).into());
            }
        }
    }

    /// Recorder `error` event: abort the session and reject the caller.
    fn fail(&mut self, reason: &str) {
        if !self.controller.is_active() {
            return;
        }
        self.clear_timer();
        let error = self.controller.abort(reason);
        crate::warn(&error.to_string());
        if let Some(session) = self.session.take() {
            let _ = session
                .reject
                .call1(&JsValue::NULL, &js_sys::Error::new(&error.to_string()).into());
        }
    }

    fn clear_timer(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if let Some(id) = session.timeout_id.take() {
                self.window.clear_timeout_with_handle(id);
            }
        }
    }
}

/// Reads the `data` blob off a `dataavailable` event.
fn event_blob(event: &BlobEvent) -> Option<Blob> {
    js_sys::Reflect::get(event.as_ref(), &JsValue::from_str("data"))
        .ok()
        .and_then(|data| data.dyn_into::<Blob>().ok())
}

/// Reads the failure reason off a recorder `error` event.
fn event_error_message(event: &MediaRecorderErrorEvent) -> String {
    js_sys::Reflect::get(event.as_ref(), &JsValue::from_str("error"))
        .ok()
        .and_then(|error| error.dyn_into::<web_sys::DomException>().ok())
        .map(|exception| exception.message())
        .unwrap_or_else(|| "unknown encoder error".into())
}

fn assemble_blob(chunks: &[Blob], mime_type: &str) -> Result<Blob, JsValue> {
    let parts = js_sys::Array::new();
    for chunk in chunks {
        parts.push(chunk);
    }
    let options = BlobPropertyBag::new();
    options.set_type(mime_type);
    Blob::new_with_blob_sequence_and_options(parts.as_ref(), &options)
}

fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
