//! Browser component: an animated stylized globe with a highlighted
//! country outline, plus timed clip capture of the canvas into a video
//! blob.
//!
//! The page shell mounts the component onto an existing `<canvas>` with
//! [`mount`] and drives capture through [`start_capture`] /
//! [`stop_capture`]; rendering, resize handling, and the capture lifecycle
//! are internal.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ResizeObserver, Window};

use runtime::AnimationLoop;
use scene::{GlobeStyle, Star, starfield};

mod raf;
mod recorder;
mod render;

use raf::RafScheduler;
use recorder::ClipRecorder;
use render::render_frame;

thread_local! {
    static APP: RefCell<Option<GlobeApp>> = const { RefCell::new(None) };
}

fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}

pub(crate) fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

/// Mutable drawing surface shared between the frame loop and the resize
/// observer.
struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    stars: Vec<Star>,
    style: GlobeStyle,
    rng: ChaCha8Rng,
}

impl Surface {
    /// Sizes the backing store to logical size times devicePixelRatio and
    /// regenerates the starfield for the new dimensions.
    fn apply_size(&mut self, window: &Window, width: f64, height: f64) {
        let dpr = window.device_pixel_ratio();
        let dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.width = width;
        self.height = height;
        self.canvas.set_width((width * dpr) as u32);
        self.canvas.set_height((height * dpr) as u32);
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let _ = self.ctx.scale(dpr, dpr);

        let overscan = self.style.star_overscan;
        self.stars = starfield(width * overscan, height * overscan, &mut self.rng);
    }
}

/// One mounted globe component.
struct GlobeApp {
    surface: Rc<RefCell<Surface>>,
    animation: AnimationLoop<RafScheduler>,
    recorder: Rc<RefCell<ClipRecorder>>,
    observer: ResizeObserver,
    // Kept alive for as long as the observer may call it.
    _on_resize: Closure<dyn FnMut(js_sys::Array)>,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Mounts the globe onto the canvas with the given element id and starts
/// the animation loop. Fails when the element is missing or a component is
/// already mounted.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<(), JsValue> {
    if APP.with(|app| app.borrow().is_some()) {
        return Err(js_error("globe already mounted"));
    }

    let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
    let document = window.document().ok_or_else(|| js_error("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| js_error(&format!("missing canvas #{canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| js_error("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let mut surface = Surface {
        canvas: canvas.clone(),
        ctx,
        width: 0.0,
        height: 0.0,
        stars: Vec::new(),
        style: GlobeStyle::default(),
        rng: ChaCha8Rng::seed_from_u64(js_sys::Date::now() as u64),
    };
    surface.apply_size(
        &window,
        canvas.client_width() as f64,
        canvas.client_height() as f64,
    );
    let surface = Rc::new(RefCell::new(surface));

    let animation = {
        let surface = surface.clone();
        AnimationLoop::new(
            RafScheduler::new(window.clone()),
            Box::new(move |timing| {
                let s = surface.borrow();
                render_frame(&s.ctx, timing, s.width, s.height, &s.stars, &s.style);
            }),
        )
    };

    let on_resize = {
        let surface = surface.clone();
        let window = window.clone();
        Closure::wrap(Box::new(move |entries: js_sys::Array| {
            let Ok(entry) = entries.get(0).dyn_into::<web_sys::ResizeObserverEntry>() else {
                return;
            };
            let rect = entry.content_rect();
            surface
                .borrow_mut()
                .apply_size(&window, rect.width(), rect.height());
        }) as Box<dyn FnMut(js_sys::Array)>)
    };
    let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
    observer.observe(&canvas);

    animation.start();

    let recorder = Rc::new(RefCell::new(ClipRecorder::new(window)));

    APP.with(|app| {
        *app.borrow_mut() = Some(GlobeApp {
            surface,
            animation,
            recorder,
            observer,
            _on_resize: on_resize,
        });
    });
    Ok(())
}

/// Stops the animation loop, disconnects the resize observer, and drops
/// the component. Any in-flight capture is stopped first.
#[wasm_bindgen]
pub fn unmount() {
    let app = APP.with(|app| app.borrow_mut().take());
    if let Some(app) = app {
        app.recorder.borrow_mut().stop();
        app.animation.stop();
        app.observer.disconnect();
    }
}

/// Starts a capture of the rendered canvas. Resolves with the finalized
/// video blob when `duration_ms` (default 12000) elapses, or earlier when
/// [`stop_capture`] runs.
#[wasm_bindgen]
pub fn start_capture(duration_ms: Option<f64>) -> Result<js_sys::Promise, JsValue> {
    let parts = APP.with(|app| {
        app.borrow()
            .as_ref()
            .map(|a| (a.surface.borrow().canvas.clone(), a.recorder.clone()))
    });
    let Some((canvas, recorder)) = parts else {
        return Err(js_error("globe is not mounted"));
    };

    let duration = duration_ms.unwrap_or(capture::DEFAULT_CLIP_MS);
    ClipRecorder::start(&recorder, &canvas, duration).map_err(|err| js_error(&err.to_string()))
}

/// Ends an active capture early; a no-op when nothing is recording.
#[wasm_bindgen]
pub fn stop_capture() {
    APP.with(|app| {
        if let Some(app) = app.borrow().as_ref() {
            app.recorder.borrow_mut().stop();
        }
    });
}
