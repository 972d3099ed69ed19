//! Browser host for the splash animation
//!
//! Binds the overlay and canvas elements, sizes the canvas to the viewport,
//! and turns the model's timer/frame requests into `setTimeout` and
//! `requestAnimationFrame` callbacks.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, DocumentReadyState, HtmlCanvasElement, HtmlElement, Window};

use crate::consts::*;
use crate::renderer::{Canvas2d, Paint, Stroke};
use crate::sim::{LoopControl, Overlay, SplashAnimation, Timer};

impl Canvas2d for CanvasRenderingContext2d {
    fn save(&mut self) {
        let ctx: &CanvasRenderingContext2d = self;
        ctx.save();
    }

    fn restore(&mut self) {
        let ctx: &CanvasRenderingContext2d = self;
        ctx.restore();
    }

    fn translate(&mut self, offset: DVec2) {
        let ctx: &CanvasRenderingContext2d = self;
        let _ = ctx.translate(offset.x, offset.y);
    }

    fn rotate(&mut self, angle: f64) {
        let ctx: &CanvasRenderingContext2d = self;
        let _ = ctx.rotate(angle);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, paint: &Paint) {
        let ctx: &CanvasRenderingContext2d = self;
        set_fill(ctx, paint);
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, radius, 0.0, TAU);
        ctx.fill();
    }

    fn stroke_arc(&mut self, center: DVec2, radius: f64, start: f64, end: f64, stroke: &Stroke) {
        let ctx: &CanvasRenderingContext2d = self;
        ctx.set_stroke_style_str(stroke.color);
        ctx.set_line_width(stroke.width);
        ctx.begin_path();
        let _ = ctx.arc(center.x, center.y, radius, start, end);
        ctx.stroke();
    }

    fn fill_ellipse(&mut self, center: DVec2, radii: DVec2, color: &'static str) {
        let ctx: &CanvasRenderingContext2d = self;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        let _ = ctx.ellipse(center.x, center.y, radii.x, radii.y, 0.0, 0.0, TAU);
        ctx.fill();
    }
}

fn set_fill(ctx: &CanvasRenderingContext2d, paint: &Paint) {
    match paint {
        Paint::Solid(color) => ctx.set_fill_style_str(color),
        Paint::Radial(g) => {
            match ctx.create_radial_gradient(
                g.inner_center.x,
                g.inner_center.y,
                g.inner_radius,
                g.outer_center.x,
                g.outer_center.y,
                g.outer_radius,
            ) {
                Ok(gradient) => {
                    for &(offset, color) in g.stops {
                        let _ = gradient.add_color_stop(offset, color);
                    }
                    ctx.set_fill_style_canvas_gradient(&gradient);
                }
                Err(e) => log::warn!("Radial gradient failed: {:?}", e),
            }
        }
    }
}

/// The overlay element; hidden via CSS class, removed via `display: none`
struct DomOverlay(HtmlElement);

impl Overlay for DomOverlay {
    fn hide(&mut self) {
        let _ = self.0.class_list().add_1(HIDDEN_CLASS);
    }

    fn remove(&mut self) {
        let _ = self.0.style().set_property("display", "none");
    }
}

/// Everything the browser callbacks share
struct Splash {
    anim: SplashAnimation<Pcg32>,
    ctx: CanvasRenderingContext2d,
    overlay: DomOverlay,
}

type SharedSplash = Rc<RefCell<Splash>>;

/// Viewport size in CSS pixels
fn viewport_size(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
}

/// Start the splash. Missing host elements skip the splash silently.
pub fn start_splash() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let (Some(overlay), Some(canvas)) = (
        document.get_element_by_id(OVERLAY_ID),
        document.get_element_by_id(CANVAS_ID),
    ) else {
        log::warn!("#{} or #{} missing, splash skipped", OVERLAY_ID, CANVAS_ID);
        return Ok(());
    };
    let overlay: HtmlElement = overlay.dyn_into()?;
    let canvas: HtmlCanvasElement = canvas.dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("no 2d context")?
        .dyn_into()?;

    let (width, height) = viewport_size(&window);
    size_canvas(&canvas, width, height);

    let seed = js_sys::Date::now() as u64;
    let anim = SplashAnimation::new(Pcg32::seed_from_u64(seed), width, height);
    log::info!(
        "Splash starting: seed={} surface={}x{} balls={}",
        seed,
        width,
        height,
        anim.ball_count()
    );
    let timers = anim.start_timers();

    let splash = Rc::new(RefCell::new(Splash {
        anim,
        ctx,
        overlay: DomOverlay(overlay),
    }));

    // Window resize re-sizes the canvas and moves every ball's floor
    {
        let splash = Rc::clone(&splash);
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = viewport_size(&window);
            size_canvas(&canvas, width, height);
            splash.borrow_mut().anim.resize(width, height);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for timer in timers {
        set_timer(&window, Rc::clone(&splash), timer)?;
    }
    request_frame(&window, splash)
}

fn set_timer(window: &Window, splash: SharedSplash, timer: Timer) -> Result<(), JsValue> {
    let Timer { delay_ms, event } = timer;
    let closure = Closure::once(move || {
        let next = {
            let mut guard = splash.borrow_mut();
            let Splash { anim, overlay, .. } = &mut *guard;
            anim.on_timer(event, overlay)
        };
        if let (Some(next), Some(window)) = (next, web_sys::window()) {
            if let Err(e) = set_timer(&window, splash, next) {
                log::error!("Failed to arm {:?}: {:?}", next.event, e);
            }
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms as i32,
    )?;
    closure.forget();
    Ok(())
}

fn request_frame(window: &Window, splash: SharedSplash) -> Result<(), JsValue> {
    let closure = Closure::once(move |_time: f64| {
        frame_loop(splash);
    });
    window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn frame_loop(splash: SharedSplash) {
    let control = {
        let mut guard = splash.borrow_mut();
        let Splash { anim, ctx, .. } = &mut *guard;
        anim.frame(ctx)
    };
    if control == LoopControl::Stop {
        log::debug!("Frame loop stopped");
        return;
    }
    if let Some(window) = web_sys::window() {
        if let Err(e) = request_frame(&window, splash) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// Run `f` once the document reaches `ready` (now, if it already has),
/// listening for `event` otherwise
fn when_ready(
    ready: DocumentReadyState,
    event: &str,
    f: impl FnOnce() + 'static,
) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let reached = match (ready, document.ready_state()) {
        (_, DocumentReadyState::Complete) => true,
        (DocumentReadyState::Interactive, DocumentReadyState::Interactive) => true,
        _ => false,
    };
    if reached {
        f();
        return Ok(());
    }

    let closure = Closure::once(f);
    if ready == DocumentReadyState::Complete {
        window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    } else {
        document.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    }
    closure.forget();
    Ok(())
}

/// Wasm entry: logging, panic hook, then the splash on `load` and the page
/// embellishments on `DOMContentLoaded`
pub fn boot() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
    }

    log::info!("Tennis Splash starting...");

    let splash = when_ready(DocumentReadyState::Complete, "load", || {
        if let Err(e) = start_splash() {
            log::error!("Splash failed to start: {:?}", e);
        }
    });
    if let Err(e) = splash {
        log::error!("Could not wait for page load: {:?}", e);
    }

    let page = when_ready(DocumentReadyState::Interactive, "DOMContentLoaded", || {
        if let Err(e) = super::page::install() {
            log::error!("Page embellishments failed: {:?}", e);
        }
    });
    if let Err(e) = page {
        log::error!("Could not wait for DOMContentLoaded: {:?}", e);
    }
}
