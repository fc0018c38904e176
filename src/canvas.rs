// Browser component: mounts a `ParticleField` on a canvas, wires the
// window's pointer, click and resize events into it, and drives it from
// `requestAnimationFrame` until it is destroyed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use crate::config::FieldConfig;
use crate::error::SnowError;
use crate::field::ParticleField;
use crate::renderer::CanvasRenderer;
use crate::utils::Timer;

struct Shared {
    field: ParticleField,
    renderer: CanvasRenderer,
}

// A DOM listener that stays registered until `detach` or drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, SnowError>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            kind,
            closure,
        })
    }

    fn detach(&self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {:?}", self.kind, err);
        }
    }
}

// Self-rescheduling animation frame callback with an explicit running flag.
struct FrameLoop {
    running: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    // The callback keeps a clone of this Rc to reschedule itself; `stop`
    // takes the closure out, which breaks the cycle.
    callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    fn start(window: &Window, shared: Rc<RefCell<Shared>>) -> Result<Self, SnowError> {
        let running = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let tick = {
            let running = running.clone();
            let handle = handle.clone();
            let callback = callback.clone();
            let window = window.clone();
            move || {
                handle.set(None);
                if !running.get() {
                    return;
                }
                run_frame(&shared);
                let next = match callback.borrow().as_ref() {
                    Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref()),
                    None => return,
                };
                match next {
                    Ok(id) => handle.set(Some(id)),
                    Err(err) => {
                        log::error!("could not schedule the next snow frame: {:?}", err);
                        running.set(false);
                    }
                }
            }
        };
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(tick) as Box<dyn FnMut()>));

        let id = match callback.borrow().as_ref() {
            Some(cb) => window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(SnowError::Js("animation frame callback missing".to_owned())),
        };
        handle.set(Some(id));

        Ok(FrameLoop {
            running,
            handle,
            callback,
        })
    }

    fn is_running(&self) -> bool {
        self.running.get()
    }

    fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::warn!("failed to cancel animation frame {}: {:?}", id, err);
                }
            }
        }
        self.callback.borrow_mut().take();
    }
}

fn run_frame(shared: &Rc<RefCell<Shared>>) {
    let mut shared = shared.borrow_mut();
    let _timer = if shared.field.config().profile_frames {
        Some(Timer::new("snowfield::frame"))
    } else {
        None
    };
    let Shared { field, renderer } = &mut *shared;
    if let Err(err) = field.frame(renderer) {
        log::error!("snow frame failed: {}", err);
    }
}

fn viewport(window: &Window) -> (f64, f64) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0);
    (width, height)
}

fn resize_to_viewport(window: &Window, shared: &RefCell<Shared>) {
    let (width, height) = viewport(window);
    let mut shared = shared.borrow_mut();
    shared.renderer.fit(width, height);
    shared.field.resize(width, height);
}

// Registers the window listeners, pushing each one as soon as it is attached
// so the caller can detach whatever made it in when a later one fails.
fn attach_listeners(
    window: &Window,
    shared: &Rc<RefCell<Shared>>,
    listeners: &mut Vec<Listener>,
) -> Result<(), SnowError> {
    {
        let shared = shared.clone();
        listeners.push(Listener::attach(window, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                shared
                    .borrow_mut()
                    .field
                    .pointer_move(event.client_x() as f64, event.client_y() as f64);
            }
        })?);
    }
    {
        let shared = shared.clone();
        listeners.push(Listener::attach(window, "click", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                shared
                    .borrow_mut()
                    .field
                    .click(event.client_x() as f64, event.client_y() as f64);
            }
        })?);
    }
    let shared = shared.clone();
    let resize_window = window.clone();
    listeners.push(Listener::attach(window, "resize", move |_| {
        resize_to_viewport(&resize_window, &shared);
    })?);
    Ok(())
}

// Full-viewport snowfall mounted on a canvas element. Dropping the value (or
// calling `free()` from JS) tears it down the same way `destroy()` does.
#[wasm_bindgen]
pub struct SnowCanvas {
    shared: Rc<RefCell<Shared>>,
    frame_loop: FrameLoop,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl SnowCanvas {
    // Mounts on the canvas with the given element id. `config` is an
    // optional object of tuning overrides.
    pub fn mount(canvas_id: &str, config: JsValue) -> Result<SnowCanvas, JsValue> {
        let window = web_sys::window().ok_or(SnowError::NoWindow)?;
        let document = window.document().ok_or(SnowError::NoDocument)?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SnowError::CanvasNotFound(canvas_id.to_owned()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| SnowError::CanvasNotFound(canvas_id.to_owned()))?;
        SnowCanvas::mount_element(canvas, config)
    }

    pub fn mount_element(canvas: HtmlCanvasElement, config: JsValue) -> Result<SnowCanvas, JsValue> {
        let config = FieldConfig::from_js(config)?;
        Ok(SnowCanvas::start(canvas, config)?)
    }

    pub fn set_intensity(&self, value: f64) {
        self.shared.borrow_mut().field.set_intensity(value);
    }

    pub fn intensity(&self) -> f64 {
        self.shared.borrow().field.intensity()
    }

    pub fn particle_count(&self) -> u32 {
        self.shared.borrow().field.particles().len() as u32
    }

    pub fn ripple_count(&self) -> u32 {
        self.shared.borrow().field.ripples().len() as u32
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    // Stops the frame loop and detaches every listener. Safe to call more
    // than once.
    pub fn destroy(&mut self) {
        if !self.frame_loop.is_running() && self.listeners.is_empty() {
            return;
        }
        self.frame_loop.stop();
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
        log::info!("snow canvas destroyed");
    }
}

impl SnowCanvas {
    fn start(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<SnowCanvas, SnowError> {
        let window = web_sys::window().ok_or(SnowError::NoWindow)?;
        let renderer = CanvasRenderer::new(canvas)?;
        let shared = Rc::new(RefCell::new(Shared {
            field: ParticleField::new(config),
            renderer,
        }));
        resize_to_viewport(&window, &shared);

        let mut listeners = Vec::with_capacity(3);
        let started = attach_listeners(&window, &shared, &mut listeners)
            .and_then(|()| FrameLoop::start(&window, shared.clone()));
        let frame_loop = match started {
            Ok(frame_loop) => frame_loop,
            Err(err) => {
                for listener in listeners.drain(..) {
                    listener.detach();
                }
                return Err(err);
            }
        };

        let (width, height) = shared.borrow().field.size();
        log::info!("snow canvas mounted at {}x{}", width, height);

        Ok(SnowCanvas {
            shared,
            frame_loop,
            listeners,
        })
    }
}

impl Drop for SnowCanvas {
    fn drop(&mut self) {
        self.destroy();
    }
}
