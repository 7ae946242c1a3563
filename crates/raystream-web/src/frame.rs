use crate::audio::AnalyserSource;
use crate::canvas::CanvasPainter;
use raystream_core::{FrequencySource, InstantClock, Painter, Ticker};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// State touched by the frame callback and the DOM listeners.
pub struct FrameContext {
    pub ticker: Ticker<InstantClock>,
    pub painter: Option<CanvasPainter>,
    pub analyser: Option<AnalyserSource>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let analyser = self
            .analyser
            .as_mut()
            .map(|a| a as &mut dyn FrequencySource);
        let painter = self.painter.as_mut().map(|p| p as &mut dyn Painter);
        let report = self.ticker.tick(analyser, painter);
        if !report.spawned.is_empty() {
            log::trace!("[frame] spawned {:?}", report.spawned);
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running requestAnimationFrame loop.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl FrameLoop {
    /// Stop before the next frame. A tick already executing finishes but does
    /// not re-arm.
    pub fn cancel(&mut self) {
        self.running.set(false);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        // breaks the closure's self-reference
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => raf_id.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame error: {:?}", e),
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let running = Rc::new(Cell::new(true));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: TickClosure = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if !running_tick.get() {
            return;
        }
        match frame_ctx.try_borrow_mut() {
            Ok(mut ctx) => ctx.frame(),
            Err(_) => log::warn!("[frame] state busy; skipping tick"),
        }
        if running_tick.get() {
            request_frame(&tick_clone, &raf_tick);
        }
    }) as Box<dyn FnMut()>));

    request_frame(&tick, &raf_id);
    FrameLoop {
        running,
        raf_id,
        tick,
    }
}
