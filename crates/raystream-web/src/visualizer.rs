//! Host-facing `Visualizer` object.
//!
//! The page constructs one per canvas, hands it an `<audio>` element once the
//! element can play, and disconnects it on unmount. Everything else (resize,
//! play/pause tracking, the frame loop) is wired internally.

use crate::audio::{self, AnalyserSource, AudioGraph};
use crate::canvas::CanvasPainter;
use crate::dom::{self, EventListener};
use crate::frame::{self, FrameContext, FrameLoop};
use raystream_core::{
    BandPolicy, ConfigError, InstantClock, RayEngine, SpawnInterval, Ticker, VisualizerConfig,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

/// `HTMLMediaElement.HAVE_CURRENT_DATA`
const HAVE_CURRENT_DATA: u16 = 2;

/// Optional engine settings; unset fields keep the canonical defaults.
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct VisualizerOptions {
    ray_count: Option<u32>,
    seed: Option<u32>,
    band_policy: Option<String>,
    energy_scaled: bool,
    pulse: Option<f32>,
}

#[wasm_bindgen]
impl VisualizerOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(js_name = setRayCount)]
    pub fn set_ray_count(&mut self, ray_count: u32) {
        self.ray_count = Some(ray_count);
    }

    #[wasm_bindgen(js_name = setSeed)]
    pub fn set_seed(&mut self, seed: u32) {
        self.seed = Some(seed);
    }

    /// `"equal"` or `"bass-mid-treble"`.
    #[wasm_bindgen(js_name = setBandPolicy)]
    pub fn set_band_policy(&mut self, policy: String) {
        self.band_policy = Some(policy);
    }

    #[wasm_bindgen(js_name = setEnergyScaledSpawning)]
    pub fn set_energy_scaled_spawning(&mut self, enabled: bool) {
        self.energy_scaled = enabled;
    }

    #[wasm_bindgen(js_name = setPulse)]
    pub fn set_pulse(&mut self, weight: f32) {
        self.pulse = Some(weight);
    }
}

impl VisualizerOptions {
    fn to_config(&self) -> Result<VisualizerConfig, ConfigError> {
        let mut config = VisualizerConfig::default();
        if let Some(n) = self.ray_count {
            config = config.with_ray_count(n as usize);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed as u64);
        }
        if let Some(p) = &self.band_policy {
            config = config.with_band_policy(p.parse::<BandPolicy>()?);
        }
        if self.energy_scaled {
            config = config.with_spawn_interval(SpawnInterval::energy_scaled());
        }
        if let Some(w) = self.pulse {
            config = config.with_pulse(w);
        }
        config.validate()?;
        Ok(config)
    }
}

struct Inner {
    canvas: web::HtmlCanvasElement,
    frame_ctx: Rc<RefCell<FrameContext>>,
    graph: Option<AudioGraph>,
    frame_loop: Option<FrameLoop>,
    playback: Vec<EventListener>,
    ready: Option<EventListener>,
    _resize: Option<EventListener>,
}

impl Inner {
    fn connect(&mut self, element: &web::HtmlMediaElement) -> anyhow::Result<()> {
        self.teardown();
        {
            let mut ctx = self.frame_ctx.borrow_mut();
            ctx.ticker.engine.reset();
            ctx.ticker.engine.set_playing(!element.paused());
        }

        match AudioGraph::create_context() {
            Ok(audio_ctx) => {
                let graph = AudioGraph::build(audio_ctx, element)?;
                self.frame_ctx.borrow_mut().analyser =
                    Some(AnalyserSource::new(graph.analyser.clone()));
                self.graph = Some(graph);
            }
            Err(e) => log::error!("[audio] {:#}; running without new rays", e),
        }

        self.playback = wire_playback(element, &self.frame_ctx);
        self.frame_loop = Some(frame::start_loop(self.frame_ctx.clone()));
        Ok(())
    }

    /// Explicit disconnect: also drops a pending `attachWhenReady` listener so
    /// a later `canplaythrough` cannot reconnect.
    fn disconnect(&mut self) {
        self.ready = None;
        self.teardown();
    }

    fn is_attached(&self) -> bool {
        self.graph.is_some() || self.frame_loop.is_some()
    }

    // Leaves `ready` alone; `connect` runs from inside that listener.
    fn teardown(&mut self) {
        if let Some(mut l) = self.frame_loop.take() {
            l.cancel();
        }
        self.playback.clear();
        if let Some(graph) = self.graph.take() {
            graph.close();
            log::info!("[audio] disconnected");
        }
        if let Ok(mut ctx) = self.frame_ctx.try_borrow_mut() {
            ctx.analyser = None;
            ctx.ticker.engine.set_playing(false);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn wire_playback(
    element: &web::HtmlMediaElement,
    frame_ctx: &Rc<RefCell<FrameContext>>,
) -> Vec<EventListener> {
    [("play", true), ("pause", false), ("ended", false)]
        .into_iter()
        .filter_map(|(event, playing)| {
            let weak = Rc::downgrade(frame_ctx);
            EventListener::new(element, event, move || {
                if let Some(ctx) = weak.upgrade() {
                    if let Ok(mut ctx) = ctx.try_borrow_mut() {
                        ctx.ticker.engine.set_playing(playing);
                    }
                }
            })
        })
        .collect()
}

fn wire_resize(
    canvas: &web::HtmlCanvasElement,
    frame_ctx: &Rc<RefCell<FrameContext>>,
) -> Option<EventListener> {
    let window = web::window()?;
    let canvas = canvas.clone();
    let weak: Weak<RefCell<FrameContext>> = Rc::downgrade(frame_ctx);
    EventListener::new(&window, "resize", move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        if let Some(ctx) = weak.upgrade() {
            if let Ok(mut ctx) = ctx.try_borrow_mut() {
                ctx.ticker.engine.resize(w as f32, h as f32);
            }
        }
    })
}

/// Audio-reactive ray visualizer bound to one canvas.
#[wasm_bindgen]
pub struct Visualizer {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl Visualizer {
    /// Allocates no audio resources until `connectAudio`.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: web::HtmlCanvasElement) -> Result<Visualizer, JsValue> {
        Self::with_options(canvas, &VisualizerOptions::default())
    }

    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(
        canvas: web::HtmlCanvasElement,
        options: &VisualizerOptions,
    ) -> Result<Visualizer, JsValue> {
        let config = options
            .to_config()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut engine = RayEngine::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let (w, h) = dom::sync_canvas_backing_size(&canvas);
        engine.resize(w as f32, h as f32);

        let frame_ctx = Rc::new(RefCell::new(FrameContext {
            ticker: Ticker::new(engine, InstantClock::new()),
            painter: CanvasPainter::from_canvas(&canvas),
            analyser: None,
        }));
        let resize = wire_resize(&canvas, &frame_ctx);
        log::info!("[visualizer] created {}x{}", w, h);

        Ok(Visualizer {
            inner: Rc::new(RefCell::new(Inner {
                canvas,
                frame_ctx,
                graph: None,
                frame_loop: None,
                playback: Vec::new(),
                ready: None,
                _resize: resize,
            })),
        })
    }

    /// Route `audio` through an analyser and start the frame loop. Any
    /// previous connection is torn down first.
    #[wasm_bindgen(js_name = connectAudio)]
    pub fn connect_audio(&self, audio: &web::HtmlAudioElement) -> Result<(), JsValue> {
        self.inner
            .borrow_mut()
            .connect(audio)
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))
    }

    /// Connect now if `audio` has data, otherwise on its first `canplaythrough`.
    #[wasm_bindgen(js_name = attachWhenReady)]
    pub fn attach_when_ready(&self, audio: web::HtmlAudioElement) -> Result<(), JsValue> {
        if audio.ready_state() >= HAVE_CURRENT_DATA {
            return self.connect_audio(&audio);
        }
        let weak = Rc::downgrade(&self.inner);
        let target = audio.clone();
        let listener = EventListener::new(&target, "canplaythrough", move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let Ok(mut inner) = inner.try_borrow_mut() else {
                return;
            };
            // Degraded mode has no graph but a running loop.
            if inner.is_attached() {
                return;
            }
            if let Err(e) = inner.connect(&audio) {
                log::error!("[visualizer] connect on canplaythrough failed: {:#}", e);
            }
        });
        self.inner.borrow_mut().ready = listener;
        Ok(())
    }

    /// Idempotent; safe before any connection.
    #[wasm_bindgen(js_name = disconnectAudio)]
    pub fn disconnect_audio(&self) {
        self.inner.borrow_mut().disconnect();
    }

    #[wasm_bindgen(js_name = isConnected)]
    pub fn is_connected(&self) -> bool {
        self.inner.borrow().graph.is_some()
    }

    /// The context the host resumes on a user gesture.
    #[wasm_bindgen(js_name = getAudioContext)]
    pub fn audio_context(&self) -> Option<web::AudioContext> {
        self.inner
            .borrow()
            .graph
            .as_ref()
            .map(|g| g.audio_ctx.clone())
    }

    #[wasm_bindgen(js_name = resumeIfSuspended)]
    pub fn resume_if_suspended(&self) -> Option<js_sys::Promise> {
        let inner = self.inner.borrow();
        audio::resume_if_suspended(&inner.graph.as_ref()?.audio_ctx)
    }

    #[wasm_bindgen(js_name = liveRayCount)]
    pub fn live_ray_count(&self) -> usize {
        let inner = self.inner.borrow();
        let ctx = inner.frame_ctx.borrow();
        ctx.ticker.engine.field().live_count()
    }

    /// Re-read the canvas size; the window `resize` listener does this too.
    pub fn resize(&self) {
        let inner = self.inner.borrow();
        let (w, h) = dom::sync_canvas_backing_size(&inner.canvas);
        inner
            .frame_ctx
            .borrow_mut()
            .ticker
            .engine
            .resize(w as f32, h as f32);
    }
}
