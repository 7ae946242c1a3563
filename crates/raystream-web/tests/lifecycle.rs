// Browser tests for the connect/disconnect lifecycle. Run with
// `wasm-pack test --headless --chrome crates/raystream-web`.
#![cfg(target_arch = "wasm32")]

use raystream_web::Visualizer;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web::Document {
    web::window().and_then(|w| w.document()).unwrap()
}

fn make_visualizer() -> Visualizer {
    let canvas: web::HtmlCanvasElement = document()
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    Visualizer::new(canvas).unwrap()
}

// A media element can only feed one source node, so every connect gets a fresh one.
fn make_audio() -> web::HtmlAudioElement {
    document().create_element("audio").unwrap().dyn_into().unwrap()
}

fn fire(target: &web::EventTarget, name: &str) {
    let ev = web::Event::new(name).unwrap();
    target.dispatch_event(&ev).unwrap();
}

#[wasm_bindgen_test]
fn disconnect_before_any_connect_is_a_no_op() {
    let viz = make_visualizer();
    viz.disconnect_audio();
    assert!(!viz.is_connected());
    assert!(viz.audio_context().is_none());
}

#[wasm_bindgen_test]
fn double_disconnect_leaves_visualizer_disconnected() {
    let viz = make_visualizer();
    viz.connect_audio(&make_audio()).unwrap();
    assert!(viz.is_connected());

    viz.disconnect_audio();
    viz.disconnect_audio();
    assert!(!viz.is_connected());
    assert!(viz.audio_context().is_none());
}

#[wasm_bindgen_test]
fn reconnect_after_disconnect_starts_clean() {
    let viz = make_visualizer();
    viz.connect_audio(&make_audio()).unwrap();
    let first = viz.audio_context().unwrap();
    viz.disconnect_audio();

    viz.connect_audio(&make_audio()).unwrap();
    assert!(viz.is_connected());
    let second = viz.audio_context().unwrap();
    assert!(!js_sys::Object::is(&first, &second));
    assert_eq!(viz.live_ray_count(), 0);
    viz.disconnect_audio();
    assert!(!viz.is_connected());
}

#[wasm_bindgen_test]
fn pending_attach_connects_on_canplaythrough() {
    let viz = make_visualizer();
    let audio = make_audio();
    viz.attach_when_ready(audio.clone()).unwrap();
    assert!(!viz.is_connected());

    fire(&audio, "canplaythrough");
    assert!(viz.is_connected());
    viz.disconnect_audio();
}

#[wasm_bindgen_test]
fn disconnect_cancels_pending_attach() {
    let viz = make_visualizer();
    let audio = make_audio();
    viz.attach_when_ready(audio.clone()).unwrap();
    viz.disconnect_audio();

    fire(&audio, "canplaythrough");
    assert!(!viz.is_connected());
    assert!(viz.audio_context().is_none());
}

#[wasm_bindgen_test]
fn disconnect_after_attach_ignores_later_canplaythrough() {
    let viz = make_visualizer();
    let audio = make_audio();
    viz.attach_when_ready(audio.clone()).unwrap();
    fire(&audio, "canplaythrough");
    assert!(viz.is_connected());
    viz.disconnect_audio();

    // a seek or src change fires the event again
    fire(&audio, "canplaythrough");
    assert!(!viz.is_connected());
}
