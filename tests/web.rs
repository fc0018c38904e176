//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use snowfield::{FieldConfig, IntensityRamp, SnowCanvas};

wasm_bindgen_test_configure!(run_in_browser);

fn canvas_with_id(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn mount_sizes_canvas_to_viewport() {
    let canvas = canvas_with_id("snow-size");
    let mut snow = SnowCanvas::mount("snow-size", JsValue::UNDEFINED).unwrap();
    let window = web_sys::window().unwrap();
    let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert_eq!(canvas.width(), width);
    assert!(snow.is_running());
    snow.destroy();
    assert!(!snow.is_running());
    snow.destroy();
}

#[wasm_bindgen_test]
fn mount_reports_missing_canvas() {
    let err = SnowCanvas::mount("no-such-canvas", JsValue::NULL)
        .err()
        .unwrap();
    let message = err.dyn_into::<js_sys::Error>().unwrap().message();
    assert_eq!(
        String::from(message),
        "no canvas element with id `no-such-canvas`"
    );
}

#[wasm_bindgen_test]
fn intensity_is_clamped_at_the_boundary() {
    canvas_with_id("snow-intensity");
    let snow = SnowCanvas::mount("snow-intensity", JsValue::UNDEFINED).unwrap();
    snow.set_intensity(0.5);
    assert_eq!(snow.intensity(), 0.5);
    snow.set_intensity(4.0);
    assert_eq!(snow.intensity(), 1.0);
    assert_eq!(snow.ripple_count(), 0);
}

fn click_window() {
    let event = MouseEvent::new("click").unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn window_click_starts_a_ripple() {
    canvas_with_id("snow-click");
    let snow = SnowCanvas::mount("snow-click", JsValue::UNDEFINED).unwrap();
    assert_eq!(snow.ripple_count(), 0);
    click_window();
    assert_eq!(snow.ripple_count(), 1);
}

#[wasm_bindgen_test]
fn destroy_detaches_click_listener() {
    canvas_with_id("snow-detach");
    let mut snow = SnowCanvas::mount("snow-detach", JsValue::UNDEFINED).unwrap();
    click_window();
    assert_eq!(snow.ripple_count(), 1);
    snow.destroy();
    click_window();
    click_window();
    assert_eq!(snow.ripple_count(), 1);
}

#[wasm_bindgen_test]
fn config_object_overrides_defaults() {
    let config = serde_wasm_bindgen::to_value(&FieldConfig {
        base_count: 10,
        ..FieldConfig::default()
    })
    .unwrap();
    let parsed = FieldConfig::from_js(config).unwrap();
    assert_eq!(parsed.base_count, 10);
    assert_eq!(parsed.ripple_lifetime, 30);

    let partial = js_sys::JSON::parse(r#"{"hoverRadius": 80}"#).unwrap();
    let parsed = FieldConfig::from_js(partial).unwrap();
    assert_eq!(parsed.hover_radius, 80.0);
    assert_eq!(parsed.base_count, 50);

    let invalid = js_sys::JSON::parse(r#"{"rippleLifetime": 0}"#).unwrap();
    assert!(FieldConfig::from_js(invalid).is_err());
}

#[wasm_bindgen_test]
fn ramp_is_usable_from_js() {
    let mut ramp = IntensityRamp::new();
    ramp.start();
    assert_eq!(ramp.value(), 0.1);
    ramp.override_with(0.3);
    assert_eq!(ramp.tick(), 0.3);
}
