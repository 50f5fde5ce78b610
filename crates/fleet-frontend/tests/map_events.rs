//! Browser tests for the map click bridge.
//!
//! Run with `wasm-pack test --headless --firefox crates/fleet-frontend`.

use std::cell::RefCell;
use std::rc::Rc;

use fleet_domain::ClickLocation;
use fleet_frontend::services::{broadcast_map_click, MapClickSubscription, MAP_CLICK_EVENT};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;
use web_sys::{CustomEvent, CustomEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn recorder() -> (Rc<RefCell<Vec<ClickLocation>>>, impl FnMut(ClickLocation) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |location| sink.borrow_mut().push(location))
}

#[wasm_bindgen_test]
fn subscription_receives_broadcast_clicks() {
    let (seen, on_click) = recorder();
    let _subscription = MapClickSubscription::attach(on_click).unwrap();

    let first = ClickLocation::new(39.7817, -89.6501).unwrap();
    let second = ClickLocation::new(40.0, -88.0).unwrap();
    broadcast_map_click(first).unwrap();
    broadcast_map_click(second).unwrap();

    assert_eq!(seen.borrow().as_slice(), &[first, second]);
}

#[wasm_bindgen_test]
fn dropping_subscription_stops_delivery() {
    let (seen, on_click) = recorder();
    let subscription = MapClickSubscription::attach(on_click).unwrap();
    let point = ClickLocation::new(1.5, 2.5).unwrap();

    broadcast_map_click(point).unwrap();
    drop(subscription);
    broadcast_map_click(point).unwrap();

    assert_eq!(seen.borrow().len(), 1);
}

#[wasm_bindgen_test]
fn malformed_detail_is_ignored() {
    let (seen, on_click) = recorder();
    let _subscription = MapClickSubscription::attach(on_click).unwrap();

    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &"lat".into(), &JsValue::from_str("north")).unwrap();
    js_sys::Reflect::set(&detail, &"lng".into(), &JsValue::from_f64(12.0)).unwrap();
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(MAP_CLICK_EVENT, &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();

    assert!(seen.borrow().is_empty());
}
