//! # Map Click Events
//!
//! The map announces every click as a `mapClick` `CustomEvent` on `window`
//! with `detail = { lat, lng }`. Anything interested in picked locations
//! holds a [`MapClickSubscription`] for as long as it wants them.

use std::cell::Cell;

use fleet_domain::ClickLocation;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Event, Window};

pub const MAP_CLICK_EVENT: &str = "mapClick";

thread_local! {
    static ACTIVE_LISTENERS: Cell<usize> = const { Cell::new(0) };
}

/// Number of [`MapClickSubscription`]s currently attached
pub fn active_map_click_listeners() -> usize {
    ACTIVE_LISTENERS.with(Cell::get)
}

fn browser_window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Broadcast a map click to every current subscriber
pub fn broadcast_map_click(location: ClickLocation) -> Result<(), JsValue> {
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &"lat".into(), &JsValue::from_f64(location.latitude))?;
    js_sys::Reflect::set(&detail, &"lng".into(), &JsValue::from_f64(location.longitude))?;

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(MAP_CLICK_EVENT, &init)?;
    browser_window()?.dispatch_event(&event)?;
    Ok(())
}

/// Window listener for map clicks, removed on drop
pub struct MapClickSubscription {
    target: Window,
    handler: Closure<dyn FnMut(Event)>,
}

impl MapClickSubscription {
    pub fn attach(mut on_click: impl FnMut(ClickLocation) + 'static) -> Result<Self, JsValue> {
        let target = browser_window()?;

        let handler = Closure::wrap(Box::new(move |event: Event| {
            match click_location(&event) {
                Some(location) => on_click(location),
                None => log::debug!("Ignoring {MAP_CLICK_EVENT} without usable coordinates"),
            }
        }) as Box<dyn FnMut(Event)>);

        target.add_event_listener_with_callback(MAP_CLICK_EVENT, handler.as_ref().unchecked_ref())?;
        ACTIVE_LISTENERS.with(|count| count.set(count.get() + 1));
        log::debug!("Listening for map clicks");

        Ok(Self { target, handler })
    }
}

impl Drop for MapClickSubscription {
    fn drop(&mut self) {
        ACTIVE_LISTENERS.with(|count| count.set(count.get().saturating_sub(1)));
        match self
            .target
            .remove_event_listener_with_callback(MAP_CLICK_EVENT, self.handler.as_ref().unchecked_ref())
        {
            Ok(()) => log::debug!("Stopped listening for map clicks"),
            Err(e) => log::error!("Failed to remove map click listener: {e:?}"),
        }
    }
}

fn click_location(event: &Event) -> Option<ClickLocation> {
    let detail = event.dyn_ref::<CustomEvent>()?.detail();
    let lat = js_sys::Reflect::get(&detail, &"lat".into()).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&detail, &"lng".into()).ok()?.as_f64()?;
    ClickLocation::new(lat, lng)
}
