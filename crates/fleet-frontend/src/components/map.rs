//! # Map Component
//!
//! Leaflet map showing the visible vehicles. Every click on the map is
//! broadcast as a `mapClick` event for whoever is picking locations.

use fleet_domain::ClickLocation;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use crate::config::FrontendConfig;
use crate::services::broadcast_map_click;
use crate::state::{use_app_state, TrackedVehicle};

/// Leaflet map wrapper
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L)]
    type Map;

    #[wasm_bindgen(js_namespace = L, js_name = map)]
    fn create_map(id: &str) -> Map;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &Map, lat_lng: &JsValue, zoom: u32) -> Map;

    #[wasm_bindgen(method)]
    fn on(this: &Map, event: &str, handler: &js_sys::Function) -> Map;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> TileLayer;

    #[wasm_bindgen]
    type TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &Map);

    #[wasm_bindgen(js_namespace = L)]
    type LayerGroup;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn create_layer_group() -> LayerGroup;

    #[wasm_bindgen(method, js_name = addTo)]
    fn group_add_to(this: &LayerGroup, map: &Map);

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &LayerGroup);

    #[wasm_bindgen(js_namespace = L)]
    type CircleMarker;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn create_circle_marker(lat_lng: &JsValue, options: &JsValue) -> CircleMarker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &CircleMarker, content: &str) -> CircleMarker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn marker_add_to(this: &CircleMarker, group: &LayerGroup);
}

/// Live Leaflet map plus the layer holding vehicle markers
struct MapHandle {
    _map: Map,
    markers: LayerGroup,
}

impl MapHandle {
    fn init(map_id: &str, config: &FrontendConfig) -> Option<Self> {
        let window = web_sys::window()?;
        if window.get("L").is_none() {
            log::warn!("Leaflet not loaded, map will not render");
            return None;
        }

        let map = create_map(map_id);
        map.set_view(&lat_lng(config.map.center_lat, config.map.center_lng), config.map.zoom);

        let tile_options = js_object(&[
            ("maxZoom", JsValue::from_f64(19.0)),
            ("attribution", JsValue::from_str(&config.map.attribution)),
        ]);
        tile_layer(&config.map.tile_url, &tile_options).add_to(&map);

        let on_click = Closure::wrap(Box::new(move |event: JsValue| {
            let Some(location) = event_location(&event) else {
                return;
            };
            if let Err(e) = broadcast_map_click(location) {
                log::error!("Failed to broadcast map click: {e:?}");
            }
        }) as Box<dyn FnMut(JsValue)>);
        map.on("click", on_click.as_ref().unchecked_ref());
        on_click.forget();

        let markers = create_layer_group();
        markers.group_add_to(&map);

        log::info!(
            "Map initialized at {:.4}, {:.4} zoom {}",
            config.map.center_lat,
            config.map.center_lng,
            config.map.zoom
        );
        Some(Self { _map: map, markers })
    }

    fn render_vehicles(&self, vehicles: &[TrackedVehicle]) {
        self.markers.clear_layers();
        for tracked in vehicles {
            let vehicle = &tracked.vehicle;
            let Some(location) = vehicle.location() else {
                log::warn!("Vehicle {} has no usable location", vehicle.vehicle_id);
                continue;
            };

            let entry = vehicle.status.entry();
            let options = js_object(&[
                ("color", JsValue::from_str(entry.color)),
                ("fillColor", JsValue::from_str(entry.color)),
                ("fillOpacity", JsValue::from_f64(0.8)),
                ("radius", JsValue::from_f64(8.0)),
            ]);
            let marker = create_circle_marker(&lat_lng(location.latitude, location.longitude), &options);

            let popup_content = format!(
                "<b>{}</b><br/>{}<br/>{} · {}",
                escape_html(&vehicle.vehicle_id),
                escape_html(&vehicle.license_plate),
                vehicle.vehicle_type.label(),
                entry.label
            );
            marker.bind_popup(&popup_content);
            marker.marker_add_to(&self.markers);
        }
    }
}

fn lat_lng(lat: f64, lng: f64) -> JsValue {
    let pair = js_sys::Array::new();
    pair.push(&JsValue::from_f64(lat));
    pair.push(&JsValue::from_f64(lng));
    pair.into()
}

fn js_object(entries: &[(&str, JsValue)]) -> JsValue {
    let object = js_sys::Object::new();
    for (key, value) in entries {
        if let Err(e) = js_sys::Reflect::set(&object, &JsValue::from_str(key), value) {
            log::error!("Failed to set map option {key}: {e:?}");
        }
    }
    object.into()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Leaflet mouse events carry `latlng: { lat, lng }`
fn event_location(event: &JsValue) -> Option<ClickLocation> {
    let lat_lng = js_sys::Reflect::get(event, &"latlng".into()).ok()?;
    let lat = js_sys::Reflect::get(&lat_lng, &"lat".into()).ok()?.as_f64()?;
    let lng = js_sys::Reflect::get(&lat_lng, &"lng".into()).ok()?.as_f64()?;
    ClickLocation::new(lat, lng)
}

/// Dispatch map panel
#[component]
pub fn MapPanel() -> impl IntoView {
    let state = use_app_state();
    let config = expect_context::<FrontendConfig>();
    let map_id = "dispatch-map";

    // Create the map once, then redraw markers whenever the visible set changes
    Effect::new(move |handle: Option<Option<MapHandle>>| {
        let vehicles = state.visible_vehicles();
        let handle = handle.flatten().or_else(|| MapHandle::init(map_id, &config));
        if let Some(map) = &handle {
            map.render_vehicles(&vehicles);
        }
        handle
    });

    let mode_label = move || state.tracking_mode.get().label();
    let picking = move || state.tracking_mode.get().listens_for_map_clicks();

    view! {
        <div class="map-container">
            <div id=map_id style="width: 100%; height: 100%; min-height: 400px;"></div>

            <div class="map-overlay">
                <div class="map-control">
                    <span class="status-dot nominal"></span>
                    {mode_label}
                </div>

                {move || picking().then(|| view! {
                    <div class="map-control">
                        <span class="text-accent">"Click the map to place the new vehicle"</span>
                    </div>
                })}
            </div>
        </div>
    }
}
