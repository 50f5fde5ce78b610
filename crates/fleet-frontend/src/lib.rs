//! # Patrol Fleet Tracker Frontend
//!
//! Dispatch page hosting the vehicle status legend and the tracking
//! controls next to a Leaflet map.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod components;
pub mod config;
pub mod services;
pub mod state;

use fleet_domain::{TrackingMode, VehiclePayload, VehicleStatus};
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};

use components::*;
use config::FrontendConfig;
use state::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let config = FrontendConfig::from_build_env();
    provide_context(config.clone());
    provide_app_state();
    let state = use_app_state();

    let on_status_filter = move |status: VehicleStatus| state.toggle_filter(status);

    let on_share_address = move |()| {
        let (lat, lng) = state
            .visible_vehicles()
            .last()
            .and_then(|tracked| tracked.vehicle.location())
            .map_or((config.map.center_lat, config.map.center_lng), |loc| {
                (loc.latitude, loc.longitude)
            });
        state.push_alert(
            AlertSeverity::Info,
            format!("Share link: https://www.openstreetmap.org/?mlat={lat:.5}&mlon={lng:.5}"),
        );
    };

    let on_track_vehicle = move |()| {
        if state.vehicles.with(Vec::is_empty) {
            state.push_alert(AlertSeverity::Warning, "No vehicles to track yet");
            return;
        }
        state.tracking_mode.set(TrackingMode::Track);
    };

    let on_add_vehicle = move |vehicle: VehiclePayload| state.add_vehicle(vehicle);

    let on_tracking_mode_change = move |mode: TrackingMode| {
        log::debug!("Tracking mode {} -> {mode}", state.tracking_mode.get_untracked());
        state.tracking_mode.set(mode);
    };

    view! {
        <Title text="Patrol Fleet Tracker" />
        <div class="hud-container">
            <Header />
            <div class="hud-left-panel">
                <StatusLegend
                    on_status_filter=on_status_filter
                    status_counts=Signal::derive(move || state.status_counts())
                    active_filters=Signal::derive(move || state.active_filters.get())
                    on_share_address=on_share_address
                    on_track_vehicle=on_track_vehicle
                />
                <VehicleTrackingControls
                    on_add_vehicle=on_add_vehicle
                    on_tracking_mode_change=on_tracking_mode_change
                    tracking_mode=Signal::derive(move || state.tracking_mode.get())
                />
            </div>
            <div class="hud-main">
                <MapPanel />
            </div>
            <div class="hud-right-panel">
                <VehicleListPanel />
            </div>
            <Footer />
        </div>
        <ToastContainer />
    }
}

#[component]
fn ToastContainer() -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="toast-container">
            <For
                each=move || state.alerts.get()
                key=|alert| alert.id
                children=move |alert| {
                    let id = alert.id;
                    let on_dismiss = move |_| {
                        state.alerts.update(|alerts| alerts.retain(|a| a.id != id));
                    };
                    view! {
                        <div class="toast">
                            <div class="flex justify-between items-center gap-md">
                                <div class="flex items-center gap-sm">
                                    <span class="status-dot" class=alert.severity.class()></span>
                                    <span>{alert.message.clone()}</span>
                                </div>
                                <button class="btn btn-sm" on:click=on_dismiss>"×"</button>
                            </div>
                        </div>
                    }
                }
            />
        </div>
    }
}

pub fn main() {
    console_error_panic_hook::set_once();
    let config = FrontendConfig::from_build_env();
    let _ = console_log::init_with_level(config.log_level);
    log::info!("Patrol Fleet Tracker v{}", env!("CARGO_PKG_VERSION"));
    leptos::mount::mount_to_body(App);
}
