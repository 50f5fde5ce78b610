//! # Vehicle Card Component
//!
//! Individual vehicle display for the fleet list.

use leptos::prelude::*;

use crate::state::{use_app_state, TrackedVehicle};

/// Vehicles passing the legend filter
#[component]
pub fn VehicleListPanel() -> impl IntoView {
    let state = use_app_state();

    let vehicles = move || {
        let mut list = state.visible_vehicles();
        list.sort_by(|a, b| a.vehicle.vehicle_id.cmp(&b.vehicle.vehicle_id));
        list
    };
    let shown = move || vehicles().len();
    let total = move || state.vehicles.with(Vec::len);

    view! {
        <div class="panel">
            <div class="panel-header">
                <span class="panel-title">"FLEET"</span>
                <span class="panel-badge">{shown}"/"{total}" SHOWN"</span>
            </div>
            <div class="panel-body" style="display: flex; flex-direction: column; gap: 8px;">
                {move || (total() == 0).then(|| view! {
                    <div class="text-muted" style="text-align: center; padding: 32px;">
                        "No vehicles yet. Use Add Vehicle and click the map."
                    </div>
                })}
                <For
                    each=vehicles
                    key=|tracked| tracked.id
                    children=move |tracked| view! { <VehicleCard tracked=tracked /> }
                />
            </div>
        </div>
    }
}

/// Single vehicle card
#[component]
pub fn VehicleCard(tracked: TrackedVehicle) -> impl IntoView {
    let vehicle = tracked.vehicle;
    let entry = vehicle.status.entry();

    let description = [vehicle.year.to_string(), vehicle.make.clone(), vehicle.model.clone()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let location = vehicle
        .location()
        .map_or_else(|| "---".to_string(), |loc| loc.label());

    view! {
        <div class="vehicle-card">
            <div class="vehicle-icon">
                <span style="font-size: 20px;">{entry.icon}</span>
            </div>
            <div class="vehicle-details">
                <div class="vehicle-id">{vehicle.vehicle_id.clone()}</div>
                <div class="vehicle-plate">{vehicle.license_plate.clone()}</div>
                <div class="text-xs text-muted">{vehicle.vehicle_type.label()}" · "{description}</div>
            </div>
            <div class="vehicle-metrics">
                <div class="status-badge" style=format!("border-color: {0}; color: {0};", entry.color)>
                    {entry.label}
                </div>
                <div class="metric">
                    <span class="metric-label">"POS"</span>
                    <span class="metric-value text-accent">{location}</span>
                </div>
            </div>
        </div>
    }
}
