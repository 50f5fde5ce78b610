//! # Footer Component
//!
//! Status bar with fleet counts.

use leptos::prelude::*;

use crate::state::use_app_state;

/// Footer status bar
#[component]
pub fn Footer() -> impl IntoView {
    let state = use_app_state();

    let vehicle_count = move || state.vehicles.with(Vec::len);
    let visible_count = move || state.visible_vehicles().len();
    let alert_count = move || state.alerts.with(Vec::len);
    let filtering = move || !state.active_filters.with(|f| f.is_empty());

    view! {
        <footer class="hud-footer">
            <div class="flex items-center gap-lg">
                <span class="text-muted">"FLEET TRACKER v"{env!("CARGO_PKG_VERSION")}</span>
                <span class="text-muted">"|"</span>
                <span>
                    <span class="text-muted">"VEHICLES: "</span>
                    <span class="text-accent">{vehicle_count}</span>
                </span>
                {move || filtering().then(|| view! {
                    <span>
                        <span class="text-muted">"SHOWN: "</span>
                        <span class="text-accent">{visible_count}</span>
                    </span>
                })}
            </div>

            <div class="flex items-center gap-lg">
                {move || {
                    let count = alert_count();
                    if count > 0 {
                        Some(view! {
                            <span class="status-badge warning">
                                {count}" ALERTS"
                            </span>
                        })
                    } else {
                        None
                    }
                }}
            </div>
        </footer>
    }
}
