//! # Status Legend Component
//!
//! Vehicle status legend doubling as the status filter. The filter set is
//! owned by the caller; the legend reflects it and reports clicks.

use fleet_domain::{legend_rows, ActiveFilterSet, LegendRow, StatusCounts, VehicleStatus};
use leptos::prelude::*;

/// Legend with per-status counts, filter toggles and quick actions
#[component]
pub fn StatusLegend(
    #[prop(optional, into)] on_status_filter: Option<Callback<VehicleStatus>>,
    #[prop(optional, into)] status_counts: MaybeProp<StatusCounts>,
    #[prop(optional, into)] active_filters: MaybeProp<ActiveFilterSet>,
    #[prop(optional, into)] on_share_address: Option<Callback<()>>,
    #[prop(optional, into)] on_track_vehicle: Option<Callback<()>>,
) -> impl IntoView {
    let hovered = RwSignal::new(None::<VehicleStatus>);

    let counts = move || status_counts.get().unwrap_or_default();
    let rows = move || legend_rows(&counts(), &active_filters.get().unwrap_or_default());
    let total = move || counts().total();

    let on_share = move |_| {
        if let Some(share) = on_share_address {
            share.run(());
        }
    };
    let on_track = move |_| {
        if let Some(track) = on_track_vehicle {
            track.run(());
        }
    };

    view! {
        <div class="map-legend">
            <div class="legend-header">
                <span class="legend-icon">"➤"</span>
                <h5 class="legend-title">"Vehicle Status Legend"</h5>
            </div>

            <For
                each=rows
                key=|row| (row.entry.key, row.count, row.active)
                children=move |row| view! {
                    <LegendItem row=row hovered=hovered on_select=on_status_filter />
                }
            />

            <div class="legend-actions">
                <div class="legend-actions-title">
                    <span>"⇪"</span>
                    <span>"Quick Actions"</span>
                </div>
                <button class="legend-action share" on:click=on_share>
                    "⇪ Share Location"
                </button>
                <button class="legend-action track" on:click=on_track>
                    "⌖ Track Vehicle"
                </button>
            </div>

            <div class="legend-footer">
                "Click status to filter • "{total}" total vehicles"
            </div>
        </div>
    }
}

/// Single status row
#[component]
fn LegendItem(
    row: LegendRow,
    hovered: RwSignal<Option<VehicleStatus>>,
    on_select: Option<Callback<VehicleStatus>>,
) -> impl IntoView {
    let status = row.entry.key;
    let is_hovered = move || hovered.get() == Some(status);

    let row_style = move || {
        format!(
            "opacity: {}; background-color: {};",
            if row.active { "1" } else { "0.5" },
            if is_hovered() { "#f8f9fa" } else { "transparent" },
        )
    };

    let on_click = move |_| {
        if let Some(select) = on_select {
            select.run(status);
        }
    };

    view! {
        <div
            class="legend-item"
            class:active=row.active
            class:inactive=!row.active
            style=row_style
            on:click=on_click
            on:mouseenter=move |_| hovered.set(Some(status))
            on:mouseleave=move |_| hovered.set(None)
        >
            <div class="legend-color" style=format!("background-color: {};", row.entry.color)>
                {if row.active { "👁" } else { "⊘" }}
            </div>
            <span class="legend-label">{row.entry.label}</span>
            <span class="legend-count">{row.count}</span>
        </div>
    }
}
