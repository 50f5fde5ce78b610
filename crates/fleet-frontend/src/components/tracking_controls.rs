//! # Vehicle Tracking Controls
//!
//! Mode selector plus the add-vehicle form. While the page is in add mode
//! the form listens for map clicks to pick the vehicle's location.

use chrono::Utc;
use fleet_domain::{
    model_year_bounds, TrackingMode, TrackingSession, VehiclePayload, VehicleStatus,
    VehicleType, MIN_MODEL_YEAR, STATUS_LEGEND,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::services::MapClickSubscription;

/// Tracking mode buttons and the inline add-vehicle form
#[component]
pub fn VehicleTrackingControls(
    #[prop(optional, into)] on_add_vehicle: Option<Callback<VehiclePayload>>,
    #[prop(optional, into)] on_tracking_mode_change: Option<Callback<TrackingMode>>,
    #[prop(optional, into)] tracking_mode: MaybeProp<TrackingMode>,
) -> impl IntoView {
    let session = RwSignal::new(TrackingSession::default());
    let current_mode = move || tracking_mode.get().unwrap_or_default();

    let request_mode = move |mode: TrackingMode| {
        log::debug!("Tracking mode requested: {mode}");
        if let Some(change) = on_tracking_mode_change {
            change.run(mode);
        }
    };

    // Map clicks are only taken while the page is in add mode
    let listener = StoredValue::new_local(None::<MapClickSubscription>);
    Effect::new(move |_| {
        let mode = current_mode();
        if !mode.listens_for_map_clicks() {
            listener.update_value(|l| *l = None);
            session.update(|s| s.sync_mode(mode));
            return;
        }
        if listener.with_value(Option::is_some) {
            return;
        }

        let subscription = MapClickSubscription::attach(move |location| {
            let mode = tracking_mode.get_untracked().unwrap_or_default();
            session.update(|s| {
                if s.record_click(mode, location) {
                    log::debug!("Vehicle location picked at {}", location.label());
                }
            });
        })
        .inspect_err(|e| log::error!("Failed to listen for map clicks: {e:?}"))
        .ok();
        listener.set_value(subscription);
    });
    on_cleanup(move || {
        listener.try_update_value(Option::take);
    });

    let select_mode = move |mode: TrackingMode| {
        session.update(|s| {
            s.select_mode(mode);
        });
        request_mode(mode);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(outcome) = session.try_update(|s| s.submit(Utc::now())) else {
            return;
        };

        match outcome {
            Ok(vehicle) => {
                log::info!(
                    "Submitting vehicle {} at {}",
                    vehicle.vehicle_id,
                    vehicle.current_location
                );
                if let Some(add) = on_add_vehicle {
                    add.run(vehicle);
                }
                request_mode(TrackingMode::View);
            }
            Err(err) => {
                log::warn!("Add vehicle rejected: {err}");
                if let Err(e) = window().alert_with_message(&err.to_string()) {
                    log::error!("Failed to show alert: {e:?}");
                }
            }
        }
    };

    let on_cancel = move |_| {
        session.update(TrackingSession::cancel);
        request_mode(TrackingMode::View);
    };

    let form_open = move || session.with(TrackingSession::is_form_open);

    view! {
        <div class="vehicle-tracking-controls">
            <h5 class="controls-title">"⚙ Vehicle Tracking"</h5>

            {TrackingMode::ALL
                .into_iter()
                .map(|mode| view! {
                    <button
                        class="tracking-control-btn"
                        class:active=move || current_mode() == mode
                        on:click=move |_| select_mode(mode)
                    >
                        {mode_icon(mode)}" "{mode.label()}
                    </button>
                })
                .collect_view()}

            {move || form_open().then(|| view! {
                <form class="add-vehicle-form" on:submit=on_submit>
                    <LocationHint session=session />
                    <DraftFields session=session />
                    <div class="form-actions">
                        <button type="submit" class="btn-submit">"Add Vehicle"</button>
                        <button type="button" class="btn-cancel" on:click=on_cancel>
                            "Cancel"
                        </button>
                    </div>
                </form>
            })}
        </div>
    }
}

fn mode_icon(mode: TrackingMode) -> &'static str {
    match mode {
        TrackingMode::View => "➤",
        TrackingMode::Add => "+",
        TrackingMode::Track => "◎",
    }
}

/// Picked location, or a prompt to click the map
#[component]
fn LocationHint(session: RwSignal<TrackingSession>) -> impl IntoView {
    view! {
        <div class="location-hint">
            {move || match session.with(TrackingSession::location) {
                Some(location) => view! {
                    <span style="color: #2ecc71;">"📍 Location: "{location.label()}</span>
                }
                .into_any(),
                None => view! {
                    <span style="color: #e74c3c;">"📍 Click on map to set location"</span>
                }
                .into_any(),
            }}
        </div>
    }
}

/// Inputs bound to the session draft
#[component]
fn DraftFields(session: RwSignal<TrackingSession>) -> impl IntoView {
    let max_year = session.with_untracked(|s| *model_year_bounds(s.current_year()).end());

    view! {
        <input
            type="text"
            placeholder="Vehicle ID *"
            prop:value=move || session.with(|s| s.draft().vehicle_id.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                session.update(|s| s.draft_mut().vehicle_id = value);
            }
        />
        <input
            type="text"
            placeholder="License Plate *"
            prop:value=move || session.with(|s| s.draft().license_plate.clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                session.update(|s| s.draft_mut().license_plate = value);
            }
        />
        <select
            prop:value=move || session.with(|s| s.draft().vehicle_type.as_str())
            on:change=move |ev| {
                if let Some(kind) = VehicleType::from_key(&event_target_value(&ev)) {
                    session.update(|s| s.draft_mut().vehicle_type = kind);
                }
            }
        >
            {VehicleType::ALL
                .into_iter()
                .map(|kind| view! { <option value=kind.as_str()>{kind.label()}</option> })
                .collect_view()}
        </select>

        <div class="form-row">
            <input
                type="text"
                placeholder="Make"
                prop:value=move || session.with(|s| s.draft().make.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    session.update(|s| s.draft_mut().make = value);
                }
            />
            <input
                type="text"
                placeholder="Model"
                prop:value=move || session.with(|s| s.draft().model.clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    session.update(|s| s.draft_mut().model = value);
                }
            />
        </div>

        <div class="form-row">
            <input
                type="number"
                placeholder="Year"
                min=MIN_MODEL_YEAR.to_string()
                max=max_year.to_string()
                prop:value=move || session.with(|s| s.draft().year.to_string())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    session.update(|s| s.set_year_input(&value));
                }
            />
            <select
                prop:value=move || session.with(|s| s.draft().status.as_str())
                on:change=move |ev| {
                    if let Some(status) = VehicleStatus::from_key(&event_target_value(&ev)) {
                        session.update(|s| s.draft_mut().status = status);
                    }
                }
            >
                {STATUS_LEGEND
                    .iter()
                    .map(|entry| view! { <option value=entry.key.as_str()>{entry.label}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
