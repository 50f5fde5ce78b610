//! # Header Component
//!
//! Top bar with title, UTC clock and the current tracking mode.

use chrono::{DateTime, Timelike, Utc};
use fleet_domain::TrackingMode;
use leptos::prelude::*;

use crate::state::use_app_state;

/// Header component with title and clock
#[component]
pub fn Header() -> impl IntoView {
    let state = use_app_state();
    let (time, set_time) = signal(Utc::now());

    // Update clock every second
    Effect::new(move |_| {
        let handle = gloo_timers::callback::Interval::new(1000, move || {
            set_time.set(Utc::now());
        });
        handle.forget();
    });

    let format_utc = move |dt: DateTime<Utc>| {
        format!("{:02}:{:02}:{:02}Z", dt.hour(), dt.minute(), dt.second())
    };

    let format_date = move |dt: DateTime<Utc>| {
        dt.format("%d %b %Y").to_string().to_uppercase()
    };

    let mode = move || state.tracking_mode.get();

    view! {
        <header class="hud-header">
            <div class="logo">
                <svg class="logo-icon" viewBox="0 0 24 24" fill="currentColor">
                    <path d="M5 11l1.5-4.5h11L19 11M17.5 16a1.5 1.5 0 1 1 0-3 1.5 1.5 0 0 1 0 3M6.5 16a1.5 1.5 0 1 1 0-3 1.5 1.5 0 0 1 0 3M18.9 6c-.2-.6-.8-1-1.4-1h-11c-.7 0-1.2.4-1.4 1L3 12v8a1 1 0 0 0 1 1h1a1 1 0 0 0 1-1v-1h12v1a1 1 0 0 0 1 1h1a1 1 0 0 0 1-1v-8z"/>
                </svg>
                <div>
                    <div class="logo-text">"FLEET TRACKER"</div>
                    <div class="logo-subtitle">"PATROL DISPATCH"</div>
                </div>
            </div>

            <div class="mission-clock">
                <div class="clock-segment">
                    <div class="clock-label">"UTC"</div>
                    <div class="clock-value">{move || format_utc(time.get())}</div>
                </div>

                <div class="clock-segment">
                    <div class="clock-label">"DATE"</div>
                    <div class="clock-value">{move || format_date(time.get())}</div>
                </div>
            </div>

            <div class="flex items-center gap-md">
                <div class="status-badge" class:nominal=move || mode() != TrackingMode::Add class:warning=move || mode() == TrackingMode::Add>
                    {move || mode().label()}
                </div>
            </div>
        </header>
    }
}
