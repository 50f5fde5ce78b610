//! # Application State
//!
//! Reactive state for the dispatch page. The page owns the filter set and
//! the tracking mode; the legend and the tracking controls only report
//! user intent through their callbacks.

use chrono::{DateTime, Utc};
use fleet_domain::{
    ActiveFilterSet, StatusCounts, TrackingMode, VehiclePayload, VehicleStatus,
};
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const FILTER_STORAGE_KEY: &str = "fleet-tracker.active-filters";
const ALERT_TTL_MS: u32 = 6_000;

/// Global application state
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    pub vehicles: RwSignal<Vec<TrackedVehicle>>,
    pub active_filters: RwSignal<ActiveFilterSet>,
    pub tracking_mode: RwSignal<TrackingMode>,
    pub alerts: RwSignal<Vec<Alert>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            vehicles: RwSignal::new(Vec::new()),
            active_filters: RwSignal::new(load_filters()),
            tracking_mode: RwSignal::new(TrackingMode::View),
            alerts: RwSignal::new(Vec::new()),
        }
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.vehicles
            .with(|vehicles| StatusCounts::from_statuses(vehicles.iter().map(|v| v.vehicle.status)))
    }

    /// Vehicles whose status passes the legend filter
    pub fn visible_vehicles(&self) -> Vec<TrackedVehicle> {
        let filters = self.active_filters.get();
        self.vehicles.with(|vehicles| {
            vehicles
                .iter()
                .filter(|v| filters.is_active(v.vehicle.status))
                .cloned()
                .collect()
        })
    }

    pub fn toggle_filter(&self, status: VehicleStatus) {
        self.active_filters.update(|filters| {
            let selected = filters.toggle(status);
            log::debug!("Legend filter {status} -> {}", if selected { "on" } else { "off" });
            save_filters(filters);
        });
    }

    pub fn add_vehicle(&self, vehicle: VehiclePayload) {
        let message = format!("Vehicle {} ({}) added", vehicle.vehicle_id, vehicle.license_plate);
        self.vehicles.update(|vehicles| {
            vehicles.push(TrackedVehicle {
                id: Uuid::new_v4(),
                vehicle,
            });
        });
        self.push_alert(AlertSeverity::Info, message);
    }

    /// Show a toast that dismisses itself after a few seconds
    pub fn push_alert(&self, severity: AlertSeverity, message: impl Into<String>) {
        let alert = Alert {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            timestamp: Utc::now(),
        };
        let id = alert.id;
        self.alerts.update(|alerts| alerts.push(alert));

        let alerts = self.alerts;
        gloo_timers::callback::Timeout::new(ALERT_TTL_MS, move || {
            alerts.try_update(|alerts| alerts.retain(|a| a.id != id));
        })
        .forget();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// A vehicle created through the tracking controls
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedVehicle {
    pub id: Uuid,
    pub vehicle: VehiclePayload,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub severity: AlertSeverity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertSeverity {
    Info,
    Warning,
}

impl AlertSeverity {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

fn load_filters() -> ActiveFilterSet {
    LocalStorage::get(FILTER_STORAGE_KEY).unwrap_or_else(|e| {
        log::debug!("No saved legend filters ({e}), showing all statuses");
        ActiveFilterSet::default()
    })
}

fn save_filters(filters: &ActiveFilterSet) {
    if let Err(e) = LocalStorage::set(FILTER_STORAGE_KEY, filters) {
        log::warn!("Failed to persist legend filters: {e}");
    }
}

pub fn provide_app_state() {
    let state = AppState::new();
    provide_context(state);
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
