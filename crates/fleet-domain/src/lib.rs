//! # Patrol Fleet Tracker - Domain Model
//!
//! Vehicle status catalog, legend filter state and the add-vehicle draft
//! behind the tracking controls. These types carry every decision the
//! frontend components make, so the view layer only wires DOM events to them.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

pub mod session;

pub use session::TrackingSession;

// =============================================================================
// ENUMS
// =============================================================================

/// Vehicle operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    OnPatrol,
    Responding,
    OutOfService,
}

impl VehicleStatus {
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::OnPatrol,
        Self::Responding,
        Self::OutOfService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::OnPatrol => "on_patrol",
            Self::Responding => "responding",
            Self::OutOfService => "out_of_service",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == key)
    }

    /// Legend entry describing how this status is drawn
    #[must_use]
    pub fn entry(self) -> &'static StatusEntry {
        match self {
            Self::Available => &STATUS_LEGEND[0],
            Self::OnPatrol => &STATUS_LEGEND[1],
            Self::Responding => &STATUS_LEGEND[2],
            Self::OutOfService => &STATUS_LEGEND[3],
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle classes offered by the add form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Patrol,
    Motorcycle,
    K9,
    Special,
}

impl VehicleType {
    pub const ALL: [Self; 4] = [Self::Patrol, Self::Motorcycle, Self::K9, Self::Special];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Patrol => "patrol",
            Self::Motorcycle => "motorcycle",
            Self::K9 => "k9",
            Self::Special => "special",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Patrol => "Patrol Car",
            Self::Motorcycle => "Motorcycle",
            Self::K9 => "K9 Unit",
            Self::Special => "Special Operations",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == key)
    }
}

/// Map interaction mode. Owned by the page, mirrored by the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    #[default]
    View,
    Add,
    Track,
}

impl TrackingMode {
    pub const ALL: [Self; 3] = [Self::View, Self::Add, Self::Track];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Add => "add",
            Self::Track => "track",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::View => "View Mode",
            Self::Add => "Add Vehicle",
            Self::Track => "Track Vehicle",
        }
    }

    /// Only add mode picks a location from map clicks
    #[must_use]
    pub const fn listens_for_map_clicks(self) -> bool {
        matches!(self, Self::Add)
    }
}

impl fmt::Display for TrackingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LEGEND
// =============================================================================

/// How one status is drawn in the legend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub key: VehicleStatus,
    pub color: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// Fixed legend table, in display order
pub static STATUS_LEGEND: [StatusEntry; 4] = [
    StatusEntry {
        key: VehicleStatus::Available,
        color: "#2ecc71",
        label: "Available",
        icon: "🟢",
    },
    StatusEntry {
        key: VehicleStatus::OnPatrol,
        color: "#3498db",
        label: "On Patrol",
        icon: "🔵",
    },
    StatusEntry {
        key: VehicleStatus::Responding,
        color: "#f39c12",
        label: "Responding",
        icon: "🟡",
    },
    StatusEntry {
        key: VehicleStatus::OutOfService,
        color: "#e74c3c",
        label: "Out of Service",
        icon: "🔴",
    },
];

/// Vehicle count per status. Missing statuses count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCounts(BTreeMap<VehicleStatus, u32>);

impl StatusCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally one vehicle per status in the iterator
    pub fn from_statuses(statuses: impl IntoIterator<Item = VehicleStatus>) -> Self {
        let mut counts = Self::new();
        for status in statuses {
            *counts.0.entry(status).or_insert(0) += 1;
        }
        counts
    }

    pub fn set(&mut self, status: VehicleStatus, count: u32) {
        self.0.insert(status, count);
    }

    #[must_use]
    pub fn count(&self, status: VehicleStatus) -> u32 {
        self.0.get(&status).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }
}

impl FromIterator<(VehicleStatus, u32)> for StatusCounts {
    fn from_iter<I: IntoIterator<Item = (VehicleStatus, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Statuses selected in the legend. An empty set shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveFilterSet(BTreeSet<VehicleStatus>);

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, status: VehicleStatus) -> bool {
        self.0.contains(&status)
    }

    /// A status is active when nothing is selected or it is selected itself
    #[must_use]
    pub fn is_active(&self, status: VehicleStatus) -> bool {
        self.0.is_empty() || self.0.contains(&status)
    }

    /// Flip membership of `status`; returns whether it is now selected
    pub fn toggle(&mut self, status: VehicleStatus) -> bool {
        if self.0.remove(&status) {
            false
        } else {
            self.0.insert(status);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = VehicleStatus> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<VehicleStatus> for ActiveFilterSet {
    fn from_iter<I: IntoIterator<Item = VehicleStatus>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One rendered legend row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendRow {
    pub entry: &'static StatusEntry,
    pub count: u32,
    pub active: bool,
}

/// Rows for every legend entry, in table order
pub fn legend_rows(counts: &StatusCounts, filters: &ActiveFilterSet) -> Vec<LegendRow> {
    STATUS_LEGEND
        .iter()
        .map(|entry| LegendRow {
            entry,
            count: counts.count(entry.key),
            active: filters.is_active(entry.key),
        })
        .collect()
}

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Point picked by clicking the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl ClickLocation {
    /// Returns `None` unless both components are finite
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        (latitude.is_finite() && longitude.is_finite()).then_some(Self {
            latitude,
            longitude,
        })
    }

    /// GeoJSON ordering: longitude first
    #[must_use]
    pub const fn coordinate_pair(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Fields the add form refuses to submit without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    VehicleId,
    LicensePlate,
    Location,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VehicleId => "vehicle ID",
            Self::LicensePlate => "license plate",
            Self::Location => "map location",
        })
    }
}

// =============================================================================
// VEHICLE DRAFT & PAYLOAD
// =============================================================================

/// Oldest model year the form accepts
pub const MIN_MODEL_YEAR: i32 = 1990;

/// Accepted model years: 1990 through next year
#[must_use]
pub fn model_year_bounds(current_year: i32) -> RangeInclusive<i32> {
    MIN_MODEL_YEAR..=current_year + 1
}

/// Add-form field values, alive only while the form is in use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    pub vehicle_id: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
}

impl VehicleDraft {
    pub fn new(current_year: i32) -> Self {
        Self {
            vehicle_id: String::new(),
            license_plate: String::new(),
            vehicle_type: VehicleType::Patrol,
            make: String::new(),
            model: String::new(),
            year: current_year,
            status: VehicleStatus::Available,
        }
    }

    /// Apply raw text from the year input. Non-numeric text is ignored and
    /// numbers are clamped into [`model_year_bounds`].
    pub fn set_year_input(&mut self, input: &str, current_year: i32) {
        if let Ok(year) = input.trim().parse::<i32>() {
            let bounds = model_year_bounds(current_year);
            self.year = year.clamp(*bounds.start(), *bounds.end());
        }
    }

    pub fn missing_fields(&self, location: Option<ClickLocation>) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.vehicle_id.trim().is_empty() {
            missing.push(RequiredField::VehicleId);
        }
        if self.license_plate.trim().is_empty() {
            missing.push(RequiredField::LicensePlate);
        }
        if location.is_none() {
            missing.push(RequiredField::Location);
        }
        missing
    }

    /// Validate the draft and build the creation payload. The draft itself
    /// is left untouched so a rejected form can be corrected.
    pub fn build_payload(
        &self,
        location: Option<ClickLocation>,
        now: DateTime<Utc>,
    ) -> Result<VehiclePayload, DraftError> {
        let missing = self.missing_fields(location);
        let Some(location) = location.filter(|_| missing.is_empty()) else {
            return Err(DraftError::Incomplete(missing));
        };

        Ok(VehiclePayload {
            vehicle_id: self.vehicle_id.trim().to_string(),
            license_plate: self.license_plate.trim().to_string(),
            vehicle_type: self.vehicle_type,
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            status: self.status,
            current_location: serde_json::to_string(&location.coordinate_pair())?,
            assigned_area: serde_json::to_string::<[f64; 0]>(&[])?,
            last_update: now,
            assigned_officer_id: None,
        })
    }
}

impl Default for VehicleDraft {
    fn default() -> Self {
        Self::new(Utc::now().year())
    }
}

/// Vehicle handed to the creation callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePayload {
    pub vehicle_id: String,
    pub license_plate: String,
    pub vehicle_type: VehicleType,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub status: VehicleStatus,
    /// JSON text `[longitude, latitude]`
    pub current_location: String,
    /// JSON text, empty until an area is assigned
    pub assigned_area: String,
    pub last_update: DateTime<Utc>,
    pub assigned_officer_id: Option<String>,
}

impl VehiclePayload {
    /// Decode `current_location` back into a map point
    pub fn location(&self) -> Option<ClickLocation> {
        let [longitude, latitude] = serde_json::from_str::<[f64; 2]>(&self.current_location).ok()?;
        ClickLocation::new(latitude, longitude)
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Reasons a draft cannot be turned into a payload
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error(
        "Please fill all required fields and click on the map to set location (missing: {})",
        join_fields(.0)
    )]
    Incomplete(Vec<RequiredField>),

    #[error("Failed to encode vehicle coordinates: {0}")]
    Encoding(#[from] serde_json::Error),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fake::Fake;
    use fake::faker::lorem::en::Word;

    fn filled_draft() -> VehicleDraft {
        let mut draft = VehicleDraft::new(2024);
        draft.vehicle_id = "UNIT-12".into();
        draft.license_plate = "PD-4471".into();
        draft
    }

    #[test]
    fn test_counts_default_to_zero() {
        let counts: StatusCounts = [(VehicleStatus::Available, 3)].into_iter().collect();
        assert_eq!(counts.count(VehicleStatus::Available), 3);
        for status in [VehicleStatus::OnPatrol, VehicleStatus::Responding, VehicleStatus::OutOfService] {
            assert_eq!(counts.count(status), 0);
        }
    }

    #[test]
    fn test_counts_from_statuses() {
        let counts = StatusCounts::from_statuses([
            VehicleStatus::OnPatrol,
            VehicleStatus::OnPatrol,
            VehicleStatus::OutOfService,
        ]);
        assert_eq!(counts.count(VehicleStatus::OnPatrol), 2);
        assert_eq!(counts.count(VehicleStatus::OutOfService), 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_empty_filter_set_activates_everything() {
        let filters = ActiveFilterSet::new();
        assert!(VehicleStatus::ALL.iter().all(|s| filters.is_active(*s)));
    }

    #[test]
    fn test_filter_toggle() {
        let mut filters = ActiveFilterSet::new();
        assert!(filters.toggle(VehicleStatus::Responding));
        assert!(filters.is_active(VehicleStatus::Responding));
        assert!(!filters.is_active(VehicleStatus::Available));

        assert!(!filters.toggle(VehicleStatus::Responding));
        assert!(filters.is_empty());
        assert!(filters.is_active(VehicleStatus::Available));
    }

    #[test]
    fn test_legend_rows_example() {
        let counts: StatusCounts = [(VehicleStatus::Available, 3), (VehicleStatus::Responding, 1)]
            .into_iter()
            .collect();
        let filters: ActiveFilterSet = [VehicleStatus::Responding].into_iter().collect();

        let rows = legend_rows(&counts, &filters);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].entry.key, VehicleStatus::Available);
        assert_eq!(rows[0].count, 3);
        assert!(!rows[0].active);
        assert_eq!(rows[2].entry.key, VehicleStatus::Responding);
        assert!(rows[2].active);
        assert_eq!(rows[3].count, 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_status_entry_lookup_matches_table() {
        for status in VehicleStatus::ALL {
            assert_eq!(status.entry().key, status);
            assert_eq!(VehicleStatus::from_key(status.as_str()), Some(status));
        }
        assert_eq!(VehicleStatus::OutOfService.entry().label, "Out of Service");
    }

    #[test]
    fn test_click_location_rejects_non_finite() {
        assert!(ClickLocation::new(f64::NAN, 10.0).is_none());
        assert!(ClickLocation::new(10.0, f64::INFINITY).is_none());
        let loc = ClickLocation::new(39.78172, -89.65018).unwrap();
        assert_eq!(loc.label(), "39.7817, -89.6502");
    }

    #[test]
    fn test_year_input_clamped() {
        let mut draft = VehicleDraft::new(2024);
        draft.set_year_input("1975", 2024);
        assert_eq!(draft.year, MIN_MODEL_YEAR);
        draft.set_year_input("2031", 2024);
        assert_eq!(draft.year, 2025);
        draft.set_year_input("2019", 2024);
        assert_eq!(draft.year, 2019);
        draft.set_year_input("abc", 2024);
        assert_eq!(draft.year, 2019);
    }

    #[test]
    fn test_payload_requires_all_fields() {
        let loc = ClickLocation::new(40.0, -74.0);
        let now = Utc::now();

        let err = VehicleDraft::new(2024).build_payload(None, now).unwrap_err();
        match err {
            DraftError::Incomplete(missing) => assert_eq!(
                missing,
                vec![RequiredField::VehicleId, RequiredField::LicensePlate, RequiredField::Location]
            ),
            DraftError::Encoding(e) => panic!("unexpected encoding error: {e}"),
        }

        let mut draft = filled_draft();
        draft.license_plate = "   ".into();
        assert!(draft.build_payload(loc, now).is_err());

        assert!(filled_draft().build_payload(None, now).is_err());
    }

    #[test]
    fn test_incomplete_message() {
        let err = DraftError::Incomplete(vec![RequiredField::Location]);
        assert_eq!(
            err.to_string(),
            "Please fill all required fields and click on the map to set location (missing: map location)"
        );
    }

    #[test]
    fn test_payload_coordinates_are_lng_lat() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let loc = ClickLocation::new(40.5, -74.25);
        let payload = filled_draft().build_payload(loc, now).unwrap();

        assert_eq!(payload.current_location, "[-74.25,40.5]");
        assert_eq!(payload.assigned_area, "[]");
        assert_eq!(payload.last_update, now);
        assert_eq!(payload.assigned_officer_id, None);
        assert_eq!(payload.location(), loc);
    }

    #[test]
    fn test_payload_json_shape() {
        let mut draft = filled_draft();
        draft.vehicle_type = VehicleType::K9;
        draft.status = VehicleStatus::OnPatrol;
        let payload = draft
            .build_payload(ClickLocation::new(1.0, 2.0), Utc::now())
            .unwrap();

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["vehicleId"], "UNIT-12");
        assert_eq!(json["licensePlate"], "PD-4471");
        assert_eq!(json["vehicleType"], "k9");
        assert_eq!(json["status"], "on_patrol");
        assert_eq!(json["currentLocation"], "[2.0,1.0]");
        assert!(json["assignedOfficerId"].is_null());
    }

    #[test]
    fn test_payload_trims_text_fields() {
        let mut draft = VehicleDraft::new(2024);
        draft.vehicle_id = format!("  {}  ", Word().fake::<String>());
        draft.license_plate = Word().fake::<String>();
        draft.make = " Ford ".into();

        let payload = draft
            .build_payload(ClickLocation::new(0.0, 0.0), Utc::now())
            .unwrap();
        assert_eq!(payload.vehicle_id, draft.vehicle_id.trim());
        assert_eq!(payload.make, "Ford");
    }
}
