//! Add-vehicle form session behind the tracking controls.
//!
//! The page owns the authoritative [`TrackingMode`]; the session only keeps
//! what the form needs between renders (draft, picked location, visibility)
//! and reacts to mode changes it is told about.

use chrono::{DateTime, Datelike, Utc};

use crate::{ClickLocation, DraftError, TrackingMode, VehicleDraft, VehiclePayload};

#[derive(Debug, Clone, PartialEq)]
pub struct TrackingSession {
    draft: VehicleDraft,
    location: Option<ClickLocation>,
    form_open: bool,
    current_year: i32,
}

impl TrackingSession {
    pub fn new(current_year: i32) -> Self {
        Self {
            draft: VehicleDraft::new(current_year),
            location: None,
            form_open: false,
            current_year,
        }
    }

    pub fn draft(&self) -> &VehicleDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut VehicleDraft {
        &mut self.draft
    }

    pub fn location(&self) -> Option<ClickLocation> {
        self.location
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn set_year_input(&mut self, input: &str) {
        self.draft.set_year_input(input, self.current_year);
    }

    /// A mode button was pressed. Returns the mode to request from the page.
    pub fn select_mode(&mut self, mode: TrackingMode) -> TrackingMode {
        self.form_open = mode.listens_for_map_clicks();
        if !self.form_open {
            self.location = None;
        }
        mode
    }

    /// The page reported its current mode. Leaving add mode closes the form
    /// and drops the picked location; the draft survives.
    pub fn sync_mode(&mut self, mode: TrackingMode) {
        if !mode.listens_for_map_clicks() {
            self.form_open = false;
            self.location = None;
        }
    }

    /// Record a map click. Ignored unless `mode` is add; returns whether the
    /// location was taken.
    pub fn record_click(&mut self, mode: TrackingMode, location: ClickLocation) -> bool {
        if !mode.listens_for_map_clicks() {
            return false;
        }
        self.location = Some(location);
        true
    }

    /// Validate and emit the payload. On success the form is reset and
    /// closed; on failure nothing changes.
    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<VehiclePayload, DraftError> {
        let payload = self.draft.build_payload(self.location, now)?;
        self.reset();
        Ok(payload)
    }

    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.draft = VehicleDraft::new(self.current_year);
        self.location = None;
        self.form_open = false;
    }
}

impl Default for TrackingSession {
    fn default() -> Self {
        Self::new(Utc::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{VehicleStatus, VehicleType};

    fn point() -> ClickLocation {
        ClickLocation::new(39.7817, -89.6501).unwrap()
    }

    fn session_in_add_mode() -> TrackingSession {
        let mut session = TrackingSession::new(2024);
        assert_eq!(session.select_mode(TrackingMode::Add), TrackingMode::Add);
        session
    }

    #[test]
    fn test_add_mode_opens_form() {
        let session = session_in_add_mode();
        assert!(session.is_form_open());
        assert!(session.location().is_none());
    }

    #[test]
    fn test_clicks_ignored_outside_add_mode() {
        let mut session = TrackingSession::new(2024);
        assert!(!session.record_click(TrackingMode::View, point()));
        assert!(!session.record_click(TrackingMode::Track, point()));
        assert!(session.location().is_none());
    }

    #[test]
    fn test_latest_click_wins() {
        let mut session = session_in_add_mode();
        assert!(session.record_click(TrackingMode::Add, point()));
        let second = ClickLocation::new(10.0, 20.0).unwrap();
        assert!(session.record_click(TrackingMode::Add, second));
        assert_eq!(session.location(), Some(second));
    }

    #[test]
    fn test_rejected_submit_preserves_state() {
        let mut session = session_in_add_mode();
        session.draft_mut().vehicle_id = "UNIT-7".into();
        session.record_click(TrackingMode::Add, point());

        assert!(session.submit(Utc::now()).is_err());
        assert!(session.is_form_open());
        assert_eq!(session.draft().vehicle_id, "UNIT-7");
        assert_eq!(session.location(), Some(point()));
    }

    #[test]
    fn test_successful_submit_resets() {
        let mut session = session_in_add_mode();
        {
            let draft = session.draft_mut();
            draft.vehicle_id = "UNIT-7".into();
            draft.license_plate = "PD-1000".into();
            draft.vehicle_type = VehicleType::Motorcycle;
            draft.status = VehicleStatus::Responding;
        }
        session.set_year_input("2020");
        session.record_click(TrackingMode::Add, point());

        let payload = session.submit(Utc::now()).unwrap();
        assert_eq!(payload.vehicle_type, VehicleType::Motorcycle);
        assert_eq!(payload.year, 2020);
        assert_eq!(payload.current_location, "[-89.6501,39.7817]");

        assert_eq!(session, TrackingSession::new(2024));
    }

    #[test]
    fn test_cancel_resets_without_payload() {
        let mut session = session_in_add_mode();
        session.draft_mut().license_plate = "PD-1000".into();
        session.record_click(TrackingMode::Add, point());

        session.cancel();
        assert_eq!(session, TrackingSession::new(2024));
    }

    #[test]
    fn test_leaving_add_mode_clears_location_keeps_draft() {
        let mut session = session_in_add_mode();
        session.draft_mut().make = "Dodge".into();
        session.record_click(TrackingMode::Add, point());

        session.sync_mode(TrackingMode::Track);
        assert!(!session.is_form_open());
        assert!(session.location().is_none());
        assert_eq!(session.draft().make, "Dodge");
    }

    #[test]
    fn test_selecting_other_mode_closes_form() {
        let mut session = session_in_add_mode();
        session.record_click(TrackingMode::Add, point());
        assert_eq!(session.select_mode(TrackingMode::View), TrackingMode::View);
        assert!(!session.is_form_open());
        assert!(session.location().is_none());
    }

    #[test]
    fn test_sync_add_mode_is_noop() {
        let mut session = session_in_add_mode();
        session.record_click(TrackingMode::Add, point());
        session.sync_mode(TrackingMode::Add);
        assert!(session.is_form_open());
        assert_eq!(session.location(), Some(point()));
    }
}
