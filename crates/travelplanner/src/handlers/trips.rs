use chrono::Utc;
use tracing::{debug, info};

use super::{Confirm, FormState, Planner, Surface};
use crate::error::{Error, Result};
use crate::forms::TripForm;
use crate::notify::Level;

impl<S: Surface, C: Confirm> Planner<S, C> {
    /// Create a trip from `form`.
    ///
    /// Returns the new trip's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] (after alerting the user) when the form
    /// is invalid; nothing is stored in that case.
    pub fn submit_trip(&mut self, form: &TripForm) -> Result<String> {
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => {
                self.reject(&err);
                return Err(err);
            }
        };

        let id = self.trips.next_id();
        let trip = fields.into_trip(id.clone(), Utc::now());
        info!(id = %id, destination = %trip.destination, "Trip added");
        self.trips.add(trip);

        self.refresh_trips();
        self.notify("Trip added successfully!", Level::Success);
        self.report_persist_errors();
        Ok(id)
    }

    /// Open the edit overlay for the trip with `id`.
    ///
    /// Returns the pre-filled form, or `None` when no such trip exists.
    pub fn edit_trip(&mut self, id: &str) -> Option<TripForm> {
        let Some(trip) = self.trips.find(id) else {
            debug!(id, "Edit ignored, no such trip");
            return None;
        };
        let form = TripForm::from(trip);
        self.trip_form = FormState::Editing { id: id.to_string() };
        Some(form)
    }

    /// Save the open trip edit.
    ///
    /// Returns `false` when the trip disappeared while the overlay was open.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormState`] when no edit is open, or
    /// [`Error::Validation`] when the form is invalid; the overlay stays open
    /// on a validation failure.
    pub fn submit_trip_edit(&mut self, form: &TripForm) -> Result<bool> {
        let Some(id) = self.trip_form.editing_id().map(str::to_string) else {
            return Err(Error::form_state("no trip edit in progress"));
        };
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => {
                self.reject(&err);
                return Err(err);
            }
        };

        self.trip_form = FormState::Idle;
        if !self.trips.update(&id, fields.into_patch()) {
            return Ok(false);
        }
        info!(id = %id, "Trip updated");

        self.refresh_trips();
        self.notify("Trip updated successfully!", Level::Success);
        self.report_persist_errors();
        Ok(true)
    }

    /// Close the trip edit overlay without saving.
    ///
    /// Returns whether an edit was open.
    pub fn cancel_trip_edit(&mut self) -> bool {
        std::mem::take(&mut self.trip_form) != FormState::Idle
    }

    /// Delete the trip with `id` once the user confirms.
    ///
    /// Returns whether a trip was removed.
    pub fn delete_trip(&mut self, id: &str) -> bool {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this trip?")
        {
            debug!(id, "Trip deletion declined");
            return false;
        }
        if self.trips.remove(id).is_none() {
            return false;
        }
        info!(id, "Trip deleted");
        if self.trip_form.editing_id() == Some(id) {
            self.trip_form = FormState::Idle;
        }

        self.refresh_trips();
        self.notify("Trip deleted successfully!", Level::Success);
        self.report_persist_errors();
        true
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use chrono::NaiveDate;

    use super::super::testing::{planner, planner_with};
    use super::*;
    use crate::model::Trip;
    use crate::render::ListKind;
    use crate::repository::Repository;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn paris() -> TripForm {
        TripForm {
            destination: "Paris".to_string(),
            start_date: "2025-06-01".to_string(),
            end_date: "2025-06-10".to_string(),
            budget: "1500".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_add_paris_scenario() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_trip(&paris()).unwrap();

        assert_eq!(planner.trips().len(), 1);
        let trip = planner.trips().find(&id).unwrap();
        assert_eq!(trip.destination, "Paris");
        assert!(trip.notes.is_empty());

        let html = planner
            .surface()
            .last_view(ListKind::Trips)
            .unwrap()
            .to_html();
        assert!(html.contains("Paris"));
        assert!(html.contains("1,500"));
        assert_eq!(planner.surface().last_message(), Some("Trip added successfully!"));
    }

    #[test]
    fn test_invalid_dates_leave_collection_unchanged() {
        let (mut planner, store) = planner(true);
        let mut form = paris();
        form.end_date = "2025-06-01".to_string();

        let err = planner.submit_trip(&form).unwrap_err();
        assert!(err.is_validation());
        assert!(planner.trips().is_empty());
        assert_eq!(store.write_count(), 0);
        assert_eq!(
            planner.surface().alerts,
            vec!["End date must be after start date".to_string()]
        );
        assert!(planner.surface().notifications.is_empty());
    }

    #[test]
    fn test_edit_flow_preserves_identity() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_trip(&paris()).unwrap();
        let created_at = planner.trips().find(&id).unwrap().created_at;

        let mut form = planner.edit_trip(&id).unwrap();
        assert_eq!(form.budget, "1500");
        assert_eq!(planner.trip_form_state().editing_id(), Some(id.as_str()));

        form.notes = "Louvre on Monday".to_string();
        assert!(planner.submit_trip_edit(&form).unwrap());

        let trip = planner.trips().find(&id).unwrap();
        assert_eq!(trip.notes, "Louvre on Monday");
        assert_eq!(trip.created_at, created_at);
        assert_eq!(*planner.trip_form_state(), FormState::Idle);
        assert_eq!(planner.surface().last_message(), Some("Trip updated successfully!"));
    }

    #[test]
    fn test_invalid_edit_keeps_overlay_open() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_trip(&paris()).unwrap();
        let mut form = planner.edit_trip(&id).unwrap();
        form.start_date = "2025-07-01".to_string();

        assert!(planner.submit_trip_edit(&form).is_err());
        assert_eq!(planner.trip_form_state().editing_id(), Some(id.as_str()));
        assert_eq!(
            planner.trips().find(&id).unwrap().start_date,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_edit_submit_without_open_edit() {
        let (mut planner, _) = planner(true);
        let err = planner.submit_trip_edit(&paris()).unwrap_err();
        assert!(matches!(err, Error::FormState(_)));
    }

    #[test]
    fn test_edit_unknown_trip_is_noop() {
        let (mut planner, _) = planner(true);
        assert!(planner.edit_trip("missing").is_none());
        assert_eq!(*planner.trip_form_state(), FormState::Idle);
    }

    #[test]
    fn test_cancel_edit_discards_changes() {
        let (mut planner, store) = planner(true);
        let id = planner.submit_trip(&paris()).unwrap();
        let writes = store.write_count();

        let mut form = planner.edit_trip(&id).unwrap();
        form.destination = "Lyon".to_string();
        assert!(planner.cancel_trip_edit());
        assert!(!planner.cancel_trip_edit());

        assert_eq!(planner.trips().find(&id).unwrap().destination, "Paris");
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_delete_confirmed() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_trip(&paris()).unwrap();

        assert!(planner.delete_trip(&id));
        assert!(planner.trips().is_empty());
        assert!(planner.surface().last_view(ListKind::Trips).unwrap().is_empty());
        assert_eq!(planner.surface().last_message(), Some("Trip deleted successfully!"));
    }

    #[test]
    fn test_delete_declined_writes_nothing() {
        let store = Rc::new(MemoryStore::new());
        let id = {
            let mut accepting = planner_with(Rc::clone(&store), true);
            accepting.submit_trip(&paris()).unwrap()
        };
        let writes = store.write_count();

        let mut planner = planner_with(Rc::clone(&store), false);
        assert!(!planner.delete_trip(&id));
        assert_eq!(planner.trips().len(), 1);
        assert_eq!(store.write_count(), writes);

        let prompts = planner.confirm.prompts.borrow();
        assert_eq!(
            prompts.as_slice(),
            ["Are you sure you want to delete this trip?"]
        );
    }

    #[test]
    fn test_delete_unknown_trip_is_noop() {
        let (mut planner, store) = planner(true);
        assert!(!planner.delete_trip("missing"));
        assert_eq!(store.write_count(), 0);
        assert!(planner.surface().notifications.is_empty());
    }

    #[test]
    fn test_trips_survive_reload() {
        let store = Rc::new(MemoryStore::new());
        let mut planner = planner_with(Rc::clone(&store), true);
        planner.submit_trip(&paris()).unwrap();
        let mut second = paris();
        second.destination = "Rome".to_string();
        planner.submit_trip(&second).unwrap();

        let dyn_store: Rc<dyn KeyValueStore> = store;
        let reloaded: Repository<Trip> = Repository::load(dyn_store);
        let names: Vec<&str> = reloaded
            .records()
            .iter()
            .map(|t| t.destination.as_str())
            .collect();
        assert_eq!(names, vec!["Paris", "Rome"]);
    }
}
