use chrono::Utc;
use tracing::{debug, info};

use super::{Confirm, FormState, Planner, Surface};
use crate::error::{Error, Result};
use crate::forms::ErrandForm;
use crate::notify::Level;
use crate::render::ErrandFilter;

impl<S: Surface, C: Confirm> Planner<S, C> {
    /// Create an errand from `form`.
    ///
    /// Returns the new errand's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] (after alerting the user) when the form
    /// is invalid.
    pub fn submit_errand(&mut self, form: &ErrandForm) -> Result<String> {
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => {
                self.reject(&err);
                return Err(err);
            }
        };

        let id = self.errands.next_id();
        let errand = fields.into_errand(id.clone(), Utc::now());
        info!(id = %id, title = %errand.title, "Errand added");
        self.errands.add(errand);

        self.refresh_errands();
        self.notify("Errand added successfully!", Level::Success);
        self.report_persist_errors();
        Ok(id)
    }

    /// Open the edit overlay for the errand with `id`.
    pub fn edit_errand(&mut self, id: &str) -> Option<ErrandForm> {
        let Some(errand) = self.errands.find(id) else {
            debug!(id, "Edit ignored, no such errand");
            return None;
        };
        let form = ErrandForm::from(errand);
        self.errand_form = FormState::Editing { id: id.to_string() };
        Some(form)
    }

    /// Save the open errand edit. Completion is not changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormState`] when no edit is open, or
    /// [`Error::Validation`] when the form is invalid.
    pub fn submit_errand_edit(&mut self, form: &ErrandForm) -> Result<bool> {
        let Some(id) = self.errand_form.editing_id().map(str::to_string) else {
            return Err(Error::form_state("no errand edit in progress"));
        };
        let fields = match form.validate() {
            Ok(fields) => fields,
            Err(err) => {
                self.reject(&err);
                return Err(err);
            }
        };

        self.errand_form = FormState::Idle;
        if !self.errands.update(&id, fields.into_patch()) {
            return Ok(false);
        }
        info!(id = %id, "Errand updated");

        self.refresh_errands();
        self.notify("Errand updated successfully!", Level::Success);
        self.report_persist_errors();
        Ok(true)
    }

    /// Close the errand edit overlay without saving.
    pub fn cancel_errand_edit(&mut self) -> bool {
        std::mem::take(&mut self.errand_form) != FormState::Idle
    }

    /// Delete the errand with `id` once the user confirms.
    pub fn delete_errand(&mut self, id: &str) -> bool {
        if !self
            .confirm
            .confirm("Are you sure you want to delete this errand?")
        {
            debug!(id, "Errand deletion declined");
            return false;
        }
        if self.errands.remove(id).is_none() {
            return false;
        }
        info!(id, "Errand deleted");
        if self.errand_form.editing_id() == Some(id) {
            self.errand_form = FormState::Idle;
        }

        self.refresh_errands();
        self.notify("Errand deleted successfully!", Level::Success);
        self.report_persist_errors();
        true
    }

    /// Flip the completion of the errand with `id`.
    ///
    /// Returns the new state, or `None` when no such errand exists.
    pub fn toggle_errand(&mut self, id: &str) -> Option<bool> {
        let completed = self.errands.toggle_completed(id)?;
        self.after_completion_change(completed);
        Some(completed)
    }

    /// Set the completion of the errand with `id`.
    ///
    /// Returns whether the errand exists.
    pub fn set_errand_completed(&mut self, id: &str, completed: bool) -> bool {
        if !self.errands.set_completed(id, completed) {
            return false;
        }
        self.after_completion_change(completed);
        true
    }

    /// Show only errands passing `filter`. Nothing is stored.
    pub fn set_errand_filter(&mut self, filter: ErrandFilter) {
        debug!(%filter, "Errand filter changed");
        self.filter = filter;
        self.refresh_errands();
    }

    fn after_completion_change(&mut self, completed: bool) {
        self.refresh_errands();
        let message = if completed {
            "Errand marked as complete!"
        } else {
            "Errand marked as incomplete!"
        };
        self.notify(message, Level::Success);
        self.report_persist_errors();
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::planner;
    use super::*;
    use crate::render::ListKind;

    fn errand(title: &str, priority: &str) -> ErrandForm {
        ErrandForm {
            title: title.to_string(),
            priority: priority.to_string(),
            ..ErrandForm::default()
        }
    }

    #[test]
    fn test_buy_milk_scenario() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_errand(&errand("Buy milk", "low")).unwrap();
        assert!(planner.set_errand_completed(&id, true));

        planner.set_errand_filter(ErrandFilter::Completed);
        let completed = planner.errand_view();
        assert_eq!(completed.ids(), vec![id.as_str()]);

        planner.set_errand_filter(ErrandFilter::Pending);
        assert!(planner.errand_view().is_empty());
        assert!(planner
            .surface()
            .last_view(ListKind::Errands)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_new_errand_defaults() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_errand(&errand("Post letter", "high")).unwrap();
        let stored = planner.errands().find(&id).unwrap();
        assert!(!stored.completed);
        assert!(stored.description.is_empty());
        assert!(stored.due_date.is_none());
        assert_eq!(
            planner.surface().last_message(),
            Some("Errand added successfully!")
        );
    }

    #[test]
    fn test_missing_priority_rejected() {
        let (mut planner, store) = planner(true);
        let err = planner.submit_errand(&errand("Buy milk", "")).unwrap_err();
        assert_eq!(err.field(), Some("priority"));
        assert!(planner.errands().is_empty());
        assert_eq!(store.write_count(), 0);
        assert_eq!(planner.surface().alerts, vec!["Priority is required".to_string()]);
    }

    #[test]
    fn test_toggle_messages() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_errand(&errand("Buy milk", "low")).unwrap();

        assert_eq!(planner.toggle_errand(&id), Some(true));
        assert_eq!(
            planner.surface().last_message(),
            Some("Errand marked as complete!")
        );
        assert_eq!(planner.toggle_errand(&id), Some(false));
        assert_eq!(
            planner.surface().last_message(),
            Some("Errand marked as incomplete!")
        );
        assert_eq!(planner.toggle_errand("missing"), None);
    }

    #[test]
    fn test_filter_change_does_not_write() {
        let (mut planner, store) = planner(true);
        planner.submit_errand(&errand("A", "low")).unwrap();
        let writes = store.write_count();
        let notices = planner.surface().notifications.len();

        planner.set_errand_filter(ErrandFilter::Completed);
        assert_eq!(planner.errand_filter(), ErrandFilter::Completed);
        assert_eq!(store.write_count(), writes);
        assert_eq!(planner.surface().notifications.len(), notices);
    }

    #[test]
    fn test_filter_applies_to_later_renders() {
        let (mut planner, _) = planner(true);
        planner.set_errand_filter(ErrandFilter::Pending);
        let done = planner.submit_errand(&errand("Done", "low")).unwrap();
        planner.toggle_errand(&done);
        let open = planner.submit_errand(&errand("Open", "medium")).unwrap();

        let view = planner.surface().last_view(ListKind::Errands).unwrap();
        assert_eq!(view.ids(), vec![open.as_str()]);
    }

    #[test]
    fn test_edit_keeps_completion() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_errand(&errand("Buy milk", "low")).unwrap();
        planner.toggle_errand(&id);

        let mut form = planner.edit_errand(&id).unwrap();
        form.title = "Buy oat milk".to_string();
        form.due_date = "2025-07-04".to_string();
        assert!(planner.submit_errand_edit(&form).unwrap());

        let stored = planner.errands().find(&id).unwrap();
        assert_eq!(stored.title, "Buy oat milk");
        assert!(stored.completed);
        assert!(stored.due_date.is_some());
        assert_eq!(
            planner.surface().last_message(),
            Some("Errand updated successfully!")
        );
    }

    #[test]
    fn test_edit_target_deleted_meanwhile() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_errand(&errand("Buy milk", "low")).unwrap();
        let form = planner.edit_errand(&id).unwrap();
        planner.errands.remove(&id);

        assert!(!planner.submit_errand_edit(&form).unwrap());
        assert_eq!(*planner.errand_form_state(), FormState::Idle);
    }

    #[test]
    fn test_delete_errand_declined() {
        let (mut accept, store) = planner(true);
        let id = accept.submit_errand(&errand("Buy milk", "low")).unwrap();
        let writes = store.write_count();

        let mut decline = super::super::testing::planner_with(store.clone(), false);
        assert!(!decline.delete_errand(&id));
        assert_eq!(decline.errands().len(), 1);
        assert_eq!(store.write_count(), writes);

        assert!(accept.delete_errand(&id));
        assert!(accept.errands().is_empty());
        assert_eq!(
            accept.surface().last_message(),
            Some("Errand deleted successfully!")
        );
    }

    #[test]
    fn test_cancel_errand_edit() {
        let (mut planner, _) = planner(true);
        let id = planner.submit_errand(&errand("Buy milk", "low")).unwrap();
        planner.edit_errand(&id).unwrap();
        assert!(planner.cancel_errand_edit());
        assert!(planner.submit_errand_edit(&errand("x", "low")).is_err());
    }
}
