//! Command handlers.
//!
//! A [`Planner`] owns both collections and all session state: the errand
//! filter, the edit state of each form and the visible notifications. Every
//! handler runs to completion: it validates, mutates the repository (which
//! writes through to storage), re-renders the affected list in full and emits
//! a notification. Display and confirmation go through the [`Surface`] and
//! [`Confirm`] capabilities so handlers can be driven without a terminal.

mod errands;
mod trips;

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use tracing::warn;

use crate::error::Error;
use crate::model::{Errand, Trip};
use crate::notify::{Level, Notification, Notifier};
use crate::render::{render_errands, render_trips, ErrandFilter, ListView, RenderOptions};
use crate::repository::Repository;
use crate::storage::KeyValueStore;

/// Where rendered lists, alerts and notifications go.
pub trait Surface {
    /// Replace the content of the list container for `view.kind`.
    fn show(&mut self, view: &ListView);

    /// Show a blocking validation message.
    fn alert(&mut self, message: &str);

    /// Show a transient notification.
    fn notify(&mut self, notification: &Notification);
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    /// Returns `true` when the user accepts `prompt`.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Edit state of one form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    /// No edit in progress.
    #[default]
    Idle,
    /// The edit overlay is open for the record with `id`.
    Editing {
        /// Record being edited.
        id: String,
    },
}

impl FormState {
    /// The record being edited, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing { id } => Some(id),
        }
    }
}

/// The trip and errand planner.
pub struct Planner<S, C> {
    trips: Repository<Trip>,
    errands: Repository<Errand>,
    filter: ErrandFilter,
    trip_form: FormState,
    errand_form: FormState,
    notifier: Notifier,
    unsaved: bool,
    options: RenderOptions,
    surface: S,
    confirm: C,
}

impl<S, C> fmt::Debug for Planner<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("trips", &self.trips)
            .field("errands", &self.errands)
            .field("filter", &self.filter)
            .field("trip_form", &self.trip_form)
            .field("errand_form", &self.errand_form)
            .field("notifier", &self.notifier)
            .field("unsaved", &self.unsaved)
            .finish_non_exhaustive()
    }
}

impl<S: Surface, C: Confirm> Planner<S, C> {
    /// Load both collections from `store`.
    pub fn new(store: Rc<dyn KeyValueStore>, surface: S, confirm: C) -> Self {
        Self {
            trips: Repository::load(Rc::clone(&store)),
            errands: Repository::load(store),
            filter: ErrandFilter::default(),
            trip_form: FormState::Idle,
            errand_form: FormState::Idle,
            notifier: Notifier::default(),
            unsaved: false,
            options: RenderOptions::default(),
            surface,
            confirm,
        }
    }

    /// Use `options` when rendering.
    #[must_use]
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Use `notifier` for notifications.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Render both lists.
    pub fn initialize(&mut self) {
        self.refresh_trips();
        self.refresh_errands();
    }

    /// Trips in insertion order.
    #[must_use]
    pub fn trips(&self) -> &Repository<Trip> {
        &self.trips
    }

    /// Errands in insertion order.
    #[must_use]
    pub fn errands(&self) -> &Repository<Errand> {
        &self.errands
    }

    /// The current errand filter.
    #[must_use]
    pub fn errand_filter(&self) -> ErrandFilter {
        self.filter
    }

    /// Edit state of the trip form.
    #[must_use]
    pub fn trip_form_state(&self) -> &FormState {
        &self.trip_form
    }

    /// Edit state of the errand form.
    #[must_use]
    pub fn errand_form_state(&self) -> &FormState {
        &self.errand_form
    }

    /// Visible notifications.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Whether a change this session could not be written to storage.
    ///
    /// The in-memory collections still hold the change.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// The display surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The trip list as currently rendered.
    #[must_use]
    pub fn trip_view(&self) -> ListView {
        render_trips(self.trips.records(), &self.options)
    }

    /// The errand list under the current filter.
    #[must_use]
    pub fn errand_view(&self) -> ListView {
        render_errands(self.errands.records(), self.filter)
    }

    fn refresh_trips(&mut self) {
        let view = self.trip_view();
        self.surface.show(&view);
    }

    fn refresh_errands(&mut self) {
        let view = self.errand_view();
        self.surface.show(&view);
    }

    fn notify(&mut self, message: impl Into<String>, level: Level) {
        self.notifier.expire(Instant::now());
        let notification = self.notifier.push(message, level).clone();
        self.surface.notify(&notification);
    }

    fn reject(&mut self, err: &Error) {
        self.surface.alert(&err.to_string());
    }

    fn report_persist_errors(&mut self) {
        let errors = [
            self.trips.take_persist_error(),
            self.errands.take_persist_error(),
        ];
        for err in errors.into_iter().flatten() {
            warn!(error = %err, "Changes kept in memory only");
            self.unsaved = true;
            self.notify(
                format!("Could not save your changes: {err}"),
                Level::Warning,
            );
        }
    }
}
