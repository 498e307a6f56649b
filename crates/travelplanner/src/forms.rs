//! Form input and validation.
//!
//! Forms hold raw text exactly as entered. [`TripForm::validate`] and
//! [`ErrandForm::validate`] turn that text into typed fields or a
//! field-tagged [`Error::Validation`].

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::model::{Errand, ErrandPatch, Priority, Trip, TripPatch};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw trip form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripForm {
    /// Destination text.
    pub destination: String,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// End date, `YYYY-MM-DD`.
    pub end_date: String,
    /// Budget; empty means none.
    pub budget: String,
    /// Notes.
    pub notes: String,
}

/// Validated trip fields.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFields {
    /// Destination, trimmed and non-empty.
    pub destination: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day, after `start_date`.
    pub end_date: NaiveDate,
    /// Non-negative budget.
    pub budget: f64,
    /// Notes.
    pub notes: String,
}

impl TripForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<TripFields> {
        let destination = required("destination", "Destination", &self.destination)?;
        let start_date = parse_date("startDate", "Start date", &self.start_date)?
            .ok_or_else(|| Error::validation("startDate", "Start date is required"))?;
        let end_date = parse_date("endDate", "End date", &self.end_date)?
            .ok_or_else(|| Error::validation("endDate", "End date is required"))?;
        if start_date >= end_date {
            return Err(Error::validation(
                "endDate",
                "End date must be after start date",
            ));
        }
        let budget = parse_budget(&self.budget)?;

        Ok(TripFields {
            destination,
            start_date,
            end_date,
            budget,
            notes: self.notes.clone(),
        })
    }
}

impl From<&Trip> for TripForm {
    fn from(trip: &Trip) -> Self {
        Self {
            destination: trip.destination.clone(),
            start_date: trip.start_date.format(DATE_FORMAT).to_string(),
            end_date: trip.end_date.format(DATE_FORMAT).to_string(),
            budget: trip.budget.to_string(),
            notes: trip.notes.clone(),
        }
    }
}

impl TripFields {
    /// Build a new trip.
    #[must_use]
    pub fn into_trip(self, id: String, created_at: DateTime<Utc>) -> Trip {
        Trip {
            id,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
            notes: self.notes,
            created_at,
        }
    }

    /// A patch replacing every editable field.
    #[must_use]
    pub fn into_patch(self) -> TripPatch {
        TripPatch {
            destination: Some(self.destination),
            start_date: Some(self.start_date),
            end_date: Some(self.end_date),
            budget: Some(self.budget),
            notes: Some(self.notes),
        }
    }
}

/// Raw errand form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrandForm {
    /// Title text.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority name.
    pub priority: String,
    /// Due date, `YYYY-MM-DD`; empty means none.
    pub due_date: String,
}

/// Validated errand fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrandFields {
    /// Title, trimmed and non-empty.
    pub title: String,
    /// Description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

impl ErrandForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<ErrandFields> {
        let title = required("title", "Title", &self.title)?;
        let priority: Priority = self.priority.parse()?;
        let due_date = parse_date("dueDate", "Due date", &self.due_date)?;

        Ok(ErrandFields {
            title,
            description: self.description.clone(),
            priority,
            due_date,
        })
    }
}

impl From<&Errand> for ErrandForm {
    fn from(errand: &Errand) -> Self {
        Self {
            title: errand.title.clone(),
            description: errand.description.clone(),
            priority: errand.priority.to_string(),
            due_date: errand
                .due_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }
}

impl ErrandFields {
    /// Build a new, pending errand.
    #[must_use]
    pub fn into_errand(self, id: String, created_at: DateTime<Utc>) -> Errand {
        Errand {
            id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            due_date: self.due_date,
            completed: false,
            created_at,
        }
    }

    /// A patch replacing every editable field; completion is left alone.
    #[must_use]
    pub fn into_patch(self) -> ErrandPatch {
        ErrandPatch {
            title: Some(self.title),
            description: Some(self.description),
            priority: Some(self.priority),
            due_date: Some(self.due_date),
            completed: None,
        }
    }
}

fn required(field: &'static str, label: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(field, format!("{label} is required")));
    }
    Ok(value.to_string())
}

fn parse_date(field: &'static str, label: &str, value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| {
            Error::validation(field, format!("{label} must be a valid date (YYYY-MM-DD)"))
        })
}

fn parse_budget(value: &str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(budget) if budget.is_finite() && budget >= 0.0 => Ok(budget),
        _ => Err(Error::validation(
            "budget",
            "Budget must be a non-negative number",
        )),
    }
}
