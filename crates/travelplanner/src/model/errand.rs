use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{serde_fields, Record};
use crate::error::Error;

/// How urgent an errand is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Whenever there is time.
    Low,
    /// The usual.
    #[default]
    Medium,
    /// Do it first.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Lowercase name used in storage and markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "" => Err(Error::validation("priority", "Priority is required")),
            other => Err(Error::validation(
                "priority",
                format!("Unknown priority '{other}' (expected low, medium or high)"),
            )),
        }
    }
}

/// Something to get done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Errand {
    /// Unique identifier.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Optional longer description, empty when not given.
    #[serde(default)]
    pub description: String,
    /// Urgency.
    pub priority: Priority,
    /// Optional due date.
    #[serde(default, with = "serde_fields::optional_date")]
    pub due_date: Option<NaiveDate>,
    /// Whether the errand is done.
    #[serde(default)]
    pub completed: bool,
    /// When the errand was recorded.
    pub created_at: DateTime<Utc>,
}

/// Fields to overwrite on an existing [`Errand`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrandPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New priority.
    pub priority: Option<Priority>,
    /// New due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// New completion state.
    pub completed: Option<bool>,
}

impl Record for Errand {
    const STORAGE_KEY: &'static str = "errands";
    const KIND: &'static str = "errand";

    type Patch = ErrandPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: ErrandPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}
