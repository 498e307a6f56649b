use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{serde_fields, Record};

/// A planned trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    /// Unique identifier.
    pub id: String,
    /// Where the trip goes.
    pub destination: String,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip; always after `start_date`.
    pub end_date: NaiveDate,
    /// Planned spend, zero when unknown.
    #[serde(default, deserialize_with = "serde_fields::budget")]
    pub budget: f64,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// When the trip was recorded.
    pub created_at: DateTime<Utc>,
}

impl Trip {
    /// Whether a budget was given.
    #[must_use]
    pub fn has_budget(&self) -> bool {
        self.budget > 0.0
    }
}

/// Fields to overwrite on an existing [`Trip`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPatch {
    /// New destination.
    pub destination: Option<String>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
    /// New budget.
    pub budget: Option<f64>,
    /// New notes.
    pub notes: Option<String>,
}

impl Record for Trip {
    const STORAGE_KEY: &'static str = "trips";
    const KIND: &'static str = "trip";

    type Patch = TripPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: TripPatch) {
        if let Some(destination) = patch.destination {
            self.destination = destination;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(budget) = patch.budget {
            self.budget = budget;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn paris() -> Trip {
        Trip {
            id: "1717200000000".to_string(),
            destination: "Paris".to_string(),
            start_date: date(2025, 6, 1),
            end_date: date(2025, 6, 10),
            budget: 1500.0,
            notes: String::new(),
            created_at: "2025-05-01T08:30:00.000Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(paris()).unwrap();
        assert_eq!(json["startDate"], "2025-06-01");
        assert_eq!(json["endDate"], "2025-06-10");
        assert_eq!(json["budget"], 1500.0);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn test_reads_browser_written_record() {
        let json = r#"{
            "id": "1717200000000",
            "destination": "Goa",
            "startDate": "2025-12-20",
            "endDate": "2025-12-27",
            "budget": "25000",
            "notes": "",
            "createdAt": "2025-11-02T17:04:11.512Z"
        }"#;
        let trip: Trip = serde_json::from_str(json).unwrap();
        assert_eq!(trip.destination, "Goa");
        assert!((trip.budget - 25_000.0).abs() < f64::EPSILON);
        assert_eq!(trip.end_date - trip.start_date, chrono::Duration::days(7));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "id": "1",
            "destination": "Rome",
            "startDate": "2025-01-01",
            "endDate": "2025-01-02",
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let trip: Trip = serde_json::from_str(json).unwrap();
        assert!(!trip.has_budget());
        assert!(trip.notes.is_empty());
    }

    #[test]
    fn test_apply_overwrites_only_patched_fields() {
        let mut trip = paris();
        let original = trip.clone();

        trip.apply(TripPatch {
            notes: Some("Louvre on Monday".to_string()),
            ..TripPatch::default()
        });

        assert_eq!(trip.notes, "Louvre on Monday");
        assert_eq!(trip.destination, original.destination);
        assert_eq!(trip.start_date, original.start_date);
        assert_eq!(trip.id(), original.id());
        assert_eq!(trip.created_at, original.created_at);
    }

    #[test]
    fn test_record_constants() {
        assert_eq!(Trip::STORAGE_KEY, "trips");
        assert_eq!(Trip::KIND, "trip");
    }
}
