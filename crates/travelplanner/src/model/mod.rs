//! Record types stored by the planner.
//!
//! Field names follow the camelCase JSON layout used by existing saved data,
//! so collections written by older versions load unchanged.

mod errand;
mod serde_fields;
mod trip;

use std::fmt;

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};

pub use errand::{Errand, ErrandPatch, Priority};
pub use trip::{Trip, TripPatch};

/// A record that a [`Repository`](crate::repository::Repository) can own.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Storage key holding the serialized collection.
    const STORAGE_KEY: &'static str;

    /// Singular, human-readable kind ("trip", "errand").
    const KIND: &'static str;

    /// Partial update merged over an existing record.
    type Patch: fmt::Debug;

    /// The record's unique identifier.
    fn id(&self) -> &str;

    /// Merge `patch` into this record.
    ///
    /// Implementations never touch the identifier or the creation timestamp.
    fn apply(&mut self, patch: Self::Patch);
}

/// Generate a time-based identifier that `taken` does not reject.
///
/// Identifiers are millisecond timestamps rendered as decimal strings; on a
/// collision the value is bumped until it is free.
#[must_use]
pub fn generate_id(taken: impl Fn(&str) -> bool) -> String {
    let mut candidate = Utc::now().timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !taken(&id) {
            return id;
        }
        candidate += 1;
    }
}
