//! `travelplanner` - Trip and errand lists with persistent storage
//!
//! This library provides the record types, storage, rendering and command
//! handlers behind the `tplan` binary. Collections live in memory for a
//! session and are written through to an origin-scoped key-value store on
//! every change.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod logging;
pub mod model;
pub mod notify;
pub mod render;
pub mod repository;
pub mod storage;
pub mod terminal;
pub mod tips;

pub use config::Config;
pub use error::{Error, Result};
pub use handlers::{Confirm, FormState, Planner, Surface};
pub use logging::init_logging;
pub use model::{Errand, Priority, Record, Trip};
pub use repository::Repository;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageStats};
