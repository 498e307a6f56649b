//! Command-line interface for travelplanner.
//!
//! This module provides the CLI structure for the `tplan` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, ContactCommand, ErrandCommand, FilterArg, ListFormat, PriorityArg,
    StatusCommand, TipCommand, TripCommand,
};

/// tplan - Plan trips and keep track of errands
///
/// Trips and errands are kept in a local database and survive between runs.
#[derive(Debug, Parser)]
#[command(name = "tplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add, edit, delete or list trips
    #[command(subcommand)]
    Trip(TripCommand),

    /// Add, edit, delete, complete or list errands
    #[command(subcommand)]
    Errand(ErrandCommand),

    /// Show the travel tip of the day
    Tip(TipCommand),

    /// Check a contact message before sending it
    Contact(ContactCommand),

    /// Show stored counts and the storage location
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
