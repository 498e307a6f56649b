//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands. Dates and
//! budgets stay as text here; the planner's forms validate them.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::Priority;
use crate::render::ErrandFilter;

/// Trip commands.
#[derive(Debug, Subcommand)]
pub enum TripCommand {
    /// Plan a new trip
    Add {
        /// Where the trip goes
        destination: String,

        /// First day (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Last day (YYYY-MM-DD), after the first
        #[arg(short, long)]
        end: String,

        /// Planned spend
        #[arg(short, long)]
        budget: Option<String>,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Change an existing trip
    Edit {
        /// Trip identifier
        id: String,

        /// New destination
        #[arg(short, long)]
        destination: Option<String>,

        /// New first day
        #[arg(short, long)]
        start: Option<String>,

        /// New last day
        #[arg(short, long)]
        end: Option<String>,

        /// New budget (empty clears it)
        #[arg(short, long)]
        budget: Option<String>,

        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a trip
    Delete {
        /// Trip identifier
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List trips
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: ListFormat,
    },
}

/// Errand commands.
#[derive(Debug, Subcommand)]
pub enum ErrandCommand {
    /// Record a new errand
    Add {
        /// Short title
        title: String,

        /// How urgent it is
        #[arg(short, long, value_enum)]
        priority: PriorityArg,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Change an existing errand
    Edit {
        /// Errand identifier
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New priority
        #[arg(short, long, value_enum)]
        priority: Option<PriorityArg>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New due date (empty clears it)
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete an errand
    Delete {
        /// Errand identifier
        id: String,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Mark an errand complete, or incomplete again
    Toggle {
        /// Errand identifier
        id: String,
    },

    /// List errands
    List {
        /// Which errands to show
        #[arg(long, value_enum, default_value = "all")]
        filter: FilterArg,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: ListFormat,
    },
}

/// Tip command arguments.
#[derive(Debug, Args)]
pub struct TipCommand {
    /// Show the tip for this date instead of today (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Contact command arguments.
#[derive(Debug, Args)]
pub struct ContactCommand {
    /// Your name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Your email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// The message
    #[arg(long, default_value = "")]
    pub message: String,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Priority argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    /// Whenever there is time
    Low,
    /// The usual
    Medium,
    /// Do it first
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

/// Errand filter argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Every errand
    All,
    /// Not yet completed
    Pending,
    /// Completed
    Completed,
}

impl From<FilterArg> for ErrandFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Pending => Self::Pending,
            FilterArg::Completed => Self::Completed,
        }
    }
}

/// Output format for list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ListFormat {
    /// Plain text output
    #[default]
    Plain,
    /// HTML fragment
    Html,
    /// Stored JSON records
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_arg_conversion() {
        assert_eq!(Priority::from(PriorityArg::Low), Priority::Low);
        assert_eq!(Priority::from(PriorityArg::Medium), Priority::Medium);
        assert_eq!(Priority::from(PriorityArg::High), Priority::High);
    }

    #[test]
    fn test_filter_arg_conversion() {
        assert_eq!(ErrandFilter::from(FilterArg::All), ErrandFilter::All);
        assert_eq!(ErrandFilter::from(FilterArg::Pending), ErrandFilter::Pending);
        assert_eq!(
            ErrandFilter::from(FilterArg::Completed),
            ErrandFilter::Completed
        );
    }

    #[test]
    fn test_list_format_default() {
        assert_eq!(ListFormat::default(), ListFormat::Plain);
    }

    #[test]
    fn test_trip_command_debug() {
        let cmd = TripCommand::Delete {
            id: "42".to_string(),
            yes: true,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Delete"));
        assert!(debug_str.contains("42"));
    }
}
