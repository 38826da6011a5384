//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Track your time from the command-line, a CLI for TimeTagger.
#[derive(Debug, Parser)]
#[command(name = "timetagger", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Edit the API URL and token by opening the config file in your default editor.
    Setup,

    /// Open the TimeTagger app in your default browser.
    App,

    /// Get an overview of today and this week.
    Status,

    /// List records of the requested time frame.
    Show {
        /// Show records of the last <DAYS> days. Default: 1.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        days: Option<u32>,

        /// Start date in ISO-format (YYYY-MM-DD).
        #[arg(long)]
        start: Option<NaiveDate>,

        /// End date in ISO-format (YYYY-MM-DD).
        #[arg(long)]
        end: Option<NaiveDate>,
    },

    /// Start timer with the given description. Use '#' to create tags.
    Start {
        /// Description. Use '#' to create tags.
        description: String,
    },

    /// Add an already finished record.
    Add {
        /// Date in ISO-format (YYYY-MM-DD). Default: today.
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Start time (HH:MM or HH:MM:SS).
        start: String,

        /// End time (HH:MM or HH:MM:SS).
        end: String,

        /// Description. Use '#' to create tags.
        description: String,
    },

    /// Stop any running timers.
    Stop,

    /// Start a timer with the same description as a recent record.
    Resume {
        /// Number of the record to resume, 1 being the most recent.
        index: Option<usize>,
    },

    /// Load all records and detect errors. Use '--fix' to fix errors.
    Diagnose {
        /// Repair errored records.
        #[arg(long)]
        fix: bool,
    },
}
