//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use dayplan_core::parse_reference_date;
use serde::{Deserialize, Serialize};

/// Day-plan to calendar converter.
///
/// Reads a Markdown study or work plan and turns its time-range headers into
/// calendar events.
#[derive(Debug, Parser)]
#[command(name = "dayplan", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract calendar events from a plan.
    Parse {
        /// Plan file to read; omit or pass "-" for stdin.
        input: Option<PathBuf>,

        /// Reference date (YYYY-MM-DD) used when the plan declares none.
        #[arg(long, value_parser = parse_reference_date)]
        date: Option<NaiveDate>,

        /// Output format; overrides the configured default.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Calendar name for iCalendar output; overrides the configured name.
        #[arg(long)]
        name: Option<String>,
    },

    /// Resolve a single time expression such as "下午 2:30" or "2:30 PM".
    Resolve {
        /// The time expression.
        expr: String,

        /// Date to project the time onto (YYYY-MM-DD); defaults to today.
        #[arg(long, value_parser = parse_reference_date)]
        date: Option<NaiveDate>,
    },
}

/// How extracted events are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// One JSON object per line.
    Jsonl,
    /// Human-readable lines.
    Text,
    /// iCalendar document.
    Ics,
}
