//! Day-plan parser CLI library.
//!
//! This crate provides the CLI interface for the dayplan parser.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
