//! Configuration loading and management.

use std::path::{Path, PathBuf};

use dayplan_core::ics::DEFAULT_CALENDAR_NAME;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Output format used when `--format` is not given.
    pub format: OutputFormat,
    /// Calendar name written into iCalendar output.
    pub calendar_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            calendar_name: DEFAULT_CALENDAR_NAME.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DAYPLAN_*)
        figment = figment.merge(Env::prefixed("DAYPLAN_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for dayplan.
///
/// On Linux: `~/.config/dayplan`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dayplan"))
}
