//! Layered settings.
//!
//! Defaults are overridden by an optional config file, then by
//! `ATLAS_TRENDS_*` environment variables, then by command-line flags.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::DEFAULT_WINDOW_DAYS;

/// Root of the public Trends API.
pub const DEFAULT_URL: &str = "https://trends.atlas.ripe.net/api/v1";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ATLAS_TRENDS";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// API root used to render request URLs.
    pub base_url: String,
    /// Drop leading samples that carry no RTT.
    pub skip_leading_invalid: bool,
    /// Query span when no start is given.
    pub default_window_days: i64,
    /// Report format.
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            skip_leading_invalid: true,
            default_window_days: DEFAULT_WINDOW_DAYS,
            output: OutputFormat::Text,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("base_url", defaults.base_url)?
            .set_default("skip_leading_invalid", defaults.skip_leading_invalid)?
            .set_default("default_window_days", defaults.default_window_days)?
            .set_default("output", defaults.output.to_string())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
