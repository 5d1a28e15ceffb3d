//! # Configuration Settings
//!
//! Defines the configuration structure for routeguard.

use crate::domain::FilterKind;
use crate::errors::{ErrorContext, Result, RouteguardError};
use crate::validation::DEFAULT_REPEATABLE_FILTERS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::{Validate, ValidationError};

/// Environment variable listing repeatable filter kinds, comma separated
pub const ENV_REPEATABLE_FILTERS: &str = "ROUTEGUARD_REPEATABLE_FILTERS";
/// Environment variable overriding the log level
pub const ENV_LOG_LEVEL: &str = "ROUTEGUARD_LOG_LEVEL";
/// Environment variable switching JSON log output on or off
pub const ENV_LOG_JSON: &str = "ROUTEGUARD_LOG_JSON";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Route validation configuration
    pub validation: ValidationSettings,

    /// Logging configuration
    #[validate(nested)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration: defaults, then `path` if given, then environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file. Missing sections take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply `ROUTEGUARD_*` environment variables on top of this configuration
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kinds) = lookup(ENV_REPEATABLE_FILTERS) {
            self.validation.repeatable_filters = parse_filter_kinds(&kinds)?;
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }

        if let Some(json) = lookup(ENV_LOG_JSON) {
            self.logging.json = json.to_lowercase() == "true" || json == "1";
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(RouteguardError::from)
    }
}

/// Settings owned by the route validator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationSettings {
    /// Filter kinds that may appear more than once in one filter chain
    pub repeatable_filters: Vec<FilterKind>,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            repeatable_filters: DEFAULT_REPEATABLE_FILTERS.to_vec(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(
        length(min = 1, message = "Log level cannot be empty"),
        custom(function = "validate_log_level")
    )]
    pub level: String,

    /// Enable JSON structured logging
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    if level.is_empty() || LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        return Ok(());
    }
    let mut error = ValidationError::new("invalid_log_level");
    error.message = Some(format!("Unknown log level '{}'", level).into());
    Err(error)
}

/// Parse a comma separated list of filter kinds; blanks are ignored
fn parse_filter_kinds(raw: &str) -> Result<Vec<FilterKind>> {
    raw.split(',')
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .map(|kind| {
            kind.parse::<FilterKind>().map_err(|e| {
                RouteguardError::config(format!("Invalid {}: {}", ENV_REPEATABLE_FILTERS, e))
            })
        })
        .collect()
}
