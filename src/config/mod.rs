//! # Configuration Management
//!
//! Settings for the route validator and its logging. Values come from
//! built-in defaults, an optional TOML file and `ROUTEGUARD_*` environment
//! variables, in increasing order of precedence.

pub mod settings;

pub use settings::{
    AppConfig, LoggingConfig, ValidationSettings, ENV_LOG_JSON, ENV_LOG_LEVEL,
    ENV_REPEATABLE_FILTERS,
};
