//! # Observability Infrastructure
//!
//! Structured logging for routeguard. The validators only emit `tracing`
//! events; installing a subscriber is left to the binary.

pub mod logging;

pub use logging::{init_logging, log_config_info};
