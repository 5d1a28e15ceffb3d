//! # Error Handling
//!
//! Error types for the routeguard outer layers (settings, manifest loading,
//! CLI). Route validation itself never fails: it returns a
//! [`FieldErrorList`](crate::validation::FieldErrorList) instead.

pub mod types;

pub use types::{ErrorContext, Result, RouteguardError};

/// Short alias used across the crate
pub type Error = RouteguardError;
