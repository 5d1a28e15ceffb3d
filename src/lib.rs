//! # routeguard
//!
//! Admission-time validation for HTTPRoute resources. A route is checked
//! before it is persisted or applied, and every violation is reported as a
//! field-indexed error so the caller (an admission webhook, a CI lint step)
//! can reject it with a precise message.
//!
//! ## Architecture
//!
//! ```text
//! manifest / admission request → HttpRoute → RouteValidator → FieldErrorList
//!                                                ↓
//!                          FilterUniquenessChecker, PathMatchValidator
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use routeguard::domain::{HttpPathMatch, HttpRoute, HttpRouteMatch, HttpRouteRule};
//! use routeguard::validation::validate_http_route;
//!
//! let rule = HttpRouteRule::default()
//!     .with_match(HttpRouteMatch::path(HttpPathMatch::prefix("/api/../admin")));
//! let errors = validate_http_route(&HttpRoute::new("web", vec![rule]));
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors.as_slice()[0].field, "spec.rules[0].matches[0].path.value");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod manifest;
pub mod observability;
pub mod validation;

// Re-export commonly used types and traits
pub use config::{AppConfig, ValidationSettings};
pub use errors::{Error, Result, RouteguardError};
pub use validation::{validate_http_route, FieldError, FieldErrorList, RouteValidator};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
