//! # Validation Module
//!
//! Admission-time validation of HTTPRoute resources. Every check is a pure
//! function from a route to a list of field errors; nothing here fails or
//! short-circuits, so a single pass reports every violation.
//!
//! - [`FilterUniquenessChecker`]: at most one filter of each non-repeatable
//!   kind per rule and per backend reference
//! - [`PathMatchValidator`]: match-type specific path constraints
//! - [`RouteValidator`]: walks the rules and applies both checkers

pub mod field;
pub mod filters;
pub mod path_match;
pub mod route;

pub use field::{ErrorType, FieldError, FieldErrorList, FieldPath};
pub use filters::{FilterUniquenessChecker, DEFAULT_REPEATABLE_FILTERS};
pub use path_match::{PathMatchValidator, INVALID_PATH_SEQUENCES, INVALID_PATH_SUFFIXES};
pub use route::{validate_http_route, validate_http_route_spec, RouteValidator};
