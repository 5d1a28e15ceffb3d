//! # Error Types
//!
//! Error types for routeguard using `thiserror`.

use crate::validation::FieldErrorList;

/// Custom result type for routeguard operations
pub type Result<T> = std::result::Result<T, RouteguardError>;

/// Main error type for routeguard
#[derive(thiserror::Error, Debug)]
pub enum RouteguardError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: String,
    },

    /// YAML deserialization errors
    #[error("YAML error: {context}")]
    Yaml {
        #[source]
        source: serde_yaml::Error,
        context: String,
    },

    /// A route was validated and carries one or more field errors
    #[error("Route '{route}' rejected with {count} error(s): {errors}", count = .errors.len())]
    Rejected {
        route: String,
        errors: FieldErrorList,
    },
}

impl RouteguardError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a rejection error for a route
    pub fn rejected<S: Into<String>>(route: S, errors: FieldErrorList) -> Self {
        Self::Rejected {
            route: route.into(),
            errors,
        }
    }

    /// Field errors carried by a rejection, if any
    pub fn field_errors(&self) -> Option<&FieldErrorList> {
        match self {
            RouteguardError::Rejected { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Add context to an error (used by ErrorContext trait)
    pub(crate) fn add_context(&mut self, context: String) {
        match self {
            RouteguardError::Io { context: ctx, .. }
            | RouteguardError::Serialization { context: ctx, .. }
            | RouteguardError::Yaml { context: ctx, .. } => {
                *ctx = format!("{}: {}", context, ctx);
            }
            RouteguardError::Config { message, .. } => {
                *message = format!("{}: {}", context, message);
            }
            RouteguardError::Rejected { .. } => {}
        }
    }
}

/// Attach a human-readable context to fallible results.
pub trait ErrorContext<T> {
    /// Prefix the error context with the message produced by `f`
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<RouteguardError>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|error| {
            let mut error = error.into();
            error.add_context(f());
            error
        })
    }
}

// Error conversions for common external error types
impl From<std::io::Error> for RouteguardError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            source: error,
            context: "I/O operation failed".to_string(),
        }
    }
}

impl From<serde_json::Error> for RouteguardError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            source: error,
            context: "JSON deserialization failed".to_string(),
        }
    }
}

impl From<serde_yaml::Error> for RouteguardError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Yaml {
            source: error,
            context: "YAML deserialization failed".to_string(),
        }
    }
}

impl From<toml::de::Error> for RouteguardError {
    fn from(error: toml::de::Error) -> Self {
        Self::config_with_source("Configuration file could not be parsed", Box::new(error))
    }
}

impl From<validator::ValidationErrors> for RouteguardError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => "Invalid value".to_string(),
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::config(format!("Settings validation failed: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FieldError, FieldPath};

    #[test]
    fn test_error_creation() {
        let error = RouteguardError::config("Test configuration error");
        assert!(matches!(error, RouteguardError::Config { .. }));
        assert_eq!(
            error.to_string(),
            "Configuration error: Test configuration error"
        );
    }

    #[test]
    fn test_rejected_error_message() {
        let path = FieldPath::new("spec")
            .child("rules")
            .index(0)
            .child("filters");
        let errors = FieldErrorList::from(vec![FieldError::invalid(
            &path,
            "RequestMirror",
            "cannot be used multiple times in the same rule",
        )]);
        let error = RouteguardError::rejected("demo", errors);

        assert_eq!(
            error.to_string(),
            "Route 'demo' rejected with 1 error(s): spec.rules[0].filters: Invalid value: \
             \"RequestMirror\": cannot be used multiple times in the same rule"
        );
        assert_eq!(error.field_errors().map(FieldErrorList::len), Some(1));
    }

    #[test]
    fn test_error_conversions() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: RouteguardError = io_error.into();
        assert!(matches!(error, RouteguardError::Io { .. }));

        let result = serde_json::from_str::<serde_json::Value>("invalid json");
        let error: RouteguardError = result.unwrap_err().into();
        assert!(matches!(error, RouteguardError::Serialization { .. }));
        assert!(error.field_errors().is_none());
    }

    #[test]
    fn test_with_context_prefixes_message() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let error = result
            .with_context(|| "Failed to read routes.yaml".to_string())
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "I/O error: Failed to read routes.yaml: I/O operation failed"
        );
    }
}
