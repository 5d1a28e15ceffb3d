//! Path match validation.
//!
//! `Exact` and `PathPrefix` values must be absolute and free of sequences
//! that let percent-encoding or repeated separators change which route a
//! request lands on. `RegularExpression` values are passed through.

use serde_json::json;

use crate::domain::{HttpPathMatch, PathMatchType};

use super::field::{FieldError, FieldPath};

/// Substrings rejected in literal path values
pub const INVALID_PATH_SEQUENCES: [&str; 6] = ["//", "/./", "/../", "%2f", "%2F", "#"];

/// Suffixes rejected in literal path values
pub const INVALID_PATH_SUFFIXES: [&str; 2] = ["/..", "/."];

/// Validates a single path match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathMatchValidator;

impl PathMatchValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate `path`, located at `fld_path` (`rules[i].matches[j].path`).
    ///
    /// A missing type or value yields a single `Required` error. Otherwise
    /// every failing check on a literal value is reported.
    pub fn validate(&self, path: &HttpPathMatch, fld_path: &FieldPath) -> Vec<FieldError> {
        let type_path = fld_path.child("type");
        let value_path = fld_path.child("value");

        let Some(match_type) = &path.match_type else {
            let error = FieldError::required(&type_path, "path type must be specified");
            return vec![error];
        };
        let Some(value) = &path.value else {
            let error = FieldError::required(&value_path, "path value must be specified");
            return vec![error];
        };

        match match_type {
            PathMatchType::Exact | PathMatchType::PathPrefix => {
                validate_literal_path(match_type, value, &value_path)
            }
            PathMatchType::RegularExpression => vec![],
            PathMatchType::Other(name) => {
                let supported = &PathMatchType::SUPPORTED;
                let error = FieldError::not_supported(&type_path, name.as_str(), supported);
                vec![error]
            }
        }
    }
}

fn validate_literal_path(
    match_type: &PathMatchType,
    value: &str,
    value_path: &FieldPath,
) -> Vec<FieldError> {
    let bad_value = json!({ "type": match_type.as_str(), "value": value });
    let mut errors = Vec::new();

    if !value.starts_with('/') {
        errors.push(FieldError::invalid(
            value_path,
            bad_value.clone(),
            "must be an absolute path",
        ));
    }

    if !value.is_empty() {
        for sequence in INVALID_PATH_SEQUENCES {
            if value.contains(sequence) {
                errors.push(FieldError::invalid(
                    value_path,
                    bad_value.clone(),
                    format!("must not contain '{}'", sequence),
                ));
            }
        }

        for suffix in INVALID_PATH_SUFFIXES {
            if value.ends_with(suffix) {
                errors.push(FieldError::invalid(
                    value_path,
                    bad_value.clone(),
                    format!("cannot end with '{}'", suffix),
                ));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ErrorType;

    fn fld_path() -> FieldPath {
        FieldPath::new("spec")
            .child("rules")
            .index(0)
            .child("matches")
            .index(0)
            .child("path")
    }

    fn validate(path: HttpPathMatch) -> Vec<FieldError> {
        PathMatchValidator::new().validate(&path, &fld_path())
    }

    #[test]
    fn root_prefix_is_valid() {
        assert!(validate(HttpPathMatch::prefix("/")).is_empty());
        assert!(validate(HttpPathMatch::exact("/api/v1/users")).is_empty());
    }

    #[test]
    fn trailing_dot_segment_is_rejected() {
        let errors = validate(HttpPathMatch::prefix("/."));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].detail, "cannot end with '/.'");
        assert_eq!(errors[0].field, "spec.rules[0].matches[0].path.value");
    }

    #[test]
    fn dot_segment_in_exact_path_is_rejected() {
        let errors = validate(HttpPathMatch::exact("/foo/./bar"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].detail, "must not contain '/./'");
        assert_eq!(
            errors[0].bad_value,
            json!({"type": "Exact", "value": "/foo/./bar"})
        );
    }

    #[test]
    fn each_violation_is_reported() {
        // relative, contains "//" and "%2F", ends with "/.."
        let errors = validate(HttpPathMatch::prefix("a//b%2F/.."));
        let details: Vec<_> = errors.iter().map(|e| e.detail.as_str()).collect();
        assert_eq!(
            details,
            vec![
                "must be an absolute path",
                "must not contain '//'",
                "must not contain '%2F'",
                "cannot end with '/..'",
            ]
        );
    }

    #[test]
    fn traversal_segment_and_fragment() {
        let errors = validate(HttpPathMatch::exact("/a/../b#frag"));
        let details: Vec<_> = errors.iter().map(|e| e.detail.as_str()).collect();
        assert_eq!(
            details,
            vec!["must not contain '/../'", "must not contain '#'"]
        );

        assert_eq!(validate(HttpPathMatch::prefix("/api%2fv1")).len(), 1);
    }

    #[test]
    fn empty_value_only_fails_absolute_check() {
        let errors = validate(HttpPathMatch::exact(""));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].detail, "must be an absolute path");
    }

    #[test]
    fn missing_type_is_required() {
        let path = HttpPathMatch {
            match_type: None,
            value: Some("//bad".into()),
        };
        let errors = validate(path);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, ErrorType::Required);
        assert_eq!(errors[0].field, "spec.rules[0].matches[0].path.type");
    }

    #[test]
    fn missing_value_is_required() {
        let path = HttpPathMatch {
            match_type: Some(PathMatchType::Exact),
            value: None,
        };
        let errors = validate(path);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, ErrorType::Required);
        assert_eq!(errors[0].field, "spec.rules[0].matches[0].path.value");

        let errors = validate(HttpPathMatch::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "spec.rules[0].matches[0].path.type");
    }

    #[test]
    fn regular_expression_skips_literal_checks() {
        let path = HttpPathMatch::new(PathMatchType::RegularExpression, "//a/../#");
        assert!(validate(path).is_empty());

        let path = HttpPathMatch::new("RegularExpression", "relative");
        assert!(validate(path).is_empty());
    }

    #[test]
    fn unknown_type_is_not_supported() {
        let errors = validate(HttpPathMatch::new("Glob", "/valid"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error_type, ErrorType::NotSupported);
        assert_eq!(errors[0].field, "spec.rules[0].matches[0].path.type");
        assert_eq!(errors[0].bad_value, "Glob");
        assert_eq!(
            errors[0].detail,
            "supported values: \"Exact\", \"PathPrefix\", \"RegularExpression\""
        );

        // the value is not inspected for unknown types
        assert_eq!(validate(HttpPathMatch::new("Glob", "//../")).len(), 1);
    }
}
