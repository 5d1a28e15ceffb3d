//! Field-indexed validation errors.
//!
//! [`FieldPath`] locates a field inside a route (`spec.rules[0].filters`),
//! [`FieldError`] records one violation at that location, and
//! [`FieldErrorList`] accumulates them in traversal order.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::errors::{Result, RouteguardError};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Field(String),
    Index(usize),
}

/// Immutable locator of a field inside a nested object.
///
/// `child` and `index` return a new path one segment longer; the receiver is
/// never modified, so a parent path can be handed to any number of nested
/// calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Path rooted at `root`
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![Segment::Field(root.into())],
        }
    }

    /// Path of the named child field
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.extended(Segment::Field(name.into()))
    }

    /// Path of the element at `index` of a list field
    pub fn index(&self, index: usize) -> Self {
        self.extended(Segment::Index(index))
    }

    fn extended(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if position == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{}", name)?,
                Segment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Classification of a field error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorType {
    /// A mandatory field is absent
    Required,
    /// A present value violates a structural rule
    Invalid,
    /// An enum-like value is outside its known set
    NotSupported,
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorType::Required => write!(f, "Required value"),
            ErrorType::Invalid => write!(f, "Invalid value"),
            ErrorType::NotSupported => write!(f, "Unsupported value"),
        }
    }
}

/// A single validation failure: where, what value, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub field: String,
    pub bad_value: Value,
    pub detail: String,
}

impl FieldError {
    /// Mandatory field missing at `path`
    pub fn required(path: &FieldPath, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::Required,
            field: path.to_string(),
            bad_value: Value::Null,
            detail: detail.into(),
        }
    }

    /// Value at `path` breaks a structural rule
    pub fn invalid(path: &FieldPath, value: impl Into<Value>, detail: impl Into<String>) -> Self {
        Self {
            error_type: ErrorType::Invalid,
            field: path.to_string(),
            bad_value: value.into(),
            detail: detail.into(),
        }
    }

    /// Value at `path` is not one of `valid`
    pub fn not_supported(path: &FieldPath, value: impl Into<Value>, valid: &[&str]) -> Self {
        let quoted: Vec<String> = valid.iter().map(|v| format!("\"{}\"", v)).collect();
        Self {
            error_type: ErrorType::NotSupported,
            field: path.to_string(),
            bad_value: value.into(),
            detail: format!("supported values: {}", quoted.join(", ")),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_type {
            ErrorType::Required => {
                write!(f, "{}: {}: {}", self.field, self.error_type, self.detail)
            }
            ErrorType::Invalid | ErrorType::NotSupported => write!(
                f,
                "{}: {}: {}: {}",
                self.field, self.error_type, self.bad_value, self.detail
            ),
        }
    }
}

/// Ordered collection of field errors produced by one validation pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrorList(Vec<FieldError>);

impl FieldErrorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    /// `Ok(())` when empty, otherwise a rejection naming `route`
    pub fn into_result(self, route: impl Into<String>) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(RouteguardError::rejected(route, self))
        }
    }
}

impl fmt::Display for FieldErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, error) in self.0.iter().enumerate() {
            if position > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl From<Vec<FieldError>> for FieldErrorList {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl FromIterator<FieldError> for FieldErrorList {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<FieldError> for FieldErrorList {
    fn extend<I: IntoIterator<Item = FieldError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for FieldErrorList {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldErrorList {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
