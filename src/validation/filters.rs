//! Filter uniqueness rules.
//!
//! A filter kind may appear at most once in a rule's filter chain, and at
//! most once in each backend reference's filter chain, unless the kind is
//! configured as repeatable.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{FilterKind, HttpRouteFilter};

use super::field::{FieldError, FieldPath};

/// Filter kinds allowed to repeat when nothing else is configured
pub const DEFAULT_REPEATABLE_FILTERS: [FilterKind; 1] = [FilterKind::ExtensionRef];

/// Which chain a filter list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterScope {
    Rule,
    Backend,
}

impl FilterScope {
    fn detail(self) -> &'static str {
        match self {
            FilterScope::Rule => "cannot be used multiple times in the same rule",
            FilterScope::Backend => "cannot be used multiple times in the same backend",
        }
    }
}

/// Rejects repeated non-repeatable filter kinds in a single filter chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterUniquenessChecker {
    repeatable: BTreeSet<FilterKind>,
}

impl Default for FilterUniquenessChecker {
    fn default() -> Self {
        Self::new(DEFAULT_REPEATABLE_FILTERS)
    }
}

impl FilterUniquenessChecker {
    /// Checker that lets the given kinds repeat freely
    pub fn new(repeatable: impl IntoIterator<Item = FilterKind>) -> Self {
        Self {
            repeatable: repeatable.into_iter().collect(),
        }
    }

    pub fn is_repeatable(&self, kind: FilterKind) -> bool {
        self.repeatable.contains(&kind)
    }

    /// Repeatable kinds, in kind order
    pub fn repeatable_kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.repeatable.iter().copied()
    }

    /// Check the filter chain of a rule; `path` points at `rules[i].filters`
    pub fn check_rule_filters(
        &self,
        filters: &[HttpRouteFilter],
        path: &FieldPath,
    ) -> Vec<FieldError> {
        self.check(filters, path, FilterScope::Rule)
    }

    /// Check the filter chain of one backend; `path` points at
    /// `rules[i].backendRefs[j].filters`
    pub fn check_backend_filters(
        &self,
        filters: &[HttpRouteFilter],
        path: &FieldPath,
    ) -> Vec<FieldError> {
        self.check(filters, path, FilterScope::Backend)
    }

    fn check(
        &self,
        filters: &[HttpRouteFilter],
        path: &FieldPath,
        scope: FilterScope,
    ) -> Vec<FieldError> {
        self.duplicated_kinds(filters)
            .into_iter()
            .map(|kind| FieldError::invalid(path, kind.as_str(), scope.detail()))
            .collect()
    }

    /// Non-repeatable kinds seen more than once, sorted by name.
    /// Filters without a kind are left to schema validation.
    fn duplicated_kinds(&self, filters: &[HttpRouteFilter]) -> Vec<FilterKind> {
        let mut counts: HashMap<FilterKind, usize> = HashMap::new();
        for kind in filters.iter().filter_map(|filter| filter.kind) {
            *counts.entry(kind).or_default() += 1;
        }
        for kind in &self.repeatable {
            counts.remove(kind);
        }

        let mut duplicated: Vec<FilterKind> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(kind, _)| kind)
            .collect();
        duplicated.sort_by_key(|kind| kind.as_str());
        duplicated
    }
}
