//! Route traversal.
//!
//! [`RouteValidator`] walks the rules of a route in declaration order and
//! runs the filter and path checks on each, collecting every error in one
//! pass.

use tracing::{debug, instrument};

use crate::config::ValidationSettings;
use crate::domain::{HttpRoute, HttpRouteRule, HttpRouteSpec};

use super::field::{FieldErrorList, FieldPath};
use super::filters::FilterUniquenessChecker;
use super::path_match::PathMatchValidator;

/// Composition root for route validation.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValidator {
    filters: FilterUniquenessChecker,
    paths: PathMatchValidator,
}

impl RouteValidator {
    pub fn new(filters: FilterUniquenessChecker) -> Self {
        Self {
            filters,
            paths: PathMatchValidator::new(),
        }
    }

    /// Validator using the repeatable filter kinds from `settings`
    pub fn from_settings(settings: &ValidationSettings) -> Self {
        let repeatable = settings.repeatable_filters.iter().copied();
        Self::new(FilterUniquenessChecker::new(repeatable))
    }

    pub fn filter_checker(&self) -> &FilterUniquenessChecker {
        &self.filters
    }

    /// Validate a whole route. Field paths are rooted at `spec`.
    #[instrument(
        skip_all,
        fields(route = %route.qualified_name(), rules = route.spec.rules.len())
    )]
    pub fn validate_route(&self, route: &HttpRoute) -> FieldErrorList {
        let errors = self.validate_spec(&route.spec, &FieldPath::new("spec"));
        debug!(error_count = errors.len(), "Validated HTTPRoute");
        errors
    }

    /// Validate a route spec located at `path`.
    ///
    /// Errors are ordered by rule; within a rule, rule filters come first,
    /// then each backend's filters, then path matches.
    pub fn validate_spec(&self, spec: &HttpRouteSpec, path: &FieldPath) -> FieldErrorList {
        let rules_path = path.child("rules");
        let mut errors = FieldErrorList::new();

        for (index, rule) in spec.rules.iter().enumerate() {
            self.validate_rule(rule, &rules_path.index(index), &mut errors);
        }

        errors
    }

    fn validate_rule(
        &self,
        rule: &HttpRouteRule,
        rule_path: &FieldPath,
        errors: &mut FieldErrorList,
    ) {
        let path = rule_path.child("filters");
        errors.extend(self.filters.check_rule_filters(&rule.filters, &path));

        let backends_path = rule_path.child("backendRefs");
        for (index, backend) in rule.backend_refs.iter().enumerate() {
            let path = backends_path.index(index).child("filters");
            errors.extend(self.filters.check_backend_filters(&backend.filters, &path));
        }

        // Header and query param names are not required to be unique,
        // including names that only differ by case.
        let matches_path = rule_path.child("matches");
        for (index, route_match) in rule.matches.iter().enumerate() {
            if let Some(path) = &route_match.path {
                let path_field = matches_path.index(index).child("path");
                errors.extend(self.paths.validate(path, &path_field));
            }
        }
    }
}

/// Validate a route with the default validator
pub fn validate_http_route(route: &HttpRoute) -> FieldErrorList {
    RouteValidator::default().validate_route(route)
}

/// Validate a route spec located at `path` with the default validator
pub fn validate_http_route_spec(spec: &HttpRouteSpec, path: &FieldPath) -> FieldErrorList {
    RouteValidator::default().validate_spec(spec, path)
}
