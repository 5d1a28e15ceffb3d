//! Property tests for filter uniqueness and path checks.

use proptest::prelude::*;
use routeguard::domain::{
    FilterKind, HttpBackendRef, HttpPathMatch, HttpRoute, HttpRouteFilter, HttpRouteRule,
    PathMatchType,
};
use routeguard::validation::{
    validate_http_route, FieldPath, FilterUniquenessChecker, PathMatchValidator,
};

fn non_repeatable_kind() -> impl Strategy<Value = FilterKind> {
    let kinds: Vec<FilterKind> = FilterKind::ALL
        .iter()
        .copied()
        .filter(|kind| *kind != FilterKind::ExtensionRef)
        .collect();
    prop::sample::select(kinds)
}

fn filters(kind: FilterKind, count: usize) -> Vec<HttpRouteFilter> {
    (0..count).map(|_| HttpRouteFilter::of_kind(kind)).collect()
}

fn rule_path() -> FieldPath {
    FieldPath::new("spec").child("rules").index(0).child("filters")
}

proptest! {
    #[test]
    fn repeated_kind_yields_exactly_one_error(
        kind in non_repeatable_kind(),
        count in 2usize..16,
    ) {
        let chain = filters(kind, count);
        let checker = FilterUniquenessChecker::default();
        let errors = checker.check_rule_filters(&chain, &rule_path());
        prop_assert_eq!(errors.len(), 1);
        prop_assert_eq!(&errors[0].bad_value, kind.as_str());
    }

    #[test]
    fn distinct_kinds_yield_no_errors(
        kinds in prop::sample::subsequence(FilterKind::ALL.to_vec(), 0..=6),
    ) {
        let chain: Vec<HttpRouteFilter> = kinds.into_iter().map(HttpRouteFilter::of_kind).collect();
        let checker = FilterUniquenessChecker::default();
        let errors = checker.check_rule_filters(&chain, &rule_path());
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn repeatable_kinds_never_error(count in 0usize..32) {
        let chain = filters(FilterKind::ExtensionRef, count);
        let checker = FilterUniquenessChecker::default();
        let errors = checker.check_rule_filters(&chain, &rule_path());
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn backend_duplicates_stay_with_their_backend(
        kind in non_repeatable_kind(),
        dup_count in 2usize..6,
        backends in 2usize..6,
        target in 0usize..6,
    ) {
        let target = target % backends;
        let mut rule = HttpRouteRule::default();
        for index in 0..backends {
            let count = if index == target { dup_count } else { 1 };
            let backend = HttpBackendRef {
                filters: filters(kind, count),
                ..Default::default()
            };
            rule = rule.with_backend(backend);
        }

        let errors = validate_http_route(&HttpRoute::new("prop", vec![rule]));
        prop_assert_eq!(errors.len(), 1);
        let expected = format!("spec.rules[0].backendRefs[{}].filters", target);
        prop_assert_eq!(errors.as_slice()[0].field.as_str(), expected.as_str());
    }

    #[test]
    fn regular_expressions_are_never_checked(value in ".*") {
        let path = HttpPathMatch::new(PathMatchType::RegularExpression, value);
        let field = FieldPath::new("path");
        let errors = PathMatchValidator::new().validate(&path, &field);
        prop_assert!(errors.is_empty());
    }

    #[test]
    fn clean_absolute_paths_pass(segments in prop::collection::vec("[a-z0-9_-]{1,8}", 0..6)) {
        let value = format!("/{}", segments.join("/"));
        let field = FieldPath::new("path");
        for path in [HttpPathMatch::exact(value.clone()), HttpPathMatch::prefix(value)] {
            prop_assert!(PathMatchValidator::new().validate(&path, &field).is_empty());
        }
    }
}
