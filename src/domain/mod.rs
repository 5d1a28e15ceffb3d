//! Domain layer
//!
//! Data model of the HTTPRoute resource: routes, rules, matches, filters and
//! backend references. These types are immutable snapshots from the
//! validators' point of view and carry no infrastructure dependencies.
//!
//! ## Module Organization
//!
//! - `route`: route envelope, rules, matches and backend references
//! - `filter`: the closed set of filter kinds and their payloads

pub mod filter;
pub mod route;

pub use filter::{
    FilterKind, HttpHeader, HttpHeaderModifier, HttpRequestMirrorFilter,
    HttpRequestRedirectFilter, HttpRouteFilter, HttpUrlRewriteFilter, LocalObjectReference,
};
pub use route::{
    BackendObjectReference, HttpBackendRef, HttpHeaderMatch, HttpPathMatch, HttpPathModifier,
    HttpQueryParamMatch, HttpRoute, HttpRouteMatch, HttpRouteRule, HttpRouteSpec, ObjectMeta,
    PathMatchType, DEFAULT_API_VERSION, HTTP_ROUTE_KIND,
};
