//! HTTPRoute domain types
//!
//! Plain data describing an HTTPRoute resource as it arrives from a manifest
//! or an admission request. The types carry no behaviour beyond builders;
//! all checks live in [`crate::validation`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::filter::HttpRouteFilter;

/// API version written by default on routes built in code
pub const DEFAULT_API_VERSION: &str = "gateway.networking.k8s.io/v1beta1";

/// Resource kind of an HTTPRoute
pub const HTTP_ROUTE_KIND: &str = "HTTPRoute";

/// Path matching strategy declared on a path match.
///
/// Unknown strings are kept verbatim so they can be reported back to the
/// user instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathMatchType {
    /// Exact path match
    Exact,
    /// Element-wise prefix match
    PathPrefix,
    /// Implementation-specific regular expression
    RegularExpression,
    /// Anything else
    Other(String),
}

impl PathMatchType {
    /// The match types this crate knows how to validate
    pub const SUPPORTED: [&'static str; 3] = ["Exact", "PathPrefix", "RegularExpression"];

    pub fn as_str(&self) -> &str {
        match self {
            PathMatchType::Exact => "Exact",
            PathMatchType::PathPrefix => "PathPrefix",
            PathMatchType::RegularExpression => "RegularExpression",
            PathMatchType::Other(value) => value,
        }
    }
}

impl From<&str> for PathMatchType {
    fn from(value: &str) -> Self {
        match value {
            "Exact" => PathMatchType::Exact,
            "PathPrefix" => PathMatchType::PathPrefix,
            "RegularExpression" => PathMatchType::RegularExpression,
            other => PathMatchType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PathMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PathMatchType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PathMatchType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(PathMatchType::from(value.as_str()))
    }
}

/// Path match of a rule. Both fields are optional on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpPathMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<PathMatchType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl HttpPathMatch {
    /// Path match with both type and value set
    pub fn new(match_type: impl Into<PathMatchType>, value: impl Into<String>) -> Self {
        Self {
            match_type: Some(match_type.into()),
            value: Some(value.into()),
        }
    }

    /// Prefix path match
    pub fn prefix(value: impl Into<String>) -> Self {
        Self::new(PathMatchType::PathPrefix, value)
    }

    /// Exact path match
    pub fn exact(value: impl Into<String>) -> Self {
        Self::new(PathMatchType::Exact, value)
    }
}

/// Header match criteria
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpHeaderMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    pub name: String,
    pub value: String,
}

/// Query parameter match criteria. Names are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpQueryParamMatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub match_type: Option<String>,
    pub name: String,
    pub value: String,
}

/// A single match condition; a rule fires when any of its matches does.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathMatch>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HttpHeaderMatch>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query_params: Vec<HttpQueryParamMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl HttpRouteMatch {
    /// Match on a path only
    pub fn path(path: HttpPathMatch) -> Self {
        Self {
            path: Some(path),
            ..Default::default()
        }
    }

    /// Add a header match requirement
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HttpHeaderMatch {
            match_type: None,
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Add a query parameter match requirement
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(HttpQueryParamMatch {
            match_type: None,
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

/// Path modification used by redirect and rewrite filters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPathModifier {
    #[serde(rename = "type")]
    pub modifier_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_full_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_prefix_match: Option<String>,
}

/// Reference to the object traffic is sent to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackendObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl BackendObjectReference {
    /// Reference to a Service (the default group and kind) on `port`
    pub fn service(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port: Some(port),
            ..Default::default()
        }
    }
}

/// Weighted backend with its own filter chain
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpBackendRef {
    #[serde(flatten)]
    pub backend: BackendObjectReference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HttpRouteFilter>,
}

impl HttpBackendRef {
    pub fn new(backend: BackendObjectReference) -> Self {
        Self {
            backend,
            weight: None,
            filters: vec![],
        }
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_filter(mut self, filter: HttpRouteFilter) -> Self {
        self.filters.push(filter);
        self
    }
}

/// One match-to-backend binding of a route
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteRule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<HttpRouteMatch>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<HttpRouteFilter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backend_refs: Vec<HttpBackendRef>,
}

impl HttpRouteRule {
    pub fn with_match(mut self, route_match: HttpRouteMatch) -> Self {
        self.matches.push(route_match);
        self
    }

    pub fn with_filter(mut self, filter: HttpRouteFilter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_backend(mut self, backend: HttpBackendRef) -> Self {
        self.backend_refs.push(backend);
        self
    }
}

/// Desired state of an HTTPRoute
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,

    #[serde(default)]
    pub rules: Vec<HttpRouteRule>,
}

/// Object metadata needed to identify a route in diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// HTTPRoute resource envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRoute {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: HttpRouteSpec,
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_kind() -> String {
    HTTP_ROUTE_KIND.to_string()
}

impl HttpRoute {
    /// Route named `name` with the given rules
    pub fn new(name: impl Into<String>, rules: Vec<HttpRouteRule>) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata: ObjectMeta {
                name: name.into(),
                namespace: None,
            },
            spec: HttpRouteSpec {
                hostnames: vec![],
                rules,
            },
        }
    }

    /// `namespace/name`, or just `name` for routes without a namespace
    pub fn qualified_name(&self) -> String {
        match &self.metadata.namespace {
            Some(namespace) => format!("{}/{}", namespace, self.metadata.name),
            None => self.metadata.name.clone(),
        }
    }
}
