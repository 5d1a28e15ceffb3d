use serde::{Deserialize, Serialize};
use std::fmt;

use super::route::{BackendObjectReference, HttpPathModifier};

/// Kinds of filters that can be attached to a rule or a backend reference.
///
/// The set is closed: manifests naming any other kind fail to decode, so a
/// new kind has to be added here before it can reach the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterKind {
    /// Add, set or remove request headers
    RequestHeaderModifier,
    /// Add, set or remove response headers
    ResponseHeaderModifier,
    /// Mirror requests to an additional backend
    RequestMirror,
    /// Answer with an HTTP redirect
    RequestRedirect,
    /// Rewrite hostname or path before forwarding
    #[serde(rename = "URLRewrite")]
    UrlRewrite,
    /// Implementation-specific filter referenced by object
    ExtensionRef,
}

impl FilterKind {
    /// Every known filter kind, in declaration order
    pub const ALL: [FilterKind; 6] = [
        FilterKind::RequestHeaderModifier,
        FilterKind::ResponseHeaderModifier,
        FilterKind::RequestMirror,
        FilterKind::RequestRedirect,
        FilterKind::UrlRewrite,
        FilterKind::ExtensionRef,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::RequestHeaderModifier => "RequestHeaderModifier",
            FilterKind::ResponseHeaderModifier => "ResponseHeaderModifier",
            FilterKind::RequestMirror => "RequestMirror",
            FilterKind::RequestRedirect => "RequestRedirect",
            FilterKind::UrlRewrite => "URLRewrite",
            FilterKind::ExtensionRef => "ExtensionRef",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown filter kind: {}", s))
    }
}

/// Header name/value pair used by header modifiers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

/// Payload of the request and response header modifier filters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpHeaderModifier {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add: Vec<HttpHeader>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove: Vec<String>,
}

/// Payload of the request mirror filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestMirrorFilter {
    pub backend_ref: BackendObjectReference,
}

/// Payload of the request redirect filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestRedirectFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// Payload of the URL rewrite filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HttpUrlRewriteFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathModifier>,
}

/// Reference to an object in the same namespace, used by extension filters
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalObjectReference {
    pub group: String,
    pub kind: String,
    pub name: String,
}

/// A filter attached to a rule or a backend reference.
///
/// `kind` selects which payload applies. It may be left unset; such filters
/// are structurally permitted here and rejected by schema validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FilterKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_header_modifier: Option<HttpHeaderModifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_header_modifier: Option<HttpHeaderModifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_mirror: Option<HttpRequestMirrorFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_redirect: Option<HttpRequestRedirectFilter>,

    #[serde(rename = "urlRewrite", default, skip_serializing_if = "Option::is_none")]
    pub url_rewrite: Option<HttpUrlRewriteFilter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension_ref: Option<LocalObjectReference>,
}

impl HttpRouteFilter {
    /// Filter of the given kind with no payload
    pub fn of_kind(kind: FilterKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    /// Request header modifier filter
    pub fn request_header_modifier(modifier: HttpHeaderModifier) -> Self {
        Self {
            request_header_modifier: Some(modifier),
            ..Self::of_kind(FilterKind::RequestHeaderModifier)
        }
    }

    /// Request mirror filter targeting `backend_ref`
    pub fn request_mirror(backend_ref: BackendObjectReference) -> Self {
        Self {
            request_mirror: Some(HttpRequestMirrorFilter { backend_ref }),
            ..Self::of_kind(FilterKind::RequestMirror)
        }
    }

    /// Extension filter pointing at a local object
    pub fn extension_ref(reference: LocalObjectReference) -> Self {
        Self {
            extension_ref: Some(reference),
            ..Self::of_kind(FilterKind::ExtensionRef)
        }
    }
}
