//! # Manifest Loading
//!
//! Decodes HTTPRoute documents from YAML or JSON. YAML input may hold several
//! documents separated by `---`; JSON input may be a single object or an
//! array of objects.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::domain::HttpRoute;
use crate::errors::{ErrorContext, Result};

/// Encoding of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// `.json` files are JSON, everything else is treated as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ManifestFormat::Json,
            _ => ManifestFormat::Yaml,
        }
    }
}

/// Decode every route in `content`
pub fn parse_routes(content: &str, format: ManifestFormat) -> Result<Vec<HttpRoute>> {
    match format {
        ManifestFormat::Json => {
            let value: serde_json::Value = serde_json::from_str(content)?;
            if value.is_array() {
                Ok(serde_json::from_value(value)?)
            } else {
                Ok(vec![serde_json::from_value(value)?])
            }
        }
        ManifestFormat::Yaml => {
            let mut routes = Vec::new();
            for document in serde_yaml::Deserializer::from_str(content) {
                let value = serde_yaml::Value::deserialize(document)?;
                if value.is_null() {
                    continue;
                }
                routes.push(serde_yaml::from_value(value)?);
            }
            Ok(routes)
        }
    }
}

/// Read and decode the routes stored at `path`
pub fn load_routes(path: &Path) -> Result<Vec<HttpRoute>> {
    let format = ManifestFormat::from_path(path);
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;

    let routes = parse_routes(&content, format)
        .with_context(|| format!("Failed to decode manifest {}", path.display()))?;
    debug!(path = %path.display(), routes = routes.len(), format = ?format, "Loaded manifest");
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterKind, PathMatchType};
    use crate::errors::RouteguardError;

    const MULTI_DOC: &str = r#"
apiVersion: gateway.networking.k8s.io/v1beta1
kind: HTTPRoute
metadata:
  name: web
  namespace: prod
spec:
  rules:
  - matches:
    - path:
        type: PathPrefix
        value: /
    filters:
    - type: RequestMirror
      requestMirror:
        backendRef:
          name: shadow
          port: 8080
    backendRefs:
    - name: web
      port: 8080
      weight: 100
---
---
apiVersion: gateway.networking.k8s.io/v1beta1
kind: HTTPRoute
metadata:
  name: api
spec:
  rules:
  - matches:
    - path:
        type: Exact
        value: /v1
"#;

    #[test]
    fn test_format_detection() {
        let format = |name: &str| ManifestFormat::from_path(Path::new(name));
        assert_eq!(format("a.json"), ManifestFormat::Json);
        assert_eq!(format("a.JSON"), ManifestFormat::Json);
        assert_eq!(format("a.yaml"), ManifestFormat::Yaml);
        assert_eq!(format("routes"), ManifestFormat::Yaml);
    }

    #[test]
    fn test_yaml_multi_document() {
        let routes = parse_routes(MULTI_DOC, ManifestFormat::Yaml).unwrap();
        assert_eq!(routes.len(), 2);

        let web = &routes[0];
        assert_eq!(web.qualified_name(), "prod/web");
        let rule = &web.spec.rules[0];
        assert_eq!(rule.filters[0].kind, Some(FilterKind::RequestMirror));
        assert_eq!(rule.backend_refs[0].weight, Some(100));
        let path = rule.matches[0].path.as_ref().unwrap();
        assert_eq!(path.match_type, Some(PathMatchType::PathPrefix));

        assert_eq!(routes[1].qualified_name(), "api");
    }

    #[test]
    fn test_json_object_and_array() {
        let one = r#"{"metadata": {"name": "one"}, "spec": {"rules": []}}"#;
        let routes = parse_routes(one, ManifestFormat::Json).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].metadata.name, "one");

        let many = r#"[{"metadata": {"name": "a"}}, {"metadata": {"name": "b"}}]"#;
        let routes = parse_routes(many, ManifestFormat::Json).unwrap();
        let names: Vec<_> = routes.iter().map(|r| r.metadata.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_empty_yaml_has_no_routes() {
        assert!(parse_routes("", ManifestFormat::Yaml).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_filter_kind_fails_decoding() {
        let doc = "metadata:\n  name: x\nspec:\n  rules:\n  - filters:\n    - type: Teleport\n";
        let error = parse_routes(doc, ManifestFormat::Yaml).unwrap_err();
        assert!(matches!(error, RouteguardError::Yaml { .. }));
    }

    #[test]
    fn test_json_decode_error_keeps_cause() {
        let doc = r#"[{
            "metadata": {"name": "a"},
            "spec": {"rules": [{"filters": [{"type": "Teleport"}]}]}
        }]"#;
        let error = parse_routes(doc, ManifestFormat::Json).unwrap_err();
        assert!(matches!(error, RouteguardError::Serialization { .. }));

        let source = std::error::Error::source(&error).unwrap().to_string();
        assert!(source.contains("unknown variant `Teleport`"), "{}", source);
    }
}
