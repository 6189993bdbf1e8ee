//! # Route Manifest
//!
//! Data-driven route registration from YAML:
//!
//! ```yaml
//! routes:
//!   - methods: [GET, POST]
//!     path: /item/<id>
//!     handler: show_item
//!     constraints:
//!       id: '\d+'
//!   - path: /greet/<name?>        # methods default to [GET]
//!     handler: greet
//! not_found: missing_page
//! ```
//!
//! Routes are registered in file order, which is also their matching
//! priority. Constraints go through the same registry as code-declared ones,
//! but a bad constraint in a file is reported as an error instead of a panic.

use anyhow::{Context, Result};
use http::Method;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::dispatcher::{Dispatcher, Handler, NotFoundHandler};

/// One route declaration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteEntry {
    /// Methods to register under
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
    /// Route pattern
    pub path: String,
    /// Handler name, resolved by the caller
    pub handler: String,
    /// Parameter name → regex body
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,
}

fn default_methods() -> Vec<String> {
    vec![Method::GET.to_string()]
}

impl RouteEntry {
    /// Parse the declared method tokens
    ///
    /// # Errors
    ///
    /// Fails on a token that is not a valid HTTP method.
    pub fn parsed_methods(&self) -> Result<Vec<Method>> {
        self.methods
            .iter()
            .map(|m| {
                Method::from_bytes(m.as_bytes())
                    .with_context(|| format!("invalid method '{m}' for route '{}'", self.path))
            })
            .collect()
    }
}

/// Parsed route manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteManifest {
    /// Route declarations in priority order
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    /// Name of the not-found handler, if any
    #[serde(default)]
    pub not_found: Option<String>,
}

impl RouteManifest {
    /// Parse manifest YAML
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or unknown fields.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("failed to parse route manifest")
    }

    /// Build a dispatcher from the declared routes.
    ///
    /// `handler_for` maps each route's handler name to a handler;
    /// `not_found_for` maps the `not_found` name, when present.
    ///
    /// # Errors
    ///
    /// Fails on an invalid method, a constraint naming a parameter the route
    /// does not have, or a constraint that does not compile.
    pub fn build_dispatcher<F, G>(&self, mut handler_for: F, not_found_for: G) -> Result<Dispatcher>
    where
        F: FnMut(&str) -> Handler,
        G: FnOnce(&str) -> NotFoundHandler,
    {
        let mut dispatcher = Dispatcher::new();

        for entry in &self.routes {
            let methods = entry.parsed_methods()?;
            let mut registry =
                dispatcher.register_boxed(methods, &entry.path, handler_for(&entry.handler));
            for (name, pattern) in &entry.constraints {
                registry = registry
                    .try_constrain(name, pattern)
                    .with_context(|| format!("bad constraint on route '{}'", entry.path))?;
            }
        }

        if let Some(name) = &self.not_found {
            dispatcher.not_found_boxed(not_found_for(name));
        }

        info!(
            routes = self.routes.len(),
            not_found = ?self.not_found,
            "Route manifest loaded"
        );

        Ok(dispatcher)
    }
}

/// Read and parse a manifest file
///
/// # Errors
///
/// Fails if the file cannot be read or parsed.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<RouteManifest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route manifest {}", path.display()))?;
    RouteManifest::from_yaml_str(&content)
        .with_context(|| format!("in route manifest {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let manifest = RouteManifest::from_yaml_str(
            r#"
routes:
  - path: /a
    handler: a
"#,
        )
        .unwrap();
        assert_eq!(manifest.routes[0].methods, vec!["GET".to_string()]);
        assert!(manifest.routes[0].constraints.is_empty());
        assert!(manifest.not_found.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RouteManifest::from_yaml_str(
            r#"
routes:
  - path: /a
    handler: a
    priority: 3
"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("priority"));
    }

    #[test]
    fn test_invalid_method_rejected() {
        let entry = RouteEntry {
            methods: vec!["GE T".to_string()],
            path: "/a".to_string(),
            handler: "a".to_string(),
            constraints: BTreeMap::new(),
        };
        let err = entry.parsed_methods().unwrap_err();
        assert!(err.to_string().contains("invalid method 'GE T'"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = RouteManifest::from_yaml_str("{}").unwrap();
        assert!(manifest.routes.is_empty());
    }
}
