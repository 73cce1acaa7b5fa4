//! # Route Manifests
//!
//! A manifest declares a routing table in YAML or JSON; handlers are bound by
//! name through a [`HandlerRegistry`].
//!
//! ```yaml
//! routes:
//!   - { verb: get,   path: /users/:id,    handler: show_user }
//!   - { verb: state, path: /wizard/:step, handler: wizard_step }
//! before:
//!   - { handler: require_session }
//!   - { path: /admin, handler: require_admin }
//! after:
//!   - { handler: track_page }
//! ```
//!
//! Entries are registered in file order, so the manifest order is the matching
//! order.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::RouterError;
use crate::request::Request;
use crate::router::{
    handler, FilterKind, Handler, IntoFlow, PathPattern, Route, Router, VerbMatcher,
};

/// One route line of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub verb: String,
    pub path: String,
    pub handler: String,
}

/// One filter line of a manifest; a missing `path` means every path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    #[serde(default)]
    pub path: Option<String>,
    pub handler: String,
}

/// A declarative routing table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    #[serde(default)]
    pub before: Vec<FilterEntry>,
    #[serde(default)]
    pub after: Vec<FilterEntry>,
}

impl RouteManifest {
    /// Every handler name referenced by the manifest, deduplicated, in first-use order
    #[must_use]
    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let all = self
            .routes
            .iter()
            .map(|r| r.handler.as_str())
            .chain(self.before.iter().map(|f| f.handler.as_str()))
            .chain(self.after.iter().map(|f| f.handler.as_str()));
        for name in all {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Load a manifest from disk
///
/// Files ending in `.json` are parsed as JSON, anything else as YAML.
///
/// # Errors
///
/// Fails when the file cannot be read or does not deserialize.
pub fn load_manifest(file_path: impl AsRef<Path>) -> anyhow::Result<RouteManifest> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read manifest {}", file_path.display()))?;
    let manifest: RouteManifest = if file_path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON manifest {}", file_path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML manifest {}", file_path.display()))?
    };
    info!(
        manifest = %file_path.display(),
        routes_count = manifest.routes.len(),
        before_count = manifest.before.len(),
        after_count = manifest.after.len(),
        "Route manifest loaded"
    );
    Ok(manifest)
}

/// Handlers addressable by name from a manifest
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under `name`, replacing any previous handler of that name
    pub fn register<F, R>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.handlers.insert(name.into(), handler(f));
    }

    /// # Errors
    ///
    /// Returns [`RouterError::UnknownHandler`] when nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<Handler, RouterError> {
        self.handlers
            .get(name)
            .cloned()
            .ok_or_else(|| RouterError::UnknownHandler {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &names)
            .finish()
    }
}

impl Router {
    /// Build a router from a manifest, resolving handler names in `registry`
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] for an unknown handler name, an invalid verb or
    /// a malformed pattern. Nothing is partially registered on the caller's
    /// side: the router is only returned when every entry succeeded.
    pub fn from_manifest(
        manifest: &RouteManifest,
        registry: &HandlerRegistry,
    ) -> Result<Self, RouterError> {
        let mut router = Router::new();
        for entry in &manifest.routes {
            let route = Route::new(
                VerbMatcher::exact(&entry.verb)?,
                PathPattern::compile(&entry.path)?,
                registry.get(&entry.handler)?,
            );
            router.add_route(route);
        }
        for (kind, entries) in [
            (FilterKind::Before, &manifest.before),
            (FilterKind::After, &manifest.after),
        ] {
            for entry in entries {
                let pattern = match &entry.path {
                    Some(p) => PathPattern::compile(p)?,
                    None => PathPattern::Any,
                };
                router.add_filter(kind, pattern, registry.get(&entry.handler)?);
            }
        }
        Ok(router)
    }
}
