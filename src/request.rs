//! Request values flowing through the router.
//!
//! A [`Request`] is produced by the navigation layer (a link click, a form
//! submit, or a state transition) and handed to [`crate::router::Router::dispatch`].
//! The router only reads `method` and `path`; matching routes add their path
//! parameters to `params`.

use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

/// Maximum number of parameters stored inline before spilling to the heap.
/// Navigation URLs rarely carry more than a handful of path and query values.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Ordered `(name, value)` storage shared by pattern extraction and [`Params`].
///
/// Names are `Arc<str>` so values extracted from a compiled pattern reuse the
/// pattern's interned names.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Insertion-ordered string parameter bag attached to a [`Request`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(ParamVec);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self(ParamVec::new())
    }

    /// Get a parameter by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(k, _)| k.as_ref() == name)
    }

    /// Set a parameter, replacing any existing value
    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    /// Set a parameter only if it is not present yet
    ///
    /// Returns `true` when the value was added.
    pub fn insert_if_absent(
        &mut self,
        name: impl Into<Arc<str>>,
        value: impl Into<String>,
    ) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push((name, value.into()));
        true
    }

    /// Add every pair from `extracted` that is not already present
    pub fn merge_missing(&mut self, extracted: ParamVec) {
        for (name, value) in extracted {
            self.insert_if_absent(name, value);
        }
    }

    /// Add `extracted`, replacing earlier values unless `protected` holds the name
    ///
    /// Used during dispatch: every matched pattern refreshes its own values,
    /// but names the caller put on the request are never touched.
    pub fn merge_unprotected(&mut self, extracted: ParamVec, protected: &Params) {
        for (name, value) in extracted {
            if !protected.contains(&name) {
                self.insert(name, value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (&**k, v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy into a `HashMap`
    /// Note: This allocates - prefer [`Params::get`] when reading a few values
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

impl<K: Into<Arc<str>>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(&**k, v)?;
        }
        map.end()
    }
}

/// A navigation event to be dispatched
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Request {
    /// Verb as produced by the navigation layer (`get`, `post`, `state`, ...)
    pub method: String,
    /// Path without query string or fragment
    pub path: String,
    /// Query parameters plus path parameters added during dispatch
    pub params: Params,
}

impl Request {
    /// Create a request with an empty parameter bag
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            params: Params::new(),
        }
    }

    /// Build a request from a location such as `/search?q=rust#top`
    ///
    /// The fragment is dropped, the query string is URL-decoded into `params`
    /// and the remainder becomes `path`.
    #[must_use]
    pub fn parse(method: impl Into<String>, location: &str) -> Self {
        let location = location.split_once('#').map_or(location, |(l, _)| l);
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, query),
            None => (location, ""),
        };
        let params = url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self {
            method: method.into(),
            path: path.to_string(),
            params,
        }
    }

    /// [`Request::parse`] for a real HTTP verb
    #[must_use]
    pub fn from_http(method: &http::Method, location: &str) -> Self {
        Self::parse(method.as_str().to_ascii_lowercase(), location)
    }

    /// Builder-style parameter insertion
    #[must_use]
    pub fn with_param(mut self, name: impl Into<Arc<str>>, value: impl Into<String>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Shorthand for `self.params.get(name)`
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}
