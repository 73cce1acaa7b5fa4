//! Verb constants and the matcher routes use to accept a request verb.

use std::fmt;

use crate::error::RouterError;

/// Verb used by link navigation
pub const GET: &str = "get";
/// Verb used by form submission
pub const POST: &str = "post";
/// Verb bound by [`crate::router::Router::put`]
pub const PUT: &str = "put";
/// Verb bound by [`crate::router::Router::del`]
pub const DELETE: &str = "delete";
/// Reserved pseudo-verb. Never produced by real navigation, only by
/// [`crate::router::Router::trans`].
pub const STATE: &str = "state";

/// Decides which request verbs a route accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerbMatcher {
    /// A single verb, stored lowercase and compared case-insensitively
    Exact(String),
    /// Every verb. Filters are always registered with this.
    Any,
}

impl VerbMatcher {
    /// Build an exact matcher
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidVerb`] for an empty verb or one containing
    /// whitespace.
    pub fn exact(verb: &str) -> Result<Self, RouterError> {
        if verb.is_empty() || verb.chars().any(char::is_whitespace) {
            return Err(RouterError::InvalidVerb {
                verb: verb.to_string(),
            });
        }
        Ok(VerbMatcher::Exact(verb.to_ascii_lowercase()))
    }

    #[inline]
    #[must_use]
    pub fn matches(&self, method: &str) -> bool {
        match self {
            VerbMatcher::Exact(verb) => verb.eq_ignore_ascii_case(method),
            VerbMatcher::Any => true,
        }
    }
}

impl From<&http::Method> for VerbMatcher {
    fn from(method: &http::Method) -> Self {
        VerbMatcher::Exact(method.as_str().to_ascii_lowercase())
    }
}

impl fmt::Display for VerbMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerbMatcher::Exact(verb) => f.write_str(verb),
            VerbMatcher::Any => f.write_str("*"),
        }
    }
}
