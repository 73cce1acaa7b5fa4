use std::fmt;
use std::sync::Arc;

use super::pattern::PathPattern;
use super::verb::VerbMatcher;
use crate::request::{Params, Request};

/// What a handler tells the dispatcher to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Keep going: run the next filter, the route, then the after-filters
    Continue,
    /// Stop dispatch. Only meaningful from a before-filter, where it skips the
    /// remaining before-filters, the route and every after-filter.
    Halt,
}

/// Conversion from handler return values into [`Flow`]
///
/// Lets plain closures returning `()` or `bool` be registered directly:
/// `()` and `true` continue, `false` halts.
pub trait IntoFlow {
    fn into_flow(self) -> Flow;
}

impl IntoFlow for Flow {
    fn into_flow(self) -> Flow {
        self
    }
}

impl IntoFlow for () {
    fn into_flow(self) -> Flow {
        Flow::Continue
    }
}

impl IntoFlow for bool {
    fn into_flow(self) -> Flow {
        if self {
            Flow::Continue
        } else {
            Flow::Halt
        }
    }
}

/// Type-erased route or filter handler
pub type Handler = Arc<dyn Fn(&mut Request) -> Flow + Send + Sync>;

/// Erase a closure into a [`Handler`]
#[must_use]
pub fn handler<F, R>(f: F) -> Handler
where
    F: Fn(&mut Request) -> R + Send + Sync + 'static,
    R: IntoFlow,
{
    Arc::new(move |req: &mut Request| f(req).into_flow())
}

/// A registered (verb, pattern, handler) binding
///
/// Immutable once built. Filters are routes whose verb is [`VerbMatcher::Any`].
#[derive(Clone)]
pub struct Route {
    verb: VerbMatcher,
    pattern: PathPattern,
    handler: Handler,
}

impl Route {
    #[must_use]
    pub fn new(verb: VerbMatcher, pattern: PathPattern, handler: Handler) -> Self {
        Self {
            verb,
            pattern,
            handler,
        }
    }

    /// True when the verb accepts `method` and the pattern accepts `path`
    #[inline]
    #[must_use]
    pub fn matches(&self, method: &str, path: &str) -> bool {
        self.verb.matches(method) && self.pattern.is_match(path)
    }

    /// Add path parameters to `req.params` and invoke the handler
    ///
    /// Parameters already present on the request are left untouched. The
    /// handler's [`Flow`] is returned as is.
    pub fn run(&self, req: &mut Request) -> Flow {
        if let Some(extracted) = self.pattern.extract(&req.path) {
            req.params.merge_missing(extracted);
        }
        (self.handler)(req)
    }

    /// [`Route::run`] as driven by the dispatcher
    ///
    /// Parameters are extracted from `path`, the path the route was looked up
    /// with, so a filter rewriting `req.path` cannot desync them. Values added
    /// by earlier filters are replaced; names present in `caller` are not.
    pub(crate) fn run_matched(&self, req: &mut Request, path: &str, caller: &Params) -> Flow {
        if let Some(extracted) = self.pattern.extract(path) {
            req.params.merge_unprotected(extracted, caller);
        }
        (self.handler)(req)
    }

    #[must_use]
    pub fn verb(&self) -> &VerbMatcher {
        &self.verb
    }

    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("verb", &self.verb)
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.pattern)
    }
}
