//! Router core: registration, lookup and dispatch.

use std::time::Instant;
use tracing::{debug, info};

use super::filters::{FilterKind, FilterRegistry};
use super::pattern::PathPattern;
use super::route::{handler, Flow, Handler, IntoFlow, Route};
use super::verb::{self, VerbMatcher};
use crate::error::RouterError;
use crate::navigation::Navigator;
use crate::request::Request;

/// Result of dispatching one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dispatch {
    /// A before-filter returned [`Flow::Halt`]; no route or after-filter ran
    Halted,
    /// Dispatch ran to completion
    Done {
        /// The matched route's [`Flow`], `None` when no route matched
        route: Option<Flow>,
    },
}

impl Dispatch {
    #[must_use]
    pub fn is_halted(&self) -> bool {
        matches!(self, Dispatch::Halted)
    }

    #[must_use]
    pub fn route_matched(&self) -> bool {
        matches!(self, Dispatch::Done { route: Some(_) })
    }
}

/// A verb bound ahead of time
///
/// Obtained from [`Router::bind_verb`]. The `get`/`post`/`put`/`del`/`state`
/// shortcuts on [`Router`] are each one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFactory {
    verb: VerbMatcher,
}

impl RouteFactory {
    /// Build a route without registering it
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn build<F, R>(&self, pattern: &str, f: F) -> Result<Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Ok(Route::new(
            self.verb.clone(),
            PathPattern::compile(pattern)?,
            handler(f),
        ))
    }

    /// Build a route and append it to `router`
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn register<'r, F, R>(
        &self,
        router: &'r mut Router,
        pattern: &str,
        f: F,
    ) -> Result<&'r Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        let route = self.build(pattern, f)?;
        Ok(router.add_route(route))
    }

    #[must_use]
    pub fn verb(&self) -> &VerbMatcher {
        &self.verb
    }
}

/// Client-side router
///
/// Owns an append-only route list and the before/after filter registry.
/// Registration order is the only tie-break: the first route whose verb and
/// pattern both match wins.
///
/// # Example
///
/// ```rust
/// use navrouter::router::{Flow, Router};
/// use navrouter::Request;
///
/// # fn main() -> Result<(), navrouter::RouterError> {
/// let mut router = Router::new();
/// router.before("/admin", |_req: &mut Request| Flow::Halt)?;
/// router.get("/users/:id", |req: &mut Request| {
///     assert_eq!(req.param("id"), Some("42"));
/// })?;
///
/// let mut req = Request::new("GET", "/users/42");
/// assert!(router.dispatch(&mut req).route_matched());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
    filters: FilterRegistry,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `verb` into a reusable [`RouteFactory`]
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidVerb`] for an empty verb or one containing
    /// whitespace.
    pub fn bind_verb(verb: &str) -> Result<RouteFactory, RouterError> {
        Ok(RouteFactory {
            verb: VerbMatcher::exact(verb)?,
        })
    }

    fn bound(verb: &'static str) -> RouteFactory {
        RouteFactory {
            verb: VerbMatcher::Exact(verb.to_string()),
        }
    }

    /// Register a route for an arbitrary verb
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] for an invalid verb or a malformed pattern.
    pub fn register_route<F, R>(
        &mut self,
        verb: &str,
        pattern: &str,
        f: F,
    ) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Self::bind_verb(verb)?.register(self, pattern, f)
    }

    /// Register a `get` route
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn get<F, R>(&mut self, pattern: &str, f: F) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Self::bound(verb::GET).register(self, pattern, f)
    }

    /// Register a `post` route
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn post<F, R>(&mut self, pattern: &str, f: F) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Self::bound(verb::POST).register(self, pattern, f)
    }

    /// Register a `put` route
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn put<F, R>(&mut self, pattern: &str, f: F) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Self::bound(verb::PUT).register(self, pattern, f)
    }

    /// Register a `delete` route
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn del<F, R>(&mut self, pattern: &str, f: F) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Self::bound(verb::DELETE).register(self, pattern, f)
    }

    /// Register a state route, reachable only through [`Router::trans`]
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn state<F, R>(&mut self, pattern: &str, f: F) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        Self::bound(verb::STATE).register(self, pattern, f)
    }

    /// Append an already built route
    pub fn add_route(&mut self, route: Route) -> &Route {
        info!(
            verb = %route.verb(),
            route_pattern = %route.pattern(),
            routes_count = self.routes.len() + 1,
            "Route registered"
        );
        self.routes.push(route);
        &self.routes[self.routes.len() - 1]
    }

    /// Register a filter
    ///
    /// `pattern == None` registers a filter that runs for every path. Filters
    /// match every verb.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn filter<F, R>(
        &mut self,
        kind: FilterKind,
        pattern: Option<&str>,
        f: F,
    ) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        let pattern = match pattern {
            Some(p) => PathPattern::compile(p)?,
            None => PathPattern::Any,
        };
        Ok(self.add_filter(kind, pattern, handler(f)))
    }

    /// Append a filter with an already compiled pattern
    pub fn add_filter(
        &mut self,
        kind: FilterKind,
        pattern: PathPattern,
        handler: Handler,
    ) -> &Route {
        info!(
            kind = %kind,
            route_pattern = %pattern,
            filters_count = self.filters.len() + 1,
            "Filter registered"
        );
        self.filters
            .add(kind, Route::new(VerbMatcher::Any, pattern, handler))
    }

    /// Register a before-filter scoped to `pattern`
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn before<F, R>(&mut self, pattern: &str, f: F) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.filter(FilterKind::Before, Some(pattern), f)
    }

    /// Register a before-filter for every path
    pub fn before_any<F, R>(&mut self, f: F) -> &Route
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.add_filter(FilterKind::Before, PathPattern::Any, handler(f))
    }

    /// Register an after-filter scoped to `pattern`
    ///
    /// # Errors
    ///
    /// Returns [`RouterError`] when `pattern` is malformed.
    pub fn after<F, R>(&mut self, pattern: &str, f: F) -> Result<&Route, RouterError>
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.filter(FilterKind::After, Some(pattern), f)
    }

    /// Register an after-filter for every path
    pub fn after_any<F, R>(&mut self, f: F) -> &Route
    where
        F: Fn(&mut Request) -> R + Send + Sync + 'static,
        R: IntoFlow,
    {
        self.add_filter(FilterKind::After, PathPattern::Any, handler(f))
    }

    /// Before-filters matching `method` and `path`, in registration order
    #[must_use]
    pub fn lookup_before_filter(&self, method: &str, path: &str) -> Vec<&Route> {
        self.filters.lookup(FilterKind::Before, method, path)
    }

    /// After-filters matching `method` and `path`, in registration order
    #[must_use]
    pub fn lookup_after_filter(&self, method: &str, path: &str) -> Vec<&Route> {
        self.filters.lookup(FilterKind::After, method, path)
    }

    /// First registered route matching `method` and `path`
    #[must_use]
    pub fn lookup_route(&self, method: &str, path: &str) -> Option<&Route> {
        let found = self.routes.iter().find(|r| r.matches(method, path));
        match found {
            Some(route) => debug!(
                method = %method,
                path = %path,
                route_pattern = %route.pattern(),
                "Route matched"
            ),
            None => debug!(method = %method, path = %path, "No route matched"),
        }
        found
    }

    /// Run one request through before-filters, the matched route and after-filters
    ///
    /// A before-filter returning [`Flow::Halt`] stops dispatch immediately. A
    /// request with no matching route still runs its after-filters.
    ///
    /// Matching and parameter extraction both use the path the request arrived
    /// with; filters may rewrite `req.path` without affecting either. Each
    /// matched pattern refreshes the values of its own placeholders, except for
    /// names the caller already set on the request.
    pub fn dispatch(&self, req: &mut Request) -> Dispatch {
        let start = Instant::now();
        let method = req.method.clone();
        let path = req.path.clone();
        let caller = req.params.clone();

        let before = self.lookup_before_filter(&method, &path);
        for (index, filter) in before.into_iter().enumerate() {
            if filter.run_matched(req, &path, &caller) == Flow::Halt {
                debug!(
                    method = %method,
                    path = %path,
                    filter_pattern = %filter.pattern(),
                    filter_index = index,
                    "Dispatch halted by before-filter"
                );
                return Dispatch::Halted;
            }
        }

        let route = self
            .lookup_route(&method, &path)
            .map(|r| r.run_matched(req, &path, &caller));

        for filter in self.lookup_after_filter(&method, &path) {
            filter.run_matched(req, &path, &caller);
        }

        info!(
            method = %method,
            path = %path,
            route_matched = route.is_some(),
            params_count = req.params.len(),
            duration_us = start.elapsed().as_micros(),
            "Request dispatched"
        );
        Dispatch::Done { route }
    }

    /// Location string for a state transition
    ///
    /// `data` pairs are percent-encoded and appended as a query string, joined
    /// with `&` if `path` already carries one. A `#fragment` stays at the end.
    #[must_use]
    pub fn state_location<I, K, V>(path: &str, data: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let (base, fragment) = match path.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (path, None),
        };
        let mut location = base.to_string();
        let mut sep = if base.contains('?') { '&' } else { '?' };
        for (k, v) in data {
            location.push(sep);
            location.push_str(&urlencoding::encode(k.as_ref()));
            location.push('=');
            location.push_str(&urlencoding::encode(v.as_ref()));
            sep = '&';
        }
        if let Some(fragment) = fragment {
            location.push('#');
            location.push_str(fragment);
        }
        location
    }

    /// The synthetic `state` request [`Router::trans_with`] hands to the navigator
    #[must_use]
    pub fn state_request<I, K, V>(path: &str, data: I) -> Request
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Request::parse(verb::STATE, &Self::state_location(path, data))
    }

    /// Transition to the state route at `path` without real navigation
    pub fn trans<N: Navigator + ?Sized>(&self, navigator: &mut N, path: &str) {
        self.trans_with(navigator, path, std::iter::empty::<(&str, &str)>());
    }

    /// [`Router::trans`] carrying `data` as request parameters
    pub fn trans_with<N, I, K, V>(&self, navigator: &mut N, path: &str, data: I)
    where
        N: Navigator + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let req = Self::state_request(path, data);
        debug!(path = %req.path, params_count = req.params.len(), "State transition");
        navigator.assign(req);
    }

    /// Registered routes in registration order
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    #[must_use]
    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }
}
