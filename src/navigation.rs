//! # Navigation Module
//!
//! The router consumes a navigation layer: something that turns link clicks,
//! form submits and state transitions into [`Request`] values and dispatches
//! them. [`Navigator`] is the seam; [`Navigation`] is an in-memory
//! implementation that owns a [`Router`] and dispatches synchronously.
//!
//! Browser bindings (history observation, click/submit interception) live
//! outside this crate and implement [`Navigator`] themselves.

use tracing::debug;

use crate::request::Request;
use crate::router::{Dispatch, Router};

/// Entry point of a navigation layer
pub trait Navigator {
    /// Inject a request into the dispatch pipeline as if the user navigated
    fn assign(&mut self, req: Request);
}

type ChangeListener = Box<dyn FnMut(&Request, Dispatch) + Send>;

/// In-memory navigation layer driving a [`Router`]
///
/// Every assigned request is dispatched immediately, then recorded as the
/// current location and reported to `on_change` listeners. Past locations are
/// not kept.
pub struct Navigation {
    router: Router,
    current: Option<Request>,
    listeners: Vec<ChangeListener>,
}

impl Navigation {
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self {
            router,
            current: None,
            listeners: Vec::new(),
        }
    }

    /// Observe every dispatched request
    pub fn on_change<F>(&mut self, listener: F)
    where
        F: FnMut(&Request, Dispatch) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Navigate to `location` with a real verb (link click, form submit)
    pub fn navigate(&mut self, method: &http::Method, location: &str) {
        self.assign(Request::from_http(method, location));
    }

    /// Transition to the state route at `path`
    pub fn trans(&mut self, path: &str) {
        self.trans_with(path, std::iter::empty::<(&str, &str)>());
    }

    /// Transition to the state route at `path`, carrying `data` as parameters
    pub fn trans_with<I, K, V>(&mut self, path: &str, data: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.assign(Router::state_request(path, data));
    }

    /// Last dispatched request, with the parameters added during dispatch
    #[must_use]
    pub fn current(&self) -> Option<&Request> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Mutable access for registering routes after construction
    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }
}

impl Navigator for Navigation {
    fn assign(&mut self, mut req: Request) {
        let outcome = self.router.dispatch(&mut req);
        debug!(
            method = %req.method,
            path = %req.path,
            halted = outcome.is_halted(),
            listeners = self.listeners.len(),
            "Location changed"
        );
        for listener in &mut self.listeners {
            listener(&req, outcome);
        }
        self.current = Some(req);
    }
}

impl std::fmt::Debug for Navigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigation")
            .field("router", &self.router)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
