//! # Router Module
//!
//! Route registration, path matching and filter dispatch.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling `/`-delimited path patterns with `:name` placeholders
//! - Matching `(verb, path)` pairs against routes in registration order
//! - Extracting path parameters into the request's parameter bag
//! - Running before/after filters around the matched route
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: At registration, patterns (e.g., `/pets/:id`) are converted
//!    into anchored, case-insensitive regexes plus an ordered list of
//!    placeholder names. Malformed patterns are rejected here.
//!
//! 2. **Matching**: For each request the router scans routes in registration
//!    order and takes the first whose verb and pattern both match. There is no
//!    specificity ranking.
//!
//! ## Dispatch
//!
//! ```text
//! before-filters ──Halt──> Halted
//!       │ Continue (all)
//!       v
//! first matching route (optional)
//!       │
//!       v
//! after-filters ─────────> Done
//! ```
//!
//! Filters match every verb and are scoped by path only. State routes are
//! registered under the reserved `state` verb and are reached through
//! [`Router::trans`], never through real navigation.
//!
//! ## Example
//!
//! ```rust
//! use navrouter::router::Router;
//!
//! # fn main() -> Result<(), navrouter::RouterError> {
//! let mut router = Router::new();
//! router.get("/pets/:id", |_req: &mut navrouter::Request| {})?;
//! router.state("/wizard/:step", |_req: &mut navrouter::Request| {})?;
//!
//! assert!(router.lookup_route("GET", "/PETS/7").is_some());
//! assert!(router.lookup_route("get", "/wizard/2").is_none());
//! assert!(router.lookup_route("state", "/wizard/2").is_some());
//! # Ok(())
//! # }
//! ```

mod core;
mod filters;
mod pattern;
mod route;
mod verb;

pub use core::{Dispatch, RouteFactory, Router};
pub use filters::{FilterKind, FilterRegistry};
pub use pattern::{PathPattern, ANY_PATH};
pub use route::{handler, Flow, Handler, IntoFlow, Route};
pub use verb::{VerbMatcher, DELETE, GET, POST, PUT, STATE};
