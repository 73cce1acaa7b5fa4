//! # navrouter
//!
//! **navrouter** is a client-side request router: applications register handlers
//! keyed by a verb and a URL path pattern, match navigation, form and state
//! events against them, and run before/after filters around the matched
//! handler.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`router`]** - Pattern compilation, route/filter registration, lookup and dispatch
//! - **[`request`]** - The request value and its parameter bag
//! - **[`navigation`]** - The [`navigation::Navigator`] seam and an in-memory navigation layer
//! - **[`manifest`]** - Declarative routing tables loaded from YAML or JSON
//! - **[`logging`]** - `tracing-subscriber` setup from environment variables
//! - **[`cli`]** - The `navrouter` command-line tool
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Nav as Navigation layer
//!     participant Router as Router
//!     participant Before as Before-filters
//!     participant Route as Matched route
//!     participant After as After-filters
//!
//!     Nav->>Router: dispatch(request)
//!     Router->>Before: run in registration order
//!     alt a filter returns Halt
//!         Before-->>Nav: Dispatch::Halted
//!     end
//!     Router->>Route: first (verb, pattern) match
//!     Route->>Route: merge path params, run handler
//!     Router->>After: run in registration order
//!     Router-->>Nav: Dispatch::Done
//! ```
//!
//! ### State transitions
//!
//! Routes registered with [`router::Router::state`] live under the reserved
//! `state` verb. Real navigation never produces that verb; the only way to reach
//! them is [`router::Router::trans`], which builds a synthetic request and hands
//! it to the navigation layer as if the user had navigated.
//!
//! ## Quick Start
//!
//! ```rust
//! use navrouter::navigation::Navigation;
//! use navrouter::router::{Flow, Router};
//! use navrouter::Request;
//!
//! # fn main() -> Result<(), navrouter::RouterError> {
//! let mut router = Router::new();
//! router.before("/admin", |req: &mut Request| req.param("token").is_some())?;
//! router.get("/users/:id", |_req: &mut Request| Flow::Continue)?;
//! router.state("/wizard/:step", |_req: &mut Request| {})?;
//!
//! let mut nav = Navigation::new(router);
//! nav.navigate(&http::Method::GET, "/users/7?tab=posts");
//! assert_eq!(nav.current().and_then(|r| r.param("id")), Some("7"));
//!
//! nav.trans_with("/wizard/2", [("from", "users")]);
//! let current = nav.current().unwrap();
//! assert_eq!(current.method, "state");
//! assert_eq!(current.param("step"), Some("2"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! All modules log through `tracing`. Binaries call
//! [`logging::init_logging`] once at startup.

pub mod cli;
mod error;
pub mod logging;
pub mod manifest;
pub mod navigation;
pub mod request;
pub mod router;

pub use error::RouterError;
pub use manifest::{load_manifest, HandlerRegistry, RouteManifest};
pub use navigation::{Navigation, Navigator};
pub use request::{Params, Request};
pub use router::{Dispatch, Flow, Route, Router};
