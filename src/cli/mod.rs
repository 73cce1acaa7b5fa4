//! # CLI Module
//!
//! Command-line inspection of route manifests.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List every route and filter a manifest declares, in matching order:
//!
//! ```bash
//! navrouter routes --manifest demos/routes.yaml
//! ```
//!
//! ### `resolve`
//!
//! Dispatch one request through a manifest and report what it hit:
//!
//! ```bash
//! navrouter resolve --manifest demos/routes.yaml GET '/users/42?tab=posts'
//! navrouter resolve --manifest demos/routes.yaml state /wizard/2 --json
//! ```
//!
//! Handlers named by the manifest are bound to echo handlers that log the
//! request and continue, so `resolve` never halts.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{echo_registry, resolve, run_cli, Cli, Commands, Resolution};
