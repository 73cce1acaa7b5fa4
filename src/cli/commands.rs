use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::manifest::{load_manifest, HandlerRegistry, RouteManifest};
use crate::request::{Params, Request};
use crate::router::{Dispatch, FilterKind, Flow, Route, Router};

/// Command-line interface for navrouter
#[derive(Parser)]
#[command(name = "navrouter")]
#[command(about = "Inspect and exercise navrouter route manifests", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List routes and filters in matching order
    Routes {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Dispatch a request through the manifest and report the result
    Resolve {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Request verb (get, post, put, delete, state)
        method: String,

        /// Location, optionally with a query string
        location: String,

        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

/// What a request hit during dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub method: String,
    pub path: String,
    /// Patterns of the before-filters that matched
    pub before: Vec<String>,
    /// Pattern of the matched route
    pub route: Option<String>,
    /// Patterns of the after-filters that matched
    pub after: Vec<String>,
    /// Parameters after dispatch, query and path combined
    pub params: Params,
    pub outcome: Dispatch,
}

/// Bind every handler named in `manifest` to an echo handler
#[must_use]
pub fn echo_registry(manifest: &RouteManifest) -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    for name in manifest.handler_names() {
        let handler_name = name.to_string();
        registry.register(name, move |req: &mut Request| {
            info!(
                handler = %handler_name,
                method = %req.method,
                path = %req.path,
                params = ?req.params,
                "Echo handler"
            );
            Flow::Continue
        });
    }
    registry
}

/// Dispatch `method location` through `router` and describe the result
#[must_use]
pub fn resolve(router: &Router, method: &str, location: &str) -> Resolution {
    let mut req = Request::parse(method, location);
    let patterns = |routes: Vec<&Route>| -> Vec<String> {
        routes.iter().map(|r| r.pattern().to_string()).collect()
    };
    let before = patterns(router.lookup_before_filter(&req.method, &req.path));
    let route = router
        .lookup_route(&req.method, &req.path)
        .map(|r| r.pattern().to_string());
    let after = patterns(router.lookup_after_filter(&req.method, &req.path));
    let outcome = router.dispatch(&mut req);
    Resolution {
        method: req.method,
        path: req.path,
        before,
        route,
        after,
        params: req.params,
        outcome,
    }
}

fn print_routes(router: &Router) {
    println!(
        "[routes] count={} filters={}",
        router.routes().len(),
        router.filters().len()
    );
    for kind in [FilterKind::Before, FilterKind::After] {
        for filter in router.filters().list(kind) {
            println!("[{kind}] {}", filter.pattern());
        }
    }
    for route in router.routes() {
        println!("[route] {route}");
    }
}

fn print_resolution(resolution: &Resolution) {
    println!("{} {}", resolution.method, resolution.path);
    for pattern in &resolution.before {
        println!("  before {pattern}");
    }
    match &resolution.route {
        Some(pattern) => println!("  route  {pattern}"),
        None => println!("  route  <none>"),
    }
    for pattern in &resolution.after {
        println!("  after  {pattern}");
    }
    for (name, value) in resolution.params.iter() {
        println!("  param  {name}={value}");
    }
    println!("  outcome {:?}", resolution.outcome);
}

fn load_router(path: &Path) -> anyhow::Result<Router> {
    let manifest = load_manifest(path)?;
    Router::from_manifest(&manifest, &echo_registry(&manifest))
        .inspect_err(|err| {
            warn!(manifest = %path.display(), error = %err, "Manifest entry rejected");
        })
        .context("manifest does not describe a valid routing table")
}

/// Execute a parsed command line
///
/// # Errors
///
/// Fails when the manifest cannot be loaded or is invalid.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Routes { manifest } => {
            let router = load_router(manifest)?;
            print_routes(&router);
            Ok(())
        }
        Commands::Resolve {
            manifest,
            method,
            location,
            json,
        } => {
            let router = load_router(manifest)?;
            let resolution = resolve(&router, method, location);
            if *json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                print_resolution(&resolution);
            }
            Ok(())
        }
    }
}
