//! Unit tests for CLI commands

use crate::cli::{echo_registry, resolve, run_cli, Cli, Commands};
use crate::manifest::RouteManifest;
use crate::router::{Dispatch, Flow, Router};
use clap::Parser;
use std::io::Write;

fn demo_manifest() -> RouteManifest {
    serde_yaml::from_str(
        r#"
routes:
  - { verb: get, path: /users/:id, handler: show_user }
  - { verb: state, path: /wizard/:step, handler: wizard_step }
before:
  - { handler: require_session }
  - { path: /admin, handler: require_admin }
after:
  - { handler: track_page }
"#,
    )
    .unwrap()
}

#[test]
fn test_resolve_command_parses() {
    let cli = Cli::try_parse_from([
        "navrouter",
        "resolve",
        "--manifest",
        "routes.yaml",
        "GET",
        "/users/1",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Resolve {
            manifest,
            method,
            location,
            json,
        } => {
            assert_eq!(manifest.to_string_lossy(), "routes.yaml");
            assert_eq!(method, "GET");
            assert_eq!(location, "/users/1");
            assert!(json);
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn test_routes_command_requires_manifest() {
    assert!(Cli::try_parse_from(["navrouter", "routes"]).is_err());
}

#[test]
fn test_echo_registry_covers_every_handler() {
    let manifest = demo_manifest();
    let registry = echo_registry(&manifest);
    assert_eq!(registry.len(), 5);
    assert!(registry.contains("track_page"));
}

#[test]
fn test_resolve_reports_filters_route_and_params() {
    let manifest = demo_manifest();
    let router = Router::from_manifest(&manifest, &echo_registry(&manifest)).unwrap();

    let resolution = resolve(&router, "GET", "/users/42?tab=posts");
    assert_eq!(resolution.path, "/users/42");
    assert_eq!(resolution.before, vec!["*"]);
    assert_eq!(resolution.route.as_deref(), Some("/users/:id"));
    assert_eq!(resolution.after, vec!["*"]);
    assert_eq!(resolution.params.get("id"), Some("42"));
    assert_eq!(resolution.params.get("tab"), Some("posts"));
    assert_eq!(
        resolution.outcome,
        Dispatch::Done {
            route: Some(Flow::Continue)
        }
    );
}

#[test]
fn test_resolve_unmatched_path() {
    let manifest = demo_manifest();
    let router = Router::from_manifest(&manifest, &echo_registry(&manifest)).unwrap();

    let resolution = resolve(&router, "get", "/wizard/2");
    assert!(resolution.route.is_none());
    assert_eq!(resolution.outcome, Dispatch::Done { route: None });
}

#[test]
fn test_routes_command_rejects_bad_manifest() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(b"routes:\n  - { verb: get, path: \"/users/:\", handler: show_user }\n")
        .unwrap();

    let err = run_cli(Cli {
        command: Commands::Routes {
            manifest: file.path().to_path_buf(),
        },
    })
    .unwrap_err();
    assert!(err
        .to_string()
        .contains("manifest does not describe a valid routing table"));
    assert!(format!("{err:#}").contains("placeholder has no name"));
}
