use navrouter::router::{Dispatch, Flow, Route, Router};
use navrouter::Request;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;
use common::{CallLog, RecordingNavigator};

fn noop(_req: &mut Request) {}

fn verb_zoo() -> Router {
    let mut router = Router::new();
    router.get("/zoo/animals", noop).unwrap();
    router.post("/zoo/animals", noop).unwrap();
    router.get("/zoo/animals/:id", noop).unwrap();
    router.put("/zoo/animals/:id", noop).unwrap();
    router.del("/zoo/animals/:id", noop).unwrap();
    router.state("/zoo/tour/:stop", noop).unwrap();
    router
}

fn assert_route_match(router: &Router, method: &str, path: &str, expected_pattern: &str) {
    match router.lookup_route(method, path) {
        Some(route) => {
            assert_eq!(
                route.pattern().as_str(),
                expected_pattern,
                "wrong route for {method} {path}"
            );
            assert!(route.verb().matches(method));
        }
        None => panic!("no route for {method} {path}"),
    }
}

#[test]
fn test_verb_shortcuts() {
    let router = verb_zoo();
    assert_route_match(&router, "GET", "/zoo/animals", "/zoo/animals");
    assert_route_match(&router, "post", "/zoo/animals", "/zoo/animals");
    assert_route_match(&router, "Put", "/zoo/animals/7", "/zoo/animals/:id");
    assert_route_match(&router, "delete", "/zoo/animals/7", "/zoo/animals/:id");
    assert!(router.lookup_route("patch", "/zoo/animals/7").is_none());
    assert!(router.lookup_route("get", "/zoo/unknown").is_none());
}

#[test]
fn test_get_extracts_params() {
    let mut router = Router::new();
    router.get("/foo/:id", noop).unwrap();

    let route = router.lookup_route("GET", "/foo/1").unwrap();
    let mut req = Request::new("GET", "/foo/1");
    route.run(&mut req);
    assert_eq!(req.param("id"), Some("1"));
}

#[test]
fn test_path_is_case_insensitive() {
    let mut router = Router::new();
    router.get("/foo/:id", noop).unwrap();
    assert!(router.lookup_route("get", "/FOO/1").is_some());
}

#[test]
fn test_del_registers_delete_verb() {
    let mut router = Router::new();
    router.del("/x", noop).unwrap();
    assert!(router.lookup_route("delete", "/x").is_some());
    assert!(router.lookup_route("del", "/x").is_none());
}

#[test]
fn test_before_any_matches_everything() {
    let mut router = Router::new();
    assert!(router.lookup_before_filter("get", "/anything").is_empty());

    router.before_any(|_req: &mut Request| Flow::Continue);
    assert_eq!(router.lookup_before_filter("get", "/anything").len(), 1);
    assert_eq!(router.lookup_before_filter("state", "").len(), 1);
    assert!(router.lookup_after_filter("get", "/anything").is_empty());
}

#[test]
fn test_before_scoped_to_path() {
    let mut router = Router::new();
    router.before("/foo", |_req: &mut Request| Flow::Continue).unwrap();
    assert!(router.lookup_before_filter("get", "/bar").is_empty());
    assert_eq!(router.lookup_before_filter("get", "/foo").len(), 1);
    // filters ignore the verb
    assert_eq!(router.lookup_before_filter("post", "/foo").len(), 1);
}

#[test]
fn test_state_routes_need_state_verb() {
    let mut router = Router::new();
    router.state("/foo/:id", noop).unwrap();
    assert!(router.lookup_route("state", "/foo/1").is_some());
    assert!(router.lookup_route("get", "/foo/1").is_none());
}

#[test]
fn test_trans_assigns_state_request() {
    let router = Router::new();
    let mut nav = RecordingNavigator::default();
    router.trans(&mut nav, "/blah/2");

    assert_eq!(nav.assigned.len(), 1);
    assert_eq!(nav.assigned[0].path, "/blah/2");
    assert_eq!(nav.assigned[0].method, "state");
    assert!(nav.assigned[0].params.is_empty());
}

#[test]
fn test_trans_data_round_trips() {
    let router = Router::new();
    let mut nav = RecordingNavigator::default();
    router.trans_with(&mut nav, "/search", [("q", "a b&c=d"), ("page", "2")]);

    let req = &nav.assigned[0];
    assert_eq!(req.path, "/search");
    assert_eq!(req.param("q"), Some("a b&c=d"));
    assert_eq!(req.param("page"), Some("2"));
}

#[test]
fn test_repeated_lookups_return_same_route() {
    let router = verb_zoo();
    let first = router.lookup_route("get", "/zoo/animals/3").unwrap();
    let second = router.lookup_route("get", "/zoo/animals/3").unwrap();
    assert!(std::ptr::eq(first, second));

    let mut router = verb_zoo();
    router.before("/zoo/animals/:id", noop).unwrap();
    router.before_any(noop);
    router.after("/zoo/animals/:id", noop).unwrap();
    router.after_any(noop);

    assert_same_routes(
        &router.lookup_before_filter("get", "/zoo/animals/3"),
        &router.lookup_before_filter("get", "/zoo/animals/3"),
    );
    assert_same_routes(
        &router.lookup_after_filter("get", "/zoo/animals/3"),
        &router.lookup_after_filter("get", "/zoo/animals/3"),
    );
}

fn assert_same_routes(a: &[&Route], b: &[&Route]) {
    assert_eq!(a.len(), 2);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        assert!(std::ptr::eq(*x, *y));
    }
}

#[test]
fn test_halting_filter_stops_later_filters() {
    let log = CallLog::default();
    let mut router = Router::new();
    let (l1, l2, l3, l4) = (log.clone(), log.clone(), log.clone(), log.clone());
    router
        .before("/guarded/:id", move |_req: &mut Request| {
            l1.push("f1");
            Flow::Halt
        })
        .unwrap();
    router.before_any(move |_req: &mut Request| {
        l2.push("f2");
        Flow::Continue
    });
    router
        .get("/guarded/:id", move |_req: &mut Request| l3.push("route"))
        .unwrap();
    router.after_any(move |_req: &mut Request| l4.push("after"));

    let filters = router.lookup_before_filter("get", "/guarded/1");
    assert_eq!(filters.len(), 2);
    assert_eq!(filters[0].pattern().as_str(), "/guarded/:id");
    assert_eq!(filters[1].pattern().as_str(), "*");

    let mut req = Request::new("get", "/guarded/1");
    assert_eq!(router.dispatch(&mut req), Dispatch::Halted);
    assert_eq!(log.entries(), vec!["f1"]);
}

#[test]
fn test_dispatch_runs_in_order() {
    let log = CallLog::default();
    let mut router = Router::new();
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    router.before_any(move |req: &mut Request| l1.push(format!("before {}", req.path)));
    router
        .get("/users/:id", move |req: &mut Request| {
            l2.push(format!("route {}", req.param("id").unwrap_or("-")));
        })
        .unwrap();
    router
        .after("/users/:id", move |req: &mut Request| {
            l3.push(format!("after {}", req.param("id").unwrap_or("-")));
        })
        .unwrap();

    let mut req = Request::new("GET", "/users/5");
    let outcome = router.dispatch(&mut req);
    assert_eq!(
        outcome,
        Dispatch::Done {
            route: Some(Flow::Continue)
        }
    );
    assert_eq!(log.entries(), vec!["before /users/5", "route 5", "after 5"]);
}

#[test]
fn test_unmatched_request_still_runs_after_filters() {
    let after_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&after_calls);
    let mut router = Router::new();
    router.after_any(move |_req: &mut Request| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let mut req = Request::new("get", "/nowhere");
    let outcome = router.dispatch(&mut req);
    assert_eq!(outcome, Dispatch::Done { route: None });
    assert!(!outcome.route_matched());
    assert_eq!(after_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_route_flow_returned_unchanged() {
    let mut router = Router::new();
    router.get("/stop", |_req: &mut Request| Flow::Halt).unwrap();

    let mut req = Request::new("get", "/stop");
    assert_eq!(
        router.dispatch(&mut req),
        Dispatch::Done {
            route: Some(Flow::Halt)
        }
    );
}

#[test]
fn test_caller_params_survive_dispatch() {
    let mut router = Router::new();
    router.get("/items/:id", noop).unwrap();

    let mut req = Request::new("get", "/items/9").with_param("id", "from-caller");
    router.dispatch(&mut req);
    assert_eq!(req.param("id"), Some("from-caller"));
}

#[test]
fn test_route_params_win_over_filter_params() {
    let log = CallLog::default();
    let mut router = Router::new();
    let (l1, l2) = (log.clone(), log.clone());
    router
        .before("/:id/:x", move |req: &mut Request| {
            l1.push(format!("filter id={}", req.param("id").unwrap_or("-")));
        })
        .unwrap();
    router
        .get("/foo/:id", move |req: &mut Request| {
            l2.push(format!("route id={}", req.param("id").unwrap_or("-")));
        })
        .unwrap();

    let mut req = Request::new("get", "/foo/1");
    router.dispatch(&mut req);
    assert_eq!(log.entries(), vec!["filter id=foo", "route id=1"]);
    assert_eq!(req.param("id"), Some("1"));
    assert_eq!(req.param("x"), Some("1"));

    // caller-supplied values still beat both patterns
    let mut req = Request::new("get", "/foo/1").with_param("id", "from-caller");
    router.dispatch(&mut req);
    assert_eq!(req.param("id"), Some("from-caller"));
}

#[test]
fn test_filter_rewriting_path_keeps_route_params() {
    let seen = CallLog::default();
    let log = seen.clone();
    let mut router = Router::new();
    router.before_any(|req: &mut Request| req.path = "/other".to_string());
    router
        .get("/users/:id", move |req: &mut Request| {
            log.push(format!("route id={}", req.param("id").unwrap_or("-")));
        })
        .unwrap();

    let mut req = Request::new("get", "/users/7");
    let outcome = router.dispatch(&mut req);
    assert_eq!(
        outcome,
        Dispatch::Done {
            route: Some(Flow::Continue)
        }
    );
    assert_eq!(seen.entries(), vec!["route id=7"]);
    assert_eq!(req.path, "/other");
}

#[test]
fn test_trans_data_goes_before_fragment() {
    let router = Router::new();
    let mut nav = RecordingNavigator::default();
    router.trans_with(&mut nav, "/p#sec", [("q", "1")]);

    let req = &nav.assigned[0];
    assert_eq!(req.path, "/p");
    assert_eq!(req.param("q"), Some("1"));
}
