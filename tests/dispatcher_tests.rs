//! Tests for the dispatcher
//!
//! Covers handler invocation with ordered parameters, trailing-slash
//! handling at the dispatch boundary, the not-found fallback and the
//! request-source seam.

mod common;

use common::requests::send;
use http::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use trierouter::dispatcher::{Dispatcher, HandlerResponse, RouteParams};

fn joined(params: &RouteParams) -> HandlerResponse {
    HandlerResponse::ok(params.values().collect::<Vec<_>>().join(","))
}

#[test]
fn test_handler_receives_params_in_path_order() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/<b>/mid/<a>/<c?>", joined);

    assert_eq!(send(&dispatcher, "GET", "/2/mid/1").body, "2,1");
    assert_eq!(send(&dispatcher, "GET", "/2/mid/1/3").body, "2,1,3");
}

#[test]
fn test_handler_sees_method_and_normalised_path() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.post("/user/<id>", |params| {
        HandlerResponse::ok(format!("{} {} {:?}", params.method(), params.path(), params.get("id")))
    });

    let res = send(&dispatcher, "POST", "/user/9/");
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "POST /user/9 Some(\"9\")");
}

#[test]
fn test_default_not_found() {
    let dispatcher = Dispatcher::new();
    let res = send(&dispatcher, "GET", "/anything");
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, "Not Found");
}

#[test]
fn test_not_found_handler_gets_unmatched_path() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/known", |_| HandlerResponse::ok("known"));
    dispatcher.not_found(|path| format!("missing {path}"));

    let res = send(&dispatcher, "GET", "/unknown/");
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, "missing /unknown");

    let res = send(&dispatcher, "DELETE", "/known");
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, "missing /known");
}

#[test]
fn test_handler_status_passes_through() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.put("/thing", |_| HandlerResponse::new(StatusCode::ACCEPTED, "queued"));
    let res = send(&dispatcher, "PUT", "/thing");
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert_eq!(res.body, "queued");
}

#[test]
fn test_root_path_keeps_its_slash() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/", |params| HandlerResponse::ok(params.path().to_string()));
    dispatcher.not_found(|path| format!("missing {path}"));

    assert_eq!(send(&dispatcher, "GET", "/").body, "/");
    assert_eq!(send(&dispatcher, "GET", "").body, "/");
    assert_eq!(send(&dispatcher, "POST", "/").body, "missing /");
}

#[test]
fn test_query_and_fragment_are_ignored() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/search/<term>", joined);
    assert_eq!(send(&dispatcher, "GET", "/search/rust?page=2#top").body, "rust");
    assert_eq!(
        send(&dispatcher, "GET", "http://example.com/search/rust/?x").body,
        "rust"
    );
}

#[test]
fn test_unparseable_method_is_not_found() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/a", |_| HandlerResponse::ok("a"));
    let res = send(&dispatcher, "GE T", "/a");
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_extension_method() {
    let mut dispatcher = Dispatcher::new();
    let purge = http::Method::from_bytes(b"PURGE").unwrap();
    dispatcher.register([purge], "/cache", |_| HandlerResponse::ok("purged"));
    assert_eq!(send(&dispatcher, "PURGE", "/cache").body, "purged");
    assert_eq!(send(&dispatcher, "GET", "/cache").status, StatusCode::NOT_FOUND);
}

#[test]
fn test_dispatch_from_http_request() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.patch("/doc/<id>", joined).number("id");

    let req = http::Request::builder()
        .method("PATCH")
        .uri("https://example.com/doc/5/?draft=true")
        .body(())
        .unwrap();
    assert_eq!(dispatcher.dispatch(&req).body, "5");

    let req = http::Request::builder()
        .method("PATCH")
        .uri("/doc/five")
        .body(())
        .unwrap();
    assert_eq!(dispatcher.dispatch(&req).status, StatusCode::NOT_FOUND);
}

#[test]
fn test_only_matched_handler_runs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut dispatcher = Dispatcher::new();

    let counter = Arc::clone(&calls);
    dispatcher.get("/hit", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        HandlerResponse::ok("hit")
    });
    dispatcher.delete("/hit", |_| HandlerResponse::ok("deleted"));

    send(&dispatcher, "GET", "/hit");
    send(&dispatcher, "DELETE", "/hit");
    send(&dispatcher, "GET", "/miss");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dispatcher_is_shareable_across_threads() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.get("/n/<n>", joined).number("n");
    let dispatcher = Arc::new(dispatcher);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || send(&dispatcher, "GET", &format!("/n/{i}")).body)
        })
        .collect();

    let bodies: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(bodies, vec!["0", "1", "2", "3"]);
}
