//! # Dispatcher Module
//!
//! The dispatch entry point: takes a request from a [`RequestSource`],
//! resolves it through a [`Router`] of boxed handlers and produces a
//! [`HandlerResponse`].
//!
//! ## Request Flow
//!
//! 1. Read method and path from the request source
//! 2. Strip a single trailing `/` (the root path `/` is left alone)
//! 3. Resolve against the route table
//! 4. On a match, call the handler with the bound parameters in path order
//! 5. Otherwise answer `404 Not Found`, with the body produced by the
//!    not-found handler (called with the unmatched path) or `Not Found`
//!
//! ## Example
//!
//! ```rust
//! use http::StatusCode;
//! use trierouter::dispatcher::{Dispatcher, HandlerResponse};
//! use trierouter::server::ParsedRequest;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.get("/hello/<name>", |params| {
//!     HandlerResponse::ok(format!("Hello, {}!", params.values().next().unwrap_or("")))
//! });
//! dispatcher.not_found(|path| format!("nothing at {path}"));
//!
//! let res = dispatcher.dispatch(&ParsedRequest::new("GET", "/hello/world"));
//! assert_eq!(res.body, "Hello, world!");
//!
//! let res = dispatcher.dispatch(&ParsedRequest::new("GET", "/bye/"));
//! assert_eq!(res.status, StatusCode::NOT_FOUND);
//! assert_eq!(res.body, "nothing at /bye");
//! ```
//!
//! [`RequestSource`]: crate::server::RequestSource
//! [`Router`]: crate::router::Router

mod core;

pub use core::{Dispatcher, Handler, HandlerResponse, NotFoundHandler, RouteParams};
