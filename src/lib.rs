//! # trierouter
//!
//! A small HTTP request router built on a per-method segment trie.
//!
//! ## Overview
//!
//! Route patterns are split on `/` into segments: exact text, named
//! parameters `<name>` and optional parameters `<name?>`. Each HTTP method
//! owns one trie; registering a pattern walks it, reusing nodes for equal
//! segments and creating the rest. An optional parameter is inserted twice,
//! once as if absent and once as if present, so both path shapes resolve.
//!
//! Resolution walks the trie one path component at a time and takes the
//! first child, in insertion order, whose segment accepts the component.
//! There is no backtracking, so registration order is matching priority.
//!
//! ## Architecture
//!
//! - **[`router`]** - segments, the trie, constraints and the per-method route table
//! - **[`dispatcher`]** - boxed handlers, dispatch and the not-found fallback
//! - **[`server`]** - the request-source seam and URI parsing
//! - **[`manifest`]** - YAML route manifests
//! - **[`echo`]** - echo handlers used by the CLI
//! - **[`logging`]** - `tracing-subscriber` setup from environment variables
//! - **[`cli`]** - the `trierouter` command-line tool
//!
//! ## Quick Start
//!
//! ```rust
//! use trierouter::dispatcher::{Dispatcher, HandlerResponse};
//! use trierouter::server::ParsedRequest;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher
//!     .get("/user/<id>", |params| {
//!         HandlerResponse::ok(format!("user {}", params.get("id").unwrap_or("?")))
//!     })
//!     .number("id");
//!
//! let res = dispatcher.dispatch(&ParsedRequest::new("GET", "/user/42"));
//! assert_eq!(res.body, "user 42");
//!
//! let res = dispatcher.dispatch(&ParsedRequest::new("GET", "/user/bob"));
//! assert_eq!(res.status, http::StatusCode::NOT_FOUND);
//! ```

pub mod cli;
pub mod dispatcher;
pub mod echo;
pub mod logging;
pub mod manifest;
pub mod router;
pub mod server;

pub use dispatcher::{Dispatcher, Handler, HandlerResponse, NotFoundHandler, RouteParams};
pub use manifest::{load_manifest, RouteEntry, RouteManifest};
pub use router::{ConstraintRegistry, RouteError, RouteMatch, Router, Segment};
pub use server::{ParsedRequest, RequestSource};
