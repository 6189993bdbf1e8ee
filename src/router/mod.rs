//! # Router Module
//!
//! Path matching and route resolution. Each HTTP method owns a trie of path
//! [`Segment`]s; resolving a request walks that trie one path component at a
//! time, binding parameters on the way.
//!
//! ## Pattern syntax
//!
//! ```text
//!  Token      Meaning
//!  users      literal component
//!  <id>       required parameter, bound as "id"
//!  <page?>    optional parameter: the route also matches without it
//! ```
//!
//! ## Architecture
//!
//! 1. **Registration**: [`Router::register`] splits the pattern on `/`, turns
//!    every token into a [`Segment`] and inserts the sequence into each
//!    method's [`TrieNode`] tree, sharing nodes for identical leading
//!    segments. It returns a [`ConstraintRegistry`] for attaching regex
//!    constraints to the route's parameters.
//!
//! 2. **Matching**: [`Router::resolve`] splits the request path the same way
//!    and walks the tree. At each level the first child (in registration
//!    order) that accepts the component wins; there is no backtracking.
//!
//! ## Example
//!
//! ```rust
//! use http::Method;
//! use trierouter::router::Router;
//!
//! let mut router = Router::new();
//! router.get("/greet/<name?>", "greet");
//! router.get("/item/<id>", "item").number("id");
//!
//! assert!(router.resolve(&Method::GET, "/greet").is_some());
//! let m = router.resolve(&Method::GET, "/greet/alice").unwrap();
//! assert_eq!(m.get_path_param("name"), Some("alice"));
//! assert!(router.resolve(&Method::GET, "/item/abc").is_none());
//! ```

mod constraint;
mod core;
mod error;
mod segment;
mod trie;

pub use constraint::{ConstraintRegistry, SegmentHandle};
pub use core::{normalize_path, ParamVec, RouteMatch, Router, MAX_INLINE_PARAMS};
pub use error::RouteError;
pub use segment::Segment;
pub use trie::TrieNode;
