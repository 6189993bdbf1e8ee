//! Deferred regex constraints for route parameters.
//!
//! Registering a route returns a [`ConstraintRegistry`] that remembers the
//! trie nodes the registration created for each parameter. Attaching a
//! pattern by name writes it onto all of those segments at once, so a
//! constraint declared for a route registered under several methods applies
//! to every method. A parameter that landed on a node shared with an earlier
//! route is still declared, but its pattern is left as the earlier route set
//! it:
//!
//! ```
//! use http::Method;
//! use trierouter::router::Router;
//!
//! let mut router = Router::new();
//! router
//!     .register([Method::GET, Method::POST], "/item/<id>/<slug?>", "item")
//!     .number("id")
//!     .word("slug");
//!
//! assert!(router.resolve(&Method::POST, "/item/42/hello").is_some());
//! assert!(router.resolve(&Method::GET, "/item/abc").is_none());
//! ```
//!
//! The registry holds the router mutably borrowed, so the tree cannot change
//! underneath the recorded positions while it is alive.

use http::Method;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::core::Router;
use super::error::RouteError;

/// Non-owning reference to a parameter segment: the method tree it lives in
/// and the child-index path from that tree's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentHandle {
    pub(crate) method: Method,
    pub(crate) path: Vec<usize>,
}

/// Parameter-name to segment mapping for the route registered last.
pub struct ConstraintRegistry<'r, H> {
    router: &'r mut Router<H>,
    path: String,
    params: HashMap<Arc<str>, Vec<SegmentHandle>>,
}

impl<'r, H> ConstraintRegistry<'r, H> {
    pub(crate) fn new(router: &'r mut Router<H>, path: &str) -> Self {
        Self {
            router,
            path: path.to_string(),
            params: HashMap::new(),
        }
    }

    /// Declare `name` for this route. `handle` is `None` when the segment
    /// reused a node of an earlier route, which constraints do not touch.
    pub(crate) fn record(&mut self, name: Arc<str>, handle: Option<SegmentHandle>) {
        let handles = self.params.entry(name).or_default();
        handles.extend(handle);
    }

    /// Segment handles recorded for `name`
    #[must_use]
    pub fn handles(&self, name: &str) -> &[SegmentHandle] {
        self.params.get(name).map_or(&[], Vec::as_slice)
    }

    /// Attach `pattern` to every segment recorded under `name`.
    ///
    /// The pattern must match the whole component; it is anchored on both
    /// ends before compiling.
    ///
    /// # Errors
    ///
    /// [`RouteError::UnknownParameter`] if the route has no parameter called
    /// `name`, [`RouteError::InvalidPattern`] if the pattern does not compile.
    pub fn try_constrain(self, name: &str, pattern: &str) -> Result<Self, RouteError> {
        let Some(handles) = self.params.get(name) else {
            return Err(RouteError::UnknownParameter {
                name: name.to_string(),
                path: self.path.clone(),
            });
        };

        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            RouteError::InvalidPattern {
                name: name.to_string(),
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        for handle in handles {
            if let Some(node) = self
                .router
                .tree_mut(&handle.method)
                .and_then(|tree| tree.node_mut(&handle.path))
            {
                node.segment_mut().set_pattern(regex.clone());
            }
        }

        debug!(
            path = %self.path,
            param = %name,
            pattern = %pattern,
            segments = handles.len(),
            "Constraint attached"
        );

        Ok(self)
    }

    /// Attach `pattern` to the parameter `name`.
    ///
    /// # Panics
    ///
    /// Panics if the route has no such parameter or the pattern is not a valid
    /// regular expression. Both are bugs in the route declaration.
    #[allow(clippy::panic)]
    pub fn constrain(self, name: &str, pattern: &str) -> Self {
        match self.try_constrain(name, pattern) {
            Ok(registry) => registry,
            Err(err) => panic!("{err}"),
        }
    }

    /// Constrain `name` to ASCII word characters (`[0-9A-Za-z_]+`)
    pub fn word(self, name: &str) -> Self {
        self.constrain(name, "[0-9A-Za-z_]+")
    }

    /// Constrain `name` to ASCII digits (`[0-9]+`)
    pub fn number(self, name: &str) -> Self {
        self.constrain(name, "[0-9]+")
    }
}
