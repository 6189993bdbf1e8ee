//! Router core module - route table and request resolution.

use http::Method;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::constraint::{ConstraintRegistry, SegmentHandle};
use super::segment::Segment;
use super::trie::{ParamSites, TrieNode};

/// Maximum number of path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Bound path parameters in the order the path declared them.
///
/// Param names are `Arc<str>` shared with the segments in the tree; values
/// are per-request data from the URL.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Bind `value` under `name`, replacing an existing binding in place.
pub(crate) fn bind_param(params: &mut ParamVec, name: &Arc<str>, value: &str) {
    match params.iter_mut().find(|(k, _)| k == name) {
        Some(slot) => value.clone_into(&mut slot.1),
        None => params.push((Arc::clone(name), value.to_string())),
    }
}

/// Strip a single trailing `/` from a route pattern or request path.
///
/// `"/a/b/"` and `"/a/b"` normalise to the same route; `"/"` becomes the
/// empty path, which the trie treats as the root.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Result of successfully resolving a request path
#[derive(Debug)]
pub struct RouteMatch<H> {
    /// Handler registered for the matched route
    pub handler: Arc<H>,
    /// Path parameters extracted from the URL (e.g., `<id>` → `("id", "123")`)
    pub path_params: ParamVec,
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            path_params: self.path_params.clone(),
        }
    }
}

impl<H> RouteMatch<H> {
    /// Get a path parameter by name. Names are unique within a match.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Convert path_params to HashMap
    /// Note: This allocates - use get_path_param() in hot paths instead
    #[must_use]
    pub fn path_params_map(&self) -> HashMap<String, String> {
        self.path_params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// Route table: one segment trie per HTTP method.
///
/// Method trees are created on first registration. Build the router completely
/// during startup, then share it read-only (e.g. behind an `Arc`); lookups
/// take `&self` and need no locking.
///
/// ```
/// use http::Method;
/// use trierouter::router::Router;
///
/// let mut router = Router::new();
/// router.get("/user/create", "create");
/// router.get("/user/<id>", "show").number("id");
///
/// let m = router.resolve(&Method::GET, "/user/42").unwrap();
/// assert_eq!(*m.handler, "show");
/// assert_eq!(m.get_path_param("id"), Some("42"));
/// ```
#[derive(Debug)]
pub struct Router<H> {
    trees: HashMap<Method, TrieNode<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }
}

impl<H> Router<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `path` under every method in `methods`.
    ///
    /// `path` uses `/`-separated tokens: `<name>` is a required parameter,
    /// `<name?>` an optional one, anything else a literal. A single trailing
    /// `/` is ignored. Registering the same path twice replaces the handler.
    ///
    /// The returned registry attaches regex constraints to the parameters of
    /// this route across all of `methods`.
    pub fn register<I>(&mut self, methods: I, path: &str, handler: H) -> ConstraintRegistry<'_, H>
    where
        I: IntoIterator<Item = Method>,
    {
        let segments: Vec<Segment> = normalize_path(path)
            .split('/')
            .map(Segment::from_token)
            .collect();
        let handler = Arc::new(handler);

        let mut recorded: Vec<(Method, ParamSites)> = Vec::new();
        for method in methods {
            let mut sites = ParamSites::new();
            self.trees
                .entry(method.clone())
                .or_insert_with(TrieNode::root)
                .insert(&segments, &handler, &mut Vec::new(), &mut sites);
            recorded.push((method, sites));
        }

        info!(
            methods = ?recorded.iter().map(|(m, _)| m.as_str()).collect::<Vec<_>>(),
            path = %path,
            "Route registered"
        );

        let mut registry = ConstraintRegistry::new(self, path);
        for (method, sites) in recorded {
            for (name, node_path) in sites {
                let handle = node_path.map(|path| SegmentHandle {
                    method: method.clone(),
                    path,
                });
                registry.record(name, handle);
            }
        }
        registry
    }

    /// Register a handler for GET requests
    pub fn get(&mut self, path: &str, handler: H) -> ConstraintRegistry<'_, H> {
        self.register([Method::GET], path, handler)
    }

    /// Register a handler for POST requests
    pub fn post(&mut self, path: &str, handler: H) -> ConstraintRegistry<'_, H> {
        self.register([Method::POST], path, handler)
    }

    /// Register a handler for PUT requests
    pub fn put(&mut self, path: &str, handler: H) -> ConstraintRegistry<'_, H> {
        self.register([Method::PUT], path, handler)
    }

    /// Register a handler for PATCH requests
    pub fn patch(&mut self, path: &str, handler: H) -> ConstraintRegistry<'_, H> {
        self.register([Method::PATCH], path, handler)
    }

    /// Register a handler for DELETE requests
    pub fn delete(&mut self, path: &str, handler: H) -> ConstraintRegistry<'_, H> {
        self.register([Method::DELETE], path, handler)
    }

    /// Resolve a request to its handler and bound parameters.
    ///
    /// Returns `None` when the method has no routes at all, when some path
    /// component matches no child, or when the node reached has no handler.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<H>> {
        debug!(method = %method, path = %path, "Route match attempt");

        let Some(tree) = self.trees.get(method) else {
            warn!(method = %method, path = %path, "No routes registered for method");
            return None;
        };

        let match_start = std::time::Instant::now();
        let components: SmallVec<[&str; 16]> = normalize_path(path).split('/').collect();
        let mut params = ParamVec::new();
        let handler = tree.resolve(&components, &mut params).map(Arc::clone);
        let match_duration = match_start.elapsed();

        match handler {
            Some(handler) => {
                info!(
                    method = %method,
                    path = %path,
                    path_params = ?params,
                    duration_us = match_duration.as_micros(),
                    "Route matched"
                );
                Some(RouteMatch {
                    handler,
                    path_params: params,
                })
            }
            None => {
                warn!(
                    method = %method,
                    path = %path,
                    duration_us = match_duration.as_micros(),
                    "No route matched"
                );
                None
            }
        }
    }

    /// Trie root for `method`, if any route was registered under it
    #[must_use]
    pub fn tree(&self, method: &Method) -> Option<&TrieNode<H>> {
        self.trees.get(method)
    }

    pub(crate) fn tree_mut(&mut self, method: &Method) -> Option<&mut TrieNode<H>> {
        self.trees.get_mut(method)
    }

    /// Every resolvable `(method, pattern)` pair.
    ///
    /// Methods are sorted by name; patterns within a method follow trie
    /// order. An optional parameter contributes both the shorter and the
    /// longer pattern.
    #[must_use]
    pub fn routes(&self) -> Vec<(Method, String)> {
        let mut methods: Vec<&Method> = self.trees.keys().collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        let mut routes = Vec::new();
        for method in methods {
            let mut patterns = Vec::new();
            if let Some(tree) = self.trees.get(method) {
                tree.collect_patterns(&mut Vec::new(), &mut patterns);
            }
            routes.extend(patterns.into_iter().map(|p| (method.clone(), p)));
        }
        routes
    }

    /// Log all registered routes
    pub fn dump_routes(&self) {
        let routes = self.routes();
        info!(count = routes.len(), "Registered routes");
        for (method, pattern) in routes {
            info!(method = %method, pattern = %pattern, "Route");
        }
    }
}
