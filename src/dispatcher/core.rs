use http::{Method, StatusCode};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::router::{ConstraintRegistry, ParamVec, Router};
use crate::server::RequestSource;

/// Boxed route handler
pub type Handler = Box<dyn Fn(&RouteParams) -> HandlerResponse + Send + Sync>;

/// Boxed fallback producing the body of a 404 response from the unmatched path
pub type NotFoundHandler = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Body sent when no route matches and no fallback is set
const DEFAULT_NOT_FOUND_BODY: &str = "Not Found";

/// Response produced by a handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    /// Response body
    pub body: String,
}

fn serialize_status<S: serde::Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `200 OK` with `body`
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// `404 Not Found` with `body`
    #[must_use]
    pub fn not_found(body: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, body)
    }
}

/// Request data handed to a matched handler
#[derive(Debug, Clone)]
pub struct RouteParams {
    method: Method,
    path: String,
    params: ParamVec,
}

impl RouteParams {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>, params: ParamVec) -> Self {
        Self {
            method,
            path: path.into(),
            params,
        }
    }

    /// Request method
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path after trailing-slash normalisation
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameter value by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Parameter values in the order the route pattern declared them
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(_, v)| v.as_str())
    }

    /// `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Dispatch entry point: a route table of boxed handlers plus the not-found
/// fallback.
///
/// Build it once at startup; `dispatch` only needs `&self`, so a finished
/// dispatcher can be shared across threads behind an `Arc`.
#[derive(Default)]
pub struct Dispatcher {
    router: Router<Handler>,
    not_found: Option<NotFoundHandler>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `path` under every method in `methods`.
    ///
    /// See [`Router::register`] for the pattern syntax.
    pub fn register<I, F>(&mut self, methods: I, path: &str, handler: F) -> ConstraintRegistry<'_, Handler>
    where
        I: IntoIterator<Item = Method>,
        F: Fn(&RouteParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.router.register(methods, path, Box::new(handler))
    }

    /// Register an already boxed handler
    pub fn register_boxed<I>(&mut self, methods: I, path: &str, handler: Handler) -> ConstraintRegistry<'_, Handler>
    where
        I: IntoIterator<Item = Method>,
    {
        self.router.register(methods, path, handler)
    }

    /// Register a handler for GET requests
    pub fn get<F>(&mut self, path: &str, handler: F) -> ConstraintRegistry<'_, Handler>
    where
        F: Fn(&RouteParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register([Method::GET], path, handler)
    }

    /// Register a handler for POST requests
    pub fn post<F>(&mut self, path: &str, handler: F) -> ConstraintRegistry<'_, Handler>
    where
        F: Fn(&RouteParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register([Method::POST], path, handler)
    }

    /// Register a handler for PUT requests
    pub fn put<F>(&mut self, path: &str, handler: F) -> ConstraintRegistry<'_, Handler>
    where
        F: Fn(&RouteParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register([Method::PUT], path, handler)
    }

    /// Register a handler for PATCH requests
    pub fn patch<F>(&mut self, path: &str, handler: F) -> ConstraintRegistry<'_, Handler>
    where
        F: Fn(&RouteParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register([Method::PATCH], path, handler)
    }

    /// Register a handler for DELETE requests
    pub fn delete<F>(&mut self, path: &str, handler: F) -> ConstraintRegistry<'_, Handler>
    where
        F: Fn(&RouteParams) -> HandlerResponse + Send + Sync + 'static,
    {
        self.register([Method::DELETE], path, handler)
    }

    /// Set the fallback called with the unmatched path when no route matches
    pub fn not_found<F>(&mut self, handler: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.not_found = Some(Box::new(handler));
    }

    /// Set an already boxed fallback
    pub fn not_found_boxed(&mut self, handler: NotFoundHandler) {
        self.not_found = Some(handler);
    }

    /// Underlying route table
    #[must_use]
    pub fn router(&self) -> &Router<Handler> {
        &self.router
    }

    /// Resolve a request and run its handler, or the not-found fallback.
    pub fn dispatch<R>(&self, request: &R) -> HandlerResponse
    where
        R: RequestSource + ?Sized,
    {
        let raw_path = request.path();
        let path = if raw_path == "/" {
            raw_path
        } else {
            raw_path.strip_suffix('/').unwrap_or(raw_path)
        };

        let method = match Method::from_bytes(request.method().as_bytes()) {
            Ok(method) => method,
            Err(_) => {
                warn!(method = %request.method(), path = %path, "Unparseable request method");
                return self.respond_not_found(path);
            }
        };

        let Some(matched) = self.router.resolve(&method, path) else {
            return self.respond_not_found(path);
        };

        debug!(
            method = %method,
            path = %path,
            param_count = matched.path_params.len(),
            "Dispatching to handler"
        );
        let params = RouteParams::new(method, path, matched.path_params);
        (matched.handler)(&params)
    }

    fn respond_not_found(&self, path: &str) -> HandlerResponse {
        let body = match &self.not_found {
            Some(handler) => handler(path),
            None => DEFAULT_NOT_FOUND_BODY.to_string(),
        };
        info!(path = %path, status = 404, "Responding not found");
        HandlerResponse::not_found(body)
    }
}
