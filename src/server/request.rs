use http::Uri;
use tracing::debug;

/// Source of the two request facts routing depends on.
///
/// Implemented for [`http::Request`] and for [`ParsedRequest`]; adapters for
/// other transports only need to expose the verb and the URI path.
pub trait RequestSource {
    /// HTTP method token, e.g. `GET`
    fn method(&self) -> &str;
    /// Path component of the request URI, without query or fragment
    fn path(&self) -> &str;
}

/// Method and path extracted from a raw request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without query string
    pub path: String,
}

impl ParsedRequest {
    /// Build from a method token and a request URI.
    ///
    /// The URI may be absolute (`http://host/a?b`) or origin-form (`/a?b`).
    /// Query and fragment are dropped; a URI without a path yields `/`.
    ///
    /// ```
    /// use trierouter::server::ParsedRequest;
    ///
    /// assert_eq!(ParsedRequest::new("GET", "/users?limit=10").path, "/users");
    /// assert_eq!(ParsedRequest::new("GET", "http://example.com").path, "/");
    /// ```
    #[must_use]
    pub fn new(method: &str, uri: &str) -> Self {
        let path = match uri.parse::<Uri>() {
            Ok(parsed) => parsed.path().to_string(),
            Err(e) => {
                debug!(uri = %uri, error = %e, "URI did not parse, splitting path by hand");
                fallback_path(uri).to_string()
            }
        };

        Self {
            method: method.to_string(),
            path,
        }
    }
}

/// Path portion of a URI the `http` parser rejected (e.g. one containing
/// spaces).
fn fallback_path(uri: &str) -> &str {
    let end = uri.find(&['?', '#'][..]).unwrap_or(uri.len());
    match &uri[..end] {
        "" => "/",
        path => path,
    }
}

impl RequestSource for ParsedRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }
}

impl<B> RequestSource for http::Request<B> {
    fn method(&self) -> &str {
        http::Request::method(self).as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }
}
