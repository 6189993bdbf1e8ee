use serde_json::json;

use crate::dispatcher::{Handler, HandlerResponse, NotFoundHandler, RouteParams};

/// Handler that echoes the resolved route back as JSON.
///
/// Used by the CLI to show what a manifest does without real handlers.
#[must_use]
pub fn echo_handler(handler_name: &str) -> Handler {
    let handler_name = handler_name.to_string();
    Box::new(move |params: &RouteParams| {
        let named: serde_json::Map<String, serde_json::Value> = params
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect();
        let body = json!({
            "handler": handler_name,
            "method": params.method().as_str(),
            "path": params.path(),
            "params": named,
            "args": params.values().collect::<Vec<_>>(),
        });
        HandlerResponse::ok(body.to_string())
    })
}

/// Not-found fallback that echoes the handler name and unmatched path
#[must_use]
pub fn echo_not_found(handler_name: &str) -> NotFoundHandler {
    let handler_name = handler_name.to_string();
    Box::new(move |path: &str| {
        json!({
            "handler": handler_name,
            "path": path,
        })
        .to_string()
    })
}
