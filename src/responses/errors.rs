use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Convert a ServerError into a JSON error response.
/// Server-side faults are logged here with full detail and reported to the
/// client generically.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    if status >= 500 {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, status, "request rejected");
    }

    let body = json!({ "success": false, "error": err.public_message() }).to_string();

    let mut builder = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json");
    if let ServerError::MethodNotAllowed(allow) = &err {
        builder = builder.header("Allow", *allow);
    }

    builder
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
