pub mod analytics;
pub mod health;
pub mod reports;
pub mod upload;

use crate::errors::ServerError;
use astra::Request;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Largest JSON body accepted by the report endpoints.
pub const MAX_JSON_BYTES: u64 = 1024 * 1024;

/// Read the whole request body, refusing anything over `limit` bytes.
pub fn read_body(req: Request, limit: u64, too_large: &str) -> Result<Vec<u8>, ServerError> {
    let mut body = req.into_body();
    let mut buf = Vec::new();
    body.reader()
        .take(limit + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;

    if buf.len() as u64 > limit {
        return Err(ServerError::BadRequest(too_large.to_string()));
    }
    Ok(buf)
}

pub fn read_json<T: DeserializeOwned>(req: Request) -> Result<T, ServerError> {
    let body = read_body(req, MAX_JSON_BYTES, "Request body too large")?;
    serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {e}")))
}
