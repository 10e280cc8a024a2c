// src/handlers/upload.rs
use crate::errors::{ResultResp, ServerError};
use crate::handlers::read_body;
use crate::responses::json_response;
use crate::upload::{multipart_boundary, read_file_part, UploadStore, MAX_BODY_BYTES, TOO_LARGE};
use astra::{Body, Request, ResponseBuilder};
use chrono::Utc;
use serde_json::json;

/// `POST /upload`: multipart form with a `file` image part.
pub fn upload_photo(req: Request, store: &UploadStore) -> ResultResp {
    let content_type = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let boundary = multipart_boundary(content_type.as_deref())?;

    let body = read_body(req, MAX_BODY_BYTES, TOO_LARGE)?;
    let file = read_file_part(body, &boundary)?;
    file.validate()?;

    let name = store.save(&file, Utc::now().timestamp_millis())?;

    json_response(&json!({
        "success": true,
        "photoUrl": format!("/uploads/{name}"),
    }))
}

/// `GET /uploads/{file}`
pub fn serve_upload(name: &str, store: &UploadStore) -> ResultResp {
    let (data, content_type) = store.open(name)?;

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type.as_ref())
        .body(Body::from(data))
        .map_err(|_| ServerError::InternalError)
}
