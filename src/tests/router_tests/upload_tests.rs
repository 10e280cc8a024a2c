use crate::tests::utils::{body_bytes, body_json, init_test_state, send};
use astra::Body;
use http::{Method, Request};

const BOUNDARY: &str = "----wastetrackerboundary";

fn multipart_body(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n").as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload(state: &crate::router::AppState, body: Vec<u8>) -> astra::Response {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/upload")
        .header("Content-Type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap();

    match crate::router::handle(req, state) {
        Ok(resp) => resp,
        Err(err) => crate::responses::error_to_response(err),
    }
}

#[test]
fn image_upload_is_stored_and_served() {
    let state = init_test_state();
    let png = b"\x89PNG\r\n\x1a\nfake-image-bytes";

    let resp = upload(&state, multipart_body("file", "photo.png", "image/png", png));
    assert_eq!(resp.status(), 200);
    let body = body_json(resp);
    assert_eq!(body["success"], true);

    let url = body["photoUrl"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/report_"));
    assert!(url.ends_with(".png"));

    let served = send(&state, Method::GET, &url, Body::empty());
    assert_eq!(served.status(), 200);
    assert_eq!(served.headers().get("Content-Type").unwrap(), "image/png");
    assert_eq!(body_bytes(served), png.to_vec());
}

#[test]
fn non_image_uploads_are_rejected() {
    let state = init_test_state();
    let resp = upload(&state, multipart_body("file", "notes.txt", "text/plain", b"hello"));
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "Invalid file type. Only images are allowed.");
}

#[test]
fn form_without_file_is_rejected() {
    let state = init_test_state();
    let resp = upload(&state, multipart_body("avatar", "a.png", "image/png", b"x"));
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "No file uploaded");
}

#[test]
fn oversize_upload_is_rejected() {
    let state = init_test_state();
    let big = vec![0u8; 5 * 1024 * 1024 + 1];
    let resp = upload(&state, multipart_body("file", "big.png", "image/png", &big));
    assert_eq!(resp.status(), 400);
    assert_eq!(body_json(resp)["error"], "File too large. Maximum size is 5MB.");
}

#[test]
fn upload_requires_multipart() {
    let state = init_test_state();
    let resp = send(&state, Method::POST, "/upload", Body::from("{}"));
    assert_eq!(resp.status(), 400);
}

#[test]
fn missing_upload_is_404() {
    let state = init_test_state();
    let resp = send(&state, Method::GET, "/uploads/report_0_0000.png", Body::empty());
    assert_eq!(resp.status(), 404);
}
