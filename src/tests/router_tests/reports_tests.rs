use crate::tests::utils::{create_report, init_test_state, send, send_json};
use astra::Body;
use chrono::{DateTime, Duration, Utc};
use http::Method;
use serde_json::json;

const MISSING_ID: &str = "65a1b2c3d4e5f60718293a4b";

#[test]
fn created_report_reads_back_as_submitted() {
    let state = init_test_state();
    let before = Utc::now() - Duration::milliseconds(1);

    let id = create_report(
        &state,
        json!({"title": "Overflowing bin", "description": "Bin on 5th cross is full"}),
    );
    let after = Utc::now();

    let (status, report) = send_json(&state, Method::GET, &format!("/reports/{id}"), None);
    assert_eq!(status, 200);
    assert_eq!(report["id"], id.as_str());
    assert_eq!(report["status"], "Submitted");
    assert_eq!(report["reporter"], "Anonymous");
    assert_eq!(report["contact"], "Not provided");
    assert!(report["gps"].is_null());

    let created_at = DateTime::parse_from_rfc3339(report["createdAt"].as_str().unwrap())
        .unwrap()
        .with_timezone(&Utc);
    assert!(created_at >= before && created_at <= after, "createdAt {created_at} outside request window");
}

#[test]
fn create_normalises_gps_and_keeps_location_details() {
    let state = init_test_state();
    let id = create_report(
        &state,
        json!({
            "title": "Illegal dumping",
            "description": "Debris behind the market",
            "gps": "12.9716, 77.5946",
            "locationDetails": {"area": "Koramangala", "locality": "Bengaluru"},
            "photoUrl": "/uploads/report_1.png",
            "reporter": "Asha",
            "contact": "asha@example.com"
        }),
    );

    let (_, report) = send_json(&state, Method::GET, &format!("/api/reports/{id}"), None);
    assert_eq!(report["gps"], json!({"latitude": 12.9716, "longitude": 77.5946}));
    assert_eq!(report["locationDetails"]["area"], "Koramangala");
    assert_eq!(report["photoUrl"], "/uploads/report_1.png");
    assert_eq!(report["reporter"], "Asha");
}

#[test]
fn invalid_gps_is_dropped_not_rejected() {
    let state = init_test_state();
    let id = create_report(
        &state,
        json!({"title": "Broken bench", "description": "Snapped", "gps": "somewhere"}),
    );
    let (_, report) = send_json(&state, Method::GET, &format!("/reports/{id}"), None);
    assert!(report["gps"].is_null());
}

#[test]
fn gps_with_compass_suffixes_is_kept() {
    let state = init_test_state();
    let id = create_report(
        &state,
        json!({"title": "Overflowing bin", "description": "d", "gps": "12.9716 N, 77.5946 E"}),
    );
    let (_, report) = send_json(&state, Method::GET, &format!("/reports/{id}"), None);
    assert_eq!(report["gps"], json!({"latitude": 12.9716, "longitude": 77.5946}));
}

#[test]
fn missing_title_or_description_is_400() {
    let state = init_test_state();
    for body in [
        json!({"description": "no title"}),
        json!({"title": "no description"}),
        json!({"title": "", "description": "empty title"}),
    ] {
        let (status, resp) = send_json(&state, Method::POST, "/reports", Some(body));
        assert_eq!(status, 400);
        assert_eq!(resp["success"], false);
        assert_eq!(resp["error"], "Title and description are required");
    }

    let (_, list) = send_json(&state, Method::GET, "/reports", None);
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[test]
fn malformed_json_is_400() {
    let state = init_test_state();
    let resp = send(&state, Method::POST, "/reports", Body::from("{not json"));
    assert_eq!(resp.status(), 400);
}

#[test]
fn list_is_newest_first() {
    let state = init_test_state();
    let first = create_report(&state, json!({"title": "first", "description": "d"}));
    let second = create_report(&state, json!({"title": "second", "description": "d"}));

    let (status, list) = send_json(&state, Method::GET, "/reports", None);
    assert_eq!(status, 200);
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[test]
fn malformed_ids_are_400_on_every_id_route() {
    let state = init_test_state();
    for bad in ["123", "not-an-object-id", "zzzzzzzzzzzzzzzzzzzzzzzz"] {
        let uri = format!("/reports/{bad}");
        let (get, _) = send_json(&state, Method::GET, &uri, None);
        let (patch, _) = send_json(&state, Method::PATCH, &uri, Some(json!({"status": "Resolved"})));
        let (delete, body) = send_json(&state, Method::DELETE, &uri, None);
        assert_eq!((get, patch, delete), (400, 400, 400), "id {bad}");
        assert_eq!(body["error"], "Invalid report ID format");
    }
}

#[test]
fn unknown_ids_are_404() {
    let state = init_test_state();
    let uri = format!("/reports/{MISSING_ID}");

    let (get, body) = send_json(&state, Method::GET, &uri, None);
    let (patch, _) = send_json(&state, Method::PATCH, &uri, Some(json!({"status": "Resolved"})));
    let (delete, _) = send_json(&state, Method::DELETE, &uri, None);
    assert_eq!((get, patch, delete), (404, 404, 404));
    assert_eq!(body["error"], "Report not found");
}

#[test]
fn delete_removes_the_report() {
    let state = init_test_state();
    let id = create_report(&state, json!({"title": "t", "description": "d"}));
    let uri = format!("/reports/{id}");

    let (status, body) = send_json(&state, Method::DELETE, &uri, None);
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Report deleted successfully");

    let (status, _) = send_json(&state, Method::GET, &uri, None);
    assert_eq!(status, 404);
    let (status, _) = send_json(&state, Method::DELETE, &uri, None);
    assert_eq!(status, 404);
}

#[test]
fn stats_count_by_status() {
    let state = init_test_state();
    let (_, empty) = send_json(&state, Method::GET, "/reports/stats", None);
    assert_eq!(empty, json!({"totalReports": 0, "inProgress": 0, "resolved": 0, "successRate": 0}));

    let a = create_report(&state, json!({"title": "a", "description": "d"}));
    let b = create_report(&state, json!({"title": "b", "description": "d"}));
    create_report(&state, json!({"title": "c", "description": "d"}));
    send_json(&state, Method::PATCH, &format!("/reports/{a}"), Some(json!({"status": "Resolved"})));
    send_json(&state, Method::PATCH, &format!("/reports/{b}"), Some(json!({"status": "In Progress"})));

    let (status, stats) = send_json(&state, Method::GET, "/reports/stats", None);
    assert_eq!(status, 200);
    assert_eq!(stats, json!({"totalReports": 3, "inProgress": 1, "resolved": 1, "successRate": 33}));
}

#[test]
fn unsupported_methods_are_405() {
    let state = init_test_state();
    let cases = [
        (Method::PUT, "/reports".to_string(), "GET, POST"),
        (Method::DELETE, "/reports".to_string(), "GET, POST"),
        (Method::POST, format!("/reports/{MISSING_ID}"), "GET, PATCH, DELETE"),
        (Method::PUT, format!("/reports/{MISSING_ID}"), "GET, PATCH, DELETE"),
        (Method::POST, "/reports/analytics".to_string(), "GET"),
        (Method::GET, "/upload".to_string(), "POST"),
    ];
    for (method, uri, allow) in cases {
        let resp = send(&state, method.clone(), &uri, Body::empty());
        assert_eq!(resp.status(), 405, "{method} {uri}");
        assert_eq!(resp.headers().get("Allow").unwrap().to_str().unwrap(), allow);
    }
}

#[test]
fn unknown_paths_are_404() {
    let state = init_test_state();
    let (status, body) = send_json(&state, Method::GET, "/nowhere", None);
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}
