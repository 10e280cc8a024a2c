use crate::domain::report::format_timestamp;
use crate::tests::utils::{create_report, exec_sql, init_test_state, send_json};
use chrono::{Duration, Local, Utc};
use http::Method;
use serde_json::{json, Value};

fn analytics(state: &crate::router::AppState) -> Value {
    let (status, body) = send_json(state, Method::GET, "/reports/analytics", None);
    assert_eq!(status, 200, "analytics failed: {body}");
    body
}

#[test]
fn empty_store_yields_zeroes() {
    let state = init_test_state();
    let body = analytics(&state);

    assert_eq!(
        body["metrics"],
        json!({"totalReports": 0, "resolutionRate": 0, "avgResponseTime": 0, "activeAreas": 0})
    );
    assert_eq!(body["reportsByType"], json!([]));
    assert_eq!(body["timelineData"].as_array().unwrap().len(), 30);
    assert_eq!(body["resolutionMetrics"]["weeklyData"].as_array().unwrap().len(), 7);
    assert_eq!(body["resolutionMetrics"]["trend"]["direction"], "stable");
    assert_eq!(body["topReporters"], json!([]));
}

#[test]
fn titles_are_classified_by_keyword() {
    let state = init_test_state();
    for title in ["Overflowing bin", "Illegal dumping", "xyz"] {
        create_report(&state, json!({"title": title, "description": "d"}));
    }

    let body = analytics(&state);
    assert_eq!(
        body["reportsByType"],
        json!([
            {"type": "Overflowing Bin", "count": 1, "color": "bg-yellow-500"},
            {"type": "Illegal Dumping", "count": 1, "color": "bg-red-500"},
            {"type": "Other", "count": 1, "color": "bg-green-500"}
        ])
    );
    assert_eq!(body["metrics"]["totalReports"], 3);
}

#[test]
fn three_day_resolution_is_on_time() {
    let state = init_test_state();
    let id = create_report(&state, json!({"title": "Overflowing bin", "description": "d"}));

    let created = Utc::now() - Duration::days(20);
    let resolved = created + Duration::days(3);
    exec_sql(
        &state,
        "update reports set status = 'Resolved', created_at = ?1, resolved_at = ?2 where id = ?3",
        &[&format_timestamp(created), &format_timestamp(resolved), &id],
    );

    let metrics = &analytics(&state)["resolutionMetrics"];
    assert_eq!(metrics["averageResolutionTime"], 3);
    assert_eq!(metrics["onTimePercentage"], 100);
    assert_eq!(metrics["delayedPercentage"], 0);
}

#[test]
fn reports_without_location_share_unknown_area() {
    let state = init_test_state();
    create_report(&state, json!({"title": "a", "description": "d", "gps": null}));
    create_report(&state, json!({"title": "b", "description": "d"}));

    let body = analytics(&state);
    assert_eq!(body["metrics"]["activeAreas"], 1);
    assert_eq!(
        body["reportsByArea"],
        json!([{"area": "Unknown Area", "count": 2, "percentage": 100}])
    );
}

#[test]
fn gps_only_reports_bucket_into_the_locality_table() {
    let state = init_test_state();
    create_report(&state, json!({"title": "a", "description": "d", "gps": {"latitude": 12.9716, "longitude": 77.5946}}));
    create_report(&state, json!({"title": "b", "description": "d", "locationDetails": {"subLocality": "Green Park"}}));

    let body = analytics(&state);
    let areas: Vec<&str> = body["reportsByArea"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["area"].as_str().unwrap())
        .collect();
    assert_eq!(areas, vec!["Whitefield", "Green Park"]);
    assert_eq!(body["mostReportedAreas"].as_array().unwrap().len(), 2);
}

#[test]
fn new_reports_land_in_todays_timeline_bucket() {
    let state = init_test_state();
    create_report(&state, json!({"title": "a", "description": "d"}));
    create_report(&state, json!({"title": "b", "description": "d"}));

    let body = analytics(&state);
    let timeline = body["timelineData"].as_array().unwrap();
    let today = Local::now().format("%Y-%m-%d").to_string();
    let last = &timeline[29];
    assert_eq!(last["date"], today.as_str());
    assert_eq!(last["count"], 2);

    let total: u64 = timeline.iter().map(|p| p["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 2);
}

#[test]
fn leaderboard_ranks_by_points() {
    let state = init_test_state();
    let a = create_report(&state, json!({"title": "a", "description": "d", "reporter": "Ravi"}));
    create_report(&state, json!({"title": "b", "description": "d", "reporter": "Asha"}));
    create_report(&state, json!({"title": "c", "description": "d", "reporter": "Asha"}));
    create_report(&state, json!({"title": "d", "description": "d"}));
    send_json(&state, Method::PATCH, &format!("/reports/{a}"), Some(json!({"status": "Resolved"})));

    let board = analytics(&state)["topReporters"].clone();
    let ranked: Vec<(&str, u64)> = board
        .as_array()
        .unwrap()
        .iter()
        .map(|e| (e["name"].as_str().unwrap(), e["points"].as_u64().unwrap()))
        .collect();
    // Ravi (1 + 1) ties with Asha (2 + 0) and was seen first.
    assert_eq!(ranked, vec![("Ravi", 2), ("Asha", 2), ("Anonymous", 1)]);
    assert_eq!(board[0]["resolutionRate"], 100);
}

#[test]
fn status_distribution_lists_all_three() {
    let state = init_test_state();
    let id = create_report(&state, json!({"title": "a", "description": "d"}));
    create_report(&state, json!({"title": "b", "description": "d"}));
    send_json(&state, Method::PATCH, &format!("/reports/{id}"), Some(json!({"status": "In Progress"})));

    let body = analytics(&state);
    assert_eq!(
        body["statusDistribution"],
        json!([
            {"name": "Submitted", "value": 1, "color": "#fbbf24"},
            {"name": "In Progress", "value": 1, "color": "#3b82f6"},
            {"name": "Resolved", "value": 0, "color": "#10b981"}
        ])
    );
    assert_eq!(body["metrics"]["resolutionRate"], 0);
}

#[test]
fn corrupt_rows_fail_the_whole_request() {
    let state = init_test_state();
    let id = create_report(&state, json!({"title": "a", "description": "d"}));
    exec_sql(&state, "update reports set location_details = '{broken' where id = ?1", &[&id]);

    let (status, body) = send_json(&state, Method::GET, "/reports/analytics", None);
    assert_eq!(status, 500);
    assert_eq!(body, json!({"success": false, "error": "Internal server error"}));
}
