// src/handlers/reports.rs
use crate::db::reports as store;
use crate::db::Database;
use crate::domain::{CreateReportRequest, NewReport, ReportId, ReportStatus};
use crate::errors::{ResultResp, ServerError};
use crate::handlers::read_json;
use crate::responses::{json_response, json_status_response};
use astra::Request;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

/// `POST /reports`
pub fn create_report(req: Request, db: &Database) -> ResultResp {
    let body: CreateReportRequest = read_json(req)?;
    let now = Utc::now();
    let report = NewReport::from_request(body, now)?;
    let id = ReportId::generate(now.timestamp());

    db.with_conn(|conn| store::insert_report(conn, &id, &report))?;
    tracing::info!(id = %id, title = %report.title, has_gps = report.gps.is_some(), "report created");

    json_status_response(201, &json!({ "success": true, "id": id.as_str() }))
}

/// `GET /reports`, newest first.
pub fn list_reports(db: &Database) -> ResultResp {
    let reports = db.with_conn(|conn| store::list_reports(conn))?;
    json_response(&reports)
}

/// `GET /reports/{id}`
pub fn get_report(raw_id: &str, db: &Database) -> ResultResp {
    let id = ReportId::parse(raw_id)?;
    let report = db
        .with_conn(|conn| store::find_report(conn, &id))?
        .ok_or_else(|| ServerError::NotFound("Report not found".into()))?;
    json_response(&report)
}

#[derive(Debug, Deserialize)]
struct StatusUpdate {
    status: Option<String>,
}

/// Only the three lifecycle values are accepted; anything else is a 400.
pub fn parse_target_status(raw: Option<&str>) -> Result<ReportStatus, ServerError> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::BadRequest("Status is required".into()))?;

    raw.parse().map_err(|_| {
        let allowed = ReportStatus::ALL.map(|s| s.as_str()).join(", ");
        ServerError::BadRequest(format!("Invalid status '{raw}'. Expected one of: {allowed}"))
    })
}

/// `PATCH /reports/{id}` with `{status}`. Re-applying the current status succeeds.
pub fn update_report_status(req: Request, raw_id: &str, db: &Database) -> ResultResp {
    let id = ReportId::parse(raw_id)?;
    let body: StatusUpdate = read_json(req)?;
    let status = parse_target_status(body.status.as_deref())?;

    let found = db.with_conn(|conn| store::update_status(conn, &id, status, Utc::now()))?;
    if !found {
        return Err(ServerError::NotFound("Report not found".into()));
    }
    tracing::info!(id = %id, status = %status, "report status updated");

    json_response(&json!({
        "success": true,
        "message": "Report status updated successfully"
    }))
}

/// `DELETE /reports/{id}`
pub fn delete_report(raw_id: &str, db: &Database) -> ResultResp {
    let id = ReportId::parse(raw_id)?;

    let found = db.with_conn(|conn| store::delete_report(conn, &id))?;
    if !found {
        return Err(ServerError::NotFound("Report not found".into()));
    }
    tracing::info!(id = %id, "report deleted");

    json_response(&json!({
        "success": true,
        "message": "Report deleted successfully"
    }))
}

/// `GET /reports/stats`
pub fn report_stats(db: &Database) -> ResultResp {
    let stats = db.with_conn(|conn| store::report_stats(conn))?;
    json_response(&stats)
}
