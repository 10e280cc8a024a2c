// src/db/reports.rs
use crate::domain::report::{format_timestamp, parse_timestamp};
use crate::domain::{Gps, LocationDetails, NewReport, Report, ReportId, ReportStatus};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;

const SELECT_REPORT: &str = r#"
    select
        id,                 -- 0
        title,              -- 1
        description,        -- 2
        status,             -- 3
        created_at,         -- 4
        updated_at,         -- 5
        resolved_at,        -- 6
        latitude,           -- 7
        longitude,          -- 8
        location_details,   -- 9
        photo_url,          -- 10
        reporter,           -- 11
        contact             -- 12
    from reports
"#;

/// Summary counters for `GET /reports/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total_reports: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub success_rate: i64,
}

fn row_to_report(row: &Row<'_>) -> rusqlite::Result<Report> {
    let stamp = |idx: usize| -> rusqlite::Result<Option<DateTime<Utc>>> {
        Ok(row
            .get::<_, Option<String>>(idx)?
            .as_deref()
            .and_then(parse_timestamp))
    };

    let latitude: Option<f64> = row.get(7)?;
    let longitude: Option<f64> = row.get(8)?;
    let gps = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Gps { latitude, longitude }),
        _ => None,
    };

    let location_details = match row.get::<_, Option<String>>(9)? {
        Some(raw) => Some(serde_json::from_str::<LocationDetails>(&raw).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?),
        None => None,
    };

    Ok(Report {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        created_at: stamp(4)?,
        updated_at: stamp(5)?,
        resolved_at: stamp(6)?,
        gps,
        location_details,
        photo_url: row.get(10)?,
        reporter: row.get(11)?,
        contact: row.get(12)?,
    })
}

/// Insert a validated report under the given id.
pub fn insert_report(conn: &Connection, id: &ReportId, report: &NewReport) -> Result<(), ServerError> {
    let location_json = report
        .location_details
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ServerError::DbError(format!("encode location details failed: {e}")))?;

    conn.execute(
        r#"
        insert into reports (
            id, title, description, status, created_at,
            latitude, longitude, location_details, photo_url, reporter, contact
        ) values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            id.as_str(),
            report.title,
            report.description,
            report.status,
            format_timestamp(report.created_at),
            report.gps.map(|g| g.latitude),
            report.gps.map(|g| g.longitude),
            location_json,
            report.photo_url,
            report.reporter,
            report.contact,
        ],
    )
    .map_err(|e| ServerError::DbError(format!("insert report failed: {e}")))?;

    Ok(())
}

/// All reports, newest first.
pub fn list_reports(conn: &Connection) -> Result<Vec<Report>, ServerError> {
    query_reports(conn, &format!("{SELECT_REPORT} order by created_at desc, rowid desc"))
}

/// All reports in insertion order: the snapshot analytics works from.
pub fn snapshot(conn: &Connection) -> Result<Vec<Report>, ServerError> {
    query_reports(conn, &format!("{SELECT_REPORT} order by rowid"))
}

fn query_reports(conn: &Connection, sql: &str) -> Result<Vec<Report>, ServerError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], row_to_report)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(row.map_err(|e| ServerError::DbError(format!("read report failed: {e}")))?);
    }
    Ok(out)
}

pub fn find_report(conn: &Connection, id: &ReportId) -> Result<Option<Report>, ServerError> {
    conn.query_row(
        &format!("{SELECT_REPORT} where id = ?"),
        params![id.as_str()],
        row_to_report,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("find report failed: {e}")))
}

/// Set a report's status. Returns `false` when no report has that id.
///
/// `resolved_at` is stamped on entry into `Resolved`, kept while the report
/// stays resolved, and cleared when it leaves.
pub fn update_status(
    conn: &Connection,
    id: &ReportId,
    status: ReportStatus,
    now: DateTime<Utc>,
) -> Result<bool, ServerError> {
    let changed = conn
        .execute(
            r#"
            update reports set
                resolved_at = case
                    when ?1 = 'Resolved' and status = 'Resolved' then resolved_at
                    when ?1 = 'Resolved' then ?2
                    else null
                end,
                status = ?1,
                updated_at = ?2
            where id = ?3
            "#,
            params![status, format_timestamp(now), id.as_str()],
        )
        .map_err(|e| ServerError::DbError(format!("update status failed: {e}")))?;

    Ok(changed > 0)
}

/// Returns `false` when no report has that id.
pub fn delete_report(conn: &Connection, id: &ReportId) -> Result<bool, ServerError> {
    let deleted = conn
        .execute("delete from reports where id = ?", params![id.as_str()])
        .map_err(|e| ServerError::DbError(format!("delete report failed: {e}")))?;

    Ok(deleted > 0)
}

pub fn report_stats(conn: &Connection) -> Result<ReportStats, ServerError> {
    let (total_reports, in_progress, resolved): (i64, i64, i64) = conn
        .query_row(
            r#"
            select
                count(*),
                coalesce(sum(status = 'In Progress'), 0),
                coalesce(sum(status = 'Resolved'), 0)
            from reports
            "#,
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .map_err(|e| ServerError::DbError(format!("count reports failed: {e}")))?;

    Ok(ReportStats {
        total_reports,
        in_progress,
        resolved,
        success_rate: crate::analytics::percent(resolved as usize, total_reports as usize),
    })
}
