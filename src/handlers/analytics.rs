// src/handlers/analytics.rs
use crate::analytics;
use crate::db::reports::snapshot;
use crate::db::Database;
use crate::errors::ResultResp;
use crate::responses::json_response;
use chrono::Local;
use std::time::Instant;

/// `GET /reports/analytics`: one read of the store, then pure computation.
pub fn get_analytics(db: &Database) -> ResultResp {
    let reports = db.with_conn(|conn| snapshot(conn))?;

    let started = Instant::now();
    let result = analytics::build(&reports, &Local::now());
    tracing::debug!(
        reports = reports.len(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "analytics computed"
    );

    json_response(&result)
}
