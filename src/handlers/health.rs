// src/handlers/health.rs
use crate::db::connection::list_tables;
use crate::db::seed::seed_sample_reports;
use crate::db::Database;
use crate::errors::ResultResp;
use crate::responses::json_response;
use chrono::Utc;
use serde_json::json;

/// `GET /test-db`: confirms the store is reachable and lists its tables.
pub fn db_check(db: &Database) -> ResultResp {
    let tables = list_tables(db)?;
    json_response(&json!({
        "success": true,
        "message": "Database connection successful",
        "tables": tables,
    }))
}

/// `POST /test-db`: wipes the store and loads the sample reports.
pub fn seed(db: &Database) -> ResultResp {
    let inserted = db.with_conn(|conn| seed_sample_reports(conn, Utc::now()))?;
    json_response(&json!({
        "success": true,
        "message": "Sample data added successfully",
        "insertedCount": inserted,
    }))
}
