// src/db/seed.rs
use crate::db::reports::insert_report;
use crate::domain::ingest::{DEFAULT_CONTACT, DEFAULT_REPORTER};
use crate::domain::{Gps, NewReport, ReportId, ReportStatus};
use crate::errors::ServerError;
use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

// (title, description, status, days ago, lat, lng)
const SAMPLES: [(&str, &str, ReportStatus, i64, f64, f64); 8] = [
    ("Overflowing bin on Main Street", "The garbage bin is completely full and trash is spilling out", ReportStatus::Submitted, 2, 40.7128, -74.0060),
    ("Illegal dumping in park", "Someone dumped construction debris in the park", ReportStatus::InProgress, 1, 40.7589, -73.9851),
    ("Recycling bin request", "Need a new recycling bin for apartment building", ReportStatus::Resolved, 5, 40.7505, -73.9934),
    ("Broken equipment at waste facility", "The compactor is not working properly", ReportStatus::Resolved, 3, 40.7648, -73.9808),
    ("Overflowing bin in residential area", "Multiple bins are overflowing in the neighborhood", ReportStatus::Submitted, 1, 40.7829, -73.9654),
    ("Illegal dumping near river", "Large amount of waste dumped near the river", ReportStatus::InProgress, 4, 40.7614, -73.9776),
    ("Recycling program expansion request", "Request to expand recycling program to more areas", ReportStatus::Resolved, 7, 40.7505, -73.9934),
    ("Broken trash compactor", "The industrial trash compactor needs repair", ReportStatus::Submitted, 2, 40.7648, -73.9808),
];

/// Replace the whole store with a fixed sample set. Returns the number inserted.
pub fn seed_sample_reports(conn: &mut Connection, now: DateTime<Utc>) -> Result<usize, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

    tx.execute("delete from reports", [])
        .map_err(|e| ServerError::DbError(format!("clear reports failed: {e}")))?;

    for (title, description, status, days_ago, latitude, longitude) in SAMPLES {
        let created_at = now - Duration::days(days_ago);
        let report = NewReport {
            title: title.to_string(),
            description: description.to_string(),
            status,
            created_at,
            gps: Some(Gps { latitude, longitude }),
            location_details: None,
            photo_url: None,
            reporter: DEFAULT_REPORTER.to_string(),
            contact: DEFAULT_CONTACT.to_string(),
        };
        insert_report(&tx, &ReportId::generate(created_at.timestamp()), &report)?;
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(format!("commit failed: {e}")))?;

    tracing::info!(count = SAMPLES.len(), "seeded sample reports");
    Ok(SAMPLES.len())
}
