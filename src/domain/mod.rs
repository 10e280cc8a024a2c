pub mod ingest;
pub mod report;
pub mod report_id;

pub use ingest::{CreateReportRequest, NewReport};
pub use report::{Gps, LocationDetails, Report, ReportStatus};
pub use report_id::ReportId;
