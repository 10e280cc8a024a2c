use crate::db::Database;
use crate::errors::{ResultResp, ServerError};
use crate::handlers::{analytics, health, reports, upload};
use crate::upload::UploadStore;
use astra::Request;

/// Everything a request handler may touch. Shared read-only across workers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub uploads: UploadStore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    Reports,
    ReportStats,
    ReportAnalytics,
    Report(&'a str),
    Upload,
    UploadedFile(&'a str),
    TestDb,
}

/// Map a path onto a route. The `/api` prefix used by the web client is optional.
fn resolve_route(path: &str) -> Option<Route<'_>> {
    let mut segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if segments.len() > 1 && segments[0] == "api" {
        segments.remove(0);
    }

    match segments.as_slice() {
        ["reports"] => Some(Route::Reports),
        ["reports", "stats"] => Some(Route::ReportStats),
        ["reports", "analytics"] => Some(Route::ReportAnalytics),
        ["reports", id] => Some(Route::Report(*id)),
        ["upload"] => Some(Route::Upload),
        ["uploads", name] => Some(Route::UploadedFile(*name)),
        ["test-db"] => Some(Route::TestDb),
        _ => None,
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let db = &state.db;

    let Some(route) = resolve_route(&path) else {
        return Err(ServerError::NotFound("Not found".into()));
    };

    match (route, method.as_str()) {
        (Route::Reports, "GET") => reports::list_reports(db),
        (Route::Reports, "POST") => reports::create_report(req, db),
        (Route::Reports, _) => Err(ServerError::MethodNotAllowed("GET, POST")),

        (Route::ReportStats, "GET") => reports::report_stats(db),
        (Route::ReportStats, _) => Err(ServerError::MethodNotAllowed("GET")),

        (Route::ReportAnalytics, "GET") => analytics::get_analytics(db),
        (Route::ReportAnalytics, _) => Err(ServerError::MethodNotAllowed("GET")),

        (Route::Report(id), "GET") => reports::get_report(id, db),
        (Route::Report(id), "PATCH") => reports::update_report_status(req, id, db),
        (Route::Report(id), "DELETE") => reports::delete_report(id, db),
        (Route::Report(_), _) => Err(ServerError::MethodNotAllowed("GET, PATCH, DELETE")),

        (Route::Upload, "POST") => upload::upload_photo(req, &state.uploads),
        (Route::Upload, _) => Err(ServerError::MethodNotAllowed("POST")),

        (Route::UploadedFile(name), "GET") => upload::serve_upload(name, &state.uploads),
        (Route::UploadedFile(_), _) => Err(ServerError::MethodNotAllowed("GET")),

        (Route::TestDb, "GET") => health::db_check(db),
        (Route::TestDb, "POST") => health::seed(db),
        (Route::TestDb, _) => Err(ServerError::MethodNotAllowed("GET, POST")),
    }
}
