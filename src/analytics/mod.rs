//! Report analytics: everything the dashboard charts, derived in one pass
//! over a snapshot of the store.
//!
//! The whole aggregation is a pure function of `(reports, now)`. Callers pick
//! the time zone through `now`; the HTTP handler uses `Local`.

pub mod areas;
pub mod classify;
pub mod leaderboard;
pub mod resolution;
pub mod timeline;
pub mod types;

use crate::domain::{Report, ReportStatus};
use chrono::{DateTime, TimeZone};

pub use types::*;

/// Standard half-up rounding to an integer (`2.5 -> 3`).
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// `round(part / whole * 100)`, or `0` when `whole` is zero.
pub fn percent(part: usize, whole: usize) -> i64 {
    if whole == 0 {
        return 0;
    }
    round_half_up(part as f64 / whole as f64 * 100.0)
}

/// Rounded mean, or `0` for an empty input.
pub fn rounded_mean(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: i64 = values.iter().sum();
    round_half_up(sum as f64 / values.len() as f64)
}

pub fn build<Tz: TimeZone>(reports: &[Report], now: &DateTime<Tz>) -> Analytics {
    let total = reports.len();
    let resolved = reports.iter().filter(|r| r.is_resolved()).count();

    let area_stats = areas::area_stats(reports);
    let resolution_metrics = resolution::resolution_metrics(reports, now);

    Analytics {
        metrics: Metrics {
            total_reports: total,
            resolution_rate: percent(resolved, total),
            avg_response_time: resolution_metrics.average_resolution_time,
            active_areas: area_stats.len(),
        },
        reports_by_type: classify::reports_by_type(reports),
        status_distribution: status_distribution(reports),
        timeline_data: timeline::daily_timeline(reports, now),
        waste_category_data: classify::waste_categories(reports),
        resolution_metrics,
        top_reporters: leaderboard::top_reporters(reports),
        reports_by_area: areas::reports_by_area(&area_stats),
        cleanest_areas: areas::cleanest_areas(&area_stats),
        most_reported_areas: areas::most_reported_areas(&area_stats),
    }
}

const STATUS_COLORS: [(ReportStatus, &str); 3] = [
    (ReportStatus::Submitted, "#fbbf24"),
    (ReportStatus::InProgress, "#3b82f6"),
    (ReportStatus::Resolved, "#10b981"),
];

/// Count per status in fixed display order. Zero entries are kept; the
/// chart filters them out.
pub fn status_distribution(reports: &[Report]) -> Vec<ChartSlice> {
    STATUS_COLORS
        .iter()
        .map(|(status, color)| ChartSlice {
            name: status.as_str().to_string(),
            value: reports.iter().filter(|r| r.status == *status).count(),
            color: color.to_string(),
        })
        .collect()
}
