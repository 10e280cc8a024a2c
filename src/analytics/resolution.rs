// src/analytics/resolution.rs

use super::timeline::trailing_days;
use super::{percent, rounded_mean, DailyResolution, ResolutionMetrics, ResolutionTrend, TrendDirection};
use crate::domain::Report;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Resolved within this many whole days counts as on time.
pub const ON_TIME_DAYS: i64 = 7;

const MS_PER_DAY: i64 = 86_400_000;

/// Whole days from creation to resolution, floored and clamped at zero.
/// Missing timestamps count as zero days.
pub fn resolution_days(report: &Report) -> i64 {
    match (report.created_at, report.resolution_timestamp()) {
        (Some(created), Some(resolved)) => (resolved - created)
            .num_milliseconds()
            .div_euclid(MS_PER_DAY)
            .max(0),
        _ => 0,
    }
}

fn mean_days<'a>(reports: impl Iterator<Item = &'a Report>) -> i64 {
    let days: Vec<i64> = reports.map(resolution_days).collect();
    rounded_mean(&days)
}

pub fn resolution_metrics<Tz: TimeZone>(reports: &[Report], now: &DateTime<Tz>) -> ResolutionMetrics {
    let resolved: Vec<&Report> = reports.iter().filter(|r| r.is_resolved()).collect();
    let on_time = resolved
        .iter()
        .filter(|r| resolution_days(r) <= ON_TIME_DAYS)
        .count();

    ResolutionMetrics {
        average_resolution_time: mean_days(resolved.iter().copied()),
        on_time_percentage: percent(on_time, resolved.len()),
        delayed_percentage: percent(resolved.len() - on_time, resolved.len()),
        trend: resolution_trend(&resolved, now),
        weekly_data: weekly_resolution(&resolved, now),
    }
}

/// Mean resolution time of reports resolved in the last 7 days against the 7 days before.
pub fn resolution_trend<Tz: TimeZone>(resolved: &[&Report], now: &DateTime<Tz>) -> ResolutionTrend {
    let now = now.with_timezone(&Utc);
    let one_week_ago = now - Duration::days(7);
    let two_weeks_ago = now - Duration::days(14);

    let current = mean_days(
        resolved
            .iter()
            .copied()
            .filter(|r| r.resolution_timestamp().is_some_and(|ts| ts >= one_week_ago)),
    );
    let previous = mean_days(resolved.iter().copied().filter(|r| {
        r.resolution_timestamp()
            .is_some_and(|ts| ts >= two_weeks_ago && ts < one_week_ago)
    }));

    let (change, direction) = if previous > 0 {
        let direction = if current < previous {
            TrendDirection::Faster
        } else {
            TrendDirection::Slower
        };
        (current - previous, direction)
    } else {
        (0, TrendDirection::Stable)
    };

    ResolutionTrend {
        current,
        previous,
        change,
        direction,
    }
}

/// Average resolution time per day, for reports resolved on each of the last 7 days.
pub fn weekly_resolution<Tz: TimeZone>(resolved: &[&Report], now: &DateTime<Tz>) -> Vec<DailyResolution> {
    trailing_days(now, 7)
        .into_iter()
        .map(|day| DailyResolution {
            date: day.date_label(),
            display_date: day.display_label(),
            avg_time: mean_days(
                resolved
                    .iter()
                    .copied()
                    .filter(|r| r.resolution_timestamp().is_some_and(|ts| day.contains(ts))),
            ),
        })
        .collect()
}
