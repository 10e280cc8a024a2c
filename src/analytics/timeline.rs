// src/analytics/timeline.rs

use super::TimelinePoint;
use crate::domain::Report;
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

pub const TIMELINE_DAYS: u64 = 30;

/// A calendar day in some time zone, with its inclusive `[start, end]` instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    /// Midnight to 23:59:59.999 local time. `None` only if the zone has no
    /// representable instant for the day at all.
    pub fn new<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Option<Self> {
        let start = tz
            .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
            .earliest()
            // Midnight skipped by a DST jump: the day starts at 01:00.
            .or_else(|| tz.from_local_datetime(&date.and_hms_opt(1, 0, 0)?).earliest())?;
        let end = tz
            .from_local_datetime(&date.and_hms_milli_opt(23, 59, 59, 999)?)
            .latest()?;

        Some(DayWindow {
            date,
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        })
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }

    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Short label such as `Oct 3`.
    pub fn display_label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// The `n` calendar days ending today (inclusive), oldest first.
pub fn trailing_days<Tz: TimeZone>(now: &DateTime<Tz>, n: u64) -> Vec<DayWindow> {
    let tz = now.timezone();
    let today = now.date_naive();

    (0..n)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .filter_map(|date| DayWindow::new(&tz, date))
        .collect()
}

/// Reports created per day over the last 30 days. Reports without a
/// readable creation time are left out.
pub fn daily_timeline<Tz: TimeZone>(reports: &[Report], now: &DateTime<Tz>) -> Vec<TimelinePoint> {
    trailing_days(now, TIMELINE_DAYS)
        .into_iter()
        .map(|day| TimelinePoint {
            date: day.date_label(),
            display_date: day.display_label(),
            count: reports
                .iter()
                .filter_map(|r| r.created_at)
                .filter(|ts| day.contains(*ts))
                .count(),
        })
        .collect()
}
