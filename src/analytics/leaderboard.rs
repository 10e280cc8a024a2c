// src/analytics/leaderboard.rs

use super::{percent, ReporterEntry};
use crate::domain::ingest::DEFAULT_REPORTER;
use crate::domain::Report;
use std::collections::HashMap;

pub const LEADERBOARD_SIZE: usize = 5;

/// Reporters ranked by points (submitted + resolved). The sort is stable,
/// so ties keep first-seen order.
pub fn top_reporters(reports: &[Report]) -> Vec<ReporterEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<(&str, usize, usize)> = Vec::new();

    for report in reports {
        let name = if report.reporter.is_empty() {
            DEFAULT_REPORTER
        } else {
            report.reporter.as_str()
        };

        let slot = *index.entry(name).or_insert_with(|| {
            tallies.push((name, 0, 0));
            tallies.len() - 1
        });

        tallies[slot].1 += 1;
        if report.is_resolved() {
            tallies[slot].2 += 1;
        }
    }

    let mut entries: Vec<ReporterEntry> = tallies
        .into_iter()
        .map(|(name, reports, resolved)| ReporterEntry {
            id: name.to_string(),
            name: name.to_string(),
            reports,
            resolved,
            points: reports + resolved,
            resolution_rate: percent(resolved, reports),
        })
        .collect();

    entries.sort_by(|a, b| b.points.cmp(&a.points));
    entries.truncate(LEADERBOARD_SIZE);
    entries
}
