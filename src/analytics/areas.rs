// src/analytics/areas.rs

use super::{percent, AreaCount, AreaReports, AreaScore};
use crate::domain::{Gps, Report};
use std::collections::HashMap;

pub const UNKNOWN_AREA: &str = "Unknown Area";

/// Locality names used when a report only has raw coordinates.
pub const LOCALITIES: [&str; 20] = [
    "Sector 45",
    "Green Park",
    "Indiranagar",
    "MG Road",
    "Koramangala",
    "Whitefield",
    "Electronic City",
    "HSR Layout",
    "JP Nagar",
    "Banashankari",
    "Rajajinagar",
    "Malleshwaram",
    "Basavanagudi",
    "Jayanagar",
    "Vijayanagar",
    "Hebbal",
    "Yeshwanthpur",
    "Peenya",
    "Yelahanka",
    "Marathahalli",
];

/// Coarse coordinate bucketing: `|floor(lat*1000) + floor(lng*1000)| mod 20`
/// into `LOCALITIES`. Not a geocoder.
pub fn locality_for(gps: Gps) -> &'static str {
    let sum = (gps.latitude * 1000.0).floor() + (gps.longitude * 1000.0).floor();
    let idx = (sum.abs() % LOCALITIES.len() as f64) as usize;
    LOCALITIES[idx.min(LOCALITIES.len() - 1)]
}

/// Area bucket for a report: the most specific non-empty address component,
/// then the coordinate hash, then `Unknown Area`.
pub fn resolve_area(report: &Report) -> String {
    if let Some(details) = &report.location_details {
        let named = [&details.area, &details.sub_locality, &details.locality]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty());
        if let Some(name) = named {
            return name.clone();
        }
    }

    match report.gps {
        Some(gps) => locality_for(gps).to_string(),
        None => UNKNOWN_AREA.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaStat {
    pub name: String,
    pub reports: usize,
    pub resolved: usize,
}

/// Per-area totals in first-seen order.
pub fn area_stats(reports: &[Report]) -> Vec<AreaStat> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<AreaStat> = Vec::new();

    for report in reports {
        let name = resolve_area(report);
        let slot = *index.entry(name.clone()).or_insert_with(|| {
            stats.push(AreaStat {
                name,
                reports: 0,
                resolved: 0,
            });
            stats.len() - 1
        });

        stats[slot].reports += 1;
        if report.is_resolved() {
            stats[slot].resolved += 1;
        }
    }

    stats
}

pub fn reports_by_area(stats: &[AreaStat]) -> Vec<AreaCount> {
    let total: usize = stats.iter().map(|s| s.reports).sum();
    stats
        .iter()
        .map(|s| AreaCount {
            area: s.name.clone(),
            count: s.reports,
            percentage: percent(s.reports, total),
        })
        .collect()
}

/// Top three areas by share of resolved reports.
pub fn cleanest_areas(stats: &[AreaStat]) -> Vec<AreaScore> {
    let mut scored: Vec<AreaScore> = stats
        .iter()
        .map(|s| AreaScore {
            name: s.name.clone(),
            score: if s.reports > 0 { percent(s.resolved, s.reports) } else { 100 },
        })
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(3);
    scored
}

/// Top three areas by report volume.
pub fn most_reported_areas(stats: &[AreaStat]) -> Vec<AreaReports> {
    let mut ranked: Vec<AreaReports> = stats
        .iter()
        .map(|s| AreaReports {
            name: s.name.clone(),
            reports: s.reports,
        })
        .collect();
    ranked.sort_by(|a, b| b.reports.cmp(&a.reports));
    ranked.truncate(3);
    ranked
}
