// src/analytics/classify.rs

use super::{ChartSlice, TypeCount};
use crate::domain::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    OverflowingBin,
    IllegalDumping,
    RecyclingRequest,
    BrokenEquipment,
    Other,
}

impl IssueType {
    /// Fixed display order, also the order of the category chart.
    pub const ALL: [IssueType; 5] = [
        IssueType::OverflowingBin,
        IssueType::IllegalDumping,
        IssueType::RecyclingRequest,
        IssueType::BrokenEquipment,
        IssueType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueType::OverflowingBin => "Overflowing Bin",
            IssueType::IllegalDumping => "Illegal Dumping",
            IssueType::RecyclingRequest => "Recycling Request",
            IssueType::BrokenEquipment => "Broken Equipment",
            IssueType::Other => "Other",
        }
    }

    fn category_color(&self) -> &'static str {
        match self {
            IssueType::OverflowingBin => "#ef4444",
            IssueType::IllegalDumping => "#f97316",
            IssueType::RecyclingRequest => "#10b981",
            IssueType::BrokenEquipment => "#3b82f6",
            IssueType::Other => "#6b7280",
        }
    }

    /// Exact label match, as used by the category chart (titles picked from the
    /// client's issue-type dropdown).
    pub fn from_label(label: &str) -> IssueType {
        IssueType::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .unwrap_or(IssueType::Other)
    }
}

// Evaluated in order; the first rule with any matching keyword wins.
const KEYWORD_RULES: [(&[&str], IssueType); 4] = [
    (&["overflow", "bin", "full"], IssueType::OverflowingBin),
    (&["illegal", "dump", "litter"], IssueType::IllegalDumping),
    (&["recycle", "recycling"], IssueType::RecyclingRequest),
    (&["broken", "equipment", "damage"], IssueType::BrokenEquipment),
];

/// Keyword classification of a free-text title.
pub fn classify_title(title: &str) -> IssueType {
    let title = title.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title.contains(k)))
        .map(|(_, issue)| *issue)
        .unwrap_or(IssueType::Other)
}

const TYPE_COLORS: [&str; 5] = [
    "bg-yellow-500",
    "bg-red-500",
    "bg-green-500",
    "bg-blue-500",
    "bg-purple-500",
];

/// Keyword-classified counts in first-seen order, colored by position.
pub fn reports_by_type(reports: &[Report]) -> Vec<TypeCount> {
    let mut counts: Vec<(IssueType, usize)> = Vec::new();
    for report in reports {
        let issue = classify_title(&report.title);
        match counts.iter_mut().find(|(t, _)| *t == issue) {
            Some((_, n)) => *n += 1,
            None => counts.push((issue, 1)),
        }
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, (issue, count))| TypeCount {
            issue_type: issue.label().to_string(),
            count,
            color: TYPE_COLORS[idx.min(TYPE_COLORS.len() - 1)].to_string(),
        })
        .collect()
}

/// Exact-label category counts in fixed order, zero entries dropped.
pub fn waste_categories(reports: &[Report]) -> Vec<ChartSlice> {
    let mut counts = [0usize; 5];
    for report in reports {
        let issue = IssueType::from_label(&report.title);
        if let Some(idx) = IssueType::ALL.iter().position(|t| *t == issue) {
            counts[idx] += 1;
        }
    }

    IssueType::ALL
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(issue, count)| ChartSlice {
            name: issue.label().to_string(),
            value: count,
            color: issue.category_color().to_string(),
        })
        .collect()
}
