// src/analytics/types.rs
use serde::Serialize;

/// Response body of `GET /reports/analytics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub metrics: Metrics,
    pub reports_by_type: Vec<TypeCount>,
    pub status_distribution: Vec<ChartSlice>,
    pub timeline_data: Vec<TimelinePoint>,
    pub waste_category_data: Vec<ChartSlice>,
    pub resolution_metrics: ResolutionMetrics,
    pub top_reporters: Vec<ReporterEntry>,
    pub reports_by_area: Vec<AreaCount>,
    pub cleanest_areas: Vec<AreaScore>,
    pub most_reported_areas: Vec<AreaReports>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_reports: usize,
    pub resolution_rate: i64,
    /// Same value as `ResolutionMetrics::average_resolution_time`.
    pub avg_response_time: i64,
    pub active_areas: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub issue_type: String,
    pub count: usize,
    pub color: String,
}

/// One pie/donut slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    pub date: String,
    pub display_date: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetrics {
    pub average_resolution_time: i64,
    pub on_time_percentage: i64,
    pub delayed_percentage: i64,
    pub trend: ResolutionTrend,
    pub weekly_data: Vec<DailyResolution>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Faster,
    Slower,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionTrend {
    pub current: i64,
    pub previous: i64,
    pub change: i64,
    pub direction: TrendDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyResolution {
    pub date: String,
    pub display_date: String,
    pub avg_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReporterEntry {
    pub id: String,
    pub name: String,
    pub reports: usize,
    pub resolved: usize,
    pub points: usize,
    pub resolution_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCount {
    pub area: String,
    pub count: usize,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaScore {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaReports {
    pub name: String,
    pub reports: usize,
}
