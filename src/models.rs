use serde::{Deserialize, Serialize};

/// One recorded interaction, manual or timer-driven.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Epoch milliseconds.
    pub occurred_at: i64,
    /// 1-based position in the log.
    pub sequence_index: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBucket {
    /// Local wall-clock minute, `HH:MM`.
    pub minute: String,
    pub start_ms: i64,
    pub counts: Vec<LabelCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativePoint {
    pub sequence_index: u64,
    pub occurred_at: i64,
    pub cumulative_total: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickSummary {
    pub total_clicks: u64,
    pub distinct_labels: u64,
    pub auto_click_percent: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub label_frequency: Vec<LabelCount>,
    pub minute_buckets: Vec<MinuteBucket>,
    pub cumulative_series: Vec<CumulativePoint>,
    pub summary: ClickSummary,
    pub tick_stride: usize,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub click_count: u64,
    pub last_clicked: String,
    pub auto_clicking: bool,
    pub analytics_visible: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AlertResponse {
    pub message: String,
    pub status: StatusResponse,
}
