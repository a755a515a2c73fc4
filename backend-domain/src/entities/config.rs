// Runtime configuration shared across layers

use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_path: String,
    pub roster_path: String,
    pub catalog_path: String,
    pub report_dir: String,
    pub public_base_url: String,
    pub webhook_url: Option<String>,
    pub webhook_template: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
    pub report_hour: u32,
    pub report_minute: u32,
}

/// Constants of the statistics engine. Deployments disagreed on every one
/// of these, so they are configuration rather than code.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Team-wide beer-count target.
    pub goal_total: u64,
    pub deadline: NaiveDate,
    pub start_date: NaiveDate,
    /// Whole hours east of UTC for the reference timezone.
    pub utc_offset_hours: i32,
    pub player_volume_threshold_l: f64,
    pub player_count_threshold: u64,
    pub team_volume_threshold_l: f64,
    pub hot_streak_threshold_l: f64,
    /// Catch-all brand buckets hidden from brand rankings.
    pub excluded_brands: Vec<String>,
}
