// Derived statistics views
// Never stored; recomputed from the full event list on every call

use serde::Serialize;

/// Per-player totals, ranked descending by volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAggregate {
    pub name: String,
    pub total_volume: f64,
    pub total_quantity: u64,
}

/// Per-brand totals, catch-all buckets filtered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandAggregate {
    pub name: String,
    pub volume: f64,
    pub quantity: u64,
}

/// Per-day totals, sorted ascending by calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub date: String,
    pub volume: f64,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_beers: u64,
    pub total_volume: f64,
    pub total_participants: u64,
    /// Historical name kept for wire compatibility: this is average
    /// volume (liters) per participant, not an event count.
    pub average_beers: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamGoalProgress {
    pub goal: u64,
    pub deadline: String,
    pub total_beers: u64,
    /// Clamped to [0, 100] for display.
    pub progress_percent: f64,
    /// Unclamped ratio, kept for schedule comparisons.
    pub raw_progress_percent: f64,
    /// May go negative once the goal is exceeded.
    pub beers_needed: i64,
    pub days_left: i64,
    pub daily_pace_required: i64,
    pub expected_progress_percent: f64,
    pub ahead_of_schedule: bool,
}

/// Threshold-crossing notification. Recomputed fresh on every statistics
/// pass; not deduplicated against prior runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    /// Player name, or "Team" for team-wide entries.
    pub player: String,
    pub title: String,
    pub description: String,
}

/// A player's highest-volume brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteBrand {
    pub name: String,
    pub volume: f64,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResult {
    pub rankings: Vec<PlayerAggregate>,
    pub brand_stats: Vec<BrandAggregate>,
    pub daily_stats: Vec<DailyAggregate>,
    pub summary: Summary,
    pub goal: TeamGoalProgress,
    pub achievements: Vec<Achievement>,
}
