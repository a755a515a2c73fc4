// Consumption event entity
// One logged drink entry in the flat record store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged consumption entry. Wire field names match the legacy
/// spreadsheet columns so serialized rows stay readable by older tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionEvent {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "PLAYER")]
    pub player: String,
    #[serde(rename = "BRAND")]
    pub brand: String,
    /// Calendar day the event is attributed to, `YYYY-MM-DD` in the
    /// reference timezone.
    #[serde(rename = "DATE")]
    pub date: String,
    /// Liters per unit.
    #[serde(rename = "VOLUME")]
    pub volume: f64,
    /// Unit count. Legacy rows may omit it.
    #[serde(rename = "AMOUNT", default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    /// Stored redundantly for fast aggregation. Legacy rows may omit it.
    #[serde(rename = "TOTAL_VOLUME", default, skip_serializing_if = "Option::is_none")]
    pub total_volume: Option<f64>,
    /// Wall-clock moment of entry. Absent on legacy rows.
    #[serde(rename = "TIMESTAMP", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ConsumptionEvent {
    /// Unit count with the legacy default: a row without `AMOUNT` counts as one.
    pub fn effective_amount(&self) -> u32 {
        self.amount.unwrap_or(1)
    }

    /// Total liters, derived from volume and amount when the stored value is missing.
    pub fn effective_total_volume(&self) -> f64 {
        self.total_volume
            .unwrap_or_else(|| self.volume * f64::from(self.effective_amount()))
    }
}

/// Payload for appending a record. The server assigns id, date, timestamp
/// and the derived total volume.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecordRequest {
    pub player: String,
    pub brand: String,
    pub volume: f64,
    #[serde(default)]
    pub amount: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecordQuery {
    pub date: Option<String>,
    pub player: Option<String>,
}

/// Legacy bulk write-back: the full record set in one request.
#[derive(Debug, Deserialize)]
pub struct ReplaceRecordsPayload {
    pub data: Vec<ConsumptionEvent>,
}
