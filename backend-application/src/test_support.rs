// Shared test doubles for command/query tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use backend_domain::ports::RecordStore;
use backend_domain::{
    Catalog, ConsumptionEvent, Passcode, RosterEntry, RuntimeConfig, StatsConfig,
};

use crate::{AppState, Metrics};

/// In-memory record store; flips to failing when `fail` is set.
#[derive(Default)]
pub struct MemoryStore {
    pub events: Mutex<Vec<ConsumptionEvent>>,
    pub fail: bool,
}

impl MemoryStore {
    pub fn with_events(events: Vec<ConsumptionEvent>) -> Self {
        Self {
            events: Mutex::new(events),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<ConsumptionEvent>> {
        if self.fail {
            anyhow::bail!("store offline");
        }
        Ok(self.events.lock().unwrap().clone())
    }

    async fn append(&self, event: &ConsumptionEvent) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("store offline");
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: u64) -> anyhow::Result<bool> {
        if self.fail {
            anyhow::bail!("store offline");
        }
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|event| event.id != id);
        Ok(events.len() != before)
    }

    async fn replace_all(&self, events: &[ConsumptionEvent]) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("store offline");
        }
        *self.events.lock().unwrap() = events.to_vec();
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("store offline");
        }
        Ok(())
    }
}

pub fn runtime_config() -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_token: None,
        data_path: "./records.json".to_string(),
        roster_path: "./roster.yaml".to_string(),
        catalog_path: "./catalog.json".to_string(),
        report_dir: "./reports".to_string(),
        public_base_url: "http://127.0.0.1:0".to_string(),
        webhook_url: None,
        webhook_template: None,
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 5,
        report_hour: 23,
        report_minute: 55,
    }
}

pub fn stats_config() -> StatsConfig {
    StatsConfig {
        goal_total: 5000,
        deadline: NaiveDate::from_ymd_opt(2099, 12, 31).unwrap(),
        start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        utc_offset_hours: -3,
        player_volume_threshold_l: 50.0,
        player_count_threshold: 100,
        team_volume_threshold_l: 500.0,
        hot_streak_threshold_l: 5.0,
        excluded_brands: vec!["otras".to_string(), "other".to_string()],
    }
}

pub fn roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry {
            name: "Guille".to_string(),
            passcode: Passcode::new("14"),
        },
        RosterEntry {
            name: "Nico".to_string(),
            passcode: Passcode::new("15"),
        },
    ]
}

pub fn state_with(store: Arc<MemoryStore>, roster: Vec<RosterEntry>) -> AppState {
    AppState {
        config: runtime_config(),
        stats_config: stats_config(),
        store,
        roster: Arc::new(RwLock::new(roster)),
        catalog: Arc::new(RwLock::new(Catalog::default())),
        metrics: Arc::new(Metrics::default()),
    }
}

pub fn stored_event(
    id: u64,
    player: &str,
    brand: &str,
    date: &str,
    volume: f64,
    amount: u32,
) -> ConsumptionEvent {
    ConsumptionEvent {
        id,
        player: player.to_string(),
        brand: brand.to_string(),
        date: date.to_string(),
        volume,
        amount: Some(amount),
        total_volume: Some(volume * f64::from(amount)),
        timestamp: None,
    }
}
