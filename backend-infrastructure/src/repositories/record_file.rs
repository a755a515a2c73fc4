use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::warn;

use backend_domain::ports::RecordStore;
use backend_domain::ConsumptionEvent;

/// Flat-file record store: the full set lives in one JSON array and every
/// mutation is read-modify-write, like the spreadsheet it replaces.
/// At most one writer should be assumed; concurrent writers can lose
/// updates, which the store contract documents as out of scope.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Rows that fail to decode individually are skipped with a warning;
    /// one hand-edited row must not take down the whole store.
    async fn read_rows(&self) -> anyhow::Result<Vec<ConsumptionEvent>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<Value> = serde_json::from_str(&content)?;
        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_value::<ConsumptionEvent>(row) {
                Ok(event) => events.push(event),
                Err(err) => warn!("skipping malformed record row: {}", err),
            }
        }
        Ok(events)
    }

    async fn write_rows(&self, events: &[ConsumptionEvent]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(events)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn list(&self) -> anyhow::Result<Vec<ConsumptionEvent>> {
        self.read_rows().await
    }

    async fn append(&self, event: &ConsumptionEvent) -> anyhow::Result<()> {
        let mut events = self.read_rows().await?;
        events.push(event.clone());
        self.write_rows(&events).await
    }

    async fn delete_by_id(&self, id: u64) -> anyhow::Result<bool> {
        let mut events = self.read_rows().await?;
        let before = events.len();
        events.retain(|event| event.id != id);
        if events.len() == before {
            return Ok(false);
        }
        self.write_rows(&events).await?;
        Ok(true)
    }

    async fn replace_all(&self, events: &[ConsumptionEvent]) -> anyhow::Result<()> {
        self.write_rows(events).await
    }

    async fn ping(&self) -> anyhow::Result<()> {
        // A missing file is fine; it will be created on the first write.
        match fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
