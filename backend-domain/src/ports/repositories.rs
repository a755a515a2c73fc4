use async_trait::async_trait;

use crate::entities::{Catalog, ConsumptionEvent, RosterEntry};

/// Flat record store. Implementations are read-modify-write over a single
/// backing file: at most one writer should be assumed, and a failed
/// operation means no durable change occurred.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every stored event, in whatever order the store holds them.
    async fn list(&self) -> anyhow::Result<Vec<ConsumptionEvent>>;
    async fn append(&self, event: &ConsumptionEvent) -> anyhow::Result<()>;
    /// Removes the event with the given id (expected zero or one).
    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: u64) -> anyhow::Result<bool>;
    async fn replace_all(&self, events: &[ConsumptionEvent]) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ConfigRepository: Send + Sync {
    async fn load_roster(&self, path: &str) -> anyhow::Result<Vec<RosterEntry>>;
    async fn load_catalog(&self, path: &str) -> anyhow::Result<Catalog>;
}
