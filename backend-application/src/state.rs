use std::sync::Arc;

use backend_domain::ports::RecordStore;
use backend_domain::{Catalog, RosterEntry, RuntimeConfig, StatsConfig};
use tokio::sync::RwLock;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub stats_config: StatsConfig,
    pub store: Arc<dyn RecordStore>,
    pub roster: Arc<RwLock<Vec<RosterEntry>>>,
    pub catalog: Arc<RwLock<Catalog>>,
    pub metrics: Arc<Metrics>,
}
