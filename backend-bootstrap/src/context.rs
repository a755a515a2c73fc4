use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;
use tracing::{info, warn};

use backend_application::{AppState, Metrics};
use backend_domain::ports::ConfigRepository;
use backend_infrastructure::{AppConfig, ConfigFileRepository, JsonFileStore};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let stats_config = config.to_stats_config()?;

        let store = Arc::new(JsonFileStore::new(&runtime_config.data_path));

        let config_repo = ConfigFileRepository::new();
        let roster = match config_repo.load_roster(&runtime_config.roster_path).await {
            Ok(roster) => {
                info!(players = roster.len(), "roster loaded");
                roster
            }
            Err(err) => {
                warn!("roster not loaded, accepting any player name: {}", err);
                Vec::new()
            }
        };
        let catalog = config_repo
            .load_catalog(&runtime_config.catalog_path)
            .await
            .unwrap_or_default();

        let state = AppState {
            config: runtime_config,
            stats_config,
            store,
            roster: Arc::new(RwLock::new(roster)),
            catalog: Arc::new(RwLock::new(catalog)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
