use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use backend_domain::ports::ConfigRepository;
use backend_domain::{Catalog, RosterEntry};

/// Loads the roster (YAML) and the entry-form catalog (JSON) from disk.
/// The legacy app shipped both as hardcoded option lists.
pub struct ConfigFileRepository;

impl ConfigFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConfigFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigRepository for ConfigFileRepository {
    async fn load_roster(&self, path: &str) -> anyhow::Result<Vec<RosterEntry>> {
        let content = fs::read_to_string(path).await?;
        let roster: Vec<RosterEntry> = serde_yaml::from_str(&content)?;
        Ok(roster)
    }

    async fn load_catalog(&self, path: &str) -> anyhow::Result<Catalog> {
        if !Path::new(path).exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(path).await?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }
}
