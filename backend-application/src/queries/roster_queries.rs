use backend_domain::Catalog;

use crate::AppState;

/// Roster names for the player picker. Passcodes stay server-side.
pub async fn list_players(state: &AppState) -> Vec<String> {
    state
        .roster
        .read()
        .await
        .iter()
        .map(|entry| entry.name.clone())
        .collect()
}

pub async fn get_catalog(state: &AppState) -> Catalog {
    state.catalog.read().await.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{roster, state_with, MemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn lists_names_only() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        let players = list_players(&state).await;
        assert_eq!(players, vec!["Guille".to_string(), "Nico".to_string()]);
    }
}
