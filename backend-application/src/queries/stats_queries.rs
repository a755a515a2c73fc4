use tracing::warn;

use backend_domain::services::stats;
use backend_domain::utils::reference_now;
use backend_domain::value_objects::BrandFilter;
use backend_domain::{ConsumptionEvent, FavoriteBrand, StatisticsResult};

use crate::{AppError, AppState};

/// Fetch failures degrade to an empty event list: "no data" and "fetch
/// error" are intentionally indistinguishable at this layer, so the
/// statistics pass always produces a (possibly zero-filled) result.
async fn fetch_events(state: &AppState) -> Vec<ConsumptionEvent> {
    match state.store.list().await {
        Ok(events) => events,
        Err(err) => {
            state.metrics.record_store_error();
            warn!("record fetch failed, computing over empty set: {}", err);
            Vec::new()
        }
    }
}

pub async fn get_statistics(state: &AppState) -> StatisticsResult {
    state.metrics.record_stats_request();
    let events = fetch_events(state).await;
    let now = reference_now(state.stats_config.utc_offset_hours);
    stats::compute_statistics(&events, &state.stats_config, now)
}

pub async fn player_favorite(
    state: &AppState,
    player: &str,
) -> Result<Option<FavoriteBrand>, AppError> {
    ensure_on_roster(state, player).await?;
    let events = fetch_events(state).await;
    let filter = BrandFilter::new(&state.stats_config.excluded_brands);
    Ok(stats::favorite_brand(&events, player, &filter))
}

pub async fn player_last_record(
    state: &AppState,
    player: &str,
) -> Result<Option<ConsumptionEvent>, AppError> {
    ensure_on_roster(state, player).await?;
    let events = fetch_events(state).await;
    Ok(stats::last_record(&events, player).cloned())
}

/// Personal endpoints 404 for names that are not on the roster; with no
/// roster configured every name is accepted.
async fn ensure_on_roster(state: &AppState, player: &str) -> Result<(), AppError> {
    let roster = state.roster.read().await;
    if roster.is_empty() || roster.iter().any(|entry| entry.name == player) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("player not on roster: {}", player)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{roster, state_with, stored_event, MemoryStore};
    use std::sync::Arc;

    #[tokio::test]
    async fn store_failure_yields_zero_filled_statistics() {
        let state = state_with(Arc::new(MemoryStore::failing()), roster());
        let result = get_statistics(&state).await;
        assert_eq!(result.summary.total_beers, 0);
        assert!(result.rankings.is_empty());
    }

    #[tokio::test]
    async fn statistics_cover_the_stored_events() {
        let store = Arc::new(MemoryStore::with_events(vec![
            stored_event(1, "Guille", "Cristal", "2026-03-01", 0.5, 2),
            stored_event(2, "Nico", "Austral", "2026-03-02", 0.33, 1),
        ]));
        let state = state_with(store, roster());
        let result = get_statistics(&state).await;
        assert_eq!(result.summary.total_beers, 3);
        assert_eq!(result.summary.total_participants, 2);
    }

    #[tokio::test]
    async fn favorite_is_none_for_a_player_without_events() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        let favorite = player_favorite(&state, "Guille").await.expect("query");
        assert!(favorite.is_none());
    }

    #[tokio::test]
    async fn personal_queries_reject_names_off_the_roster() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        let err = player_favorite(&state, "Intruso").await.expect_err("404");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn last_record_is_none_without_timestamps() {
        let store = Arc::new(MemoryStore::with_events(vec![stored_event(
            1,
            "Guille",
            "Cristal",
            "2026-03-01",
            0.5,
            1,
        )]));
        let state = state_with(store, roster());
        let last = player_last_record(&state, "Guille").await.expect("query");
        assert!(last.is_none());
    }
}
