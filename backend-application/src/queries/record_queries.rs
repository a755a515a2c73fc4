use tracing::warn;

use backend_domain::utils::parse_date;
use backend_domain::{ConsumptionEvent, RecordQuery};

use crate::{AppError, AppState};

/// Record listing with optional date/player filters. A failing store
/// degrades to an empty list, as the legacy read endpoint did.
pub async fn list_records(
    state: &AppState,
    query: RecordQuery,
) -> Result<Vec<ConsumptionEvent>, AppError> {
    if let Some(date) = query.date.as_deref() {
        if let Err(err) = parse_date(date) {
            return Err(AppError::BadRequest(format!("invalid date: {}", err)));
        }
    }

    let mut events = match state.store.list().await {
        Ok(events) => events,
        Err(err) => {
            state.metrics.record_store_error();
            warn!("record fetch failed, returning empty list: {}", err);
            Vec::new()
        }
    };

    if let Some(date) = query.date.as_deref() {
        events.retain(|event| event.date == date);
    }
    if let Some(player) = query.player.as_deref() {
        events.retain(|event| event.player == player);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{roster, state_with, stored_event, MemoryStore};
    use std::sync::Arc;

    fn seeded_state() -> AppState {
        let store = Arc::new(MemoryStore::with_events(vec![
            stored_event(1, "Guille", "Cristal", "2026-03-01", 0.5, 1),
            stored_event(2, "Nico", "Austral", "2026-03-01", 0.33, 2),
            stored_event(3, "Guille", "Royal", "2026-03-02", 0.5, 1),
        ]));
        state_with(store, roster())
    }

    #[tokio::test]
    async fn filters_by_date_and_player() {
        let state = seeded_state();
        let records = list_records(
            &state,
            RecordQuery {
                date: Some("2026-03-01".to_string()),
                player: Some("Guille".to_string()),
            },
        )
        .await
        .expect("query");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
    }

    #[tokio::test]
    async fn no_filters_returns_everything() {
        let state = seeded_state();
        let records = list_records(&state, RecordQuery::default())
            .await
            .expect("query");
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn rejects_malformed_dates() {
        let state = seeded_state();
        let err = list_records(
            &state,
            RecordQuery {
                date: Some("01-03-2026".to_string()),
                player: None,
            },
        )
        .await
        .expect_err("reject");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn failing_store_degrades_to_empty() {
        let state = state_with(Arc::new(MemoryStore::failing()), roster());
        let records = list_records(&state, RecordQuery::default())
            .await
            .expect("query");
        assert!(records.is_empty());
    }
}
