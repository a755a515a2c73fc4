use chrono::Utc;
use tracing::{info, warn};

use backend_domain::utils::{reference_now, today_string};
use backend_domain::{ConsumptionEvent, NewRecordRequest};

use crate::{AppError, AppState};

/// Appends one record. The store assigns nothing: id (`max + 1`), the
/// calendar day in the reference timezone, the entry timestamp and the
/// derived total volume are all stamped here before the write.
pub async fn add_record(
    state: &AppState,
    request: NewRecordRequest,
) -> Result<ConsumptionEvent, AppError> {
    let player = request.player.trim().to_string();
    if player.is_empty() {
        return Err(AppError::BadRequest("player is empty".to_string()));
    }
    let brand = request.brand.trim().to_string();
    if brand.is_empty() {
        return Err(AppError::BadRequest("brand is empty".to_string()));
    }
    if !request.volume.is_finite() || request.volume <= 0.0 {
        return Err(AppError::BadRequest("volume must be positive".to_string()));
    }
    let amount = request.amount.unwrap_or(1);
    if amount < 1 {
        return Err(AppError::BadRequest("amount must be at least 1".to_string()));
    }

    {
        // An empty roster means no roster file was configured; accept anyone.
        let roster = state.roster.read().await;
        if !roster.is_empty() && !roster.iter().any(|entry| entry.name == player) {
            return Err(AppError::BadRequest(format!("unknown player: {}", player)));
        }
    }

    let existing = state.store.list().await.map_err(|err| {
        state.metrics.record_store_error();
        AppError::Internal(err)
    })?;
    let next_id = existing.iter().map(|event| event.id).max().unwrap_or(0) + 1;

    let now = reference_now(state.stats_config.utc_offset_hours);
    let event = ConsumptionEvent {
        id: next_id,
        player,
        brand,
        date: today_string(&now),
        volume: request.volume,
        amount: Some(amount),
        total_volume: Some(request.volume * f64::from(amount)),
        timestamp: Some(Utc::now()),
    };

    state.store.append(&event).await.map_err(|err| {
        state.metrics.record_store_error();
        AppError::Internal(err)
    })?;
    state.metrics.record_append();
    info!(id = event.id, player = %event.player, "record appended");
    Ok(event)
}

/// Deleting an id that is not present still succeeds: the stored set is
/// simply rewritten without it, as the legacy write-back did.
pub async fn delete_record(state: &AppState, id: u64) -> Result<(), AppError> {
    let removed = state.store.delete_by_id(id).await.map_err(|err| {
        state.metrics.record_store_error();
        AppError::Internal(err)
    })?;
    if removed {
        state.metrics.record_delete();
        info!(id, "record deleted");
    } else {
        warn!(id, "delete requested for unknown record id");
    }
    Ok(())
}

/// Legacy bulk write-back: replaces the full stored set.
pub async fn replace_records(
    state: &AppState,
    events: Vec<ConsumptionEvent>,
) -> Result<(), AppError> {
    state.store.replace_all(&events).await.map_err(|err| {
        state.metrics.record_store_error();
        AppError::Internal(err)
    })?;
    info!(count = events.len(), "record set replaced");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{roster, state_with, stored_event, MemoryStore};
    use std::sync::Arc;

    fn request(player: &str, brand: &str, volume: f64, amount: Option<u32>) -> NewRecordRequest {
        NewRecordRequest {
            player: player.to_string(),
            brand: brand.to_string(),
            volume,
            amount,
        }
    }

    #[tokio::test]
    async fn append_assigns_ids_and_derived_fields() {
        let store = Arc::new(MemoryStore::default());
        let state = state_with(store.clone(), roster());

        let first = add_record(&state, request("Guille", "Cristal", 0.5, Some(2)))
            .await
            .expect("append");
        let second = add_record(&state, request("Nico", "Austral", 0.33, None))
            .await
            .expect("append");

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.total_volume, Some(1.0));
        assert_eq!(second.amount, Some(1));
        assert!(first.timestamp.is_some());
        assert_eq!(first.date.len(), 10);
        assert_eq!(store.events.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn append_continues_from_highest_existing_id() {
        let store = Arc::new(MemoryStore::with_events(vec![stored_event(
            7,
            "Guille",
            "Cristal",
            "2026-03-01",
            0.5,
            1,
        )]));
        let state = state_with(store.clone(), roster());

        let event = add_record(&state, request("Nico", "Royal", 0.5, Some(1)))
            .await
            .expect("append");
        assert_eq!(event.id, 8);
    }

    #[tokio::test]
    async fn append_rejects_players_not_on_the_roster() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        let err = add_record(&state, request("Intruso", "Cristal", 0.5, Some(1)))
            .await
            .expect_err("reject");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn append_accepts_anyone_without_a_roster() {
        let state = state_with(Arc::new(MemoryStore::default()), Vec::new());
        let event = add_record(&state, request("Anybody", "Cristal", 0.5, Some(1)))
            .await
            .expect("append");
        assert_eq!(event.player, "Anybody");
    }

    #[tokio::test]
    async fn append_validates_fields() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        for bad in [
            request("", "Cristal", 0.5, Some(1)),
            request("Guille", "  ", 0.5, Some(1)),
            request("Guille", "Cristal", 0.0, Some(1)),
            request("Guille", "Cristal", -0.5, Some(1)),
            request("Guille", "Cristal", 0.5, Some(0)),
        ] {
            let err = add_record(&state, bad).await.expect_err("reject");
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[tokio::test]
    async fn append_surfaces_store_failures() {
        let state = state_with(Arc::new(MemoryStore::failing()), roster());
        let err = add_record(&state, request("Guille", "Cristal", 0.5, Some(1)))
            .await
            .expect_err("store offline");
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn delete_removes_exactly_the_matching_id() {
        let store = Arc::new(MemoryStore::with_events(vec![
            stored_event(1, "Guille", "Cristal", "2026-03-01", 0.5, 1),
            stored_event(2, "Nico", "Austral", "2026-03-01", 0.5, 1),
        ]));
        let state = state_with(store.clone(), roster());

        delete_record(&state, 1).await.expect("delete");
        let events = store.events.lock().unwrap().clone();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, 2);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_still_succeeds() {
        let store = Arc::new(MemoryStore::with_events(vec![stored_event(
            1,
            "Guille",
            "Cristal",
            "2026-03-01",
            0.5,
            1,
        )]));
        let state = state_with(store.clone(), roster());

        delete_record(&state, 99).await.expect("no-op delete");
        assert_eq!(store.events.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_overwrites_the_full_set() {
        let store = Arc::new(MemoryStore::with_events(vec![stored_event(
            1,
            "Guille",
            "Cristal",
            "2026-03-01",
            0.5,
            1,
        )]));
        let state = state_with(store.clone(), roster());

        let replacement = vec![
            stored_event(10, "Nico", "Royal", "2026-03-02", 0.33, 2),
            stored_event(11, "Nico", "Royal", "2026-03-03", 0.33, 1),
        ];
        replace_records(&state, replacement).await.expect("replace");
        let events = store.events.lock().unwrap().clone();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, 10);
    }
}
