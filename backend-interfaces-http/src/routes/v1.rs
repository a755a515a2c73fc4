use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, record_handlers, roster_handlers, stats_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/records",
            axum::routing::get(record_handlers::list_records)
                .post(record_handlers::add_record)
                .put(record_handlers::replace_records),
        )
        .route(
            "/v1/records/:id",
            axum::routing::delete(record_handlers::delete_record),
        )
        .route("/v1/stats", axum::routing::get(stats_handlers::get_stats))
        .route(
            "/v1/players",
            axum::routing::get(roster_handlers::list_players),
        )
        .route(
            "/v1/players/:name/favorite-brand",
            axum::routing::get(stats_handlers::player_favorite_brand),
        )
        .route(
            "/v1/players/:name/last-record",
            axum::routing::get(stats_handlers::player_last_record),
        )
        .route(
            "/v1/session/verify",
            axum::routing::post(roster_handlers::verify_session),
        )
        .route(
            "/v1/catalog",
            axum::routing::get(roster_handlers::get_catalog),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
