use axum::extract::{Path, State};
use axum::Json;

use backend_application::queries::stats_queries;
use backend_application::AppState;
use backend_domain::{ConsumptionEvent, FavoriteBrand, StatisticsResult};

use crate::error::HttpError;

pub async fn get_stats(State(state): State<AppState>) -> Json<StatisticsResult> {
    Json(stats_queries::get_statistics(&state).await)
}

pub async fn player_favorite_brand(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Option<FavoriteBrand>>, HttpError> {
    let favorite = stats_queries::player_favorite(&state, &name).await?;
    Ok(Json(favorite))
}

pub async fn player_last_record(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Option<ConsumptionEvent>>, HttpError> {
    let last = stats_queries::player_last_record(&state, &name).await?;
    Ok(Json(last))
}
