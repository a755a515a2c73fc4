use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use backend_application::commands::record_commands;
use backend_application::queries::record_queries;
use backend_application::AppState;
use backend_domain::{ConsumptionEvent, NewRecordRequest, RecordQuery, ReplaceRecordsPayload};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Vec<ConsumptionEvent>>, HttpError> {
    let records = record_queries::list_records(&state, query).await?;
    Ok(Json(records))
}

pub async fn add_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NewRecordRequest>,
) -> Result<(StatusCode, Json<ConsumptionEvent>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let event = record_commands::add_record(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn delete_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<u64>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    record_commands::delete_record(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn replace_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ReplaceRecordsPayload>,
) -> Result<StatusCode, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    record_commands::replace_records(&state, payload.data).await?;
    Ok(StatusCode::NO_CONTENT)
}
