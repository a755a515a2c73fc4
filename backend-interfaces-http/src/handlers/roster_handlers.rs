use axum::extract::State;
use axum::Json;

use backend_application::commands::session_commands::{self, VerifyRequest, VerifyResponse};
use backend_application::queries::roster_queries;
use backend_application::AppState;
use backend_domain::Catalog;

use crate::error::HttpError;

pub async fn list_players(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(roster_queries::list_players(&state).await)
}

pub async fn get_catalog(State(state): State<AppState>) -> Json<Catalog> {
    Json(roster_queries::get_catalog(&state).await)
}

pub async fn verify_session(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, HttpError> {
    let response = session_commands::verify_passcode(&state, payload).await?;
    Ok(Json(response))
}
