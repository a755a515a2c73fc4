use serde::{Deserialize, Serialize};

use crate::{AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub player: String,
    pub passcode: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
}

/// Passcode check for the entry form. This is an identification
/// convenience, not an authentication control: the result goes back to
/// the client and no session state is kept server-side.
pub async fn verify_passcode(
    state: &AppState,
    request: VerifyRequest,
) -> Result<VerifyResponse, AppError> {
    let player = request.player.trim();
    if player.is_empty() {
        return Err(AppError::BadRequest("player is empty".to_string()));
    }

    let roster = state.roster.read().await;
    let verified = roster
        .iter()
        .any(|entry| entry.name == player && entry.passcode.matches(&request.passcode));
    Ok(VerifyResponse { verified })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{roster, state_with, MemoryStore};
    use std::sync::Arc;

    fn request(player: &str, passcode: &str) -> VerifyRequest {
        VerifyRequest {
            player: player.to_string(),
            passcode: passcode.to_string(),
        }
    }

    #[tokio::test]
    async fn accepts_the_matching_passcode() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        let response = verify_passcode(&state, request("Guille", "14"))
            .await
            .expect("verify");
        assert!(response.verified);
    }

    #[tokio::test]
    async fn rejects_wrong_codes_and_unknown_players() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        assert!(!verify_passcode(&state, request("Guille", "15"))
            .await
            .expect("verify")
            .verified);
        assert!(!verify_passcode(&state, request("Intruso", "14"))
            .await
            .expect("verify")
            .verified);
    }

    #[tokio::test]
    async fn rejects_empty_player_names() {
        let state = state_with(Arc::new(MemoryStore::default()), roster());
        let err = verify_passcode(&state, request("  ", "14"))
            .await
            .expect_err("reject");
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
