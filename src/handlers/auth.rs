use axum::{Json, body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::service::credentials::AuthRequest;
use crate::{error::ServiceError, router::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ServiceError> {
    let request: AuthRequest =
        serde_json::from_slice(&body).map_err(|_| ServiceError::InvalidRequest)?;

    match state.credentials.verify(&request) {
        Some(token) => {
            info!(username = %request.username, "login accepted");
            Ok(Json(TokenResponse { token }))
        }
        None => {
            warn!(username = %request.username, "unauthorized login attempt");
            Err(ServiceError::Unauthorized)
        }
    }
}
