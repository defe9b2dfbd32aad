use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::state::{build_gateway, AppState};

#[derive(Deserialize)]
pub struct ApiKeyRequest {
    pub api_key: String,
}

/// PUT /api/v1/settings/api-key
///
/// Rebuilds the gateway with the supplied credential. Takes effect for the
/// next request; the key is never echoed back or logged.
pub async fn handle_set_api_key(
    State(state): State<AppState>,
    Json(req): Json<ApiKeyRequest>,
) -> Result<StatusCode, AppError> {
    let api_key = req.api_key.trim();
    if api_key.is_empty() {
        return Err(AppError::Validation("api_key cannot be empty".to_string()));
    }

    let gateway = build_gateway(&state.config, Some(api_key.to_string()))?;
    state.replace_gateway(gateway)?;
    info!("Gemini API key updated for this session");

    Ok(StatusCode::NO_CONTENT)
}
