//! SPOC session endpoints.

use axum::{extract::State, http::HeaderMap, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::SESSION_TOKEN_HEADER;

/// Unlock request body.
#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub pin: String,
}

/// How an unlock was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UnlockMethod {
    Pin,
    SpocId,
}

/// Unlock response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockResponse {
    pub token: String,
    pub expires_in: u64,
    pub method: UnlockMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoc_id: Option<String>,
}

/// Session validity payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spoc_id: Option<String>,
}

/// Open a SPOC session.
///
/// POST /api/spoc/unlock
///
/// The shared PIN opens a full-access session; any other non-empty value
/// is taken as a SPOC identifier and the session is bound to it. There
/// is no registry to check the identifier against.
pub async fn unlock(
    State(state): State<AppState>,
    Json(payload): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>, ApiError> {
    let pin = payload.pin.trim();
    if pin.is_empty() {
        return Err(ApiError::Validation("pin is required".to_string()));
    }

    let (spoc_id, method) = if pin == state.config.security.spoc_pin {
        (None, UnlockMethod::Pin)
    } else {
        (Some(pin.to_string()), UnlockMethod::SpocId)
    };

    let ttl_secs = state.config.session.ttl_secs;
    let issued = state.sessions.issue(spoc_id.clone(), ttl_secs).await;

    info!(
        method = ?method,
        spoc_id = ?spoc_id,
        expires_at = %issued.expires_at,
        "SPOC session opened"
    );

    Ok(Json(UnlockResponse {
        token: issued.token,
        expires_in: ttl_secs,
        method,
        spoc_id,
    }))
}

/// Check whether a session token is still valid.
///
/// GET /api/spoc/validate
pub async fn validate(State(state): State<AppState>, headers: HeaderMap) -> Json<ValidateResponse> {
    let token = headers
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    let session = match token {
        Some(token) => state.sessions.validate(token).await,
        None => None,
    };

    match session {
        Some(session) => Json(ValidateResponse {
            ok: true,
            spoc_id: session.spoc_id,
        }),
        None => Json(ValidateResponse {
            ok: false,
            spoc_id: None,
        }),
    }
}
