//! Request endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::session::SessionContext;
use domain::models::request::{CreateRequestPayload, ServiceRequest, UpdateRequestPayload};
use persistence::store::{NewRequest, RequestChanges};

/// List all requests, newest first.
///
/// GET /api/requests
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceRequest>>, ApiError> {
    let requests = state.store.list().await?;
    Ok(Json(requests))
}

/// Submit a new request.
///
/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<(StatusCode, Json<ServiceRequest>), ApiError> {
    payload.validate()?;

    let request = state.store.insert(NewRequest::from(payload)).await?;

    info!(
        id = %request.id,
        category = %request.category,
        team_id = ?request.team_id,
        "Request created"
    );
    state.hub.request_created(&request);

    Ok((StatusCode::CREATED, Json(request)))
}

/// Apply a partial update to a request.
///
/// PATCH /api/requests/:id
pub async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(session): Extension<SessionContext>,
    Json(payload): Json<UpdateRequestPayload>,
) -> Result<Json<ServiceRequest>, ApiError> {
    let request = state
        .store
        .update(id, RequestChanges::from(payload))
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    info!(
        id = %request.id,
        status = %request.status,
        spoc_id = ?session.spoc_id,
        "Request updated"
    );
    state.hub.request_updated(&request);

    Ok(Json(request))
}

/// Delete a request.
///
/// DELETE /api/requests/:id
pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(session): Extension<SessionContext>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .store
        .delete(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Request not found".to_string()))?;

    info!(
        id = %removed.id,
        spoc_id = ?session.spoc_id,
        auth = ?session.method,
        "Request deleted"
    );
    state.hub.request_deleted(&removed);

    Ok(StatusCode::NO_CONTENT)
}
