//! Request store abstraction.
//!
//! The HTTP layer talks to a [`RequestStore`] trait object so the
//! Postgres-backed store can be swapped for the in-memory one (used by
//! the integration tests) without touching the handlers.

use async_trait::async_trait;
use domain::models::request::{
    CreateRequestPayload, RequestStatus, ServiceRequest, UpdateRequestPayload,
};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a request store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fields of a request to be created. The store assigns the id, the
/// `pending` status and the creation timestamp.
#[derive(Debug, Clone)]
pub struct NewRequest {
    pub requester: String,
    pub category: String,
    pub details: String,
    pub location: String,
    pub quantity: String,
    pub team_id: Option<String>,
    pub spoc_id: Option<String>,
}

impl From<CreateRequestPayload> for NewRequest {
    fn from(payload: CreateRequestPayload) -> Self {
        Self {
            requester: payload.requester,
            category: payload.category,
            details: payload.details,
            location: payload.location,
            quantity: payload.quantity,
            team_id: payload.team_id.filter(|id| !id.is_empty()),
            spoc_id: payload.spoc_id.filter(|id| !id.is_empty()),
        }
    }
}

/// A partial update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct RequestChanges {
    pub requester: Option<String>,
    pub category: Option<String>,
    pub details: Option<String>,
    pub location: Option<String>,
    pub quantity: Option<String>,
    pub team_id: Option<String>,
    pub spoc_id: Option<String>,
    pub status: Option<RequestStatus>,
}

impl RequestChanges {
    /// Applies the changes to a request in place.
    pub fn apply(&self, request: &mut ServiceRequest) {
        if let Some(requester) = &self.requester {
            request.requester = requester.clone();
        }
        if let Some(category) = &self.category {
            request.category = category.clone();
        }
        if let Some(details) = &self.details {
            request.details = details.clone();
        }
        if let Some(location) = &self.location {
            request.location = location.clone();
        }
        if let Some(quantity) = &self.quantity {
            request.quantity = quantity.clone();
        }
        if let Some(team_id) = &self.team_id {
            request.team_id = Some(team_id.clone());
        }
        if let Some(spoc_id) = &self.spoc_id {
            request.spoc_id = Some(spoc_id.clone());
        }
        if let Some(status) = self.status {
            request.status = status;
        }
    }
}

impl From<UpdateRequestPayload> for RequestChanges {
    fn from(payload: UpdateRequestPayload) -> Self {
        Self {
            requester: payload.requester,
            category: payload.category,
            details: payload.details,
            location: payload.location,
            quantity: payload.quantity,
            team_id: payload.team_id,
            spoc_id: payload.spoc_id,
            status: payload.status,
        }
    }
}

/// Storage for request documents.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// All requests, newest first.
    async fn list(&self) -> Result<Vec<ServiceRequest>, StoreError>;

    /// Looks up a single request.
    async fn find(&self, id: Uuid) -> Result<Option<ServiceRequest>, StoreError>;

    /// Persists a new request and returns the stored document.
    async fn insert(&self, new: NewRequest) -> Result<ServiceRequest, StoreError>;

    /// Applies a partial update and returns the updated document, or
    /// `None` if no request matches the id. Last writer wins.
    async fn update(
        &self,
        id: Uuid,
        changes: RequestChanges,
    ) -> Result<Option<ServiceRequest>, StoreError>;

    /// Removes a request, returning the removed document if it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<ServiceRequest>, StoreError>;

    /// Checks connectivity to the backing store.
    async fn ping(&self) -> Result<(), StoreError>;
}
