//! Request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::request::{RequestStatus, ServiceRequest};
use uuid::Uuid;

/// Row mapping for the `requests` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RequestEntity {
    pub id: Uuid,
    pub requester: String,
    pub category: String,
    pub details: String,
    pub location: String,
    pub quantity: String,
    pub team_id: Option<String>,
    pub spoc_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<RequestEntity> for ServiceRequest {
    fn from(entity: RequestEntity) -> Self {
        // The status column carries a CHECK constraint, so an unknown
        // value can only come from out-of-band writes.
        let status = RequestStatus::parse(&entity.status).unwrap_or_default();
        Self {
            id: entity.id,
            requester: entity.requester,
            category: entity.category,
            details: entity.details,
            location: entity.location,
            quantity: entity.quantity,
            team_id: entity.team_id,
            spoc_id: entity.spoc_id,
            status,
            created_at: entity.created_at,
        }
    }
}
