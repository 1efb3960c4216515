//! Service request domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle state of a service request.
///
/// Requests start as `Pending` and are marked `Done` by a SPOC. The
/// reverse transition is representable but never issued by the clients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Done,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Done => "done",
        }
    }

    /// Parses the wire/storage form of a status.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(RequestStatus::Pending),
            "done" => Some(RequestStatus::Done),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A service request submitted by a requester and handled by a team's SPOC.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: Uuid,
    pub requester: String,
    pub category: String,
    pub details: String,
    pub location: String,
    pub quantity: String,
    pub team_id: Option<String>,
    pub spoc_id: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for submitting a new request.
///
/// Only `location` is required; the category label is free-form and not
/// checked against the client's fixed set.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    #[serde(default)]
    pub requester: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub details: String,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_non_blank"))]
    pub location: String,

    #[serde(default)]
    pub quantity: String,

    pub team_id: Option<String>,

    pub spoc_id: Option<String>,
}

/// Payload for a partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestPayload {
    pub requester: Option<String>,
    pub category: Option<String>,
    pub details: Option<String>,
    pub location: Option<String>,
    pub quantity: Option<String>,
    pub team_id: Option<String>,
    pub spoc_id: Option<String>,
    pub status: Option<RequestStatus>,
}

fn default_category() -> String {
    "Other".to_string()
}
