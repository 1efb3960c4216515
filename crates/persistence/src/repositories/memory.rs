//! In-memory request store.
//!
//! Backs the integration tests and local development without Postgres.

use async_trait::async_trait;
use chrono::Utc;
use domain::models::request::{RequestStatus, ServiceRequest};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{NewRequest, RequestChanges, RequestStore, StoreError};

/// Request store over a process-local map.
#[derive(Default)]
pub struct MemoryRequestStore {
    requests: RwLock<HashMap<Uuid, ServiceRequest>>,
}

impl MemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestStore for MemoryRequestStore {
    async fn list(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        let requests = self.requests.read().await;
        let mut all: Vec<ServiceRequest> = requests.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find(&self, id: Uuid) -> Result<Option<ServiceRequest>, StoreError> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn insert(&self, new: NewRequest) -> Result<ServiceRequest, StoreError> {
        let request = ServiceRequest {
            id: Uuid::new_v4(),
            requester: new.requester,
            category: new.category,
            details: new.details,
            location: new.location,
            quantity: new.quantity,
            team_id: new.team_id,
            spoc_id: new.spoc_id,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RequestChanges,
    ) -> Result<Option<ServiceRequest>, StoreError> {
        let mut requests = self.requests.write().await;
        Ok(requests.get_mut(&id).map(|request| {
            changes.apply(request);
            request.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<ServiceRequest>, StoreError> {
        Ok(self.requests.write().await.remove(&id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
