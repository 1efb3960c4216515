//! Postgres-backed request store.

use async_trait::async_trait;
use chrono::Utc;
use domain::models::request::ServiceRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::RequestEntity;
use crate::store::{NewRequest, RequestChanges, RequestStore, StoreError};

/// Request store backed by the `requests` table.
#[derive(Clone)]
pub struct PgRequestStore {
    pool: PgPool,
}

impl PgRequestStore {
    /// Creates a new store over the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn list(&self) -> Result<Vec<ServiceRequest>, StoreError> {
        let entities = sqlx::query_as::<_, RequestEntity>(
            r#"
            SELECT id, requester, category, details, location, quantity,
                   team_id, spoc_id, status, created_at
            FROM requests
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(entities.into_iter().map(ServiceRequest::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<ServiceRequest>, StoreError> {
        let entity = sqlx::query_as::<_, RequestEntity>(
            r#"
            SELECT id, requester, category, details, location, quantity,
                   team_id, spoc_id, status, created_at
            FROM requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entity.map(ServiceRequest::from))
    }

    async fn insert(&self, new: NewRequest) -> Result<ServiceRequest, StoreError> {
        let entity = sqlx::query_as::<_, RequestEntity>(
            r#"
            INSERT INTO requests (id, requester, category, details, location,
                                  quantity, team_id, spoc_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', $9)
            RETURNING id, requester, category, details, location, quantity,
                      team_id, spoc_id, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.requester)
        .bind(&new.category)
        .bind(&new.details)
        .bind(&new.location)
        .bind(&new.quantity)
        .bind(&new.team_id)
        .bind(&new.spoc_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;
        Ok(ServiceRequest::from(entity))
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RequestChanges,
    ) -> Result<Option<ServiceRequest>, StoreError> {
        let entity = sqlx::query_as::<_, RequestEntity>(
            r#"
            UPDATE requests SET
                requester = COALESCE($2, requester),
                category  = COALESCE($3, category),
                details   = COALESCE($4, details),
                location  = COALESCE($5, location),
                quantity  = COALESCE($6, quantity),
                team_id   = COALESCE($7, team_id),
                spoc_id   = COALESCE($8, spoc_id),
                status    = COALESCE($9, status)
            WHERE id = $1
            RETURNING id, requester, category, details, location, quantity,
                      team_id, spoc_id, status, created_at
            "#,
        )
        .bind(id)
        .bind(&changes.requester)
        .bind(&changes.category)
        .bind(&changes.details)
        .bind(&changes.location)
        .bind(&changes.quantity)
        .bind(&changes.team_id)
        .bind(&changes.spoc_id)
        .bind(changes.status.map(|status| status.as_str()))
        .fetch_optional(&self.pool)
        .await?;
        Ok(entity.map(ServiceRequest::from))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<ServiceRequest>, StoreError> {
        let entity = sqlx::query_as::<_, RequestEntity>(
            r#"
            DELETE FROM requests
            WHERE id = $1
            RETURNING id, requester, category, details, location, quantity,
                      team_id, spoc_id, status, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(entity.map(ServiceRequest::from))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
