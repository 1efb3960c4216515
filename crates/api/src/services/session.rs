//! SPOC session token store.
//!
//! Sessions are opaque random tokens mapped to an expiry instant and an
//! optional SPOC id, held in process memory only. The store is behind a
//! trait so it can be swapped for a shared external store if the service
//! is ever scaled past one instance.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use shared::token::generate_token;

/// A live SPOC session. `spoc_id` is `None` for sessions opened with the
/// shared PIN (full access).
#[derive(Debug, Clone)]
pub struct Session {
    pub spoc_id: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// A newly issued session token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Storage for session tokens, keyed by the opaque token string.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issues a new token valid for `ttl_secs` seconds.
    async fn issue(&self, spoc_id: Option<String>, ttl_secs: u64) -> IssuedSession;

    /// Returns the session for a token that exists and has not expired.
    async fn validate(&self, token: &str) -> Option<Session>;
}

/// In-memory session store.
///
/// Each issued token schedules its own cleanup timer, fired slightly
/// after the expiry instant; lookups additionally evict entries that
/// have already expired. There is no size bound: the map grows until
/// process restart.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    expiry_margin: Duration,
}

impl InMemorySessionStore {
    pub fn new(expiry_margin: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            expiry_margin,
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn issue(&self, spoc_id: Option<String>, ttl_secs: u64) -> IssuedSession {
        let token = generate_token();
        let expires_at = Utc::now() + ChronoDuration::seconds(ttl_secs as i64);

        self.sessions.write().await.insert(
            token.clone(),
            Session {
                spoc_id,
                expires_at,
            },
        );

        let sessions = Arc::clone(&self.sessions);
        let expired_token = token.clone();
        let delay = Duration::from_secs(ttl_secs) + self.expiry_margin;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sessions.write().await.remove(&expired_token);
        });

        IssuedSession { token, expires_at }
    }

    async fn validate(&self, token: &str) -> Option<Session> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(token) {
                Some(session) if session.expires_at > now => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        // Expired entry: evict it ahead of the timer.
        self.sessions.write().await.remove(token);
        None
    }
}
