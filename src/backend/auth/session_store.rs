/**
 * Server-Side Session Store
 *
 * Sessions live in process memory keyed by an opaque id (uuid v4). The
 * browser only ever holds a signed reference to that id (see `sessions`).
 * Lifetime is fixed at creation; activity does not extend it.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::provider::Identity;

/// An authenticated browser session
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Session {
    /// Opaque session ID
    pub id: String,
    /// Identity `name` claim
    pub name: String,
    /// Identity `email` claim
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(identity: Identity, lifetime: Duration) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: identity.name,
            email: identity.email,
            created_at,
            expires_at: created_at + lifetime,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// In-memory map from session id to session
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a session for a verified identity
    pub async fn create(&self, identity: Identity, lifetime: Duration) -> Session {
        let session = Session::new(identity, lifetime);
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        session
    }

    /// Look up a live session; expired sessions are removed and yield `None`
    pub async fn get(&self, id: &str) -> Option<Session> {
        let session = self.sessions.read().await.get(id).cloned()?;
        if session.is_expired() {
            self.sessions.write().await.remove(id);
            return None;
        }
        Some(session)
    }

    /// Remove a session, returning whether it existed
    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            name: "Grace Hopper".to_string(),
            email: "grace@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new();
        let session = store.create(identity(), Duration::hours(1)).await;

        let found = store.get(&session.id).await.unwrap();
        assert_eq!(found.name, "Grace Hopper");
        assert_eq!(found.email, "grace@example.com");
        assert_eq!(found.expires_at - found.created_at, Duration::hours(1));
    }

    #[tokio::test]
    async fn test_session_ids_are_unique() {
        let store = SessionStore::new();
        let first = store.create(identity(), Duration::hours(1)).await;
        let second = store.create(identity(), Duration::hours(1)).await;
        assert_ne!(first.id, second.id);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_returned() {
        let store = SessionStore::new();
        let session = store.create(identity(), Duration::seconds(-1)).await;

        assert!(store.get(&session.id).await.is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = SessionStore::new();
        let session = store.create(identity(), Duration::hours(1)).await;

        assert!(store.remove(&session.id).await);
        assert!(!store.remove(&session.id).await);
        assert!(store.get(&session.id).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_sessions() {
        let store = SessionStore::new();
        let live = store.create(identity(), Duration::hours(1)).await;
        store.create(identity(), Duration::seconds(-5)).await;
        store.create(identity(), Duration::seconds(-5)).await;

        assert_eq!(store.purge_expired().await, 2);
        assert!(store.get(&live.id).await.is_some());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = Session::new(identity(), Duration::seconds(-30));
        assert!(session.is_expired());
        assert!(!session.is_expired_at(session.created_at - Duration::minutes(1)));
    }
}
