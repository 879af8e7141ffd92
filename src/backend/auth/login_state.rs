/**
 * Login State Tokens
 *
 * `/login` issues a random `state` value, remembers it together with the
 * callback URL it used, and sends it to the identity provider. `/callback`
 * must present the same value exactly once and within `LOGIN_STATE_TTL`;
 * anything else is treated as a forged or replayed callback.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// How long a login attempt may stay pending
pub const LOGIN_STATE_TTL_SECS: i64 = 600;

/// Upper bound on pending login attempts held in memory
pub const MAX_PENDING_LOGINS: usize = 10_000;

/// A pending authorization-code login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginState {
    /// Anti-CSRF correlation value echoed back by the provider
    pub state: String,
    /// Callback URL sent to the provider; the code exchange must repeat it
    pub redirect_uri: String,
    pub issued_at: DateTime<Utc>,
}

impl LoginState {
    pub fn new(redirect_uri: impl Into<String>) -> Self {
        Self {
            state: Uuid::new_v4().simple().to_string(),
            redirect_uri: redirect_uri.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.issued_at >= ttl
    }
}

/// Pending login attempts keyed by `state`
#[derive(Clone)]
pub struct LoginStateStore {
    pending: Arc<RwLock<HashMap<String, LoginState>>>,
    ttl: Duration,
    max_pending: usize,
}

impl Default for LoginStateStore {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(LOGIN_STATE_TTL_SECS))
    }
}

impl LoginStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self::with_limits(ttl, MAX_PENDING_LOGINS)
    }

    pub fn with_limits(ttl: Duration, max_pending: usize) -> Self {
        Self {
            pending: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_pending: max_pending.max(1),
        }
    }

    /// Record a pending login
    ///
    /// At capacity, expired entries are dropped first and then the oldest
    /// pending logins until there is room.
    pub async fn insert(&self, login: LoginState) {
        let mut pending = self.pending.write().await;

        if pending.len() >= self.max_pending {
            let now = Utc::now();
            let ttl = self.ttl;
            pending.retain(|_, existing| !existing.is_expired_at(now, ttl));
        }

        while pending.len() >= self.max_pending {
            let oldest = pending
                .values()
                .min_by_key(|existing| existing.issued_at)
                .map(|existing| existing.state.clone());
            match oldest {
                Some(state) => {
                    tracing::warn!("Pending login limit reached, evicting oldest");
                    pending.remove(&state);
                }
                None => break,
            }
        }

        pending.insert(login.state.clone(), login);
    }

    /// Take the pending login for `state`
    ///
    /// The entry is removed whether or not it is still valid, so a state
    /// value can never be used twice.
    pub async fn consume(&self, state: &str) -> Option<LoginState> {
        let login = self.pending.write().await.remove(state)?;
        if login.is_expired_at(Utc::now(), self.ttl) {
            tracing::warn!("Login state expired before callback");
            return None;
        }
        Some(login)
    }

    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let ttl = self.ttl;
        let mut pending = self.pending.write().await;
        let before = pending.len();
        pending.retain(|_, login| !login.is_expired_at(now, ttl));
        before - pending.len()
    }

    pub async fn len(&self) -> usize {
        self.pending.read().await.len()
    }
}
