/**
 * Server Initialization
 *
 * Builds the application from a `ServerConfig`:
 * 1. Open the page store (PostgreSQL with migrations, or in-memory)
 * 2. Build the identity provider client
 * 3. Create `AppState`
 * 4. Start the periodic cleanup task
 * 5. Create the router
 */

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use crate::backend::auth::login_state::LoginStateStore;
use crate::backend::auth::provider::{IdentityProvider, OidcProvider};
use crate::backend::auth::session_store::SessionStore;
use crate::backend::error::BackendError;
use crate::backend::pages::{MemoryPageStore, PageStore, PgPageStore};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Interval of the expired session / login state sweep
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
///
/// # Errors
///
/// Database connection or migration failures are fatal and returned;
/// `main` exits non-zero on them. A missing identity provider
/// configuration is not fatal: the service starts and `/login` answers 500.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing page store backend");

    let pages: Arc<dyn PageStore> = if config.in_memory {
        tracing::warn!("PAGESTORE_IN_MEMORY set: pages are not persisted");
        Arc::new(MemoryPageStore::new())
    } else {
        let pool = load_database(&config).await?;
        Arc::new(PgPageStore::new(pool))
    };

    if config.oidc.issuer.is_none() {
        tracing::warn!("OIDC_ISSUER not set: /login will fail until the identity provider is configured");
    }
    let identity: Arc<dyn IdentityProvider> = Arc::new(OidcProvider::new(config.oidc.clone())?);

    let app_state = AppState::new(config, pages, identity);

    spawn_cleanup_task(app_state.sessions.clone(), app_state.login_states.clone());

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic cleanup task");

    Ok(app)
}

/// Periodically drop expired sessions and abandoned logins
pub fn spawn_cleanup_task(sessions: SessionStore, login_states: LoginStateStore) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let expired_sessions = sessions.purge_expired().await;
            let expired_logins = login_states.purge_expired().await;
            tracing::debug!(
                "Cleanup removed {} expired sessions and {} stale login states",
                expired_sessions,
                expired_logins
            );
        }
    })
}
