/**
 * Application State Management
 *
 * `AppState` is the central state container handed to every handler. It
 * is cheap to clone: each field is either an `Arc` or a handle that wraps
 * one.
 */

use std::sync::Arc;

use crate::backend::auth::login_state::LoginStateStore;
use crate::backend::auth::provider::IdentityProvider;
use crate::backend::auth::session_store::SessionStore;
use crate::backend::auth::sessions::SessionSigner;
use crate::backend::pages::PageStore;
use crate::backend::server::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Page document store (PostgreSQL or in-memory)
    pub pages: Arc<dyn PageStore>,
    /// Live sessions keyed by session id
    pub sessions: SessionStore,
    /// Logins awaiting the provider callback
    pub login_states: LoginStateStore,
    /// Signs and verifies session cookies with `APP_SECRET_KEY`
    pub signer: SessionSigner,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        pages: Arc<dyn PageStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let signer = SessionSigner::new(&config.secret_key);
        Self {
            config: Arc::new(config),
            pages,
            sessions: SessionStore::new(),
            login_states: LoginStateStore::new(),
            signer,
            identity,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use async_trait::async_trait;

    use crate::backend::auth::provider::{Identity, ProviderError};
    use crate::backend::pages::MemoryPageStore;
    use crate::backend::server::config::SessionSettings;

    /// Provider that accepts the code `good`
    pub struct FixedProvider;

    #[async_trait]
    impl IdentityProvider for FixedProvider {
        fn authorize_url(&self, redirect_uri: &str, state: &str) -> Result<String, ProviderError> {
            Ok(format!(
                "https://idp.test/authorize?redirect_uri={}&state={}",
                redirect_uri, state
            ))
        }

        async fn exchange_code(&self, code: &str, _redirect_uri: &str) -> Result<Identity, ProviderError> {
            match code {
                "good" => Ok(Identity {
                    name: "Ada Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                }),
                _ => Err(ProviderError::Rejected("invalid_grant".to_string())),
            }
        }
    }

    pub fn test_config() -> ServerConfig {
        ServerConfig {
            database_url: String::new(),
            secret_key: "unit-test-secret".to_string(),
            allowed_origins: vec!["http://localhost:5173".to_string()],
            frontend_url: "http://localhost:5173".to_string(),
            public_url: Some("http://localhost:8000".to_string()),
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            session: SessionSettings::default(),
            oidc: Default::default(),
            in_memory: true,
        }
    }

    pub fn test_state() -> AppState {
        AppState::new(
            test_config(),
            Arc::new(MemoryPageStore::new()),
            Arc::new(FixedProvider),
        )
    }
}
