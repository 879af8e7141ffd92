//! Application fixtures
//!
//! Builds the full router over a `MemoryPageStore` (optionally wrapped to
//! count calls) and the stub identity provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;

use pagestore::backend::auth::IdentityProvider;
use pagestore::backend::pages::{MemoryPageStore, PageStore, StoreError};
use pagestore::backend::routes::create_router;
use pagestore::backend::server::{AppState, ServerConfig, SessionSettings};
use pagestore::shared::{Page, PageContent, PageId};

use super::auth_helpers::StubProvider;

pub const FRONTEND_URL: &str = "http://localhost:5173";
pub const PUBLIC_URL: &str = "http://localhost:8000";

pub fn test_config() -> ServerConfig {
    ServerConfig {
        database_url: String::new(),
        secret_key: "integration-test-secret".to_string(),
        allowed_origins: vec![FRONTEND_URL.to_string()],
        frontend_url: FRONTEND_URL.to_string(),
        public_url: Some(PUBLIC_URL.to_string()),
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 8000,
        session: SessionSettings::default(),
        oidc: Default::default(),
        in_memory: true,
    }
}

/// `PageStore` wrapper recording how many calls reached the store
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryPageStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageStore for CountingStore {
    async fn create(&self, content: PageContent) -> Result<Page, StoreError> {
        self.hit();
        self.inner.create(content).await
    }

    async fn list(&self) -> Result<Vec<Page>, StoreError> {
        self.hit();
        self.inner.list().await
    }

    async fn get(&self, id: PageId) -> Result<Page, StoreError> {
        self.hit();
        self.inner.get(id).await
    }

    async fn update(&self, id: PageId, content: Option<PageContent>) -> Result<Page, StoreError> {
        self.hit();
        self.inner.update(id, content).await
    }

    async fn delete(&self, id: PageId) -> Result<(), StoreError> {
        self.hit();
        self.inner.delete(id).await
    }
}

/// Running test server plus handles into its state
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<CountingStore>,
    pub provider: Arc<StubProvider>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self::with_provider(config, StubProvider::new())
    }

    pub fn with_provider(config: ServerConfig, provider: StubProvider) -> Self {
        let store = Arc::new(CountingStore::default());
        let provider = Arc::new(provider);
        let state = AppState::new(
            config,
            store.clone() as Arc<dyn PageStore>,
            provider.clone() as Arc<dyn IdentityProvider>,
        );
        let server = TestServer::new(create_router(state.clone())).expect("test server");
        Self {
            server,
            state,
            store,
            provider,
        }
    }
}
