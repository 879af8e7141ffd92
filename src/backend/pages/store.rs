/**
 * Page Store Interface
 *
 * `PageStore` is the seam between the HTTP handlers and persistence. The
 * store knows nothing about sessions or identity; handlers resolve the
 * caller's session before any store method runs.
 *
 * # Semantics
 *
 * - `create` always assigns a fresh id
 * - `get`, `update` and `delete` fail with `StoreError::NotFound` for ids
 *   that were never created or have been deleted
 * - `update` with `None` leaves the record untouched but still returns it
 * - `update` with `Some(content)` replaces the whole tree (no merge);
 *   concurrent updates to one page are last-writer-wins
 * - every mutation commits before the call returns
 */

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::error::BackendError;
use crate::shared::{Page, PageContent, PageId};

/// Errors produced by page store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("page {0} not found")]
    NotFound(PageId),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<StoreError> for BackendError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => BackendError::not_found(id),
            StoreError::Unavailable(detail) => {
                tracing::error!("Page store failure: {}", detail);
                BackendError::StorageUnavailable
            }
        }
    }
}

/// Durable CRUD over page records
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Store a new page and return it with its assigned id
    async fn create(&self, content: PageContent) -> Result<Page, StoreError>;

    /// All pages, ordered by id
    async fn list(&self) -> Result<Vec<Page>, StoreError>;

    async fn get(&self, id: PageId) -> Result<Page, StoreError>;

    /// Replace the content of a page, or re-read it when `content` is `None`
    async fn update(&self, id: PageId, content: Option<PageContent>) -> Result<Page, StoreError>;

    async fn delete(&self, id: PageId) -> Result<(), StoreError>;
}
