//! In-memory page store
//!
//! A [`PageStore`] that keeps pages in a `BTreeMap` behind a `RwLock`. Used
//! by the test suite and for local runs with `PAGESTORE_IN_MEMORY=1`; data is
//! lost when the process exits.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::store::{PageStore, StoreError};
use crate::shared::{Page, PageContent, PageId};

#[derive(Debug, Default)]
struct Pages {
    last_id: PageId,
    records: BTreeMap<PageId, Value>,
}

/// Page store held entirely in process memory
#[derive(Clone, Default)]
pub struct MemoryPageStore {
    pages: Arc<RwLock<Pages>>,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.pages.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn create(&self, content: PageContent) -> Result<Page, StoreError> {
        let mut pages = self.pages.write().await;
        pages.last_id += 1;
        let id = pages.last_id;
        let content = content.into_value();
        pages.records.insert(id, content.clone());
        Ok(Page { id, content })
    }

    async fn list(&self) -> Result<Vec<Page>, StoreError> {
        let pages = self.pages.read().await;
        Ok(pages
            .records
            .iter()
            .map(|(id, content)| Page { id: *id, content: content.clone() })
            .collect())
    }

    async fn get(&self, id: PageId) -> Result<Page, StoreError> {
        let pages = self.pages.read().await;
        pages
            .records
            .get(&id)
            .map(|content| Page { id, content: content.clone() })
            .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: PageId, content: Option<PageContent>) -> Result<Page, StoreError> {
        let mut pages = self.pages.write().await;
        let stored = pages.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(content) = content {
            *stored = content.into_value();
        }
        Ok(Page { id, content: stored.clone() })
    }

    async fn delete(&self, id: PageId) -> Result<(), StoreError> {
        let mut pages = self.pages.write().await;
        pages
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
