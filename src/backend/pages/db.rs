//! Database operations for pages
//!
//! PostgreSQL implementation of [`PageStore`]. Each operation is a single
//! statement, so every mutation commits as soon as it returns.

use async_trait::async_trait;
use sqlx::PgPool;

use super::store::{PageStore, StoreError};
use crate::shared::{Page, PageContent, PageId};

/// Page store backed by the `pages` table
#[derive(Clone)]
pub struct PgPageStore {
    pool: PgPool,
}

impl PgPageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageStore for PgPageStore {
    async fn create(&self, content: PageContent) -> Result<Page, StoreError> {
        let page = sqlx::query_as::<_, Page>(
            r#"
            INSERT INTO pages (content)
            VALUES ($1)
            RETURNING id, content
            "#
        )
        .bind(content.into_value())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created page {}", page.id);
        Ok(page)
    }

    async fn list(&self) -> Result<Vec<Page>, StoreError> {
        let pages = sqlx::query_as::<_, Page>(
            r#"
            SELECT id, content
            FROM pages
            ORDER BY id
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(pages)
    }

    async fn get(&self, id: PageId) -> Result<Page, StoreError> {
        sqlx::query_as::<_, Page>(
            r#"
            SELECT id, content
            FROM pages
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn update(&self, id: PageId, content: Option<PageContent>) -> Result<Page, StoreError> {
        // NULL keeps the stored tree; anything else replaces it wholesale.
        sqlx::query_as::<_, Page>(
            r#"
            UPDATE pages
            SET content = COALESCE($2, content)
            WHERE id = $1
            RETURNING id, content
            "#
        )
        .bind(id)
        .bind(content.map(PageContent::into_value))
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: PageId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM pages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::debug!("Deleted page {}", id);
        Ok(())
    }
}
