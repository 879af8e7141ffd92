//! Page HTTP Handlers
//!
//! Handlers for the `/api/page` routes. They are mounted behind
//! `require_session`, so an unauthenticated request never reaches them, and
//! each takes `AuthUser` so the guard is also enforced at the type level.

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::error::{ApiJson, ApiPath, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{CreatePageRequest, Page, PageContent, PageId, UpdatePageRequest};

/// `POST /api/page/` - store a new page
pub async fn create_page(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreatePageRequest>,
) -> Result<Json<Page>, BackendError> {
    let content = PageContent::for_create(request.content)?;
    let page = state.pages.create(content).await?;

    tracing::info!("Page {} created by {}", page.id, user.email);
    Ok(Json(page))
}

/// `GET /api/page/` - all pages
pub async fn list_pages(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Vec<Page>>, BackendError> {
    let pages = state.pages.list().await?;
    Ok(Json(pages))
}

/// `GET /api/page/{id}`
pub async fn get_page(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<PageId>,
) -> Result<Json<Page>, BackendError> {
    let page = state.pages.get(id).await?;
    Ok(Json(page))
}

/// `PUT /api/page/{id}` - full replacement of the content tree
pub async fn update_page(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<PageId>,
    ApiJson(request): ApiJson<UpdatePageRequest>,
) -> Result<Json<Page>, BackendError> {
    let content = PageContent::for_update(request.content)?;
    let replaced = content.is_some();
    let page = state.pages.update(id, content).await?;

    if replaced {
        tracing::info!("Page {} updated by {}", id, user.email);
    }
    Ok(Json(page))
}

/// `DELETE /api/page/{id}`
pub async fn delete_page(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<PageId>,
) -> Result<StatusCode, BackendError> {
    state.pages.delete(id).await?;

    tracing::info!("Page {} deleted by {}", id, user.email);
    Ok(StatusCode::NO_CONTENT)
}
