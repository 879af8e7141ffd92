//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`auth`** - session guard for the `/api` routes
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, Router};
//! use pagestore::backend::middleware::require_session;
//! use pagestore::backend::server::state::AppState;
//!
//! fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
//!     router.layer(middleware::from_fn_with_state(state, require_session))
//! }
//! ```

pub mod auth;

pub use auth::{require_session, resolve_session, AuthUser, AuthenticatedUser};
