//! Backend Module
//!
//! All server-side code for the page store: an Axum HTTP server exposing
//! JSON page documents behind an OAuth2/OIDC login.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly and HTTP layers
//! - **`pages`** - Page store trait, PostgreSQL and in-memory stores, handlers
//! - **`auth`** - Identity provider, sessions, login flow handlers
//! - **`middleware`** - Session guard for `/api`
//! - **`error`** - Error taxonomy and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── pages/          - Page documents
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the page store as `Arc<dyn PageStore>`, the session and
//! login-state stores, the cookie signer and the identity provider. The
//! in-memory stores use `Arc<tokio::sync::RwLock<_>>`.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; `BackendError` renders as
//! `{"error", "detail", "status"}` with a generic detail so storage and
//! provider internals never reach the client.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Page documents
pub mod pages;

/// Backend error types
pub mod error;

/// Authentication and sessions
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::{create_app, AppState, ServerConfig};
