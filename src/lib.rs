//! PageStore - Main Library
//!
//! PageStore is a document-persistence service for rich-text editor pages.
//! Pages are stored as opaque JSON trees in PostgreSQL and exposed through a
//! small CRUD API that sits behind an OAuth2/OIDC-authenticated session.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between the server and its clients
//!   - `Page` records, request bodies, content validation
//!   - Shared error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routes and CORS
//!   - Page store (PostgreSQL and in-memory implementations)
//!   - Authorization-code login flow and signed session cookies
//!   - Error taxonomy and HTTP conversion
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use pagestore::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` for validation of transport types
//! - `backend::error::BackendError` for everything surfaced over HTTP

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
