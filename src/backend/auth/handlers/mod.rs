//! Authentication Handlers Module
//!
//! HTTP handlers for the login flow and the current-session endpoint.
//!
//! # Handlers
//!
//! - **`login`** - GET /login - redirect to the identity provider
//! - **`callback`** - GET /callback - exchange the code, set the session cookie
//! - **`logout`** - GET /logout - end the session
//! - **`get_me`** - GET /api/me - identity of the current session
//!
//! # Example
//!
//! ```rust,no_run
//! use pagestore::backend::auth::handlers::{callback, login, logout};
//! use pagestore::backend::server::state::AppState;
//! use axum::{routing::get, Router};
//!
//! let router: Router<AppState> = Router::new()
//!     .route("/login", get(login))
//!     .route("/callback", get(callback))
//!     .route("/logout", get(logout));
//! ```

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Provider callback handler
pub mod callback;

/// Logout handler
pub mod logout;

/// Get current user handler
pub mod me;

pub use types::{CallbackParams, UserResponse};

pub use callback::callback;
pub use login::login;
pub use logout::logout;
pub use me::get_me;
