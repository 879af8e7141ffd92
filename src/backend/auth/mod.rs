//! Authentication Module
//!
//! Session-gated access for the page API. Users authenticate with an
//! external OpenID Connect provider using the authorization-code flow;
//! the service keeps the resulting session server-side and hands the
//! browser a signed cookie that refers to it.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs            - Module exports and documentation
//! ├── provider.rs       - IdentityProvider trait and OIDC client
//! ├── login_state.rs    - Single-use anti-CSRF login state
//! ├── session_store.rs  - Server-side sessions
//! ├── sessions.rs       - Signed session tokens (JWT)
//! ├── cookie.rs         - Session cookie helpers
//! └── handlers/         - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Login**: `/login` issues a `state`, binds it to the browser with the
//!    signed `pagestore_login` cookie and redirects to the provider
//! 2. **Callback**: `/callback` checks the `state` against that cookie and the
//!    pending logins, exchanges the code, creates a session and sets the
//!    `pagestore_session` cookie
//! 3. **Requests**: `require_session` resolves the cookie on `/api/*`
//! 4. **Logout**: `/logout` removes the session; otherwise it expires after
//!    `SESSION_MAX_AGE_SECS`

/// Identity provider integration
pub mod provider;

/// Pending login attempts
pub mod login_state;

/// Server-side session storage
pub mod session_store;

/// Session token signing and validation
pub mod sessions;

/// Session cookie formatting and parsing
pub mod cookie;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{CallbackParams, UserResponse};
pub use handlers::{callback, get_me, login, logout};
pub use login_state::{LoginState, LoginStateStore};
pub use provider::{Identity, IdentityProvider, OidcConfig, OidcProvider, ProviderError};
pub use session_store::{Session, SessionStore};
pub use sessions::{SessionClaims, SessionSigner};
