//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and test fixtures
//! ├── config.rs       - Environment configuration and database loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env` in `main`
//! 2. **Storage**: PostgreSQL pool and migrations, or the in-memory store
//! 3. **State Creation**: sessions, login states, signer, identity provider
//! 4. **Background Tasks**: expired session cleanup
//! 5. **Router Creation**: routes, session guard, CORS and tracing layers
//!
//! # Example
//!
//! ```rust,no_run
//! use pagestore::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig, SessionSettings};
pub use init::create_app;
pub use state::AppState;
