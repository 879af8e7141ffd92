//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router, public routes and HTTP layers
//! └── api_routes.rs   - Session-guarded API routes
//! ```
//!
//! # Route Types
//!
//! ## Public Routes
//!
//! - `GET /` - redirect to `/login`
//! - `GET /login`, `GET /callback`, `GET /logout` - session lifecycle
//! - `GET /health` - liveness check
//!
//! ## API Routes
//!
//! - `/api/page/...` - page documents
//! - `GET /api/me` - current session identity
//!
//! Requests to API routes without a valid session get 401 and never reach a
//! handler.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
