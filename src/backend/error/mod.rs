//! Backend Error Module
//!
//! This module defines the error types surfaced by the HTTP layer.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error taxonomy and status mapping
//! └── conversion.rs - IntoResponse and rejection-mapping extractors
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return it directly.
//! All errors are handled at the request boundary; none are retried.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
pub use conversion::{ApiJson, ApiPath};
