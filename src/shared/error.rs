//! Shared Error Types
//!
//! Errors raised while building or validating the transport types in
//! [`crate::shared::page`]. They are independent of the HTTP layer so that
//! clients can reuse the same validation.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field holds a value the page API does not accept
//!
//! # Usage
//!
//! ```rust
//! use pagestore::shared::error::SharedError;
//!
//! let error = SharedError::validation("content", "must be a JSON object or array");
//! ```
use thiserror::Error;

/// Shared error types that can occur on both sides of the page API
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
