/**
 * Backend Error Types
 *
 * This module defines the error taxonomy surfaced by the HTTP layer.
 * Every handler returns `Result<_, BackendError>`; the conversion module
 * turns each variant into a status code and a generic JSON body.
 *
 * # Error Categories
 *
 * - `NotFound` - The referenced page does not exist
 * - `Validation` - Malformed request body or path
 * - `Unauthenticated` - Missing, expired or tampered session
 * - `UpstreamAuth` - The identity provider exchange failed
 * - `StorageUnavailable` - Database connection or statement failure
 * - `Config` - The server is misconfigured for the requested operation
 *
 * Internal details (database errors, provider responses) are logged where
 * the error is created and never placed in the response body.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::{PageId, SharedError};

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use pagestore::backend::error::BackendError;
///
/// let err = BackendError::not_found(42);
/// assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The referenced page does not exist
    #[error("Page {id} not found")]
    NotFound {
        id: PageId,
    },

    /// Request body or path failed validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// No valid session accompanies the request
    #[error("Not authenticated")]
    Unauthenticated,

    /// Authorization-code exchange with the identity provider failed
    ///
    /// `status` is 4xx when the provider rejected the attempt and 5xx when
    /// it could not be reached.
    #[error("Identity provider error: {message}")]
    UpstreamAuth {
        status: StatusCode,
        message: String,
    },

    /// Database connection or transaction failure
    #[error("Storage unavailable")]
    StorageUnavailable,

    /// Missing or invalid server configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },

    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },
}

impl BackendError {
    pub fn not_found(id: PageId) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The provider refused the attempt (bad code, bad state, missing claims)
    pub fn upstream_rejected(message: impl Into<String>) -> Self {
        Self::UpstreamAuth {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// The provider could not be reached or answered with a server error
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::UpstreamAuth {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404 Not Found
    /// - `Validation` - 422 Unprocessable Entity
    /// - `Unauthenticated` - 401 Unauthorized
    /// - `UpstreamAuth` - The status carried by the error (400 or 502)
    /// - `StorageUnavailable` - 503 Service Unavailable
    /// - `Config` - 500 Internal Server Error
    /// - `HandlerError` - Uses the status code from the error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::UpstreamAuth { status, .. } => *status,
            Self::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HandlerError { status, .. } => *status,
        }
    }

    /// Machine-readable error kind used in response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::Validation { .. } => "validation_error",
            Self::Unauthenticated => "unauthenticated",
            Self::UpstreamAuth { .. } => "upstream_auth_failure",
            Self::StorageUnavailable => "storage_unavailable",
            Self::Config { .. } => "configuration_error",
            Self::HandlerError { .. } => "request_error",
        }
    }

    /// Client-facing detail message
    ///
    /// Storage and configuration failures return fixed strings so internal
    /// errors never reach the client.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { .. } => "Page not found".to_string(),
            Self::Validation { message } => message.clone(),
            Self::Unauthenticated => "Not authenticated".to_string(),
            Self::UpstreamAuth { message, .. } => message.clone(),
            Self::StorageUnavailable => "Storage is temporarily unavailable".to_string(),
            Self::Config { .. } => "Server is not configured for this operation".to_string(),
            Self::HandlerError { message, .. } => message.clone(),
        }
    }
}

impl From<SharedError> for BackendError {
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::ValidationError { field, message } => {
                Self::validation(format!("{}: {}", field, message))
            }
        }
    }
}

impl From<sqlx::Error> for BackendError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        Self::StorageUnavailable
    }
}
