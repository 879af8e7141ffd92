//! Shared Module
//!
//! This module contains types that are shared between the server and its
//! clients. They define the JSON shapes exchanged over the page API.

/// Page records and request bodies
pub mod page;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use page::{CreatePageRequest, Page, PageContent, PageId, UpdatePageRequest};
pub use error::SharedError;
