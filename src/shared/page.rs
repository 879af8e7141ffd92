/**
 * Page Data Structures
 *
 * This module defines the `Page` record returned by the page API and the
 * request bodies accepted by it. Page content is an opaque rich-document
 * tree (e.g. a block/mark editor document); the only shape rule enforced is
 * that it is a JSON object or array.
 */
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::error::SharedError;

/// Server-assigned page identifier
pub type PageId = i64;

/// A stored document record
///
/// # Fields
/// * `id` - Server-assigned identifier, immutable once created
/// * `content` - The document tree, never `null`
///
/// # Example
/// ```rust
/// use pagestore::shared::Page;
///
/// let page: Page = serde_json::from_str(r#"{"id": 7, "content": {"type": "doc"}}"#).unwrap();
/// assert_eq!(page.id, 7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Page {
    /// Unique page ID
    pub id: PageId,
    /// Document tree stored as JSONB
    pub content: Value,
}

/// Validated page content
///
/// Wraps a `serde_json::Value` that is guaranteed to be an object or an
/// array. Construct it through [`PageContent::new`],
/// [`PageContent::for_create`] or [`PageContent::for_update`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PageContent(Value);

impl PageContent {
    /// The empty document, `{}`
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// Validate a content value
    ///
    /// # Errors
    /// Returns a validation error for `null`, strings, numbers and booleans,
    /// and for trees with a U+0000 character in any key or string, which
    /// PostgreSQL `JSONB` cannot store.
    pub fn new(value: Value) -> Result<Self, SharedError> {
        match value {
            Value::Object(_) | Value::Array(_) if contains_nul(&value) => Err(SharedError::validation(
                "content",
                "must not contain U+0000 characters",
            )),
            Value::Object(_) | Value::Array(_) => Ok(Self(value)),
            other => Err(SharedError::validation(
                "content",
                format!("must be a JSON object or array, got {}", kind_of(&other)),
            )),
        }
    }

    /// Content for a create request; absent or `null` becomes `{}`
    pub fn for_create(value: Option<Value>) -> Result<Self, SharedError> {
        match value {
            None | Some(Value::Null) => Ok(Self::empty()),
            Some(value) => Self::new(value),
        }
    }

    /// Content for an update request; absent or `null` means "leave unchanged"
    pub fn for_update(value: Option<Value>) -> Result<Option<Self>, SharedError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Self::new(value).map(Some),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self::empty()
    }
}

fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(text) => text.contains('\0'),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(map) => map
            .iter()
            .any(|(key, item)| key.contains('\0') || contains_nul(item)),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Body of `POST /api/page/`
///
/// `docId` is sent by editor clients and accepted for compatibility, but the
/// server always assigns the id itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePageRequest {
    /// Client-side document identifier (ignored)
    #[serde(default, rename = "docId", skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    /// Document tree; defaults to `{}`
    #[serde(default)]
    pub content: Option<Value>,
}

/// Body of `PUT /api/page/{id}`
///
/// When `content` is present it replaces the stored tree wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePageRequest {
    #[serde(default)]
    pub content: Option<Value>,
}
