/**
 * Authentication Request and Response Types
 *
 * Query parameters the identity provider sends to `/callback` and the body
 * returned by `/api/me`.
 */

use serde::{Deserialize, Serialize};

/// Query string of `GET /callback`
///
/// A successful authorization carries `code` and `state`; a failed one
/// carries `error` (and usually `error_description`) instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Identity of the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
}
