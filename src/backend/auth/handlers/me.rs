/**
 * Current User Handler
 *
 * `GET /api/me` returns the identity bound to the caller's session. Mounted
 * behind `require_session`.
 */

use axum::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::AuthUser;

/// Current user handler
///
/// # Example Response
///
/// ```json
/// { "name": "Ada Lovelace", "email": "ada@example.com" }
/// ```
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        name: user.name,
        email: user.email,
    })
}
