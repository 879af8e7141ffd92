/**
 * Logout Handler
 *
 * `GET /logout` removes the server-side session (if the cookie still names
 * one) and clears the cookie. It always succeeds, so it is safe to call
 * without a session.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};

use crate::backend::auth::cookie::{clear_session_cookie, read_cookie, SESSION_COOKIE};
use crate::backend::server::state::AppState;

/// Logout handler
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let session_id = read_cookie(&headers, SESSION_COOKIE)
        .and_then(|token| state.signer.verify_token(&token).ok())
        .map(|claims| claims.sub);

    if let Some(id) = session_id {
        if state.sessions.remove(&id).await {
            tracing::info!("Session ended");
        }
    }

    let mut response = Redirect::temporary("/login").into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, clear_session_cookie(state.config.session.cookie()));
    response
}
