/**
 * Callback Handler
 *
 * `GET /callback` completes the authorization-code flow. The `state` must
 * match both the signed `pagestore_login` cookie set by `/login` and a
 * pending login; the code is then exchanged for the caller's identity, a
 * server-side session is created and its signed reference is set as the
 * session cookie.
 *
 * No session is created on any failure path. The login cookie is cleared
 * on every outcome.
 */

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};

use crate::backend::auth::cookie::{clear_login_cookie, read_cookie, session_cookie, LOGIN_COOKIE};
use crate::backend::auth::handlers::types::CallbackParams;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Callback handler
///
/// # Errors
///
/// * `400 Bad Request` - provider reported an error, state missing/unknown/reused,
///   login cookie missing or not matching the state, code missing, provider
///   rejected the code or returned incomplete claims
/// * `502 Bad Gateway` - provider unreachable
/// * `500 Internal Server Error` - provider not configured or cookie could not be built
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    let mut response = match complete_login(&state, &headers, params).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };
    response
        .headers_mut()
        .append(SET_COOKIE, clear_login_cookie(state.config.session.https_only));
    response
}

async fn complete_login(
    state: &AppState,
    headers: &HeaderMap,
    params: CallbackParams,
) -> Result<Response, BackendError> {
    if let Some(error) = params.error.as_deref() {
        tracing::warn!(
            "Identity provider returned error '{}': {}",
            error,
            params.error_description.as_deref().unwrap_or("")
        );
        return Err(BackendError::upstream_rejected("Login was not completed"));
    }

    let state_param = params.state.as_deref().ok_or_else(|| {
        tracing::warn!("Callback without state parameter");
        BackendError::upstream_rejected("Missing login state")
    })?;

    let bound_state = read_cookie(headers, LOGIN_COOKIE)
        .and_then(|token| state.signer.verify_token(&token).ok())
        .map(|claims| claims.sub);
    if bound_state.as_deref() != Some(state_param) {
        tracing::warn!("Callback state not bound to this browser");
        return Err(BackendError::upstream_rejected("Login state does not match this browser"));
    }

    let login = state.login_states.consume(state_param).await.ok_or_else(|| {
        tracing::warn!("Callback with unknown or expired state");
        BackendError::upstream_rejected("Unknown or expired login state")
    })?;

    let code = params.code.as_deref().ok_or_else(|| {
        tracing::warn!("Callback without authorization code");
        BackendError::upstream_rejected("Missing authorization code")
    })?;

    let identity = state
        .identity
        .exchange_code(code, &login.redirect_uri)
        .await?;

    let settings = state.config.session;
    let session = state.sessions.create(identity, settings.lifetime()).await;

    let token = state.signer.create_token(&session).map_err(|e| {
        tracing::error!("Failed to sign session token: {:?}", e);
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session")
    })?;
    let cookie = session_cookie(&token, settings.cookie()).ok_or_else(|| {
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session")
    })?;

    tracing::info!("Session created for {}", session.email);

    let mut response = Redirect::temporary(&state.config.post_login_url()).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
