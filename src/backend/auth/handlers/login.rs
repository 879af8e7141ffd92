/**
 * Login Handler
 *
 * `GET /login` starts the authorization-code flow: it works out this
 * service's callback URL, records a fresh single-use `state`, binds it to
 * the browser with a signed `pagestore_login` cookie and redirects to the
 * identity provider.
 */

use axum::{
    extract::State,
    http::{
        header::{HOST, SET_COOKIE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Redirect, Response},
};
use chrono::Duration;

use crate::backend::auth::cookie::login_cookie;
use crate::backend::auth::login_state::{LoginState, LOGIN_STATE_TTL_SECS};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `500 Internal Server Error` - identity provider not configured or the
///   login cookie could not be signed
/// * `422 Unprocessable Entity` - no `PUBLIC_URL` and no usable `Host` header
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, BackendError> {
    let redirect_uri = callback_url(state.config.public_url.as_deref(), &headers)?;

    let login = LoginState::new(redirect_uri);
    let authorize_url = state
        .identity
        .authorize_url(&login.redirect_uri, &login.state)?;

    let token = state
        .signer
        .create_login_token(&login, Duration::seconds(LOGIN_STATE_TTL_SECS))
        .map_err(|e| {
            tracing::error!("Failed to sign login token: {:?}", e);
            BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to start login")
        })?;
    let cookie = login_cookie(&token, state.config.session.https_only).ok_or_else(|| {
        BackendError::handler(StatusCode::INTERNAL_SERVER_ERROR, "Failed to start login")
    })?;

    tracing::debug!("Login started, callback {}", login.redirect_uri);
    state.login_states.insert(login).await;

    let mut response = Redirect::temporary(&authorize_url).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// URL of `/callback` as the browser sees this service
pub fn callback_url(public_url: Option<&str>, headers: &HeaderMap) -> Result<String, BackendError> {
    if let Some(base) = public_url {
        return Ok(format!("{}/callback", base.trim_end_matches('/')));
    }

    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Cannot build callback URL: no Host header");
            BackendError::validation("Host header required")
        })?;

    Ok(format!("http://{}/callback", host))
}
