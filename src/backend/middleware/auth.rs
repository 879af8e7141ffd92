/**
 * Session Middleware
 *
 * Protects the `/api` routes. The session cookie is verified, the session
 * it refers to is looked up, and the caller's identity is attached to the
 * request extensions for handlers. Anything else is rejected with 401
 * before a handler (and therefore the page store) is reached.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::cookie::{read_cookie, SESSION_COOKIE};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data resolved from the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub session_id: String,
    pub name: String,
    pub email: String,
}

/// Session middleware
///
/// 1. Reads the `pagestore_session` cookie
/// 2. Verifies the token signature and expiry
/// 3. Looks up the live server-side session
/// 4. Attaches `AuthenticatedUser` to request extensions
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = resolve_session(&state, request.headers()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolve the session named by the request's cookie
pub async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthenticatedUser, BackendError> {
    let token = read_cookie(headers, SESSION_COOKIE).ok_or_else(|| {
        tracing::debug!("No session cookie");
        BackendError::Unauthenticated
    })?;

    let claims = state.signer.verify_token(&token).map_err(|e| {
        tracing::warn!("Invalid session token: {:?}", e.kind());
        BackendError::Unauthenticated
    })?;

    let session = state.sessions.get(&claims.sub).await.ok_or_else(|| {
        tracing::warn!("Session not found or expired");
        BackendError::Unauthenticated
    })?;

    Ok(AuthenticatedUser {
        session_id: session.id,
        name: session.name,
        email: session.email,
    })
}

/// Axum extractor for authenticated user
///
/// Reads the `AuthenticatedUser` set by `require_session`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::cookie::session_cookie;
    use crate::backend::auth::provider::Identity;
    use crate::backend::server::state::test_support::test_state;
    use axum::http::{header::COOKIE, HeaderValue};
    use chrono::Duration;

    fn identity() -> Identity {
        Identity {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn cookie_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("{}={}", SESSION_COOKIE, token)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_resolve_valid_session() {
        let state = test_state();
        let session = state.sessions.create(identity(), Duration::hours(1)).await;
        let token = state.signer.create_token(&session).unwrap();

        let user = resolve_session(&state, &cookie_headers(&token)).await.unwrap();
        assert_eq!(user.session_id, session.id);
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_missing_cookie() {
        let state = test_state();
        let err = resolve_session(&state, &HeaderMap::new()).await.unwrap_err();
        assert!(matches!(err, BackendError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let state = test_state();
        let err = resolve_session(&state, &cookie_headers("not-a-token")).await.unwrap_err();
        assert!(matches!(err, BackendError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_removed_session_is_rejected() {
        let state = test_state();
        let session = state.sessions.create(identity(), Duration::hours(1)).await;
        let token = state.signer.create_token(&session).unwrap();
        state.sessions.remove(&session.id).await;

        let err = resolve_session(&state, &cookie_headers(&token)).await.unwrap_err();
        assert!(matches!(err, BackendError::Unauthenticated));
    }

    #[test]
    fn test_cookie_value_is_readable_back() {
        let set = session_cookie("a.b.c", crate::backend::auth::cookie::CookieSettings {
            max_age_secs: 60,
            https_only: false,
        })
        .unwrap();
        let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(&pair).unwrap());
        assert_eq!(read_cookie(&headers, SESSION_COOKIE).as_deref(), Some("a.b.c"));
    }
}
