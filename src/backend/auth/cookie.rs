//! Session and login cookie helpers
//!
//! Builds and parses the `pagestore_session` cookie and the short-lived
//! `pagestore_login` cookie. Both values are signed tokens from
//! [`super::sessions::SessionSigner`].

use axum::http::{header, HeaderMap, HeaderValue};

use crate::backend::auth::login_state::LOGIN_STATE_TTL_SECS;

pub const SESSION_COOKIE: &str = "pagestore_session";
pub const LOGIN_COOKIE: &str = "pagestore_login";

/// Cookie attributes shared by set and clear
#[derive(Debug, Clone, Copy)]
pub struct CookieSettings {
    pub max_age_secs: i64,
    pub https_only: bool,
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, settings: CookieSettings) -> Option<HeaderValue> {
    set_cookie(SESSION_COOKIE, token, settings)
}

/// `Set-Cookie` value removing the session cookie
pub fn clear_session_cookie(settings: CookieSettings) -> HeaderValue {
    clear_cookie(SESSION_COOKIE, settings.https_only)
        .unwrap_or_else(|| HeaderValue::from_static("pagestore_session=; Path=/; Max-Age=0"))
}

/// `Set-Cookie` value binding a pending login to the browser
pub fn login_cookie(token: &str, https_only: bool) -> Option<HeaderValue> {
    let settings = CookieSettings {
        max_age_secs: LOGIN_STATE_TTL_SECS,
        https_only,
    };
    set_cookie(LOGIN_COOKIE, token, settings)
}

/// `Set-Cookie` value removing the login cookie
pub fn clear_login_cookie(https_only: bool) -> HeaderValue {
    clear_cookie(LOGIN_COOKIE, https_only)
        .unwrap_or_else(|| HeaderValue::from_static("pagestore_login=; Path=/; Max-Age=0"))
}

fn set_cookie(name: &str, value: &str, settings: CookieSettings) -> Option<HeaderValue> {
    let secure = if settings.https_only { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
        name, value, settings.max_age_secs, secure
    ))
    .ok()
}

fn clear_cookie(name: &str, https_only: bool) -> Option<HeaderValue> {
    let secure = if https_only { "; Secure" } else { "" };
    HeaderValue::from_str(&format!(
        "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax{}",
        name, secure
    ))
    .ok()
}

/// Value of cookie `name` from every `Cookie` header on the request
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
