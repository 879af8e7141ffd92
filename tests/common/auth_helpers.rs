//! Authentication test helpers
//!
//! A stub identity provider and helpers that walk the
//! `/login` -> `/callback` flow, carrying the login cookie between the two.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderValue,
};
use axum_test::{TestResponse, TestServer};
use reqwest::Url;

use pagestore::backend::auth::cookie::{LOGIN_COOKIE, SESSION_COOKIE};
use pagestore::backend::auth::{Identity, IdentityProvider, ProviderError};

use super::assertions::assert_redirect;

pub const GOOD_CODE: &str = "good-code";
pub const REJECTED_CODE: &str = "rejected-code";
pub const UNAVAILABLE_CODE: &str = "provider-down";
pub const NAMELESS_CODE: &str = "nameless";

pub fn ada() -> Identity {
    Identity {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    }
}

/// In-process identity provider
///
/// `GOOD_CODE` yields `ada()`, `UNAVAILABLE_CODE` fails as unreachable,
/// `NAMELESS_CODE` lacks the name claim and anything else is rejected.
pub struct StubProvider {
    pub exchanged_redirect_uris: Mutex<Vec<String>>,
    configured: bool,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            exchanged_redirect_uris: Mutex::new(Vec::new()),
            configured: true,
        }
    }

    /// Provider whose settings are missing
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn authorize_url(&self, redirect_uri: &str, state: &str) -> Result<String, ProviderError> {
        if !self.configured {
            return Err(ProviderError::NotConfigured("OIDC_ISSUER"));
        }
        let mut url = Url::parse("https://idp.test/authorize").expect("static url");
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state);
        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<Identity, ProviderError> {
        self.exchanged_redirect_uris
            .lock()
            .expect("lock")
            .push(redirect_uri.to_string());
        match code {
            GOOD_CODE => Ok(ada()),
            UNAVAILABLE_CODE => Err(ProviderError::Unavailable("connection refused".to_string())),
            NAMELESS_CODE => Err(ProviderError::MissingClaim("name")),
            _ => Err(ProviderError::Rejected("invalid_grant".to_string())),
        }
    }
}

/// A login started with `/login`
pub struct PendingLogin {
    /// `state` the provider would echo back
    pub state: String,
    /// `Cookie` header value carrying the login cookie
    pub cookie: HeaderValue,
}

/// Start a login and capture its `state` and login cookie
pub async fn begin_login(server: &TestServer) -> PendingLogin {
    let response = server.get("/login").await;
    let location = assert_redirect(&response);
    let url = Url::parse(&location).expect("authorize url");
    let state = url
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .expect("state parameter");
    let pair = cookie_pair(&response, LOGIN_COOKIE).expect("login cookie set");

    PendingLogin {
        state,
        cookie: HeaderValue::from_str(&pair).expect("cookie header"),
    }
}

/// Return to `/callback` from the browser that started `pending`
pub async fn finish_login(server: &TestServer, pending: &PendingLogin, code: &str) -> TestResponse {
    server
        .get("/callback")
        .add_header(COOKIE, pending.cookie.clone())
        .add_query_param("code", code)
        .add_query_param("state", &pending.state)
        .await
}

/// Full `Set-Cookie` value for cookie `name`
pub fn set_cookie_value(response: &TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(str::to_string)
}

/// `name=value` pair of cookie `name` when the response sets a non-empty value
pub fn cookie_pair(response: &TestResponse, name: &str) -> Option<String> {
    set_cookie_value(response, name)
        .and_then(|v| v.split(';').next().map(str::to_string))
        .filter(|pair| pair.len() > name.len() + 1)
}

/// `name=value` pair of the session cookie from a `Set-Cookie` response
pub fn session_cookie_pair(response: &TestResponse) -> Option<String> {
    cookie_pair(response, SESSION_COOKIE)
}

/// Complete a login with `GOOD_CODE` and return the `Cookie` header value
pub async fn login(server: &TestServer) -> HeaderValue {
    let pending = begin_login(server).await;
    let response = finish_login(server, &pending, GOOD_CODE).await;
    assert_redirect(&response);
    let pair = session_cookie_pair(&response).expect("session cookie set");
    HeaderValue::from_str(&pair).expect("cookie header")
}
