/**
 * Identity Provider
 *
 * The authorization-code flow is delegated to an external OAuth2/OIDC
 * provider behind the `IdentityProvider` trait. `OidcProvider` talks to a
 * real provider over HTTP:
 *
 * 1. `authorize_url` builds the redirect to the provider's authorization
 *    endpoint with `response_type=code`, the callback URL and the `state`
 * 2. `exchange_code` posts the code to the token endpoint
 *    (`grant_type=authorization_code`) and reads the `name` and `email`
 *    claims from the userinfo endpoint with the returned access token
 *
 * Failures are never retried. A missing or empty claim fails the attempt.
 */

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::backend::error::BackendError;

/// Identity claims bound to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Extract `name` and `email` from a userinfo document
    pub fn from_claims(claims: &Value) -> Result<Self, ProviderError> {
        Ok(Self {
            name: required_claim(claims, "name")?,
            email: required_claim(claims, "email")?,
        })
    }
}

fn required_claim(claims: &Value, claim: &'static str) -> Result<String, ProviderError> {
    claims
        .get(claim)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or(ProviderError::MissingClaim(claim))
}

/// Identity provider failures
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A required provider setting is absent
    #[error("identity provider setting {0} is not configured")]
    NotConfigured(&'static str),

    /// A provider setting could not be used (e.g. an unparseable URL)
    #[error("invalid identity provider configuration: {0}")]
    InvalidConfig(String),

    /// The provider refused the code or credentials
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    /// The provider could not be reached or failed internally
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),

    /// The provider's response lacked a required identity claim
    #[error("identity provider response is missing the '{0}' claim")]
    MissingClaim(&'static str),
}

impl From<ProviderError> for BackendError {
    fn from(err: ProviderError) -> Self {
        tracing::error!("Identity provider error: {}", err);
        match err {
            ProviderError::NotConfigured(_) | ProviderError::InvalidConfig(_) => {
                BackendError::config(err.to_string())
            }
            ProviderError::Rejected(_) => {
                BackendError::upstream_rejected("Identity provider rejected the login attempt")
            }
            ProviderError::MissingClaim(claim) => BackendError::upstream_rejected(format!(
                "Identity provider did not return the '{}' claim",
                claim
            )),
            ProviderError::Unavailable(_) => {
                BackendError::upstream_unavailable("Identity provider is unavailable")
            }
        }
    }
}

/// External OAuth2/OIDC authorization-code provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL of the provider's authorization endpoint for this login attempt
    fn authorize_url(&self, redirect_uri: &str, state: &str) -> Result<String, ProviderError>;

    /// Trade an authorization code for the caller's identity
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<Identity, ProviderError>;
}

/// Provider settings read from the environment
#[derive(Debug, Clone, Default)]
pub struct OidcConfig {
    /// Base URL of the provider, e.g. `https://tenant.auth0.com`
    pub issuer: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    /// Overrides `{issuer}/authorize`
    pub authorize_url: Option<String>,
    /// Overrides `{issuer}/oauth/token`
    pub token_url: Option<String>,
    /// Overrides `{issuer}/userinfo`
    pub userinfo_url: Option<String>,
    pub scope: String,
}

impl OidcConfig {
    pub const DEFAULT_SCOPE: &'static str = "openid profile email";

    fn endpoint(&self, explicit: &Option<String>, path: &str) -> Result<Url, ProviderError> {
        let raw = match explicit {
            Some(url) => url.clone(),
            None => {
                let issuer = self
                    .issuer
                    .as_deref()
                    .ok_or(ProviderError::NotConfigured("OIDC_ISSUER"))?;
                format!("{}{}", issuer.trim_end_matches('/'), path)
            }
        };
        Url::parse(&raw).map_err(|e| ProviderError::InvalidConfig(format!("{}: {}", raw, e)))
    }

    pub fn authorize_endpoint(&self) -> Result<Url, ProviderError> {
        self.endpoint(&self.authorize_url, "/authorize")
    }

    pub fn token_endpoint(&self) -> Result<Url, ProviderError> {
        self.endpoint(&self.token_url, "/oauth/token")
    }

    pub fn userinfo_endpoint(&self) -> Result<Url, ProviderError> {
        self.endpoint(&self.userinfo_url, "/userinfo")
    }

    fn client_id(&self) -> Result<&str, ProviderError> {
        self.client_id
            .as_deref()
            .ok_or(ProviderError::NotConfigured("OIDC_CLIENT_ID"))
    }

    fn client_secret(&self) -> Result<&str, ProviderError> {
        self.client_secret
            .as_deref()
            .ok_or(ProviderError::NotConfigured("OIDC_CLIENT_SECRET"))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// `IdentityProvider` speaking OAuth2/OIDC over HTTP
#[derive(Clone)]
pub struct OidcProvider {
    config: OidcConfig,
    http: reqwest::Client,
}

impl OidcProvider {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(config: OidcConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::InvalidConfig(e.to_string()))?;
        Ok(Self { config, http })
    }

    async fn fetch_access_token(&self, code: &str, redirect_uri: &str) -> Result<String, ProviderError> {
        let endpoint = self.config.token_endpoint()?;
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", self.config.client_id()?),
            ("client_secret", self.config.client_secret()?),
        ];

        let response = self
            .http
            .post(endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let response = check_status(response, "token").await?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Rejected(format!("malformed token response: {}", e)))?;
        Ok(token.access_token)
    }

    async fn fetch_claims(&self, access_token: &str) -> Result<Value, ProviderError> {
        let endpoint = self.config.userinfo_endpoint()?;
        let response = self
            .http
            .get(endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let response = check_status(response, "userinfo").await?;
        response
            .json()
            .await
            .map_err(|e| ProviderError::Rejected(format!("malformed userinfo response: {}", e)))
    }
}

async fn check_status(response: reqwest::Response, endpoint: &str) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = format!("{} endpoint returned {}: {}", endpoint, status, body);
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Err(ProviderError::Unavailable(detail))
    } else {
        Err(ProviderError::Rejected(detail))
    }
}

#[async_trait]
impl IdentityProvider for OidcProvider {
    fn authorize_url(&self, redirect_uri: &str, state: &str) -> Result<String, ProviderError> {
        let mut url = self.config.authorize_endpoint()?;
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", self.config.client_id()?)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("scope", &self.config.scope)
            .append_pair("state", state);
        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<Identity, ProviderError> {
        let access_token = self.fetch_access_token(code, redirect_uri).await?;
        let claims = self.fetch_claims(&access_token).await?;
        let identity = Identity::from_claims(&claims)?;

        tracing::info!("Authorization code exchanged for {}", identity.email);
        Ok(identity)
    }
}
