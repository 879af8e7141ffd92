/**
 * Session Cookie Tokens
 *
 * The session cookie carries a JWT signed with `APP_SECRET_KEY` (HS256).
 * Its only payload is the opaque server-side session id (`sub`) and the
 * issue/expiry times, so the browser can neither read the identity nor
 * forge a reference to another session.
 *
 * The same signer also issues the short-lived login cookie, which binds a
 * pending `state` to the browser that started the login.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::auth::login_state::LoginState;
use crate::backend::auth::session_store::Session;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Server-side session ID
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Signs and verifies session cookie tokens
///
/// Built once from the configured secret and shared through `AppState`.
#[derive(Clone)]
pub struct SessionSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.required_spec_claims = ["exp", "sub"].iter().map(|c| c.to_string()).collect();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Create the cookie token for a session
    pub fn create_token(&self, session: &Session) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: session.id.clone(),
            exp: unix_seconds(session.expires_at),
            iat: unix_seconds(session.created_at),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Create the login cookie token binding `login.state` to this browser
    pub fn create_login_token(
        &self,
        login: &LoginState,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: login.state.clone(),
            exp: unix_seconds(login.issued_at + ttl),
            iat: unix_seconds(login.issued_at),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verify and decode a cookie token
    ///
    /// Fails for bad signatures, other algorithms and expired tokens.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let token_data = decode::<SessionClaims>(token, &self.decoding, &self.validation)?;
        Ok(token_data.claims)
    }
}

fn unix_seconds(at: DateTime<Utc>) -> u64 {
    at.timestamp().max(0) as u64
}
