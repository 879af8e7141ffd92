/**
 * Server Configuration
 *
 * `ServerConfig` is read from the environment once at startup and then
 * passed to `create_app`; nothing else in the backend reads environment
 * variables. `DATABASE_URL` and `APP_SECRET_KEY` are required, everything
 * else has a development default.
 *
 * # Configuration Sources
 *
 * `main` loads a `.env` file (via `dotenv`) before calling
 * `ServerConfig::from_env`. Tests build configs with `from_lookup` or by
 * filling the struct directly.
 */

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use chrono::Duration;
use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

use crate::backend::auth::cookie::CookieSettings;
use crate::backend::auth::provider::OidcConfig;
use crate::backend::error::BackendError;

pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,https://your-production-domain.com";
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 3600;
/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_MAX_AGE_SECS: i64 = 365 * 24 * 60 * 60;
pub const DEFAULT_PORT: u16 = 8000;

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Session cookie settings
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Fixed lifetime from creation; not extended by activity
    pub max_age_secs: i64,
    /// Adds the `Secure` cookie attribute
    pub https_only: bool,
}

impl SessionSettings {
    pub fn lifetime(&self) -> Duration {
        Duration::seconds(self.max_age_secs)
    }

    pub fn cookie(&self) -> CookieSettings {
        CookieSettings {
            max_age_secs: self.max_age_secs,
            https_only: self.https_only,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
            https_only: false,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    /// HMAC key for session cookies
    pub secret_key: String,
    /// CORS origins allowed to call the API with credentials
    pub allowed_origins: Vec<String>,
    /// Base URL of the editor frontend
    pub frontend_url: String,
    /// Externally visible base URL of this service; derived from `Host` when unset
    pub public_url: Option<String>,
    pub host: IpAddr,
    pub port: u16,
    pub session: SessionSettings,
    pub oidc: OidcConfig,
    /// Keep pages in memory instead of PostgreSQL
    pub in_memory: bool,
}

impl ServerConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let in_memory = parse_bool(get("PAGESTORE_IN_MEMORY"), "PAGESTORE_IN_MEMORY")?;
        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None if in_memory => String::new(),
            None => return Err(ConfigError::MissingValue("DATABASE_URL")),
        };
        let secret_key = get("APP_SECRET_KEY").ok_or(ConfigError::MissingValue("APP_SECRET_KEY"))?;

        let allowed_origins = parse_origins(&get("ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string()))?;
        let frontend_url = get("FRONTEND_URL")
            .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let public_url = get("PUBLIC_URL").map(|url| url.trim_end_matches('/').to_string());

        let host = match get("SERVER_HOST") {
            Some(host) => host.parse().map_err(|e| ConfigError::InvalidValue {
                key: "SERVER_HOST",
                message: format!("{}", e),
            })?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match get("SERVER_PORT") {
            Some(port) => port.parse().map_err(|e| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                message: format!("{}", e),
            })?,
            None => DEFAULT_PORT,
        };

        let max_age_secs = match get("SESSION_MAX_AGE_SECS") {
            Some(secs) => match secs.parse::<i64>() {
                Ok(secs) if secs > 0 && secs <= MAX_SESSION_MAX_AGE_SECS => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "SESSION_MAX_AGE_SECS",
                        message: format!(
                            "expected between 1 and {} seconds, got '{}'",
                            MAX_SESSION_MAX_AGE_SECS, secs
                        ),
                    })
                }
            },
            None => DEFAULT_SESSION_MAX_AGE_SECS,
        };
        let https_only = parse_bool(get("SESSION_HTTPS_ONLY"), "SESSION_HTTPS_ONLY")?;

        let oidc = OidcConfig {
            issuer: get("OIDC_ISSUER"),
            client_id: get("OIDC_CLIENT_ID"),
            client_secret: get("OIDC_CLIENT_SECRET"),
            authorize_url: get("OIDC_AUTHORIZE_URL"),
            token_url: get("OIDC_TOKEN_URL"),
            userinfo_url: get("OIDC_USERINFO_URL"),
            scope: get("OIDC_SCOPE").unwrap_or_else(|| OidcConfig::DEFAULT_SCOPE.to_string()),
        };

        Ok(Self {
            database_url,
            secret_key,
            allowed_origins,
            frontend_url,
            public_url,
            host,
            port,
            session: SessionSettings { max_age_secs, https_only },
            oidc,
            in_memory,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Where the browser lands after a successful login
    pub fn post_login_url(&self) -> String {
        format!("{}/home", self.frontend_url)
    }
}

fn parse_bool(value: Option<String>, key: &'static str) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ConfigError::InvalidValue {
            key,
            message: format!("expected a boolean, got '{}'", other),
        }),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map(|_| origin.trim_end_matches('/').to_string())
                .map_err(|e| ConfigError::InvalidValue {
                    key: "ALLOWED_ORIGINS",
                    message: format!("{}: {}", origin, e),
                })
        })
        .collect()
}

impl From<ConfigError> for BackendError {
    fn from(err: ConfigError) -> Self {
        BackendError::config(err.to_string())
    }
}

/// Connect to PostgreSQL and run migrations
///
/// # Errors
///
/// Connection and migration failures are fatal at startup and returned as
/// `BackendError::StorageUnavailable`.
pub async fn load_database(config: &ServerConfig) -> Result<PgPool, BackendError> {
    tracing::info!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {:?}", e);
        BackendError::StorageUnavailable
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
