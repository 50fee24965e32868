//! API server configuration.

use thiserror::Error;
use url::Url;
use vitrine_core::session::{SessionError, SessionSecret};

/// Configuration errors. All of them prevent startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Secret(#[from] SessionError),

    #[error("invalid COMMERCE_BACKEND_URL: {0}")]
    BackendUrl(url::ParseError),
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Base URL of the commerce backend.
    pub backend_url: Url,
    /// Session signing secret (validated, at least 32 bytes).
    pub session_secret: SessionSecret,
    /// Mark session cookies `Secure` (production-like environments only).
    pub secure_cookies: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable               | Default                  |
    /// |------------------------|--------------------------|
    /// | `BIND_ADDR`            | `127.0.0.1:3000`         |
    /// | `COMMERCE_BACKEND_URL` | `http://localhost:9000/` |
    /// | `SESSION_SECRET`       | required, >= 32 bytes    |
    /// | `APP_ENV`              | `development`            |
    ///
    /// Fails on a missing or short secret: there is no runtime recovery
    /// path for a misconfigured signing key.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = std::env::var("COMMERCE_BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:9000/".into());
        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into()),
            backend_url: Url::parse(&backend_url).map_err(ConfigError::BackendUrl)?,
            session_secret: SessionSecret::from_env()?,
            secure_cookies: std::env::var("APP_ENV").is_ok_and(|v| v == "production"),
        })
    }
}
