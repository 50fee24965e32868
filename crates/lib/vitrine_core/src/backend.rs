//! Commerce backend client.
//!
//! Credential storage and verification live in the external commerce
//! backend; this client only exchanges submitted credentials for a
//! principal record. Sessions are issued elsewhere, after this succeeds.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::models::auth::Principal;

/// Errors from the commerce backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email already registered")]
    EmailTaken,

    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected backend response: {0}")]
    Unexpected(String),
}

/// Credential operations delegated to the commerce backend.
#[async_trait]
pub trait CommerceBackend: Send + Sync {
    /// Check `password` for the account `email`, returning its principal.
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, BackendError>;

    /// Create a customer account, returning the new principal.
    async fn create_customer(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Principal, BackendError>;
}

#[derive(Serialize)]
struct AuthenticateRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CreateCustomerRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Deserialize)]
struct CustomerResponse {
    id: String,
    email: String,
    name: Option<String>,
}

impl From<CustomerResponse> for Principal {
    fn from(c: CustomerResponse) -> Self {
        Self {
            id: c.id,
            email: c.email,
            name: c.name,
        }
    }
}

/// HTTP client for the commerce backend's customer API.
pub struct HttpCommerceBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCommerceBackend {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::Unexpected(format!("bad endpoint {path}: {e}")))
    }
}

#[async_trait]
impl CommerceBackend for HttpCommerceBackend {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Principal, BackendError> {
        let resp = self
            .http
            .post(self.endpoint("customers/authenticate")?)
            .json(&AuthenticateRequest { email, password })
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let customer: CustomerResponse = resp.json().await?;
            Ok(customer.into())
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(BackendError::InvalidCredentials)
        } else {
            warn!(%status, "unexpected authenticate response");
            Err(BackendError::Unexpected(format!(
                "authenticate returned {status}"
            )))
        }
    }

    async fn create_customer(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<Principal, BackendError> {
        let resp = self
            .http
            .post(self.endpoint("customers")?)
            .json(&CreateCustomerRequest {
                email,
                password,
                name,
            })
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let customer: CustomerResponse = resp.json().await?;
            Ok(customer.into())
        } else if status == reqwest::StatusCode::CONFLICT {
            Err(BackendError::EmailTaken)
        } else {
            warn!(%status, "unexpected create customer response");
            Err(BackendError::Unexpected(format!(
                "create customer returned {status}"
            )))
        }
    }
}
