//! Application error types.
//!
//! Expected conditions — invalid credentials, exhausted rate limits — map
//! to structured responses the storefront can render; only genuinely
//! unexpected failures become opaque 500s.

use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use vitrine_core::backend::BackendError;
use vitrine_core::session::SessionError;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Too many attempts, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Internal server error")]
    Internal(String),
}

/// JSON error body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    retry_after_secs: Option<u64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, retry_after_secs) = match self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m, None),
            AppError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, "unauthorized", m, None),
            AppError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                rate_limited_message(retry_after_secs),
                Some(retry_after_secs),
            ),
            AppError::BackendUnavailable(m) => {
                (StatusCode::SERVICE_UNAVAILABLE, "backend_unavailable", m, None)
            }
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "Internal server error".to_string(),
                None,
            ),
        };

        let body = Json(ErrorBody {
            error,
            message,
            retry_after_secs,
        });
        let mut resp = (status, body).into_response();
        if let Some(secs) = retry_after_secs
            && let Ok(value) = HeaderValue::from_str(&secs.to_string())
        {
            resp.headers_mut().insert(RETRY_AFTER, value);
        }
        resp
    }
}

/// Wait time rendered in minutes, never less than one.
fn rate_limited_message(retry_after_secs: u64) -> String {
    let minutes = retry_after_secs.div_ceil(60).max(1);
    if minutes == 1 {
        "Too many attempts. Try again in 1 minute.".to_string()
    } else {
        format!("Too many attempts. Try again in {minutes} minutes.")
    }
}

impl From<BackendError> for AppError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::InvalidCredentials => AppError::Unauthorized("Invalid credentials".into()),
            BackendError::EmailTaken => AppError::Validation("Email already registered".into()),
            BackendError::Http(e) => AppError::BackendUnavailable(e.to_string()),
            BackendError::Unexpected(m) => AppError::Internal(m),
        }
    }
}

// Signing failures only; verification failures never surface as errors.
impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limited_message_rounds_up_to_minutes() {
        assert_eq!(
            rate_limited_message(900),
            "Too many attempts. Try again in 15 minutes."
        );
        assert_eq!(
            rate_limited_message(61),
            "Too many attempts. Try again in 2 minutes."
        );
        assert_eq!(
            rate_limited_message(0),
            "Too many attempts. Try again in 1 minute."
        );
    }
}
