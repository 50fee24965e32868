//! Authentication request handlers.
//!
//! Login and registration consult the identity-keyed rate limiter before
//! touching the commerce backend, and clear the key again on success.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;
use vitrine_core::models::auth::Principal;
use vitrine_core::ratelimit::{CREDENTIAL_MAX_ATTEMPTS, CREDENTIAL_WINDOW, keys};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::rate_limit::client_ip;
use crate::services::session;

/// `POST /auth/login` request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Session payload: the principal, or `null` when anonymous.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub principal: Option<Principal>,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// `POST /auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    let key = keys::login(&body.email, &client_ip(&headers));
    let decision = state
        .limiter
        .check(&key, CREDENTIAL_MAX_ATTEMPTS, CREDENTIAL_WINDOW);
    if !decision.success {
        return Err(AppError::RateLimited {
            retry_after_secs: decision.reset_in_secs,
        });
    }

    let principal = state
        .backend
        .verify_credentials(&body.email, &body.password)
        .await?;

    // A successful login clears the penalty immediately instead of
    // waiting out the window.
    state.limiter.reset(&key);

    let (jar, _token) = session::create_session(
        jar,
        &principal,
        state.config.session_secret.as_bytes(),
        state.config.secure_cookies,
    )?;
    info!(subject = %principal.id, "login succeeded");
    Ok((
        jar,
        Json(SessionResponse {
            principal: Some(principal),
        }),
    ))
}

/// `POST /auth/register` — create a customer account and log it in.
pub async fn register_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> AppResult<(CookieJar, Json<SessionResponse>)> {
    if body.password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    if !body.email.contains('@') {
        return Err(AppError::Validation("Invalid email address".into()));
    }

    let key = keys::register(&client_ip(&headers));
    let decision = state
        .limiter
        .check(&key, CREDENTIAL_MAX_ATTEMPTS, CREDENTIAL_WINDOW);
    if !decision.success {
        return Err(AppError::RateLimited {
            retry_after_secs: decision.reset_in_secs,
        });
    }

    let principal = state
        .backend
        .create_customer(&body.email, &body.password, body.name.as_deref())
        .await?;

    state.limiter.reset(&key);

    let (jar, _token) = session::create_session(
        jar,
        &principal,
        state.config.session_secret.as_bytes(),
        state.config.secure_cookies,
    )?;
    info!(subject = %principal.id, "registration succeeded");
    Ok((
        jar,
        Json(SessionResponse {
            principal: Some(principal),
        }),
    ))
}

/// `POST /auth/logout` — clear the session cookie. Idempotent.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<LogoutResponse>) {
    let jar = session::delete_session(jar, state.config.secure_cookies);
    (jar, Json(LogoutResponse { success: true }))
}

/// `GET /auth/session` — current principal, or `null` when anonymous.
///
/// An invalid cookie is scrubbed via the response; the body is the same
/// `null` as for no cookie at all.
pub async fn session_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let (jar, principal) = session::get_session(
        jar,
        state.config.session_secret.as_bytes(),
        state.config.secure_cookies,
    );
    (jar, Json(SessionResponse { principal }))
}
