//! Session enforcement for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use vitrine_core::models::auth::Principal;
use vitrine_core::session::jwt;

use crate::AppState;
use crate::error::AppError;
use crate::services::cookies::SESSION_COOKIE;

/// Verified principal stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentPrincipal(pub Principal);

/// Axum middleware: require a valid session cookie and inject the
/// principal into request extensions.
///
/// Missing, expired, and forged tokens all get the same 401 — the client
/// only learns that it is not authenticated.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Not authenticated".into()))?;

    let claims = jwt::verify_session(&token, state.config.session_secret.as_bytes())
        .map_err(|e| {
            warn!(error = %e, "rejected session token");
            AppError::Unauthorized("Not authenticated".into())
        })?;

    request
        .extensions_mut()
        .insert(CurrentPrincipal(Principal::from(claims)));

    Ok(next.run(request).await)
}
