//! Cookie service — set/get/clear the httpOnly session cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;
use vitrine_core::session::jwt::SESSION_TTL_DAYS;

/// Cookie name for the session token.
pub const SESSION_COOKIE: &str = "session";

/// Build the httpOnly cookie carrying the session token.
///
/// Cookie expiry matches the token expiry; the token itself remains the
/// source of truth for session validity.
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Build an expired cookie to clear the session.
pub fn clear_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}
