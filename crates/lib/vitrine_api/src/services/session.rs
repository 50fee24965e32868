//! Session service — create/read/clear the cookie-carried session.
//!
//! The cookie jar is the "client-held opaque credential" store: all session
//! state lives in the signed token, so these operations are the only
//! session bookkeeping the server does.

use axum_extra::extract::cookie::CookieJar;
use tracing::warn;
use vitrine_core::models::auth::Principal;
use vitrine_core::session::{SessionError, jwt};

use super::cookies::{self, SESSION_COOKIE};

/// Issue a session for `principal` and attach it to the jar.
///
/// Returns the token as well, for callers that need it directly.
pub fn create_session(
    jar: CookieJar,
    principal: &Principal,
    secret: &[u8],
    secure: bool,
) -> Result<(CookieJar, String), SessionError> {
    let token = jwt::sign_session(principal, secret)?;
    let jar = jar.add(cookies::session_cookie(&token, secure));
    Ok((jar, token))
}

/// Read and verify the session from the jar.
///
/// No cookie means anonymous, not an error. A cookie that fails
/// verification (bad signature, wrong algorithm, malformed, expired) is
/// scrubbed from the jar, and callers see the same `None` in every case —
/// the client never learns which check failed.
pub fn get_session(jar: CookieJar, secret: &[u8], secure: bool) -> (CookieJar, Option<Principal>) {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let Some(token) = token else {
        return (jar, None);
    };
    match jwt::verify_session(&token, secret) {
        Ok(claims) => (jar, Some(Principal::from(claims))),
        Err(e) => {
            // The cause goes to the log only; no token or secret material
            // is part of the error message.
            warn!(error = %e, "invalid session token, clearing cookie");
            (jar.add(cookies::clear_session_cookie(secure)), None)
        }
    }
}

/// Remove the session cookie. Idempotent: a no-op if none is present.
pub fn delete_session(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(cookies::clear_session_cookie(secure))
}
