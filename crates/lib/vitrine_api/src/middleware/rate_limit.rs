//! Generic API throttle — route-prefix + client-IP fixed windows.
//!
//! Runs ahead of route handling as a gatekeeper against bulk abuse.
//! Credential endpoints additionally apply their tighter identity-keyed
//! limits inside the handlers.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use vitrine_core::ratelimit::keys;

use crate::AppState;
use crate::error::AppError;

/// Ceiling for authentication routes: 10 requests per minute per IP.
const AUTH_ROUTE_MAX: u32 = 10;
/// Ceiling for everything else: 100 requests per minute per IP.
const DEFAULT_ROUTE_MAX: u32 = 100;
/// All route policies share a one-minute window.
const ROUTE_WINDOW: Duration = Duration::from_secs(60);

/// Resolve the policy bucket for a request path.
fn route_policy(path: &str) -> (&'static str, u32) {
    if path.starts_with("/auth") {
        ("auth", AUTH_ROUTE_MAX)
    } else {
        ("api", DEFAULT_ROUTE_MAX)
    }
}

/// Client IP for rate-limit keys: first `x-forwarded-for` hop, then
/// `x-real-ip`, then a shared "unknown" bucket.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return ip.to_string();
    }
    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

/// Axum middleware: throttle by route prefix and client IP.
pub async fn throttle(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (prefix, max_per_minute) = route_policy(request.uri().path());
    let ip = client_ip(request.headers());

    let decision = state
        .limiter
        .check(&keys::api(prefix, &ip), max_per_minute, ROUTE_WINDOW);
    if !decision.success {
        return Err(AppError::RateLimited {
            retry_after_secs: decision.reset_in_secs,
        });
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn auth_routes_get_the_tight_policy() {
        assert_eq!(route_policy("/auth/login"), ("auth", AUTH_ROUTE_MAX));
        assert_eq!(route_policy("/auth/session"), ("auth", AUTH_ROUTE_MAX));
        assert_eq!(route_policy("/account"), ("api", DEFAULT_ROUTE_MAX));
    }

    #[test]
    fn client_ip_takes_the_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.4, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.4");
    }

    #[test]
    fn client_ip_falls_back_to_real_ip_then_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.7"));
        assert_eq!(client_ip(&headers), "198.51.100.7");

        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }
}
