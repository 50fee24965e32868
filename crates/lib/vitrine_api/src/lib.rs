//! # vitrine_api
//!
//! HTTP API for the Vitrine storefront auth core.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use vitrine_core::backend::CommerceBackend;
use vitrine_core::ratelimit::RateLimiter;

use crate::config::ApiConfig;
use crate::handlers::{account, auth};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: ApiConfig,
    /// Commerce backend used for credential checks.
    pub backend: Arc<dyn CommerceBackend>,
    /// Process-wide rate limiter (the only mutable shared state).
    pub limiter: Arc<RateLimiter>,
}

/// Builds the axum router with all routes and shared state.
///
/// The generic throttle layer runs ahead of all route handling; credential
/// endpoints apply their tighter identity-keyed limits inside the handlers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (anonymous is a valid state)
    let public = Router::new()
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/register", post(auth::register_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/auth/session", get(auth::session_handler));

    // Protected routes (require a valid session)
    let protected = Router::new()
        .route("/account", get(account::account_handler))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session::require_session,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::throttle,
        ))
        .layer(cors)
        .with_state(state)
}
