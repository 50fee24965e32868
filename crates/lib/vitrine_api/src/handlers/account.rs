//! Account handlers (session-protected).

use axum::{Extension, Json};
use vitrine_core::models::auth::Principal;

use crate::middleware::session::CurrentPrincipal;

/// `GET /account` — profile of the authenticated principal.
///
/// Profile fields come straight from the session token; no backend round
/// trip is made.
pub async fn account_handler(
    Extension(CurrentPrincipal(principal)): Extension<CurrentPrincipal>,
) -> Json<Principal> {
    Json(principal)
}
