//! Authentication domain models.

use serde::{Deserialize, Serialize};

/// The authenticated entity represented inside a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Customer ID in the commerce backend.
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

/// Claims embedded in session tokens.
///
/// Profile fields are denormalized into the token so reads need no backend
/// round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — customer ID (standard JWT `sub` claim).
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    /// Expiry (unix timestamp).
    pub exp: i64,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

impl From<SessionClaims> for Principal {
    fn from(claims: SessionClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}
