//! Stateless session tokens.
//!
//! All session state lives in the signed token itself; the server keeps no
//! session table and no revocation list. A leaked token therefore stays
//! valid until its expiry — logout only deletes the client's copy.

pub mod jwt;
pub mod secret;

pub use secret::SessionSecret;

use thiserror::Error;

/// Session errors.
///
/// The secret variants are configuration errors that must stop startup;
/// `Token` covers every verification failure and is logged, never shown
/// to the client.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session secret is not set ({var})", var = secret::SESSION_SECRET_VAR)]
    SecretMissing,

    #[error("session secret too short: {0} bytes, need at least {min}", min = secret::MIN_SECRET_BYTES)]
    SecretTooShort(usize),

    #[error("token error: {0}")]
    Token(String),
}
