//! Session secret resolution.
//!
//! The signing secret comes from the environment once at startup. A missing
//! or short secret must stop the process rather than let it issue weakly
//! signed sessions.

use super::SessionError;

/// Environment variable holding the session signing secret.
pub const SESSION_SECRET_VAR: &str = "SESSION_SECRET";

/// Minimum secret length in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

/// Validated session signing secret.
#[derive(Clone)]
pub struct SessionSecret(String);

impl SessionSecret {
    /// Validate a raw secret string.
    pub fn new(raw: String) -> Result<Self, SessionError> {
        if raw.is_empty() {
            return Err(SessionError::SecretMissing);
        }
        if raw.len() < MIN_SECRET_BYTES {
            return Err(SessionError::SecretTooShort(raw.len()));
        }
        Ok(Self(raw))
    }

    /// Read and validate the secret from `SESSION_SECRET`.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::new(std::env::var(SESSION_SECRET_VAR).unwrap_or_default())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

// The secret must never end up in logs via a Debug dump of config.
impl std::fmt::Debug for SessionSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionError;

    #[test]
    fn accepts_a_32_byte_secret() {
        let secret = SessionSecret::new("0123456789abcdef0123456789abcdef".into()).unwrap();
        assert_eq!(secret.as_bytes().len(), 32);
    }

    #[test]
    fn rejects_a_short_secret() {
        let err = SessionSecret::new("too-short".into()).unwrap_err();
        assert!(matches!(err, SessionError::SecretTooShort(9)));
    }

    #[test]
    fn rejects_an_empty_secret() {
        let err = SessionSecret::new(String::new()).unwrap_err();
        assert!(matches!(err, SessionError::SecretMissing));
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let secret = SessionSecret::new("0123456789abcdef0123456789abcdef".into()).unwrap();
        assert_eq!(format!("{secret:?}"), "SessionSecret(..)");
    }
}
