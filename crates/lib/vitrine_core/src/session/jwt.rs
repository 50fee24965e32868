//! Session token generation and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use super::SessionError;
use crate::models::auth::{Principal, SessionClaims};

/// Session lifetime: 30 days.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Generate a signed session token (HS256, 30 day expiry).
pub fn sign_session(principal: &Principal, secret: &[u8]) -> Result<String, SessionError> {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: principal.id.clone(),
        email: principal.email.clone(),
        name: principal.name.clone(),
        exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        iat: now.timestamp(),
    };
    sign_claims(&claims, secret)
}

pub(crate) fn sign_claims(claims: &SessionClaims, secret: &[u8]) -> Result<String, SessionError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| SessionError::Token(format!("jwt encode: {e}")))
}

/// Verify a session token, returning the claims on success.
///
/// Rejects tokens whose signature does not verify under `secret`, whose
/// algorithm is not HS256, or whose expiry has passed. Callers must treat
/// every rejection the same; the error detail is for logging only.
pub fn verify_session(token: &str, secret: &[u8]) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret);
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // No grace period: a token is valid only while now < exp.
    validation.leeway = 0;
    decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| SessionError::Token(format!("jwt decode: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn alice() -> Principal {
        Principal {
            id: "cust_01".into(),
            email: "alice@example.com".into(),
            name: Some("Alice".into()),
        }
    }

    #[test]
    fn round_trip_preserves_the_principal() {
        let token = sign_session(&alice(), SECRET).unwrap();
        let claims = verify_session(&token, SECRET).unwrap();
        assert_eq!(Principal::from(claims), alice());
    }

    #[test]
    fn expiry_is_thirty_days_out() {
        let token = sign_session(&alice(), SECRET).unwrap();
        let claims = verify_session(&token, SECRET).unwrap();
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn expired_token_fails_even_with_a_valid_signature() {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: "cust_01".into(),
            email: "alice@example.com".into(),
            name: None,
            exp: (now - Duration::seconds(1)).timestamp(),
            iat: (now - Duration::days(30)).timestamp(),
        };
        let token = sign_claims(&claims, SECRET).unwrap();
        assert!(verify_session(&token, SECRET).is_err());
    }

    #[test]
    fn tampered_token_fails_verification() {
        let token = sign_session(&alice(), SECRET).unwrap();
        // Corrupt one character in each segment in turn.
        for pos in [token.len() / 4, token.len() / 2, token.len() - 1] {
            let mut bytes = token.clone().into_bytes();
            bytes[pos] = if bytes[pos] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(bytes).unwrap();
            if tampered == token {
                continue;
            }
            assert!(
                verify_session(&tampered, SECRET).is_err(),
                "tampering at byte {pos} was not detected"
            );
        }
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = sign_session(&alice(), SECRET).unwrap();
        assert!(verify_session(&token, b"ffffffffffffffffffffffffffffffff").is_err());
    }

    #[test]
    fn garbage_token_fails_verification() {
        assert!(verify_session("not-a-token", SECRET).is_err());
    }
}
