//! Deterministic composite keys for rate-limit entries.
//!
//! Login keys pair email and client IP, so rotating only one of the two
//! does not dodge the limiter. Registration keys on IP alone.

/// Key for a login attempt: `login:<email>:<ip>`.
pub fn login(email: &str, client_ip: &str) -> String {
    format!("login:{}:{client_ip}", normalize_email(email))
}

/// Key for a registration attempt: `register:<ip>`.
pub fn register(client_ip: &str) -> String {
    format!("register:{client_ip}")
}

/// Key for generic API traffic: `api:<prefix>:<ip>`.
pub fn api(prefix: &str, client_ip: &str) -> String {
    format!("api:{prefix}:{client_ip}")
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_key_is_deterministic_and_case_insensitive() {
        assert_eq!(
            login("Alice@Example.COM", "1.2.3.4"),
            "login:alice@example.com:1.2.3.4"
        );
        assert_eq!(
            login(" alice@example.com ", "1.2.3.4"),
            login("alice@example.com", "1.2.3.4")
        );
    }

    #[test]
    fn different_identities_produce_different_keys() {
        assert_ne!(
            login("alice@example.com", "1.2.3.4"),
            login("alice@example.com", "5.6.7.8")
        );
        assert_ne!(register("1.2.3.4"), register("5.6.7.8"));
        assert_ne!(api("auth", "1.2.3.4"), api("api", "1.2.3.4"));
    }
}
