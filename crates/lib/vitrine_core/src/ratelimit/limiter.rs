//! Fixed-window attempt counting.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::store::{RateLimitEntry, RateLimitStore};

/// Credential endpoints (login, registration): 5 attempts per 15 minutes.
pub const CREDENTIAL_MAX_ATTEMPTS: u32 = 5;
pub const CREDENTIAL_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Minimum gap between opportunistic sweeps of expired entries.
const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Outcome of a rate-limit check.
///
/// A blocked outcome is a value, not an error: callers need `reset_in_secs`
/// to render a "try again in N minutes" message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub success: bool,
    /// Attempts left in the window after this one.
    pub remaining: u32,
    /// Seconds until the window resets. Set on every branch, blocked included.
    pub reset_in_secs: u64,
}

/// Counts attempts per key in fixed windows over a [`RateLimitStore`].
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    last_sweep: Mutex<Instant>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self {
            store,
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Record an attempt for `key` and decide whether it is allowed.
    ///
    /// Two concurrent calls right at the `max_attempts` boundary may both
    /// be admitted: the check and the increment are separate store
    /// operations. Callers needing exactness must use an atomic counter.
    pub fn check(&self, key: &str, max_attempts: u32, window: Duration) -> RateLimitDecision {
        let now = Instant::now();
        self.maybe_sweep(now);

        match self.store.get(key) {
            Some(entry) if !entry.expired(now) => {
                let reset_in_secs = secs_left(&entry, now);
                if entry.count >= max_attempts {
                    // Blocked calls do not increment, so the lockout stays
                    // bounded by the original window length.
                    return RateLimitDecision {
                        success: false,
                        remaining: 0,
                        reset_in_secs,
                    };
                }
                let count = entry.count + 1;
                self.store.set(key, RateLimitEntry { count, ..entry });
                RateLimitDecision {
                    success: true,
                    remaining: max_attempts - count,
                    reset_in_secs,
                }
            }
            // No entry, or the previous window has lapsed: fresh window.
            _ => {
                self.store.set(
                    key,
                    RateLimitEntry {
                        count: 1,
                        window_start: now,
                        window,
                    },
                );
                RateLimitDecision {
                    success: true,
                    remaining: max_attempts.saturating_sub(1),
                    reset_in_secs: window.as_secs(),
                }
            }
        }
    }

    /// Delete the entry for `key`, clearing any penalty immediately.
    ///
    /// Called after a successful authentication.
    pub fn reset(&self, key: &str) {
        self.store.remove(key);
    }

    /// Drop expired entries from the store right now.
    pub fn sweep(&self) {
        self.store.sweep_expired(Instant::now());
    }

    // Amortized maintenance: at most one full sweep per SWEEP_INTERVAL,
    // piggybacked on check() calls.
    fn maybe_sweep(&self, now: Instant) {
        let Ok(mut last) = self.last_sweep.lock() else {
            return;
        };
        if now.duration_since(*last) >= SWEEP_INTERVAL {
            *last = now;
            drop(last);
            self.store.sweep_expired(now);
        }
    }
}

fn secs_left(entry: &RateLimitEntry, now: Instant) -> u64 {
    entry
        .window
        .saturating_sub(now.duration_since(entry.window_start))
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratelimit::MemoryStore;

    fn limiter() -> (RateLimiter, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (RateLimiter::new(store.clone()), store)
    }

    #[test]
    fn first_five_attempts_pass_with_decreasing_remaining() {
        let (limiter, _) = limiter();
        for expected_remaining in [4, 3, 2, 1, 0] {
            let decision = limiter.check("login:alice@example.com:1.2.3.4", 5, CREDENTIAL_WINDOW);
            assert!(decision.success);
            assert_eq!(decision.remaining, expected_remaining);
        }
        let blocked = limiter.check("login:alice@example.com:1.2.3.4", 5, CREDENTIAL_WINDOW);
        assert!(!blocked.success);
        assert_eq!(blocked.remaining, 0);
    }

    #[test]
    fn register_scenario_reports_window_length_when_blocked() {
        let (limiter, _) = limiter();
        let window = Duration::from_secs(900);
        for _ in 0..5 {
            assert!(limiter.check("register:9.9.9.9", 5, window).success);
        }
        let blocked = limiter.check("register:9.9.9.9", 5, window);
        assert!(!blocked.success);
        assert_eq!(blocked.remaining, 0);
        assert!(
            (895..=900).contains(&blocked.reset_in_secs),
            "reset_in_secs was {}",
            blocked.reset_in_secs
        );
    }

    #[test]
    fn window_lapse_starts_a_fresh_count() {
        let (limiter, _) = limiter();
        let window = Duration::from_millis(40);
        for _ in 0..5 {
            limiter.check("k", 5, window);
        }
        assert!(!limiter.check("k", 5, window).success);

        std::thread::sleep(Duration::from_millis(60));

        let fresh = limiter.check("k", 5, window);
        assert!(fresh.success);
        assert_eq!(fresh.remaining, 4);
    }

    #[test]
    fn reset_clears_a_partially_consumed_key() {
        let (limiter, _) = limiter();
        for _ in 0..3 {
            limiter.check("k", 5, CREDENTIAL_WINDOW);
        }
        limiter.reset("k");
        let decision = limiter.check("k", 5, CREDENTIAL_WINDOW);
        assert!(decision.success);
        assert_eq!(decision.remaining, 4);
    }

    #[test]
    fn keys_are_isolated() {
        let (limiter, _) = limiter();
        for _ in 0..5 {
            limiter.check("login:alice@example.com:1.2.3.4", 5, CREDENTIAL_WINDOW);
        }
        assert!(!limiter.check("login:alice@example.com:1.2.3.4", 5, CREDENTIAL_WINDOW).success);

        let other_ip = limiter.check("login:alice@example.com:5.6.7.8", 5, CREDENTIAL_WINDOW);
        assert!(other_ip.success);
        assert_eq!(other_ip.remaining, 4);

        let other_email = limiter.check("login:bob@example.com:1.2.3.4", 5, CREDENTIAL_WINDOW);
        assert!(other_email.success);
        assert_eq!(other_email.remaining, 4);
    }

    #[test]
    fn blocked_calls_do_not_extend_the_window() {
        let (limiter, _) = limiter();
        let window = Duration::from_millis(40);
        for _ in 0..5 {
            limiter.check("k", 5, window);
        }
        // Hammering while blocked must not push the reset out.
        for _ in 0..10 {
            assert!(!limiter.check("k", 5, window).success);
        }
        std::thread::sleep(Duration::from_millis(60));
        assert!(limiter.check("k", 5, window).success);
    }

    #[test]
    fn sweep_drops_expired_entries_only() {
        let (limiter, store) = limiter();
        limiter.check("short", 5, Duration::from_millis(10));
        limiter.check("long", 5, Duration::from_secs(900));
        std::thread::sleep(Duration::from_millis(30));

        limiter.sweep();

        assert!(store.get("short").is_none());
        assert!(store.get("long").is_some());
        assert_eq!(store.len(), 1);
    }
}
