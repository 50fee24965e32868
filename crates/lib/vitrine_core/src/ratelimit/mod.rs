//! Fixed-window rate limiting for credential endpoints and API traffic.
//!
//! Attempt counts live in an in-process store behind [`RateLimitStore`];
//! nothing is persisted or shared across instances. That is an accepted
//! scaling limitation: a multi-replica deployment swaps in a distributed
//! store through the same trait.

pub mod keys;
mod limiter;
mod store;

pub use limiter::{
    CREDENTIAL_MAX_ATTEMPTS, CREDENTIAL_WINDOW, RateLimitDecision, RateLimiter,
};
pub use store::{MemoryStore, RateLimitEntry, RateLimitStore};
