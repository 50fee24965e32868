//! Request middleware: rate limiting and session enforcement.

pub mod rate_limit;
pub mod session;
