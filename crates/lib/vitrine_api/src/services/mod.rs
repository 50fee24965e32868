//! Request-scoped services.

pub mod cookies;
pub mod session;
