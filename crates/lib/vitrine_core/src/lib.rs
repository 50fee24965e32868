//! # vitrine_core
//!
//! Core domain logic for the Vitrine storefront: stateless session tokens,
//! fixed-window rate limiting, and the commerce backend client used for
//! credential checks.
//!
//! Everything here is in-process computation or a thin network client; the
//! catalog, payments, and search all live in external systems.

pub mod backend;
pub mod models;
pub mod ratelimit;
pub mod session;
