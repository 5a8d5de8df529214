//! HTTP middleware for request processing.
//!
//! Provides the origin allow-list, response caching, and observability middleware.

pub mod cache;
pub mod cors;
pub mod tracing;

pub use cors::OriginPolicy;
