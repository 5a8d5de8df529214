//! Application layer services implementing business logic.
//!
//! Services orchestrate domain operations and upstream calls, and provide a
//! clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Share URL normalization

pub mod services;
