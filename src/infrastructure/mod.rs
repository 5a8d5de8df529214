//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the interfaces the domain and API layers rely on.
//!
//! # Modules
//!
//! - [`cache`] - Response cache backends (Redis and no-op implementations)
//! - [`songlink`] - reqwest client for the song.link matching API

pub mod cache;
pub mod songlink;
