//! Domain layer containing the song lookup model and extraction rules.
//!
//! The domain layer has no knowledge of HTTP servers, caches, or the concrete
//! upstream client. It defines the data shapes exchanged with song.link, the
//! normalized output returned to callers, and the trait the infrastructure
//! layer implements to reach the upstream API.
//!
//! # Architecture
//!
//! - [`entities`] - Request, upstream response, and normalized output types
//! - [`extract`] - Preferred-provider / primary-entity extraction rules
//! - [`upstream`] - [`upstream::SongLinkClient`] trait for the matching API

pub mod entities;
pub mod extract;
pub mod upstream;
