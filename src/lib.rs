//! # songlink-proxy
//!
//! A small caching proxy in front of the [song.link](https://song.link) matching API.
//! Given a music-streaming share URL it returns the canonical song.link page URL
//! together with the song's title and artist, preferring Spotify metadata.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Lookup entities, extraction rules, upstream trait
//! - **Application Layer** ([`application`]) - The normalization service
//! - **Infrastructure Layer** ([`infrastructure`]) - song.link client and cache backends
//! - **API Layer** ([`api`]) - Handlers, DTOs, and middleware
//!
//! ## Request Flow
//!
//! 1. CORS origin check (`GET` only)
//! 2. Response cache lookup keyed by method and URL
//! 3. One call to song.link with `url`, `userCountry`, `songIfSingle=true`
//! 4. Extraction: Spotify entity, else the primary entity, else the page URL alone
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! cargo run
//! curl 'http://localhost:3000/?url=https://open.spotify.com/track/...'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::{SongData, UpstreamEntity, UpstreamQuery, UpstreamResponse};
    pub use crate::domain::upstream::SongLinkClient;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
