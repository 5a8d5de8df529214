//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShareRequest`] - Share URL and country supplied by the caller
//! - [`UpstreamQuery`] - Outbound query sent to the matching API
//! - [`UpstreamResponse`] / [`UpstreamEntity`] - The matching API's answer
//! - [`SongData`] - Normalized record returned to the caller

pub mod song;
pub mod songlink;

pub use song::{DEFAULT_COUNTRY, ShareRequest, SongData};
pub use songlink::{EntityMap, UpstreamEntity, UpstreamQuery, UpstreamResponse};
