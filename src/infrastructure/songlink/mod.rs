//! song.link matching API client.

mod client;

pub use client::{DEFAULT_ENDPOINT, HttpSongLinkClient};
