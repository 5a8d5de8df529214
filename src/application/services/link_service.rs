//! Share URL normalization service.

use std::sync::Arc;

use crate::domain::entities::{DEFAULT_COUNTRY, ShareRequest, SongData, UpstreamQuery};
use crate::domain::extract::extract_song_data;
use crate::domain::upstream::SongLinkClient;
use crate::error::AppError;

/// Resolves share URLs through the matching API and normalizes the result.
///
/// Holds no mutable state; concurrent calls are independent.
pub struct LinkService {
    client: Arc<dyn SongLinkClient>,
    default_country: String,
}

impl LinkService {
    /// Creates a service using [`DEFAULT_COUNTRY`] for lookups without a country.
    pub fn new(client: Arc<dyn SongLinkClient>) -> Self {
        Self::with_default_country(client, DEFAULT_COUNTRY)
    }

    pub fn with_default_country(
        client: Arc<dyn SongLinkClient>,
        default_country: impl Into<String>,
    ) -> Self {
        Self {
            client,
            default_country: default_country.into(),
        }
    }

    /// Looks up `share_url` and returns its normalized song data.
    ///
    /// # Flow
    ///
    /// 1. Validate the share URL and resolve the country
    /// 2. Query the matching API once (no retries)
    /// 3. Extract url/title/artist, preferring Spotify metadata
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if `share_url` is empty. The upstream
    /// is not contacted in that case.
    ///
    /// Propagates [`AppError::Upstream`] and [`AppError::Internal`] from the
    /// client unchanged.
    pub async fn normalize(
        &self,
        share_url: &str,
        country: Option<&str>,
    ) -> Result<SongData, AppError> {
        let request = ShareRequest::new(share_url, country, &self.default_country)?;
        let query = UpstreamQuery::from(&request);

        let response = self.client.fetch_links(&query).await?;

        let song = extract_song_data(&response);
        tracing::info!(
            share_url = %request.share_url,
            url = %song.url,
            title = ?song.title,
            artist = ?song.artist,
            "Extracted song data"
        );

        Ok(song)
    }
}
