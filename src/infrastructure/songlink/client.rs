//! reqwest-backed [`SongLinkClient`] implementation.

use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

use crate::domain::entities::{UpstreamQuery, UpstreamResponse};
use crate::domain::upstream::SongLinkClient;
use crate::error::AppError;

/// Public song.link links endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.song.link/v1-alpha.1/links";

/// HTTP client for the matching API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpSongLinkClient {
    client: Client,
    endpoint: Url,
}

impl HttpSongLinkClient {
    /// Builds a client for `endpoint`.
    ///
    /// Without `timeout` the reqwest defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not a valid URL or the TLS backend
    /// cannot be initialized.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let endpoint = Url::parse(endpoint)?;

        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }
}

#[async_trait]
impl SongLinkClient for HttpSongLinkClient {
    async fn fetch_links(&self, query: &UpstreamQuery) -> Result<UpstreamResponse, AppError> {
        let url = query.to_url(&self.endpoint);
        info!(upstream_url = %url, "Forwarding request to song.link");

        let resp = self.client.get(url).send().await.map_err(|e| {
            error!(err = ?e, "Failed to reach song.link");
            AppError::internal(format!("Failed to reach upstream: {e}"))
        })?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status_text(&resp);
            info!(
                status = status.as_u16(),
                reason = %reason,
                "song.link responded with an error"
            );
            return Err(AppError::upstream(status, reason));
        }

        let links = resp.json::<UpstreamResponse>().await.map_err(|e| {
            error!(err = ?e, "Failed to decode song.link response");
            AppError::internal(format!("Failed to decode upstream response: {e}"))
        })?;

        if links.entities_by_unique_id.is_empty() {
            warn!(page_url = %links.page_url, "song.link returned no entities");
        }

        Ok(links)
    }
}

/// Status text as sent by the upstream.
///
/// hyper only records the HTTP/1 reason phrase when it differs from the
/// canonical one; HTTP/2 carries none. Both cases fall back to the canonical text.
fn status_text(resp: &reqwest::Response) -> String {
    match resp.extensions().get::<ReasonPhrase>() {
        Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
        None => resp
            .status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
    }
}
