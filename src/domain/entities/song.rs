//! Caller-facing song lookup types.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Country used for upstream lookups when the caller does not supply one.
pub const DEFAULT_COUNTRY: &str = "US";

/// A share URL lookup requested by a caller.
///
/// The share URL is treated as an opaque string: it is forwarded to the
/// matching API as-is and never parsed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub share_url: String,
    pub country: String,
}

impl ShareRequest {
    /// Builds a request, falling back to `default_country` when `country`
    /// is absent or empty. A non-empty `share_url` is kept verbatim,
    /// whitespace included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] if `share_url` is empty.
    pub fn new(
        share_url: impl Into<String>,
        country: Option<&str>,
        default_country: &str,
    ) -> Result<Self, AppError> {
        let share_url = share_url.into();
        if share_url.is_empty() {
            return Err(AppError::bad_request("Bad Request"));
        }

        let country = match country.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => default_country.to_string(),
        };

        Ok(Self { share_url, country })
    }
}

/// Normalized song metadata returned to callers.
///
/// `url` is always the canonical page URL chosen by the matching API.
/// `title` and `artist` are omitted from JSON when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongData {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl SongData {
    /// Creates a record carrying only the canonical URL.
    pub fn url_only(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            artist: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_request_defaults_country() {
        let req = ShareRequest::new("https://open.spotify.com/track/1", None, "US").unwrap();
        assert_eq!(req.country, "US");

        let req = ShareRequest::new("https://open.spotify.com/track/1", Some(""), "US").unwrap();
        assert_eq!(req.country, "US");
    }

    #[test]
    fn test_share_request_keeps_country() {
        let req = ShareRequest::new("https://open.spotify.com/track/1", Some("JP"), "US").unwrap();
        assert_eq!(req.country, "JP");
        assert_eq!(req.share_url, "https://open.spotify.com/track/1");
    }

    #[test]
    fn test_share_request_rejects_empty_url() {
        let result = ShareRequest::new("", Some("JP"), "US");
        assert!(matches!(result, Err(AppError::BadRequest { .. })));

    }

    #[test]
    fn test_share_request_keeps_whitespace_url() {
        let req = ShareRequest::new("   ", None, "US").unwrap();
        assert_eq!(req.share_url, "   ");
        assert_eq!(req.country, "US");
    }

    #[test]
    fn test_song_data_omits_missing_fields() {
        let json = serde_json::to_value(SongData::url_only("https://song.link/abc")).unwrap();
        assert_eq!(json, serde_json::json!({ "url": "https://song.link/abc" }));
    }

    #[test]
    fn test_song_data_serializes_all_fields() {
        let data = SongData {
            url: "https://song.link/abc".to_string(),
            title: Some("Foo".to_string()),
            artist: Some("Bar".to_string()),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["title"], "Foo");
        assert_eq!(json["artist"], "Bar");
    }
}
