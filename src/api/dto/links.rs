//! DTOs for the song lookup endpoint.

use url::form_urlencoded;
use validator::Validate;

/// Query string of `GET /`.
#[derive(Debug, Default, Validate)]
pub struct LinkQuery {
    /// Share URL to resolve. Forwarded to the matching API unmodified.
    #[validate(required, length(min = 1))]
    pub url: Option<String>,

    /// Two-letter country code; the configured default applies when absent.
    pub country: Option<String>,
}

impl LinkQuery {
    /// Parses a raw query string.
    ///
    /// A repeated parameter keeps its first value; unknown parameters are ignored.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let Some(raw) = raw else {
            return query;
        };

        for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
            let slot = match key.as_ref() {
                "url" => &mut query.url,
                "country" => &mut query.country,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        query
    }
}
