//! Handler for the song lookup endpoint.

use axum::{
    Json,
    extract::{RawQuery, State},
};
use validator::Validate;

use crate::api::dto::links::LinkQuery;
use crate::domain::entities::SongData;
use crate::error::AppError;
use crate::state::AppState;

/// Resolves a share URL to normalized song data.
///
/// # Endpoint
///
/// `GET /?url=<share url>&country=<code>`
///
/// # Response
///
/// ```json
/// {
///   "url": "https://song.link/s/2Ok2dDz4iLmE3bQUvH6bYS",
///   "title": "Foo",
///   "artist": "Bar"
/// }
/// ```
///
/// `title` and `artist` are omitted when the matching API does not know them.
/// When a parameter is repeated, its first value is used.
///
/// # Errors
///
/// - 400 Bad Request if `url` is missing or empty (the upstream is not called)
/// - The upstream status and status text if song.link answers with an error
/// - 500 Internal Server Error if song.link is unreachable or its answer is malformed
pub async fn links_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<SongData>, AppError> {
    let query = LinkQuery::from_query(raw.as_deref());
    query
        .validate()
        .map_err(|_| AppError::bad_request("Bad Request"))?;

    let share_url = query.url.as_deref().unwrap_or_default();
    let song = state
        .link_service
        .normalize(share_url, query.country.as_deref())
        .await?;

    Ok(Json(song))
}
