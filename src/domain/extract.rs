//! Extraction of normalized song data from a matching API response.
//!
//! # Precedence
//!
//! 1. The first entity (in upstream order) from the preferred provider
//! 2. The primary entity named by `entityUniqueId`
//! 3. The page URL alone

use crate::domain::entities::{EntityMap, SongData, UpstreamEntity, UpstreamResponse};

/// Provider whose metadata wins when present.
pub const PREFERRED_PROVIDER: &str = "spotify";

/// Returns the first entity reported by `provider`, if any.
///
/// If upstream lists the same provider more than once, the earliest entry wins.
pub fn find_provider_entity<'a>(
    entities: &'a EntityMap,
    provider: &str,
) -> Option<&'a UpstreamEntity> {
    entities.values().find(|e| e.api_provider == provider)
}

/// Normalizes an upstream response into [`SongData`].
pub fn extract_song_data(resp: &UpstreamResponse) -> SongData {
    let entity = find_provider_entity(&resp.entities_by_unique_id, PREFERRED_PROVIDER)
        .or_else(|| resp.entities_by_unique_id.get(&resp.entity_unique_id));

    match entity {
        Some(entity) => SongData {
            url: resp.page_url.clone(),
            title: entity.title.clone(),
            artist: entity.artist_name.clone(),
        },
        None => SongData::url_only(resp.page_url.clone()),
    }
}
