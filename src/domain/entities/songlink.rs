//! song.link matching API data shapes.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use super::song::ShareRequest;

/// One provider-specific representation of a song returned by the matching API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamEntity {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub artist_name: Option<String>,

    pub api_provider: String,
}

/// Full matching API response, reduced to the fields this service reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamResponse {
    pub entity_unique_id: String,
    pub page_url: String,
    pub entities_by_unique_id: EntityMap,
}

/// Entities keyed by their unique id, in the order the upstream sent them.
///
/// A repeated key replaces the earlier value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMap(Vec<(String, UpstreamEntity)>);

impl EntityMap {
    /// Looks up an entity by its unique id.
    pub fn get(&self, id: &str) -> Option<&UpstreamEntity> {
        self.0.iter().find(|(key, _)| key == id).map(|(_, e)| e)
    }

    /// Iterates entities in upstream order.
    pub fn values(&self) -> impl Iterator<Item = &UpstreamEntity> {
        self.0.iter().map(|(_, e)| e)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, id: String, entity: UpstreamEntity) {
        match self.0.iter_mut().find(|(key, _)| *key == id) {
            Some(slot) => slot.1 = entity,
            None => self.0.push((id, entity)),
        }
    }
}

impl FromIterator<(String, UpstreamEntity)> for EntityMap {
    fn from_iter<I: IntoIterator<Item = (String, UpstreamEntity)>>(iter: I) -> Self {
        let mut map = EntityMap::default();
        for (id, entity) in iter {
            map.insert(id, entity);
        }
        map
    }
}

impl<'de> Deserialize<'de> for EntityMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntityMapVisitor;

        impl<'de> Visitor<'de> for EntityMapVisitor {
            type Value = EntityMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of entity ids to entities")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = EntityMap(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((id, entity)) = access.next_entry::<String, UpstreamEntity>()? {
                    map.insert(id, entity);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EntityMapVisitor)
    }
}

/// Outbound query for the matching API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pub url: String,
    pub user_country: String,
    /// Ask upstream to resolve single-track albums to the track itself.
    pub song_if_single: bool,
}

impl UpstreamQuery {
    /// Renders the query onto `endpoint`, replacing any query string it had.
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("url", &self.url)
            .append_pair("userCountry", &self.user_country)
            .append_pair("songIfSingle", if self.song_if_single { "true" } else { "false" });
        url
    }
}

impl From<&ShareRequest> for UpstreamQuery {
    fn from(req: &ShareRequest) -> Self {
        Self {
            url: req.share_url.clone(),
            user_country: req.country.clone(),
            song_if_single: true,
        }
    }
}
