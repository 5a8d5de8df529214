#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::http::StatusCode;
use songlink_proxy::api::middleware::OriginPolicy;
use songlink_proxy::application::services::LinkService;
use songlink_proxy::domain::entities::{UpstreamEntity, UpstreamQuery, UpstreamResponse};
use songlink_proxy::domain::upstream::SongLinkClient;
use songlink_proxy::error::AppError;
use songlink_proxy::infrastructure::cache::{
    CacheResult, CacheService, CachedResponse, NullCache,
};
use songlink_proxy::routes::router;
use songlink_proxy::state::AppState;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&UpstreamQuery) -> Result<UpstreamResponse, AppError> + Send + Sync>;

/// In-process stand-in for the matching API that records every query.
pub struct FakeSongLinkClient {
    responder: Responder,
    calls: AtomicUsize,
    queries: Mutex<Vec<UpstreamQuery>>,
}

impl FakeSongLinkClient {
    pub fn new(
        responder: impl Fn(&UpstreamQuery) -> Result<UpstreamResponse, AppError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn returning(resp: UpstreamResponse) -> Arc<Self> {
        Self::new(move |_| Ok(resp.clone()))
    }

    pub fn failing(status: StatusCode) -> Arc<Self> {
        Self::new(move |_| {
            Err(AppError::upstream(
                status,
                status.canonical_reason().unwrap_or_default(),
            ))
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<UpstreamQuery> {
        self.queries.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl SongLinkClient for FakeSongLinkClient {
    async fn fetch_links(&self, query: &UpstreamQuery) -> Result<UpstreamResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        (self.responder)(query)
    }
}

/// HashMap-backed cache so tests can observe hits without Redis.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CachedResponse>>,
    healthy: bool,
}

impl MemoryCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            healthy: true,
        })
    }

    pub fn unhealthy() -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(HashMap::new()),
            healthy: false,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<CachedResponse>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        response: &CachedResponse,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), response.clone());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

pub fn entity(title: &str, artist: &str, provider: &str) -> UpstreamEntity {
    UpstreamEntity {
        title: Some(title.to_string()),
        artist_name: Some(artist.to_string()),
        api_provider: provider.to_string(),
    }
}

/// Response with an iTunes primary entity and a Spotify entity.
pub fn spotify_response() -> UpstreamResponse {
    UpstreamResponse {
        entity_unique_id: "X".to_string(),
        page_url: "https://song.link/abc".to_string(),
        entities_by_unique_id: [
            ("X".to_string(), entity("Foo", "Bar", "itunes")),
            ("Y".to_string(), entity("Foo", "Bar", "spotify")),
        ]
        .into_iter()
        .collect(),
    }
}

pub fn create_test_state(
    client: Arc<FakeSongLinkClient>,
    cache: Arc<dyn CacheService>,
) -> AppState {
    AppState::new(Arc::new(LinkService::new(client)), cache)
}

pub fn create_test_app(client: Arc<FakeSongLinkClient>) -> Router {
    router(
        create_test_state(client, Arc::new(NullCache::new())),
        OriginPolicy::default(),
    )
}

pub fn create_cached_test_app(client: Arc<FakeSongLinkClient>, cache: Arc<MemoryCache>) -> Router {
    router(create_test_state(client, cache), OriginPolicy::default())
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
