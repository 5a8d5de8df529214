//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            link_service,
            cache,
        }
    }
}
