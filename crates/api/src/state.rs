use std::sync::Arc;

use shortscout_providers::tmdb::TmdbApi;
use shortscout_providers::youtube::VideoSearchApi;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shortscout_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Video-platform search client.
    pub video_search: Arc<VideoSearchApi>,
    /// Title metadata client.
    pub metadata: Arc<TmdbApi>,
}

impl AppState {
    /// Build state from config and an existing pool, constructing the
    /// provider clients from the configured API keys.
    pub fn new(pool: shortscout_db::DbPool, config: ServerConfig) -> Self {
        let video_search = Arc::new(VideoSearchApi::new(config.youtube_api_key.clone()));
        let metadata = Arc::new(TmdbApi::new(config.tmdb_api_key.clone()));
        Self {
            pool,
            config: Arc::new(config),
            video_search,
            metadata,
        }
    }
}
