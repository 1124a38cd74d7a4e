//! Batch analysis worker.
//!
//! Refreshes stale automated analyses across the catalog: one search
//! call per title, serialized with a fixed inter-call delay to respect
//! the video platform's rate limits. A failed title is logged and
//! skipped; it never aborts the batch.

use std::time::Duration;

use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shortscout_core::channel_risk::ChannelRegistry;
use shortscout_core::heuristic::{analyze, AnalysisOutcome};
use shortscout_core::signal::collect_signals;
use shortscout_db::models::analysis_snapshot::UpsertAnalysisSnapshot;
use shortscout_db::models::title::Title;
use shortscout_db::repositories::{AnalysisSnapshotRepo, ExcludedChannelRepo, TitleRepo};
use shortscout_db::DbPool;
use shortscout_providers::youtube::{shorts_query, VideoSearchApi};

/// Worker configuration loaded from environment variables.
struct WorkerConfig {
    /// Analyses older than this are considered stale (default: 24).
    stale_hours: i64,
    /// Delay between consecutive platform calls (default: 1000).
    delay_ms: u64,
    /// Maximum titles refreshed per run (default: 50).
    batch_limit: i64,
}

impl WorkerConfig {
    fn from_env() -> Self {
        let stale_hours = std::env::var("ANALYZE_STALE_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("ANALYZE_STALE_HOURS must be a valid i64");
        let delay_ms = std::env::var("ANALYZE_DELAY_MS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("ANALYZE_DELAY_MS must be a valid u64");
        let batch_limit = std::env::var("ANALYZE_BATCH_LIMIT")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("ANALYZE_BATCH_LIMIT must be a valid i64");
        Self {
            stale_hours,
            delay_ms,
            batch_limit,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shortscout_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = shortscout_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    shortscout_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    let api_key = std::env::var("YOUTUBE_API_KEY").expect("YOUTUBE_API_KEY must be set");
    let video_search = VideoSearchApi::new(api_key);

    run_batch(&pool, &video_search, &config).await;
}

/// Refresh every stale title once, pacing the external calls.
async fn run_batch(pool: &DbPool, video_search: &VideoSearchApi, config: &WorkerConfig) {
    let cutoff = Utc::now() - chrono::Duration::hours(config.stale_hours);

    let titles = match TitleRepo::list_stale_for_analysis(pool, cutoff, config.batch_limit).await {
        Ok(titles) => titles,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load stale titles; aborting run");
            return;
        }
    };

    if titles.is_empty() {
        tracing::info!("All analyses are fresh; nothing to do");
        return;
    }

    // One registry snapshot for the whole batch; every title in this run
    // is scored against the same registry state.
    let registry = match ExcludedChannelRepo::load_registry(pool).await {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load channel registry; aborting run");
            return;
        }
    };

    tracing::info!(count = titles.len(), "Starting batch analysis");

    let mut analyzed = 0usize;
    let mut failed = 0usize;

    for (index, title) in titles.iter().enumerate() {
        match analyze_one(pool, video_search, &registry, title).await {
            Ok(()) => analyzed += 1,
            Err(e) => {
                // One title's upstream failure must never abort the
                // batch; its previous snapshot stays valid.
                failed += 1;
                tracing::warn!(title_id = title.id, error = %e, "Skipping title");
            }
        }

        if index + 1 < titles.len() {
            tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
        }
    }

    tracing::info!(analyzed, failed, "Batch analysis complete");
}

/// Run the full analysis pipeline for a single title.
async fn analyze_one(
    pool: &DbPool,
    video_search: &VideoSearchApi,
    registry: &ChannelRegistry,
    title: &Title,
) -> anyhow::Result<()> {
    let query = shorts_query(&title.kind, &title.name);
    let search = video_search.search_shorts(&query).await?;

    let now = Utc::now();
    let aggregate = collect_signals(&search.postings, registry, now);
    let outcome = analyze(&aggregate, search.total_count, now);

    match &outcome {
        AnalysisOutcome::NoVideosFound => {
            tracing::info!(title_id = title.id, name = %title.name, "No postings found");
        }
        AnalysisOutcome::Analyzed(analysis) => {
            tracing::info!(
                title_id = title.id,
                name = %title.name,
                total_score = analysis.total_score,
                grade = analysis.recommendation.grade,
                is_forbidden = analysis.is_forbidden,
                "Analyzed"
            );
        }
    }

    let body = UpsertAnalysisSnapshot::from_outcome(&outcome, &query, now);
    AnalysisSnapshotRepo::upsert(pool, title.id, &body).await?;
    TitleRepo::touch_shorts_checked(pool, title.id, now).await?;

    Ok(())
}
