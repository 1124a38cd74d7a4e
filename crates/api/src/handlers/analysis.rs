//! Handlers for automated analysis endpoints.
//!
//! A run is: load the registry snapshot, query the video platform once,
//! feed both to the engine, and persist the resulting snapshot. If the
//! platform query fails nothing is persisted — the previous snapshot
//! stays valid and the caller may retry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use shortscout_core::error::CoreError;
use shortscout_core::heuristic::{analyze, AnalysisOutcome};
use shortscout_core::signal::collect_signals;
use shortscout_core::types::DbId;
use shortscout_db::models::analysis_snapshot::{AnalysisSnapshot, UpsertAnalysisSnapshot};
use shortscout_db::repositories::{AnalysisSnapshotRepo, ExcludedChannelRepo, TitleRepo};
use shortscout_providers::youtube::shorts_query;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/titles/{id}/analysis
///
/// The latest analysis snapshot for a title, if a run has completed.
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AnalysisSnapshot>>> {
    let snapshot = AnalysisSnapshotRepo::find_by_title(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "analysis snapshot",
            id,
        })?;
    Ok(Json(DataResponse { data: snapshot }))
}

/// POST /api/v1/titles/{id}/analysis
///
/// Run the automated analysis for a title and persist the snapshot.
pub async fn run_analysis(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<AnalysisSnapshot>>)> {
    let title = TitleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "title", id })?;

    let registry = ExcludedChannelRepo::load_registry(&state.pool).await?;
    let query = shorts_query(&title.kind, &title.name);

    tracing::info!(title_id = id, query = %query, "Starting automated analysis");
    let search = state.video_search.search_shorts(&query).await?;

    let now = chrono::Utc::now();
    let aggregate = collect_signals(&search.postings, &registry, now);
    let outcome = analyze(&aggregate, search.total_count, now);

    match &outcome {
        AnalysisOutcome::NoVideosFound => {
            tracing::info!(title_id = id, "No postings found; recording uninformative run");
        }
        AnalysisOutcome::Analyzed(analysis) => {
            tracing::info!(
                title_id = id,
                total_score = analysis.total_score,
                grade = analysis.recommendation.grade,
                is_forbidden = analysis.is_forbidden,
                "Analysis complete"
            );
        }
    }

    let body = UpsertAnalysisSnapshot::from_outcome(&outcome, &query, now);
    let snapshot = AnalysisSnapshotRepo::upsert(&state.pool, id, &body).await?;
    TitleRepo::touch_shorts_checked(&state.pool, id, now).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: snapshot })))
}
