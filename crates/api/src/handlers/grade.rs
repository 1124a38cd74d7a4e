//! Handler for the resolved grade endpoint.
//!
//! Pulls together every signal a title has — admin flags, community
//! reports, the latest automated snapshot — and resolves them through
//! the trust precedence order. The response carries the provenance so
//! the presentation layer can render heuristic-only grades with less
//! visual weight than backed ones.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use shortscout_core::arbiter::{resolve_grade, RenderableGrade};
use shortscout_core::community::{aggregate_reports, CommunitySummary};
use shortscout_core::error::CoreError;
use shortscout_core::hybrid::{combine_scores, HybridScore};
use shortscout_core::suitability::{suitability_score, SuitabilitySignals};
use shortscout_core::types::DbId;
use shortscout_db::repositories::{AnalysisSnapshotRepo, SafetyReportRepo, TitleRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET /titles/{id}/grade`.
#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub grade: RenderableGrade,
    pub community: CommunitySummary,
    /// Automated combined score, absent when no informative run exists.
    pub automated_score: Option<f64>,
    /// The latest run found no postings at all; risk cannot be evaluated.
    pub no_videos_found: bool,
    /// Blended presentation score, absent when no signal exists.
    pub hybrid: Option<HybridScore>,
    /// 0-100 planning heuristic.
    pub suitability: u8,
}

/// GET /api/v1/titles/{id}/grade
pub async fn get_grade(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GradeResponse>>> {
    let title = TitleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "title", id })?;

    let now = chrono::Utc::now();

    let reports = SafetyReportRepo::list_by_title(&state.pool, id).await?;
    let inputs: Vec<_> = reports.iter().map(|r| r.scoring_input()).collect();
    let community = aggregate_reports(&inputs, now);

    let snapshot = AnalysisSnapshotRepo::find_by_title(&state.pool, id).await?;
    let no_videos_found = snapshot.as_ref().is_some_and(|s| s.no_videos_found);
    let automated_score = snapshot.as_ref().and_then(|s| s.total_score);

    let grade = resolve_grade(
        title.admin_recommended,
        title.is_verified_safe,
        &community,
        automated_score,
    );
    let hybrid = combine_scores(automated_score, Some(&community));

    let signals = SuitabilitySignals {
        audience_count: title.audience_count,
        rating: title.rating,
        copyright_warning: title.copyright_warning,
        first_short_uploaded_at: snapshot.as_ref().and_then(|s| s.earliest_published_at),
        competing_channel_count: snapshot
            .as_ref()
            .map(|s| s.unique_channel_count.max(0) as u32)
            .unwrap_or(0),
        is_verified_safe: title.is_verified_safe,
        release_date: title.release_date,
    };
    let suitability = suitability_score(&signals, now);

    Ok(Json(DataResponse {
        data: GradeResponse {
            grade,
            community,
            automated_score,
            no_videos_found,
            hybrid,
            suitability,
        },
    }))
}
