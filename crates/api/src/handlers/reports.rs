//! Handlers for community safety report endpoints.
//!
//! Submitting a report recomputes the title's community summary from the
//! full report list and writes it back to the cached columns — the cache
//! is always a pure function of the reports.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use shortscout_core::community::{aggregate_reports, CommunitySummary};
use shortscout_core::error::CoreError;
use shortscout_core::report::{validate_comment, validate_submission};
use shortscout_core::types::DbId;
use shortscout_db::models::safety_report::{CreateSafetyReport, SafetyReport};
use shortscout_db::repositories::{SafetyReportRepo, TitleRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `POST /titles/{id}/reports`.
#[derive(Debug, Serialize)]
pub struct SubmitReportResponse {
    pub report: SafetyReport,
    /// Recomputed community summary after this submission.
    pub summary: CommunitySummary,
}

/// GET /api/v1/titles/{id}/reports
///
/// All reports for a title in submission order.
pub async fn list_reports(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<SafetyReport>>>> {
    ensure_title_exists(&state, id).await?;
    let reports = SafetyReportRepo::list_by_title(&state.pool, id).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// POST /api/v1/titles/{id}/reports
///
/// Append a report, recompute the community summary, and cache it on the
/// title.
pub async fn submit_report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateSafetyReport>,
) -> AppResult<(StatusCode, Json<DataResponse<SubmitReportResponse>>)> {
    validate_submission(
        input.shorts_created,
        input.copyright_issue,
        input.shorts_deleted,
        input.months_since_upload,
    )?;
    validate_comment(input.comment.as_deref())?;
    ensure_title_exists(&state, id).await?;

    let report = SafetyReportRepo::create(&state.pool, id, &input).await?;

    let now = chrono::Utc::now();
    let reports = SafetyReportRepo::list_by_title(&state.pool, id).await?;
    let inputs: Vec<_> = reports.iter().map(|r| r.scoring_input()).collect();
    let summary = aggregate_reports(&inputs, now);

    TitleRepo::update_safety_cache(&state.pool, id, summary.score, summary.count as i32, now)
        .await?;

    tracing::info!(
        title_id = id,
        score = summary.score,
        count = summary.count,
        safety_level = summary.safety_level,
        "Community summary recomputed"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SubmitReportResponse { report, summary },
        }),
    ))
}

/// Return 404 early when the title does not exist.
async fn ensure_title_exists(state: &AppState, id: DbId) -> AppResult<()> {
    TitleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "title", id })?;
    Ok(())
}
