//! Handlers for catalog title endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use shortscout_core::catalog::{is_listable_safe, sort_by_safety, DEFAULT_SAFE_MIN_SCORE};
use shortscout_core::community::{aggregate_reports, CommunitySummary};
use shortscout_core::error::CoreError;
use shortscout_core::title::{validate_rating, validate_title_kind, validate_title_name};
use shortscout_core::types::DbId;
use shortscout_db::models::title::{CreateTitle, Title, UpdateTitle};
use shortscout_db::repositories::{SafetyReportRepo, TitleRepo};
use shortscout_db::{clamp_limit, clamp_offset};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /titles`.
#[derive(Debug, Deserialize)]
pub struct ListTitlesParams {
    /// Optional `movie` / `drama` filter.
    pub kind: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for `GET /titles/safe`.
#[derive(Debug, Deserialize)]
pub struct SafeListParams {
    /// Minimum community score; defaults to 6.0.
    pub min_score: Option<f64>,
}

/// One entry of the safe-titles listing.
#[derive(Debug, Serialize)]
pub struct SafeTitleEntry {
    pub title: Title,
    pub summary: CommunitySummary,
}

/// GET /api/v1/titles
///
/// Paginated catalog listing, newest first.
pub async fn list_titles(
    State(state): State<AppState>,
    Query(params): Query<ListTitlesParams>,
) -> AppResult<Json<DataResponse<Vec<Title>>>> {
    if let Some(kind) = params.kind.as_deref() {
        validate_title_kind(kind)?;
    }
    let titles = TitleRepo::list(
        &state.pool,
        params.kind.as_deref(),
        clamp_limit(params.limit),
        clamp_offset(params.offset),
    )
    .await?;
    Ok(Json(DataResponse { data: titles }))
}

/// POST /api/v1/titles
///
/// Add a title to the catalog.
pub async fn create_title(
    State(state): State<AppState>,
    Json(input): Json<CreateTitle>,
) -> AppResult<(StatusCode, Json<DataResponse<Title>>)> {
    validate_title_kind(&input.kind)?;
    validate_title_name(&input.name)?;
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let title = TitleRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: title })))
}

/// GET /api/v1/titles/{id}
pub async fn get_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Title>>> {
    let title = TitleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "title", id })?;
    Ok(Json(DataResponse { data: title }))
}

/// PATCH /api/v1/titles/{id}
///
/// Patch catalog fields and admin flags.
pub async fn update_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTitle>,
) -> AppResult<Json<DataResponse<Title>>> {
    if let Some(name) = input.name.as_deref() {
        validate_title_name(name)?;
    }
    if let Some(rating) = input.rating {
        validate_rating(rating)?;
    }

    let title = TitleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "title", id })?;
    Ok(Json(DataResponse { data: title }))
}

/// DELETE /api/v1/titles/{id}
pub async fn delete_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TitleRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "title", id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/titles/safe
///
/// Titles with enough community evidence to list as safe, safest first.
/// Summaries are recomputed from the report lists rather than read from
/// the cache so the listing can never drift from the source of truth.
pub async fn list_safe_titles(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(params): Query<SafeListParams>,
) -> AppResult<Json<DataResponse<Vec<SafeTitleEntry>>>> {
    let min_score = params.min_score.unwrap_or(DEFAULT_SAFE_MIN_SCORE);
    let now = chrono::Utc::now();

    let titles = TitleRepo::list(
        &state.pool,
        None,
        clamp_limit(pagination.limit),
        clamp_offset(pagination.offset),
    )
    .await?;

    let mut entries = Vec::new();
    for title in titles {
        let reports = SafetyReportRepo::list_by_title(&state.pool, title.id).await?;
        let inputs: Vec<_> = reports.iter().map(|r| r.scoring_input()).collect();
        let summary = aggregate_reports(&inputs, now);
        if is_listable_safe(&summary, min_score) {
            entries.push(SafeTitleEntry { title, summary });
        }
    }
    sort_by_safety(&mut entries, |entry| &entry.summary);

    Ok(Json(DataResponse { data: entries }))
}
