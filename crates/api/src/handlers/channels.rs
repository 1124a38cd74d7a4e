//! Handlers for the excluded-channel registry endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use shortscout_core::channel_risk::{validate_reason, validate_risk_level};
use shortscout_core::error::CoreError;
use shortscout_core::types::DbId;
use shortscout_db::models::excluded_channel::{
    CreateExcludedChannel, ExcludedChannel, UpdateExcludedChannel,
};
use shortscout_db::repositories::ExcludedChannelRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/channels
///
/// The whole registry, most recently registered first.
pub async fn list_channels(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ExcludedChannel>>>> {
    let channels = ExcludedChannelRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: channels }))
}

/// POST /api/v1/channels
///
/// Register a channel in a risk tier. Duplicate channel ids are rejected
/// by the schema's unique constraint (409).
pub async fn register_channel(
    State(state): State<AppState>,
    Json(input): Json<CreateExcludedChannel>,
) -> AppResult<(StatusCode, Json<DataResponse<ExcludedChannel>>)> {
    validate_risk_level(&input.risk_level)?;
    validate_reason(input.reason.as_deref())?;
    if input.channel_id.trim().is_empty() {
        return Err(CoreError::Validation("channel_id must not be empty".to_string()).into());
    }

    let channel = ExcludedChannelRepo::create(&state.pool, &input).await?;
    tracing::info!(
        channel_id = %channel.channel_id,
        risk_level = %channel.risk_level,
        "Channel registered"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: channel })))
}

/// PATCH /api/v1/channels/{id}
pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExcludedChannel>,
) -> AppResult<Json<DataResponse<ExcludedChannel>>> {
    if let Some(level) = input.risk_level.as_deref() {
        validate_risk_level(level)?;
    }
    validate_reason(input.reason.as_deref())?;

    let channel = ExcludedChannelRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "excluded channel",
            id,
        })?;
    Ok(Json(DataResponse { data: channel }))
}

/// DELETE /api/v1/channels/{id}
pub async fn delete_channel(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ExcludedChannelRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "excluded channel",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}
