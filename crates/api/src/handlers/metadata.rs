//! Handler for title metadata search.
//!
//! Thin proxy over the metadata collaborator so the browser never holds
//! the API key.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use shortscout_core::error::CoreError;
use shortscout_core::title::{validate_title_kind, KIND_DRAMA};
use shortscout_core::types::Timestamp;
use shortscout_providers::tmdb::TitleMetadata;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /metadata/search`.
#[derive(Debug, Deserialize)]
pub struct MetadataSearchParams {
    /// `movie` or `drama`.
    pub kind: String,
    pub query: String,
}

/// One metadata hit in API shape.
#[derive(Debug, Serialize)]
pub struct MetadataHit {
    pub provider_id: i64,
    pub kind: String,
    pub name: String,
    pub release_date: Option<Timestamp>,
    pub rating: f64,
    pub poster_url: Option<String>,
    pub genre_ids: Vec<i64>,
    pub overview: String,
}

impl From<TitleMetadata> for MetadataHit {
    fn from(meta: TitleMetadata) -> Self {
        let poster_url = meta.poster_url();
        Self {
            provider_id: meta.provider_id,
            kind: meta.kind,
            name: meta.name,
            release_date: meta.release_date,
            rating: meta.rating,
            poster_url,
            genre_ids: meta.genre_ids,
            overview: meta.overview,
        }
    }
}

/// GET /api/v1/metadata/search?kind=&query=
pub async fn search_metadata(
    State(state): State<AppState>,
    Query(params): Query<MetadataSearchParams>,
) -> AppResult<Json<DataResponse<Vec<MetadataHit>>>> {
    validate_title_kind(&params.kind)?;
    if params.query.trim().is_empty() {
        return Err(CoreError::Validation("query must not be empty".to_string()).into());
    }

    let hits = if params.kind == KIND_DRAMA {
        state.metadata.search_dramas(&params.query).await?
    } else {
        state.metadata.search_movies(&params.query).await?
    };

    Ok(Json(DataResponse {
        data: hits.into_iter().map(MetadataHit::from).collect(),
    }))
}
