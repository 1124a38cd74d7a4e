//! Route definitions for title metadata lookup.
//!
//! Mounted at `/metadata` within the `/api/v1` tree.
//!
//! ```text
//! GET /search -> search_metadata
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::metadata;
use crate::state::AppState;

/// Build the `/metadata` router.
pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(metadata::search_metadata))
}
