//! Route definitions for the excluded-channel registry.
//!
//! Mounted at `/channels` within the `/api/v1` tree.
//!
//! ```text
//! GET    /      -> list_channels
//! POST   /      -> register_channel
//! PATCH  /{id}  -> update_channel
//! DELETE /{id}  -> delete_channel
//! ```

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::channels;
use crate::state::AppState;

/// Build the `/channels` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(channels::list_channels).post(channels::register_channel),
        )
        .route(
            "/{id}",
            patch(channels::update_channel).delete(channels::delete_channel),
        )
}
