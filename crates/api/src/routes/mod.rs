//! Route definitions, one module per resource.

pub mod channels;
pub mod health;
pub mod metadata;
pub mod titles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/titles", titles::router())
        .nest("/channels", channels::router())
        .nest("/metadata", metadata::router())
}
