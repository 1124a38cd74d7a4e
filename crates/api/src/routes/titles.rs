//! Route definitions for catalog title endpoints.
//!
//! Mounted at `/titles` within the `/api/v1` tree.
//!
//! ```text
//! GET    /                -> list_titles
//! POST   /                -> create_title
//! GET    /safe            -> list_safe_titles
//! GET    /{id}            -> get_title
//! PATCH  /{id}            -> update_title
//! DELETE /{id}            -> delete_title
//! GET    /{id}/reports    -> list_reports
//! POST   /{id}/reports    -> submit_report
//! GET    /{id}/analysis   -> get_analysis
//! POST   /{id}/analysis   -> run_analysis
//! GET    /{id}/grade      -> get_grade
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{analysis, grade, reports, titles};
use crate::state::AppState;

/// Build the `/titles` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(titles::list_titles).post(titles::create_title))
        .route("/safe", get(titles::list_safe_titles))
        .route(
            "/{id}",
            get(titles::get_title)
                .patch(titles::update_title)
                .delete(titles::delete_title),
        )
        .route(
            "/{id}/reports",
            get(reports::list_reports).post(reports::submit_report),
        )
        .route(
            "/{id}/analysis",
            get(analysis::get_analysis).post(analysis::run_analysis),
        )
        .route("/{id}/grade", get(grade::get_grade))
}
