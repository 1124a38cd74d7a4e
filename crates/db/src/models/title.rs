//! Catalog title models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shortscout_core::types::{DbId, Timestamp};

/// A row from the `titles` table.
///
/// `safety_rating_average` / `safety_rating_count` cache the community
/// summary; they are recomputed from the report list on every submission
/// and never edited directly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Title {
    pub id: DbId,
    /// `movie` or `drama`.
    pub kind: String,
    pub name: String,
    pub release_date: Option<Timestamp>,
    /// Quality rating 0-10, 0 when unknown.
    pub rating: f64,
    /// Theatrical audience count, 0 when unknown.
    pub audience_count: i64,
    /// Administrator produced a short from this title themselves.
    pub admin_recommended: bool,
    /// Administrator confirmed the title safe.
    pub is_verified_safe: bool,
    /// A copyright warning is on record.
    pub copyright_warning: bool,
    pub safety_rating_average: f64,
    pub safety_rating_count: i32,
    pub safety_last_updated: Option<Timestamp>,
    /// When the automated analysis last ran for this title.
    pub shorts_last_checked: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a title.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTitle {
    pub kind: String,
    pub name: String,
    pub release_date: Option<Timestamp>,
    pub rating: Option<f64>,
    pub audience_count: Option<i64>,
}

/// DTO for patching a title. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTitle {
    pub name: Option<String>,
    pub release_date: Option<Timestamp>,
    pub rating: Option<f64>,
    pub audience_count: Option<i64>,
    pub admin_recommended: Option<bool>,
    pub is_verified_safe: Option<bool>,
    pub copyright_warning: Option<bool>,
}
