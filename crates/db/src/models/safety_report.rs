//! Community safety report models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shortscout_core::community::CommunityReport;
use shortscout_core::types::{DbId, Timestamp};

/// A row from the `safety_reports` table. Append-only: rows are never
/// updated once written.
///
/// The outcome columns are nullable because a "not yet attempted" report
/// (`shorts_created = false`) carries no outcome at all.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SafetyReport {
    pub id: DbId,
    pub title_id: DbId,
    pub shorts_created: bool,
    pub copyright_issue: Option<bool>,
    pub shorts_deleted: Option<bool>,
    pub months_since_upload: Option<i32>,
    pub comment: Option<String>,
    pub is_admin_rating: bool,
    pub created_at: Timestamp,
}

impl SafetyReport {
    /// Reduce this row to the engine's scoring input. Missing outcome
    /// fields degrade to their neutral values; the aggregator discards
    /// non-attempted reports anyway.
    pub fn scoring_input(&self) -> CommunityReport {
        CommunityReport {
            shorts_created: self.shorts_created,
            copyright_issue: self.copyright_issue.unwrap_or(false),
            shorts_deleted: self.shorts_deleted.unwrap_or(false),
            months_since_upload: self.months_since_upload.unwrap_or(0),
            is_admin_rating: self.is_admin_rating,
            submitted_at: self.created_at,
        }
    }
}

/// DTO for inserting a report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSafetyReport {
    pub shorts_created: bool,
    pub copyright_issue: Option<bool>,
    pub shorts_deleted: Option<bool>,
    pub months_since_upload: Option<i32>,
    pub comment: Option<String>,
    #[serde(default)]
    pub is_admin_rating: bool,
}
