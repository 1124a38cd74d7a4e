//! Repository for the `safety_reports` table.
//!
//! Reports are append-only: there is deliberately no update or delete.

use sqlx::PgPool;

use shortscout_core::types::DbId;

use crate::models::safety_report::{CreateSafetyReport, SafetyReport};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title_id, shorts_created, copyright_issue, shorts_deleted, \
     months_since_upload, comment, is_admin_rating, created_at";

/// Provides insert and list operations for community safety reports.
pub struct SafetyReportRepo;

impl SafetyReportRepo {
    /// Append a report for a title, returning the created row.
    pub async fn create(
        pool: &PgPool,
        title_id: DbId,
        body: &CreateSafetyReport,
    ) -> Result<SafetyReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO safety_reports
                (title_id, shorts_created, copyright_issue, shorts_deleted,
                 months_since_upload, comment, is_admin_rating)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SafetyReport>(&query)
            .bind(title_id)
            .bind(body.shorts_created)
            .bind(body.copyright_issue)
            .bind(body.shorts_deleted)
            .bind(body.months_since_upload)
            .bind(&body.comment)
            .bind(body.is_admin_rating)
            .fetch_one(pool)
            .await
    }

    /// All reports for a title in submission order.
    pub async fn list_by_title(
        pool: &PgPool,
        title_id: DbId,
    ) -> Result<Vec<SafetyReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM safety_reports
             WHERE title_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, SafetyReport>(&query)
            .bind(title_id)
            .fetch_all(pool)
            .await
    }

    /// Number of reports on record for a title.
    pub async fn count_by_title(pool: &PgPool, title_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM safety_reports WHERE title_id = $1")
                .bind(title_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }
}
