//! Repository for the `analysis_snapshots` table.
//!
//! One snapshot per title: re-running an analysis overwrites the previous
//! row rather than accumulating history.

use sqlx::PgPool;

use shortscout_core::types::DbId;

use crate::models::analysis_snapshot::{AnalysisSnapshot, UpsertAnalysisSnapshot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title_id, no_videos_found, total_postings, sampled_count, \
     old_count, medium_count, recent_count, earliest_published_at, unique_channel_count, \
     is_forbidden, forbidden_channels, has_warning_channel, warning_channels, \
     safety_score, competition_score, total_score, grade, search_query, analyzed_at, \
     created_at, updated_at";

/// Provides upsert and fetch operations for analysis snapshots.
pub struct AnalysisSnapshotRepo;

impl AnalysisSnapshotRepo {
    /// Insert or overwrite the snapshot for a title.
    pub async fn upsert(
        pool: &PgPool,
        title_id: DbId,
        body: &UpsertAnalysisSnapshot,
    ) -> Result<AnalysisSnapshot, sqlx::Error> {
        let query = format!(
            "INSERT INTO analysis_snapshots
                (title_id, no_videos_found, total_postings, sampled_count,
                 old_count, medium_count, recent_count, earliest_published_at,
                 unique_channel_count, is_forbidden, forbidden_channels,
                 has_warning_channel, warning_channels, safety_score,
                 competition_score, total_score, grade, search_query, analyzed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                     $14, $15, $16, $17, $18, $19)
             ON CONFLICT (title_id) DO UPDATE SET
                no_videos_found = EXCLUDED.no_videos_found,
                total_postings = EXCLUDED.total_postings,
                sampled_count = EXCLUDED.sampled_count,
                old_count = EXCLUDED.old_count,
                medium_count = EXCLUDED.medium_count,
                recent_count = EXCLUDED.recent_count,
                earliest_published_at = EXCLUDED.earliest_published_at,
                unique_channel_count = EXCLUDED.unique_channel_count,
                is_forbidden = EXCLUDED.is_forbidden,
                forbidden_channels = EXCLUDED.forbidden_channels,
                has_warning_channel = EXCLUDED.has_warning_channel,
                warning_channels = EXCLUDED.warning_channels,
                safety_score = EXCLUDED.safety_score,
                competition_score = EXCLUDED.competition_score,
                total_score = EXCLUDED.total_score,
                grade = EXCLUDED.grade,
                search_query = EXCLUDED.search_query,
                analyzed_at = EXCLUDED.analyzed_at,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnalysisSnapshot>(&query)
            .bind(title_id)
            .bind(body.no_videos_found)
            .bind(body.total_postings)
            .bind(body.sampled_count)
            .bind(body.old_count)
            .bind(body.medium_count)
            .bind(body.recent_count)
            .bind(body.earliest_published_at)
            .bind(body.unique_channel_count)
            .bind(body.is_forbidden)
            .bind(&body.forbidden_channels)
            .bind(body.has_warning_channel)
            .bind(&body.warning_channels)
            .bind(body.safety_score)
            .bind(body.competition_score)
            .bind(body.total_score)
            .bind(&body.grade)
            .bind(&body.search_query)
            .bind(body.analyzed_at)
            .fetch_one(pool)
            .await
    }

    /// Latest snapshot for a title, if any run has completed.
    pub async fn find_by_title(
        pool: &PgPool,
        title_id: DbId,
    ) -> Result<Option<AnalysisSnapshot>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM analysis_snapshots WHERE title_id = $1");
        sqlx::query_as::<_, AnalysisSnapshot>(&query)
            .bind(title_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the snapshot for a title (for forcing a fresh run).
    pub async fn delete_by_title(pool: &PgPool, title_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM analysis_snapshots WHERE title_id = $1")
            .bind(title_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
