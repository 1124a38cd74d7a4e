//! Repository for the `titles` table.

use sqlx::PgPool;

use shortscout_core::types::{DbId, Timestamp};

use crate::models::title::{CreateTitle, Title, UpdateTitle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, kind, name, release_date, rating, audience_count, \
     admin_recommended, is_verified_safe, copyright_warning, \
     safety_rating_average, safety_rating_count, safety_last_updated, \
     shorts_last_checked, created_at, updated_at";

/// Provides CRUD operations for catalog titles.
pub struct TitleRepo;

impl TitleRepo {
    /// Insert a title, returning the created row.
    pub async fn create(pool: &PgPool, body: &CreateTitle) -> Result<Title, sqlx::Error> {
        let query = format!(
            "INSERT INTO titles (kind, name, release_date, rating, audience_count)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(&body.kind)
            .bind(&body.name)
            .bind(body.release_date)
            .bind(body.rating.unwrap_or(0.0))
            .bind(body.audience_count.unwrap_or(0))
            .fetch_one(pool)
            .await
    }

    /// Fetch a title by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Title>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles WHERE id = $1");
        sqlx::query_as::<_, Title>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List titles, newest first, optionally filtered by kind.
    pub async fn list(
        pool: &PgPool,
        kind: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Title>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM titles
             WHERE ($1::text IS NULL OR kind = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(kind)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Patch a title. `None` fields keep their current values.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        body: &UpdateTitle,
    ) -> Result<Option<Title>, sqlx::Error> {
        let query = format!(
            "UPDATE titles SET
                name = COALESCE($2, name),
                release_date = COALESCE($3, release_date),
                rating = COALESCE($4, rating),
                audience_count = COALESCE($5, audience_count),
                admin_recommended = COALESCE($6, admin_recommended),
                is_verified_safe = COALESCE($7, is_verified_safe),
                copyright_warning = COALESCE($8, copyright_warning),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(id)
            .bind(&body.name)
            .bind(body.release_date)
            .bind(body.rating)
            .bind(body.audience_count)
            .bind(body.admin_recommended)
            .bind(body.is_verified_safe)
            .bind(body.copyright_warning)
            .fetch_optional(pool)
            .await
    }

    /// Delete a title and its dependent rows (cascades in schema).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Write the cached community summary for a title.
    pub async fn update_safety_cache(
        pool: &PgPool,
        id: DbId,
        average: f64,
        count: i32,
        updated_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE titles SET
                safety_rating_average = $2,
                safety_rating_count = $3,
                safety_last_updated = $4,
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(average)
        .bind(count)
        .bind(updated_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Record that an automated analysis ran for a title.
    pub async fn touch_shorts_checked(
        pool: &PgPool,
        id: DbId,
        checked_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE titles SET shorts_last_checked = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(checked_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Titles whose automated analysis is missing or older than `cutoff`,
    /// oldest-checked first. Used by the batch analysis worker.
    pub async fn list_stale_for_analysis(
        pool: &PgPool,
        cutoff: Timestamp,
        limit: i64,
    ) -> Result<Vec<Title>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM titles
             WHERE shorts_last_checked IS NULL OR shorts_last_checked < $1
             ORDER BY shorts_last_checked ASC NULLS FIRST
             LIMIT $2"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(cutoff)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
