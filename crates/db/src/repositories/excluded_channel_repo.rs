//! Repository for the `excluded_channels` registry table.

use sqlx::PgPool;

use shortscout_core::channel_risk::ChannelRegistry;
use shortscout_core::types::DbId;

use crate::models::excluded_channel::{
    CreateExcludedChannel, ExcludedChannel, UpdateExcludedChannel,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, channel_id, channel_name, channel_url, risk_level, reason, created_at, updated_at";

/// Provides CRUD operations for the excluded-channel registry.
pub struct ExcludedChannelRepo;

impl ExcludedChannelRepo {
    /// Register a channel, returning the created row. The unique
    /// constraint on `channel_id` enforces the one-tier-per-channel
    /// invariant.
    pub async fn create(
        pool: &PgPool,
        body: &CreateExcludedChannel,
    ) -> Result<ExcludedChannel, sqlx::Error> {
        let query = format!(
            "INSERT INTO excluded_channels
                (channel_id, channel_name, channel_url, risk_level, reason)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExcludedChannel>(&query)
            .bind(&body.channel_id)
            .bind(&body.channel_name)
            .bind(&body.channel_url)
            .bind(&body.risk_level)
            .bind(&body.reason)
            .fetch_one(pool)
            .await
    }

    /// List the whole registry, most recently registered first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ExcludedChannel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM excluded_channels ORDER BY created_at DESC");
        sqlx::query_as::<_, ExcludedChannel>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch a registry entry by its row id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ExcludedChannel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM excluded_channels WHERE id = $1");
        sqlx::query_as::<_, ExcludedChannel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Patch a registry entry. `None` fields keep their current values.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        body: &UpdateExcludedChannel,
    ) -> Result<Option<ExcludedChannel>, sqlx::Error> {
        let query = format!(
            "UPDATE excluded_channels SET
                channel_name = COALESCE($2, channel_name),
                channel_url = COALESCE($3, channel_url),
                risk_level = COALESCE($4, risk_level),
                reason = COALESCE($5, reason),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExcludedChannel>(&query)
            .bind(id)
            .bind(&body.channel_name)
            .bind(&body.channel_url)
            .bind(&body.risk_level)
            .bind(&body.reason)
            .fetch_optional(pool)
            .await
    }

    /// Remove a registry entry.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM excluded_channels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load the registry as an immutable snapshot for one analysis run.
    pub async fn load_registry(pool: &PgPool) -> Result<ChannelRegistry, sqlx::Error> {
        let rows = Self::list(pool).await?;
        let mut registry = ChannelRegistry::new();
        for row in &rows {
            registry.insert(
                &row.channel_id,
                &row.risk_level,
                row.reason.as_deref().unwrap_or_default(),
            );
        }
        Ok(registry)
    }
}
