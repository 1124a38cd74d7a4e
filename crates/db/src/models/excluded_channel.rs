//! Excluded-channel registry models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shortscout_core::types::{DbId, Timestamp};

/// A row from the `excluded_channels` table. `channel_id` is unique: a
/// channel lives in exactly one risk tier at a time.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExcludedChannel {
    pub id: DbId,
    /// Platform channel identifier.
    pub channel_id: String,
    pub channel_name: String,
    pub channel_url: Option<String>,
    /// `forbidden` or `warning`.
    pub risk_level: String,
    pub reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a channel.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExcludedChannel {
    pub channel_id: String,
    pub channel_name: String,
    pub channel_url: Option<String>,
    pub risk_level: String,
    pub reason: Option<String>,
}

/// DTO for updating a registry entry. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateExcludedChannel {
    pub channel_name: Option<String>,
    pub channel_url: Option<String>,
    pub risk_level: Option<String>,
    pub reason: Option<String>,
}
