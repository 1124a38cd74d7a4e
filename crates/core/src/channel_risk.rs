//! Channel risk tiers and the excluded-channel registry snapshot.
//!
//! Administrators classify video-platform channels that must never be used
//! as source material (`forbidden`) or that call for caution (`warning`).
//! The scoring engine receives the registry as an immutable snapshot built
//! by the caller; it never fetches it itself.

use std::collections::HashMap;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Risk level constants
// ---------------------------------------------------------------------------

/// Channel must never be used as source material.
pub const RISK_FORBIDDEN: &str = "forbidden";

/// Channel may be used, but with caution.
pub const RISK_WARNING: &str = "warning";

/// All valid risk level values.
pub const VALID_RISK_LEVELS: &[&str] = &[RISK_FORBIDDEN, RISK_WARNING];

/// Maximum length for a registry entry's free-text reason.
pub const MAX_REASON_LENGTH: usize = 2_000;

/// Validate that a risk level string is one of the accepted values.
pub fn validate_risk_level(level: &str) -> Result<(), CoreError> {
    if VALID_RISK_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid risk level '{level}'. Must be one of: {}",
            VALID_RISK_LEVELS.join(", ")
        )))
    }
}

/// Validate a registry entry's free-text reason, if present.
pub fn validate_reason(reason: Option<&str>) -> Result<(), CoreError> {
    if let Some(r) = reason {
        if r.len() > MAX_REASON_LENGTH {
            return Err(CoreError::Validation(format!(
                "Reason exceeds maximum length of {MAX_REASON_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Registry snapshot
// ---------------------------------------------------------------------------

/// Read-only snapshot of the excluded-channel registry, keyed by platform
/// channel id. A channel id lives in at most one tier; `forbidden` wins if
/// the same id is inserted into both.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    forbidden: HashMap<String, String>,
    warning: HashMap<String, String>,
}

impl ChannelRegistry {
    /// Empty registry (no channels flagged).
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a registry entry. An id already present in the `forbidden`
    /// tier is never downgraded by a later `warning` insert; inserting
    /// `forbidden` removes any `warning` entry for the same id.
    pub fn insert(&mut self, channel_id: &str, risk_level: &str, reason: &str) {
        match risk_level {
            RISK_FORBIDDEN => {
                self.warning.remove(channel_id);
                self.forbidden
                    .insert(channel_id.to_string(), reason.to_string());
            }
            _ => {
                if !self.forbidden.contains_key(channel_id) {
                    self.warning
                        .insert(channel_id.to_string(), reason.to_string());
                }
            }
        }
    }

    /// Risk level for a channel, if any.
    pub fn risk_of(&self, channel_id: &str) -> Option<&'static str> {
        if self.forbidden.contains_key(channel_id) {
            Some(RISK_FORBIDDEN)
        } else if self.warning.contains_key(channel_id) {
            Some(RISK_WARNING)
        } else {
            None
        }
    }

    /// Registered reason for a channel, if any.
    pub fn reason_of(&self, channel_id: &str) -> Option<&str> {
        self.forbidden
            .get(channel_id)
            .or_else(|| self.warning.get(channel_id))
            .map(String::as_str)
    }

    /// Number of forbidden-tier entries.
    pub fn forbidden_count(&self) -> usize {
        self.forbidden.len()
    }

    /// Number of warning-tier entries.
    pub fn warning_count(&self) -> usize {
        self.warning.len()
    }
}
