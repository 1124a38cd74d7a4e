//! Automated analysis snapshot models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use shortscout_core::heuristic::{AnalysisOutcome, AutomatedAnalysis};
use shortscout_core::types::{DbId, Timestamp};

/// A row from the `analysis_snapshots` table: the result of the most
/// recent automated analysis run for a title. One row per title,
/// overwritten on every re-run.
///
/// Score and grade columns are null for no-videos-found runs — that
/// terminal state has no numeric grade by design.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnalysisSnapshot {
    pub id: DbId,
    pub title_id: DbId,
    pub no_videos_found: bool,
    pub total_postings: i64,
    pub sampled_count: i32,
    pub old_count: i32,
    pub medium_count: i32,
    pub recent_count: i32,
    pub earliest_published_at: Option<Timestamp>,
    pub unique_channel_count: i32,
    pub is_forbidden: bool,
    /// Detected forbidden channels as a JSON array of
    /// `{channel_id, channel_name, reason}` objects.
    pub forbidden_channels: serde_json::Value,
    pub has_warning_channel: bool,
    /// Detected warning channels, same shape as `forbidden_channels`.
    pub warning_channels: serde_json::Value,
    pub safety_score: Option<i32>,
    pub competition_score: Option<i32>,
    pub total_score: Option<f64>,
    pub grade: Option<String>,
    /// Search query sent to the video platform for this run.
    pub search_query: String,
    pub analyzed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a snapshot after an analysis run.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertAnalysisSnapshot {
    pub no_videos_found: bool,
    pub total_postings: i64,
    pub sampled_count: i32,
    pub old_count: i32,
    pub medium_count: i32,
    pub recent_count: i32,
    pub earliest_published_at: Option<Timestamp>,
    pub unique_channel_count: i32,
    pub is_forbidden: bool,
    pub forbidden_channels: serde_json::Value,
    pub has_warning_channel: bool,
    pub warning_channels: serde_json::Value,
    pub safety_score: Option<i32>,
    pub competition_score: Option<i32>,
    pub total_score: Option<f64>,
    pub grade: Option<String>,
    pub search_query: String,
    pub analyzed_at: Timestamp,
}

impl UpsertAnalysisSnapshot {
    /// Build a snapshot DTO from an engine outcome.
    pub fn from_outcome(outcome: &AnalysisOutcome, search_query: &str, now: Timestamp) -> Self {
        match outcome {
            AnalysisOutcome::NoVideosFound => Self {
                no_videos_found: true,
                total_postings: 0,
                sampled_count: 0,
                old_count: 0,
                medium_count: 0,
                recent_count: 0,
                earliest_published_at: None,
                unique_channel_count: 0,
                is_forbidden: false,
                forbidden_channels: serde_json::Value::Array(Vec::new()),
                has_warning_channel: false,
                warning_channels: serde_json::Value::Array(Vec::new()),
                safety_score: None,
                competition_score: None,
                total_score: None,
                grade: None,
                search_query: search_query.to_string(),
                analyzed_at: now,
            },
            AnalysisOutcome::Analyzed(analysis) => Self::from_analysis(analysis, search_query),
        }
    }

    fn from_analysis(analysis: &AutomatedAnalysis, search_query: &str) -> Self {
        Self {
            no_videos_found: false,
            total_postings: analysis.total_postings as i64,
            sampled_count: analysis.sampled_count as i32,
            old_count: analysis.old_count as i32,
            medium_count: analysis.medium_count as i32,
            recent_count: analysis.recent_count as i32,
            earliest_published_at: analysis.earliest_published_at,
            unique_channel_count: analysis.unique_channel_count as i32,
            is_forbidden: analysis.is_forbidden,
            forbidden_channels: serde_json::to_value(&analysis.forbidden_channels)
                .unwrap_or_else(|_| serde_json::Value::Array(Vec::new())),
            has_warning_channel: analysis.has_warning_channel,
            warning_channels: serde_json::to_value(&analysis.warning_channels)
                .unwrap_or_else(|_| serde_json::Value::Array(Vec::new())),
            safety_score: Some(i32::from(analysis.safety_score)),
            competition_score: Some(i32::from(analysis.competition_score)),
            total_score: Some(analysis.total_score),
            grade: Some(analysis.recommendation.grade.to_string()),
            search_query: search_query.to_string(),
            analyzed_at: analysis.analyzed_at,
        }
    }
}
