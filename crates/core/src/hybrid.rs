//! Blending of automated and community scores for presentation.
//!
//! When both signals exist the community outweighs automation 60/40; a
//! lone signal is passed through with its own confidence.

use serde::Serialize;

use crate::community::CommunitySummary;
use crate::heuristic::round1;

/// Weight of the automated score in a hybrid blend.
pub const AUTO_WEIGHT: f64 = 0.4;

/// Weight of the community score in a hybrid blend.
pub const COMMUNITY_WEIGHT: f64 = 0.6;

/// Only the automated analysis contributed.
pub const SOURCE_AUTO: &str = "auto";
/// Only the community summary contributed.
pub const SOURCE_COMMUNITY: &str = "community";
/// Both signals contributed.
pub const SOURCE_HYBRID: &str = "hybrid";

/// A presentation score with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HybridScore {
    pub score: f64,
    pub source: &'static str,
    pub confidence: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_score: Option<f64>,
}

/// Blend whatever scores exist into one presentation score.
///
/// A community summary with zero valid reports counts as absent. Returns
/// `None` when neither signal exists.
pub fn combine_scores(
    auto: Option<f64>,
    community: Option<&CommunitySummary>,
) -> Option<HybridScore> {
    let community = community.filter(|summary| summary.count > 0);

    match (auto, community) {
        (None, None) => None,
        (Some(auto_score), None) => Some(HybridScore {
            score: auto_score,
            source: SOURCE_AUTO,
            confidence: "medium",
            auto_score: None,
            community_score: None,
        }),
        (None, Some(summary)) => Some(HybridScore {
            score: summary.score,
            source: SOURCE_COMMUNITY,
            confidence: summary.confidence,
            auto_score: None,
            community_score: None,
        }),
        (Some(auto_score), Some(summary)) => Some(HybridScore {
            score: round1(auto_score * AUTO_WEIGHT + summary.score * COMMUNITY_WEIGHT),
            source: SOURCE_HYBRID,
            confidence: "high",
            auto_score: Some(auto_score),
            community_score: Some(summary.score),
        }),
    }
}
