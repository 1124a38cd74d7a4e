//! Automated heuristic scoring over a posting aggregate.
//!
//! Two independent 0-10 scores: *safety* favors batches dominated by old,
//! surviving postings; *competitiveness* favors titles with few postings
//! overall. Their weighted blend plus a letter grade forms the automated
//! analysis snapshot cached on a title.

use serde::Serialize;

use crate::grade::{recommendation_for, Recommendation};
use crate::signal::{DetectedChannel, PostingAggregate};
use crate::types::Timestamp;

/// Weight of the safety score in the combined score.
pub const SAFETY_WEIGHT: f64 = 0.6;

/// Weight of the competitiveness score in the combined score.
pub const COMPETITION_WEIGHT: f64 = 0.4;

/* --------------------------------------------------------------------------
Score functions
-------------------------------------------------------------------------- */

/// Safety score (0-10) from age-bucket counts.
///
/// Base points come from the share of postings aged >= 6 months
/// (>=0.8 -> 7, >=0.6 -> 6, >=0.4 -> 5, >=0.2 -> 4, else 3); a bonus from
/// the share aged >= 3 months (>=0.9 -> +3, >=0.7 -> +2, >=0.5 -> +1)
/// is added on top, clamped to 10.
///
/// Returns 0 when the batch is empty. Callers must pair that with the
/// no-videos-found terminal state rather than displaying it as a real 0
/// (see [`analyze`]).
pub fn safety_score(old_count: usize, medium_count: usize, sampled_count: usize) -> u8 {
    if sampled_count == 0 {
        return 0;
    }

    let old_ratio = old_count as f64 / sampled_count as f64;
    let medium_plus_ratio = (old_count + medium_count) as f64 / sampled_count as f64;

    let mut score: u8 = if old_ratio >= 0.8 {
        7
    } else if old_ratio >= 0.6 {
        6
    } else if old_ratio >= 0.4 {
        5
    } else if old_ratio >= 0.2 {
        4
    } else {
        3
    };

    if medium_plus_ratio >= 0.9 {
        score += 3;
    } else if medium_plus_ratio >= 0.7 {
        score += 2;
    } else if medium_plus_ratio >= 0.5 {
        score += 1;
    }

    score.min(10)
}

/// Competitiveness score (0-10): the fewer postings exist platform-wide,
/// the less saturated the title. Monotonically non-increasing in
/// `total_postings`.
pub fn competition_score(total_postings: u64) -> u8 {
    if total_postings == 0 {
        10
    } else if total_postings < 10 {
        9
    } else if total_postings < 30 {
        8
    } else if total_postings < 50 {
        7
    } else if total_postings < 100 {
        6
    } else if total_postings < 200 {
        5
    } else if total_postings < 500 {
        4
    } else if total_postings < 1000 {
        2
    } else {
        0
    }
}

/// Weighted blend of safety and competitiveness, rounded to one decimal.
pub fn combined_score(safety: u8, competition: u8) -> f64 {
    round1(f64::from(safety) * SAFETY_WEIGHT + f64::from(competition) * COMPETITION_WEIGHT)
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/* --------------------------------------------------------------------------
Analysis
-------------------------------------------------------------------------- */

/// Result of one automated analysis run. Cached on the title and
/// overwritten by the next run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AutomatedAnalysis {
    /// Platform-reported total posting count (may exceed the sampled batch).
    pub total_postings: u64,
    /// Number of postings actually sampled.
    pub sampled_count: usize,
    pub old_count: usize,
    pub medium_count: usize,
    pub recent_count: usize,
    pub earliest_published_at: Option<Timestamp>,
    pub unique_channel_count: usize,
    /// A forbidden-tier channel was detected; blocking warning regardless
    /// of the numeric grade.
    pub is_forbidden: bool,
    pub forbidden_channels: Vec<DetectedChannel>,
    /// A warning-tier channel was detected; non-blocking advisory.
    pub has_warning_channel: bool,
    pub warning_channels: Vec<DetectedChannel>,
    pub safety_score: u8,
    pub competition_score: u8,
    /// `safety * 0.6 + competitiveness * 0.4`, one decimal.
    pub total_score: f64,
    pub recommendation: Recommendation,
    pub analyzed_at: Timestamp,
}

/// Outcome of an analysis run.
///
/// An empty sampled batch is a distinct terminal state, not a score of
/// zero: with no postings the engine cannot evaluate risk at all, and
/// downstream must surface "cannot evaluate" instead of a numeric grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnalysisOutcome {
    NoVideosFound,
    Analyzed(AutomatedAnalysis),
}

/// Score a posting aggregate.
///
/// Pure: the same aggregate, total count, and `now` produce an identical
/// analysis.
pub fn analyze(aggregate: &PostingAggregate, total_postings: u64, now: Timestamp) -> AnalysisOutcome {
    if aggregate.sampled_count == 0 {
        return AnalysisOutcome::NoVideosFound;
    }

    let safety = safety_score(
        aggregate.old_count,
        aggregate.medium_count,
        aggregate.sampled_count,
    );
    let competition = competition_score(total_postings);
    let total = combined_score(safety, competition);

    AnalysisOutcome::Analyzed(AutomatedAnalysis {
        total_postings,
        sampled_count: aggregate.sampled_count,
        old_count: aggregate.old_count,
        medium_count: aggregate.medium_count,
        recent_count: aggregate.recent_count,
        earliest_published_at: aggregate.earliest_published_at,
        unique_channel_count: aggregate.unique_channel_count,
        is_forbidden: !aggregate.forbidden_channels.is_empty(),
        forbidden_channels: aggregate.forbidden_channels.clone(),
        has_warning_channel: !aggregate.warning_channels.is_empty(),
        warning_channels: aggregate.warning_channels.clone(),
        safety_score: safety,
        competition_score: competition,
        total_score: total,
        recommendation: recommendation_for(total, safety, competition),
        analyzed_at: now,
    })
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel_risk::{ChannelRegistry, RISK_FORBIDDEN};
    use crate::grade::GRADE_A;
    use crate::signal::{collect_signals, CandidatePosting};
    use chrono::{Duration, Utc};

    // -- safety_score ---------------------------------------------------------

    #[test]
    fn safety_base_points_from_old_ratio() {
        assert_eq!(safety_score(0, 0, 10), 3); // 0% old, 0% medium+
        assert_eq!(safety_score(2, 0, 10), 4); // 20%
        assert_eq!(safety_score(4, 0, 10), 5); // 40%
        assert_eq!(safety_score(6, 0, 10), 7); // 60% old, 60% medium+ -> 6+1
        assert_eq!(safety_score(8, 0, 10), 9); // 80% old, 80% medium+ -> 7+2
    }

    #[test]
    fn safety_bonus_from_medium_plus_ratio() {
        // 40% old + 50% medium = 90% aged three months or more.
        assert_eq!(safety_score(4, 5, 10), 8); // 5 + 3
        // 20% old + 50% medium = 70%.
        assert_eq!(safety_score(2, 5, 10), 6); // 4 + 2
        // 20% old + 30% medium = 50%.
        assert_eq!(safety_score(2, 3, 10), 5); // 4 + 1
    }

    #[test]
    fn safety_clamps_at_ten() {
        assert_eq!(safety_score(10, 0, 10), 10); // 7 + 3 = 10
        assert_eq!(safety_score(9, 1, 10), 10);
    }

    #[test]
    fn safety_zero_batch_is_zero() {
        assert_eq!(safety_score(0, 0, 0), 0);
    }

    // -- competition_score ----------------------------------------------------

    #[test]
    fn competition_step_function() {
        assert_eq!(competition_score(0), 10);
        assert_eq!(competition_score(9), 9);
        assert_eq!(competition_score(10), 8);
        assert_eq!(competition_score(29), 8);
        assert_eq!(competition_score(30), 7);
        assert_eq!(competition_score(50), 6);
        assert_eq!(competition_score(100), 5);
        assert_eq!(competition_score(200), 4);
        assert_eq!(competition_score(500), 2);
        assert_eq!(competition_score(1000), 0);
    }

    #[test]
    fn competition_is_monotonically_non_increasing() {
        let mut previous = competition_score(0);
        for total in 1..1200u64 {
            let current = competition_score(total);
            assert!(
                current <= previous,
                "competition_score({total}) = {current} > previous {previous}"
            );
            previous = current;
        }
    }

    // -- combined_score -------------------------------------------------------

    #[test]
    fn combined_is_weighted_blend_for_all_pairs() {
        for safety in 0..=10u8 {
            for competition in 0..=10u8 {
                let expected =
                    ((f64::from(safety) * 0.6 + f64::from(competition) * 0.4) * 10.0).round() / 10.0;
                assert_eq!(combined_score(safety, competition), expected);
            }
        }
    }

    // -- analyze --------------------------------------------------------------

    fn posting(channel_id: &str, months_ago: i64) -> CandidatePosting {
        CandidatePosting {
            channel_id: channel_id.to_string(),
            channel_name: channel_id.to_string(),
            published_at: Utc::now() - Duration::days(months_ago * 30),
        }
    }

    #[test]
    fn empty_batch_is_no_videos_found() {
        let now = Utc::now();
        let agg = collect_signals(&[], &ChannelRegistry::new(), now);
        assert_eq!(analyze(&agg, 0, now), AnalysisOutcome::NoVideosFound);
    }

    #[test]
    fn scenario_ten_postings_mostly_old() {
        // 8 postings aged 7 months, 2 aged 1 month, platform total 10:
        // old ratio 0.8 -> base 7; medium+ ratio 0.8 -> +2; safety 9.
        // competitiveness for total 10 -> 8. Combined 8.6 -> grade A.
        let now = Utc::now();
        let mut postings = Vec::new();
        for i in 0..8 {
            postings.push(posting(&format!("ch{i}"), 7));
        }
        postings.push(posting("ch8", 1));
        postings.push(posting("ch9", 1));

        let agg = collect_signals(&postings, &ChannelRegistry::new(), now);
        let analysis = match analyze(&agg, 10, now) {
            AnalysisOutcome::Analyzed(a) => a,
            AnalysisOutcome::NoVideosFound => panic!("expected analysis"),
        };

        assert_eq!(analysis.safety_score, 9);
        assert_eq!(analysis.competition_score, 8);
        assert_eq!(analysis.total_score, 8.6);
        assert_eq!(analysis.recommendation.grade, GRADE_A);
        assert!(!analysis.is_forbidden);
    }

    #[test]
    fn forbidden_detection_is_flagged_independent_of_score() {
        let now = Utc::now();
        let mut reg = ChannelRegistry::new();
        reg.insert("official", RISK_FORBIDDEN, "studio channel");

        let mut postings = Vec::new();
        for i in 0..9 {
            postings.push(posting(&format!("ch{i}"), 8));
        }
        postings.push(posting("official", 8));

        let agg = collect_signals(&postings, &reg, now);
        let analysis = match analyze(&agg, 5, now) {
            AnalysisOutcome::Analyzed(a) => a,
            AnalysisOutcome::NoVideosFound => panic!("expected analysis"),
        };

        // High score, but the forbidden flag must still be set.
        assert!(analysis.total_score >= 9.0);
        assert!(analysis.is_forbidden);
        assert_eq!(analysis.forbidden_channels.len(), 1);
    }

    #[test]
    fn analyze_is_idempotent() {
        let now = Utc::now();
        let postings = vec![posting("a", 7), posting("b", 4), posting("c", 1)];
        let agg = collect_signals(&postings, &ChannelRegistry::new(), now);

        let first = analyze(&agg, 42, now);
        let second = analyze(&agg, 42, now);
        assert_eq!(first, second);
    }
}
