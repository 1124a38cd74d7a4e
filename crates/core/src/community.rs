//! Community consensus aggregation over crowd-sourced safety reports.
//!
//! Each report is one community member's outcome after actually producing a
//! short from the title. Reports are scored individually (survival time
//! matters), weighted toward recent submissions, and the aggregate is
//! capped — not reduced — when deletions are reported, so a single bad
//! outcome cannot be averaged away by many good ones.

use serde::Serialize;

use crate::heuristic::round1;
use crate::time::months_between;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Confidence constants
// ---------------------------------------------------------------------------

/// No production-attempted reports exist.
pub const CONFIDENCE_NONE: &str = "none";
/// Fewer than three valid reports.
pub const CONFIDENCE_LOW: &str = "low";
/// At least three valid reports.
pub const CONFIDENCE_MEDIUM: &str = "medium";
/// At least ten valid reports.
pub const CONFIDENCE_HIGH: &str = "high";
/// An administrator report forced the summary.
pub const CONFIDENCE_ADMIN: &str = "admin";

// ---------------------------------------------------------------------------
// Safety level constants
// ---------------------------------------------------------------------------

pub const LEVEL_UNKNOWN: &str = "unknown";
pub const LEVEL_SAFE: &str = "safe";
pub const LEVEL_VERY_SAFE: &str = "very_safe";
/// Deletions reported, but below the caution ratio.
pub const LEVEL_WARNING: &str = "warning";
/// Deletion ratio of at least 0.1.
pub const LEVEL_CAUTION: &str = "caution";
/// Deletion ratio of at least 0.4.
pub const LEVEL_DANGER: &str = "danger";
/// Administrator-verified safe.
pub const LEVEL_ADMIN_VERIFIED: &str = "admin_verified";

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Valid reports needed for `high` confidence.
pub const HIGH_CONFIDENCE_REPORTS: usize = 10;
/// Valid reports needed for `medium` confidence.
pub const MEDIUM_CONFIDENCE_REPORTS: usize = 3;

/// Deletion ratio at which the title is dangerous.
pub const DANGER_DELETION_RATIO: f64 = 0.4;
/// Deletion ratio at which the title calls for caution.
pub const CAUTION_DELETION_RATIO: f64 = 0.1;

/// Score ceiling when the deletion ratio reaches the danger threshold.
pub const DANGER_SCORE_CAP: f64 = 4.0;
/// Score ceiling when the deletion ratio reaches the caution threshold.
pub const CAUTION_SCORE_CAP: f64 = 6.0;
/// Score ceiling when any deletion at all was reported.
pub const WARNING_SCORE_CAP: f64 = 7.0;

/// Scores at or above this (with no deletions) are `very_safe`.
pub const VERY_SAFE_SCORE: f64 = 8.0;

/// Score forced by an administrator report.
pub const ADMIN_FORCED_SCORE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Input / output records
// ---------------------------------------------------------------------------

/// One crowd-sourced safety report, reduced to its scoring signals.
/// Free-text comments live at the persistence layer and never influence
/// the score.
#[derive(Debug, Clone)]
pub struct CommunityReport {
    /// Did the reporter actually produce a short from this title? When
    /// false the report signals "not yet attempted" and contributes
    /// nothing.
    pub shorts_created: bool,
    /// Did the reporter receive a copyright claim?
    pub copyright_issue: bool,
    /// Was the reporter's short removed?
    pub shorts_deleted: bool,
    /// Months the short survived since upload (bucketed 0/1/3/6/12).
    pub months_since_upload: i32,
    /// Administrator reports force the aggregate to 10.
    pub is_admin_rating: bool,
    pub submitted_at: Timestamp,
}

/// Trust-weighted summary of a title's report list. Always a pure function
/// of the current reports; recomputed on every submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommunitySummary {
    /// Weighted average score, 0-10, one decimal.
    pub score: f64,
    /// Count of production-attempted reports (or all reports under an
    /// admin override).
    pub count: usize,
    pub confidence: &'static str,
    pub deletion_count: usize,
    /// Deletions over valid reports, two decimals.
    pub deletion_ratio: f64,
    pub safety_level: &'static str,
}

impl CommunitySummary {
    /// Summary for a title with no usable reports.
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            count: 0,
            confidence: CONFIDENCE_NONE,
            deletion_count: 0,
            deletion_ratio: 0.0,
            safety_level: LEVEL_UNKNOWN,
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score a single report (0-10), or `None` when the reporter never
/// produced a short.
///
/// Base points: claim and removal -> 0; claim without removal -> 3;
/// removal without claim -> 5; neither -> 7. Survival bonus: >= 12 months
/// -> +3, >= 6 -> +2, >= 3 -> +1. Clamped to 10. Administrator reports
/// are always 10.
pub fn single_report_score(report: &CommunityReport) -> Option<u8> {
    if report.is_admin_rating {
        return Some(10);
    }
    if !report.shorts_created {
        return None;
    }

    let base: u8 = match (report.copyright_issue, report.shorts_deleted) {
        (true, true) => 0,
        (true, false) => 3,
        (false, true) => 5,
        (false, false) => 7,
    };

    let bonus: u8 = if report.months_since_upload >= 12 {
        3
    } else if report.months_since_upload >= 6 {
        2
    } else if report.months_since_upload >= 3 {
        1
    } else {
        0
    };

    Some((base + bonus).min(10))
}

/// Weight applied to a report by its age: fresher evidence counts more.
pub fn recency_weight(age_months: f64) -> f64 {
    if age_months < 1.0 {
        1.5
    } else if age_months < 3.0 {
        1.2
    } else if age_months < 6.0 {
        1.0
    } else {
        0.8
    }
}

/// Aggregate a title's full report list into a [`CommunitySummary`].
///
/// An administrator report is an absolute override: score 10, confidence
/// `admin`, nothing else is computed. Otherwise non-attempted reports are
/// discarded, the rest are recency-weighted, and the deletion penalty is
/// applied afterwards as a ceiling.
pub fn aggregate_reports(reports: &[CommunityReport], now: Timestamp) -> CommunitySummary {
    if reports.is_empty() {
        return CommunitySummary::empty();
    }

    if reports.iter().any(|r| r.is_admin_rating) {
        return CommunitySummary {
            score: ADMIN_FORCED_SCORE,
            count: reports.len(),
            confidence: CONFIDENCE_ADMIN,
            deletion_count: 0,
            deletion_ratio: 0.0,
            safety_level: LEVEL_ADMIN_VERIFIED,
        };
    }

    let valid: Vec<&CommunityReport> = reports.iter().filter(|r| r.shorts_created).collect();
    if valid.is_empty() {
        return CommunitySummary::empty();
    }

    let deletion_count = valid.iter().filter(|r| r.shorts_deleted).count();
    let deletion_ratio = deletion_count as f64 / valid.len() as f64;

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for report in &valid {
        let Some(score) = single_report_score(report) else {
            continue;
        };
        let weight = recency_weight(months_between(report.submitted_at, now));
        weighted_sum += f64::from(score) * weight;
        total_weight += weight;
    }

    let mut score = round1(weighted_sum / total_weight);

    // Deletion penalty: a ceiling, not a subtraction. Any reported
    // deletion bounds the score no matter how good the rest looks.
    let safety_level = if deletion_count > 0 {
        if deletion_ratio >= DANGER_DELETION_RATIO {
            score = score.min(DANGER_SCORE_CAP);
            LEVEL_DANGER
        } else if deletion_ratio >= CAUTION_DELETION_RATIO {
            score = score.min(CAUTION_SCORE_CAP);
            LEVEL_CAUTION
        } else {
            score = score.min(WARNING_SCORE_CAP);
            LEVEL_WARNING
        }
    } else if score >= VERY_SAFE_SCORE {
        LEVEL_VERY_SAFE
    } else {
        LEVEL_SAFE
    };

    let confidence = if valid.len() >= HIGH_CONFIDENCE_REPORTS {
        CONFIDENCE_HIGH
    } else if valid.len() >= MEDIUM_CONFIDENCE_REPORTS {
        CONFIDENCE_MEDIUM
    } else {
        CONFIDENCE_LOW
    };

    CommunitySummary {
        score,
        count: valid.len(),
        confidence,
        deletion_count,
        deletion_ratio: round2(deletion_ratio),
        safety_level,
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn report(
        created: bool,
        claim: bool,
        deleted: bool,
        months: i32,
        submitted_months_ago: i64,
    ) -> CommunityReport {
        CommunityReport {
            shorts_created: created,
            copyright_issue: claim,
            shorts_deleted: deleted,
            months_since_upload: months,
            is_admin_rating: false,
            submitted_at: Utc::now() - Duration::days(submitted_months_ago * 30),
        }
    }

    fn admin_report() -> CommunityReport {
        CommunityReport {
            shorts_created: false,
            copyright_issue: false,
            shorts_deleted: false,
            months_since_upload: 0,
            is_admin_rating: true,
            submitted_at: Utc::now(),
        }
    }

    // -- single_report_score --------------------------------------------------

    #[test]
    fn base_score_matrix() {
        assert_eq!(single_report_score(&report(true, true, true, 0, 0)), Some(0));
        assert_eq!(single_report_score(&report(true, true, false, 0, 0)), Some(3));
        assert_eq!(single_report_score(&report(true, false, true, 0, 0)), Some(5));
        assert_eq!(single_report_score(&report(true, false, false, 0, 0)), Some(7));
    }

    #[test]
    fn survival_bonus() {
        assert_eq!(single_report_score(&report(true, false, false, 12, 0)), Some(10));
        assert_eq!(single_report_score(&report(true, false, false, 6, 0)), Some(9));
        assert_eq!(single_report_score(&report(true, false, false, 3, 0)), Some(8));
        assert_eq!(single_report_score(&report(true, false, false, 1, 0)), Some(7));
    }

    #[test]
    fn score_clamps_at_ten() {
        // Base 7 + bonus 3 is exactly 10; nothing can exceed it.
        assert_eq!(single_report_score(&report(true, false, false, 24, 0)), Some(10));
    }

    #[test]
    fn not_produced_is_unscorable() {
        assert_eq!(single_report_score(&report(false, true, true, 12, 0)), None);
    }

    #[test]
    fn admin_report_is_always_ten() {
        assert_eq!(single_report_score(&admin_report()), Some(10));
    }

    // -- recency_weight -------------------------------------------------------

    #[test]
    fn recency_weight_tiers() {
        assert_eq!(recency_weight(0.5), 1.5);
        assert_eq!(recency_weight(2.0), 1.2);
        assert_eq!(recency_weight(5.0), 1.0);
        assert_eq!(recency_weight(6.0), 0.8);
        assert_eq!(recency_weight(24.0), 0.8);
    }

    // -- aggregate_reports ----------------------------------------------------

    #[test]
    fn admin_report_forces_summary() {
        let now = Utc::now();
        // Surround the admin report with terrible community outcomes.
        let reports = vec![
            report(true, true, true, 0, 0),
            admin_report(),
            report(true, true, true, 0, 0),
        ];
        let summary = aggregate_reports(&reports, now);

        assert_eq!(summary.score, 10.0);
        assert_eq!(summary.confidence, CONFIDENCE_ADMIN);
        assert_eq!(summary.safety_level, LEVEL_ADMIN_VERIFIED);
        assert_eq!(summary.deletion_count, 0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn no_reports_is_empty_summary() {
        let summary = aggregate_reports(&[], Utc::now());
        assert_eq!(summary, CommunitySummary::empty());
    }

    #[test]
    fn only_non_attempted_reports_is_empty_summary() {
        let now = Utc::now();
        let reports = vec![report(false, false, false, 0, 0), report(false, false, false, 0, 1)];
        let summary = aggregate_reports(&reports, now);

        assert_eq!(summary.count, 0);
        assert_eq!(summary.score, 0.0);
        assert_eq!(summary.confidence, CONFIDENCE_NONE);
        assert_eq!(summary.safety_level, LEVEL_UNKNOWN);
    }

    #[test]
    fn clean_old_reports_average_to_nine() {
        // Five reports: produced, no claim, no deletion, survived >= 6
        // months, all submitted now. Each scores 7 + 2 = 9; the weighted
        // average is 9.0 and the level very_safe with medium confidence.
        let now = Utc::now();
        let reports: Vec<CommunityReport> =
            (0..5).map(|_| report(true, false, false, 6, 0)).collect();
        let summary = aggregate_reports(&reports, now);

        assert_eq!(summary.score, 9.0);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.safety_level, LEVEL_VERY_SAFE);
        assert_eq!(summary.confidence, CONFIDENCE_MEDIUM);
        assert_eq!(summary.deletion_count, 0);
    }

    #[test]
    fn forty_percent_deletions_cap_at_four() {
        let now = Utc::now();
        let reports = vec![
            report(true, false, false, 12, 0),
            report(true, false, false, 12, 0),
            report(true, false, false, 12, 0),
            report(true, false, true, 12, 0),
            report(true, false, true, 12, 0),
        ];
        let summary = aggregate_reports(&reports, now);

        assert_eq!(summary.deletion_ratio, 0.4);
        assert!(summary.score <= DANGER_SCORE_CAP);
        assert_eq!(summary.safety_level, LEVEL_DANGER);
    }

    #[test]
    fn moderate_deletion_ratio_caps_at_six() {
        let now = Utc::now();
        let mut reports: Vec<CommunityReport> =
            (0..9).map(|_| report(true, false, false, 12, 0)).collect();
        reports.push(report(true, false, true, 12, 0));
        let summary = aggregate_reports(&reports, now);

        // 1 of 10 deleted -> ratio 0.1 -> caution.
        assert_eq!(summary.deletion_ratio, 0.1);
        assert!(summary.score <= CAUTION_SCORE_CAP);
        assert_eq!(summary.safety_level, LEVEL_CAUTION);
    }

    #[test]
    fn rare_deletion_caps_at_seven() {
        let now = Utc::now();
        let mut reports: Vec<CommunityReport> =
            (0..19).map(|_| report(true, false, false, 12, 0)).collect();
        reports.push(report(true, false, true, 12, 0));
        let summary = aggregate_reports(&reports, now);

        // 1 of 20 deleted -> ratio 0.05 -> warning.
        assert_eq!(summary.deletion_ratio, 0.05);
        assert!(summary.score <= WARNING_SCORE_CAP);
        assert_eq!(summary.safety_level, LEVEL_WARNING);
        assert_eq!(summary.confidence, CONFIDENCE_HIGH);
    }

    #[test]
    fn recent_reports_outweigh_stale_ones() {
        let now = Utc::now();
        // One fresh low score (x1.5) against one stale high score (x0.8):
        // (3*1.5 + 10*0.8) / 2.3 = 5.4 — pulled toward the fresh report.
        let reports = vec![
            report(true, true, false, 0, 0),
            report(true, false, false, 12, 8),
        ];
        let summary = aggregate_reports(&reports, now);
        assert_eq!(summary.score, 5.4);
    }

    #[test]
    fn confidence_tiers() {
        let now = Utc::now();
        let low: Vec<CommunityReport> = (0..2).map(|_| report(true, false, false, 3, 0)).collect();
        assert_eq!(aggregate_reports(&low, now).confidence, CONFIDENCE_LOW);

        let medium: Vec<CommunityReport> =
            (0..3).map(|_| report(true, false, false, 3, 0)).collect();
        assert_eq!(aggregate_reports(&medium, now).confidence, CONFIDENCE_MEDIUM);

        let high: Vec<CommunityReport> =
            (0..10).map(|_| report(true, false, false, 3, 0)).collect();
        assert_eq!(aggregate_reports(&high, now).confidence, CONFIDENCE_HIGH);
    }

    #[test]
    fn deletion_cap_holds_for_any_mix_above_threshold() {
        let now = Utc::now();
        for deleted in 2..=5usize {
            let mut reports: Vec<CommunityReport> = (0..5 - deleted)
                .map(|_| report(true, false, false, 12, 0))
                .collect();
            for _ in 0..deleted {
                reports.push(report(true, false, true, 12, 0));
            }
            let summary = aggregate_reports(&reports, now);
            assert!(
                summary.score <= DANGER_SCORE_CAP,
                "score {} with {deleted}/5 deletions",
                summary.score
            );
        }
    }
}
