//! Shorts suitability score (0-100) for a catalog title.
//!
//! A coarse planning heuristic that blends audience reach, critic/user
//! quality, copyright survival evidence, and competition into one number
//! shown alongside the trusted grade. It never overrides the Trust
//! Arbiter — an unrated title stays unrated no matter how high this is.

use chrono::Datelike;

use crate::time::whole_months_since;
use crate::types::Timestamp;

/// Inputs for the suitability heuristic, collected from the catalog row
/// and the latest analysis.
#[derive(Debug, Clone, Default)]
pub struct SuitabilitySignals {
    /// Theatrical audience count, 0 when unknown (typical for dramas).
    pub audience_count: i64,
    /// Quality rating 0-10, 0 when unknown.
    pub rating: f64,
    /// A copyright warning is on record for this title.
    pub copyright_warning: bool,
    /// Publish time of the earliest known short, if any.
    pub first_short_uploaded_at: Option<Timestamp>,
    /// Distinct channels already producing shorts for this title.
    pub competing_channel_count: u32,
    /// Administrator verified the title safe.
    pub is_verified_safe: bool,
    pub release_date: Option<Timestamp>,
}

/// Release year from which the recency bonus applies.
pub const RECENT_RELEASE_YEAR: i32 = 2020;

/// Compute the 0-100 suitability score.
pub fn suitability_score(signals: &SuitabilitySignals, now: Timestamp) -> u8 {
    let mut score: i32 = 0;

    // Popularity (up to 30), from theatrical audience reach.
    score += if signals.audience_count >= 10_000_000 {
        30
    } else if signals.audience_count >= 5_000_000 {
        25
    } else if signals.audience_count >= 3_000_000 {
        20
    } else if signals.audience_count >= 1_000_000 {
        15
    } else if signals.audience_count >= 500_000 {
        10
    } else {
        0
    };

    // Rating stands in for popularity when no audience data exists.
    if signals.audience_count == 0 && signals.rating > 0.0 {
        score += if signals.rating >= 8.5 {
            25
        } else if signals.rating >= 8.0 {
            20
        } else if signals.rating >= 7.5 {
            15
        } else if signals.rating >= 7.0 {
            10
        } else {
            0
        };
    }

    // Quality (up to 20).
    score += if signals.rating >= 9.0 {
        20
    } else if signals.rating >= 8.5 {
        18
    } else if signals.rating >= 8.0 {
        15
    } else if signals.rating >= 7.5 {
        12
    } else if signals.rating >= 7.0 {
        10
    } else if signals.rating >= 6.5 {
        5
    } else {
        0
    };

    // Copyright survival (up to 30). Existing shorts that survived six
    // months or more are the strongest safety evidence; a recorded
    // warning is a hard penalty.
    match signals.first_short_uploaded_at {
        Some(first_upload) if !signals.copyright_warning => {
            let months = whole_months_since(first_upload, now);
            score += if months >= 12 {
                30
            } else if months >= 6 {
                20
            } else if months >= 4 {
                10
            } else if months >= 3 {
                5
            } else {
                0
            };
        }
        Some(_) => score -= 20,
        // No upload evidence at all: conservative small credit.
        None => score += 5,
    }

    // Competition (up to 20): fewer producing channels is better.
    let channels = signals.competing_channel_count;
    score += if channels == 0 {
        20
    } else if channels < 5 {
        18
    } else if channels < 10 {
        15
    } else if channels < 30 {
        12
    } else if channels < 50 {
        8
    } else if channels < 100 {
        5
    } else {
        0
    };

    if signals.is_verified_safe {
        score += 10;
    }

    if let Some(release) = signals.release_date {
        if release.year() >= RECENT_RELEASE_YEAR {
            score += 5;
        }
    }

    score.clamp(0, 100) as u8
}
