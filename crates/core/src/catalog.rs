//! Catalog-level filtering and ordering by community safety.

use std::cmp::Ordering;

use crate::arbiter::MIN_COMMUNITY_SAMPLE;
use crate::community::CommunitySummary;

/// Default minimum community score for the "safe titles" listing filter.
pub const DEFAULT_SAFE_MIN_SCORE: f64 = 6.0;

/// A title qualifies for the safe listing only when enough members have
/// reported and the aggregate clears the bar.
pub fn is_listable_safe(summary: &CommunitySummary, min_score: f64) -> bool {
    summary.count >= MIN_COMMUNITY_SAMPLE && summary.score >= min_score
}

/// Order items safest-first: community score descending, then sample
/// count descending (better-evidenced titles win ties).
pub fn sort_by_safety<T>(items: &mut [T], summary_of: impl Fn(&T) -> &CommunitySummary) {
    items.sort_by(|a, b| {
        let sa = summary_of(a);
        let sb = summary_of(b);
        match sb.score.total_cmp(&sa.score) {
            Ordering::Equal => sb.count.cmp(&sa.count),
            other => other,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::{CONFIDENCE_LOW, CONFIDENCE_MEDIUM, LEVEL_SAFE};

    fn summary(score: f64, count: usize) -> CommunitySummary {
        CommunitySummary {
            score,
            count,
            confidence: if count >= 3 { CONFIDENCE_MEDIUM } else { CONFIDENCE_LOW },
            deletion_count: 0,
            deletion_ratio: 0.0,
            safety_level: LEVEL_SAFE,
        }
    }

    #[test]
    fn safe_listing_needs_sample_and_score() {
        assert!(is_listable_safe(&summary(7.0, 3), DEFAULT_SAFE_MIN_SCORE));
        assert!(!is_listable_safe(&summary(9.0, 2), DEFAULT_SAFE_MIN_SCORE));
        assert!(!is_listable_safe(&summary(5.9, 10), DEFAULT_SAFE_MIN_SCORE));
    }

    #[test]
    fn sort_orders_by_score_then_count() {
        let mut items = vec![
            ("low", summary(5.0, 10)),
            ("high_few", summary(8.0, 3)),
            ("high_many", summary(8.0, 9)),
        ];
        sort_by_safety(&mut items, |item| &item.1);
        let order: Vec<&str> = items.iter().map(|i| i.0).collect();
        assert_eq!(order, vec!["high_many", "high_few", "low"]);
    }
}
