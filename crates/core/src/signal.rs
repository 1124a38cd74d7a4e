//! Signal collection over a batch of discovered video postings.
//!
//! One analysis run takes the candidate postings returned by the video
//! platform for a title, buckets them by age, and classifies their channels
//! against the excluded-channel registry. Postings are ephemeral — only the
//! aggregate produced here is ever persisted.

use std::collections::HashMap;

use serde::Serialize;

use crate::channel_risk::{ChannelRegistry, RISK_FORBIDDEN, RISK_WARNING};
use crate::time::months_between;
use crate::types::Timestamp;

/// Page size of the video-platform search collaborator; one analysis run
/// samples at most this many postings.
pub const SEARCH_PAGE_SIZE: usize = 50;

/// Postings at least this many months old count as "old" (survived long
/// enough to be a safety signal).
pub const OLD_AGE_MONTHS: f64 = 6.0;

/// Postings at least this many months old (but younger than
/// [`OLD_AGE_MONTHS`]) count as "medium".
pub const MEDIUM_AGE_MONTHS: f64 = 3.0;

/// One discovered video posting for a title. Never stored individually.
#[derive(Debug, Clone)]
pub struct CandidatePosting {
    pub channel_id: String,
    pub channel_name: String,
    pub published_at: Timestamp,
}

/// A channel from the posting batch that matched a registry tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedChannel {
    pub channel_id: String,
    pub channel_name: String,
    pub reason: String,
}

/// Aggregate signals from one posting batch.
#[derive(Debug, Clone)]
pub struct PostingAggregate {
    /// Number of postings actually sampled (the batch size).
    pub sampled_count: usize,
    /// Postings aged >= 6 months.
    pub old_count: usize,
    /// Postings aged 3-6 months.
    pub medium_count: usize,
    /// Postings aged < 3 months.
    pub recent_count: usize,
    /// Earliest publish timestamp across the whole batch.
    pub earliest_published_at: Option<Timestamp>,
    /// Forbidden-tier channels seen in the batch, de-duplicated by id.
    pub forbidden_channels: Vec<DetectedChannel>,
    /// Warning-tier channels seen in the batch, de-duplicated by id.
    pub warning_channels: Vec<DetectedChannel>,
    /// Publish timestamps grouped by channel id.
    pub channel_postings: HashMap<String, Vec<Timestamp>>,
    /// Number of distinct channels in the batch.
    pub unique_channel_count: usize,
}

/// Partition a posting batch by age bucket and registry risk tier.
///
/// Risk-tagged postings still count toward the age buckets — registry
/// classification flags the channel, it does not exclude the posting from
/// the aggregate.
pub fn collect_signals(
    postings: &[CandidatePosting],
    registry: &ChannelRegistry,
    now: Timestamp,
) -> PostingAggregate {
    let mut old_count = 0usize;
    let mut medium_count = 0usize;
    let mut recent_count = 0usize;
    let mut earliest: Option<Timestamp> = None;

    let mut forbidden_channels: Vec<DetectedChannel> = Vec::new();
    let mut warning_channels: Vec<DetectedChannel> = Vec::new();
    let mut channel_postings: HashMap<String, Vec<Timestamp>> = HashMap::new();

    for posting in postings {
        let age_months = months_between(posting.published_at, now);

        if earliest.map_or(true, |e| posting.published_at < e) {
            earliest = Some(posting.published_at);
        }

        if age_months >= OLD_AGE_MONTHS {
            old_count += 1;
        } else if age_months >= MEDIUM_AGE_MONTHS {
            medium_count += 1;
        } else {
            recent_count += 1;
        }

        match registry.risk_of(&posting.channel_id) {
            Some(RISK_FORBIDDEN) => {
                push_detected(&mut forbidden_channels, posting, registry);
            }
            Some(RISK_WARNING) => {
                push_detected(&mut warning_channels, posting, registry);
            }
            _ => {}
        }

        channel_postings
            .entry(posting.channel_id.clone())
            .or_default()
            .push(posting.published_at);
    }

    let unique_channel_count = channel_postings.len();

    PostingAggregate {
        sampled_count: postings.len(),
        old_count,
        medium_count,
        recent_count,
        earliest_published_at: earliest,
        forbidden_channels,
        warning_channels,
        channel_postings,
        unique_channel_count,
    }
}

/// Append a detected channel unless the id is already recorded.
fn push_detected(
    detected: &mut Vec<DetectedChannel>,
    posting: &CandidatePosting,
    registry: &ChannelRegistry,
) {
    if detected.iter().any(|c| c.channel_id == posting.channel_id) {
        return;
    }
    detected.push(DetectedChannel {
        channel_id: posting.channel_id.clone(),
        channel_name: posting.channel_name.clone(),
        reason: registry
            .reason_of(&posting.channel_id)
            .unwrap_or_default()
            .to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn posting(channel_id: &str, months_ago: i64) -> CandidatePosting {
        CandidatePosting {
            channel_id: channel_id.to_string(),
            channel_name: format!("{channel_id} name"),
            published_at: Utc::now() - Duration::days(months_ago * 30),
        }
    }

    #[test]
    fn age_buckets() {
        let now = Utc::now();
        let postings = vec![
            posting("a", 7),
            posting("a", 8),
            posting("b", 4),
            posting("c", 1),
            posting("d", 0),
        ];
        let agg = collect_signals(&postings, &ChannelRegistry::new(), now);

        assert_eq!(agg.sampled_count, 5);
        assert_eq!(agg.old_count, 2);
        assert_eq!(agg.medium_count, 1);
        assert_eq!(agg.recent_count, 2);
        assert_eq!(agg.unique_channel_count, 4);
    }

    #[test]
    fn earliest_tracks_minimum_over_all_postings() {
        let now = Utc::now();
        let oldest = now - Duration::days(8 * 30);
        let postings = vec![posting("a", 2), posting("b", 8), posting("c", 5)];
        let agg = collect_signals(&postings, &ChannelRegistry::new(), now);

        let earliest = agg.earliest_published_at.unwrap();
        assert!((earliest - oldest).num_seconds().abs() < 5);
    }

    #[test]
    fn risk_detection_deduplicates_by_channel() {
        let now = Utc::now();
        let mut reg = ChannelRegistry::new();
        reg.insert("official", RISK_FORBIDDEN, "studio channel");
        reg.insert("clips", RISK_WARNING, "mixed catalog");

        let postings = vec![
            posting("official", 7),
            posting("official", 2),
            posting("clips", 1),
            posting("indie", 7),
        ];
        let agg = collect_signals(&postings, &reg, now);

        assert_eq!(agg.forbidden_channels.len(), 1);
        assert_eq!(agg.forbidden_channels[0].channel_id, "official");
        assert_eq!(agg.forbidden_channels[0].reason, "studio channel");
        assert_eq!(agg.warning_channels.len(), 1);
        assert_eq!(agg.warning_channels[0].channel_id, "clips");
    }

    #[test]
    fn risk_tagged_postings_still_count_in_age_buckets() {
        let now = Utc::now();
        let mut reg = ChannelRegistry::new();
        reg.insert("official", RISK_FORBIDDEN, "studio channel");

        let postings = vec![posting("official", 7), posting("indie", 7)];
        let agg = collect_signals(&postings, &reg, now);

        assert_eq!(agg.old_count, 2);
        assert_eq!(agg.sampled_count, 2);
    }

    #[test]
    fn empty_batch_produces_empty_aggregate() {
        let agg = collect_signals(&[], &ChannelRegistry::new(), Utc::now());
        assert_eq!(agg.sampled_count, 0);
        assert_eq!(agg.old_count, 0);
        assert!(agg.earliest_published_at.is_none());
        assert!(agg.forbidden_channels.is_empty());
        assert_eq!(agg.unique_channel_count, 0);
    }
}
