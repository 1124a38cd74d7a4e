//! Trust-ordered grade resolution for a title.
//!
//! Precedence is strict and terminal: administrator flags beat community
//! consensus, which beats the automated heuristic. The heuristic-only
//! state is deliberately rendered as a distinct, lower-trust category
//! (grade `?`) and never with the visual weight of a backed grade.

use serde::Serialize;

use crate::community::CommunitySummary;
use crate::grade::{GRADE_A, GRADE_B, GRADE_C, GRADE_S, GRADE_UNRATED};

/// Community reports needed before the community score drives the grade.
pub const MIN_COMMUNITY_SAMPLE: usize = 3;

/// The grade shown for a title, with its provenance label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableGrade {
    pub grade: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
    pub description: String,
}

/// Resolve the displayed grade for a title. First applicable rule wins:
///
/// 1. `admin_recommended` -> S, admin-certified.
/// 2. `is_verified_safe` -> A, admin-verified.
/// 3. At least [`MIN_COMMUNITY_SAMPLE`] community reports -> grade from
///    the community score.
/// 4. Otherwise `?`: the automated score is reference only.
///
/// Never fails; with no data at all this returns the unrated state.
pub fn resolve_grade(
    admin_recommended: bool,
    is_verified_safe: bool,
    community: &CommunitySummary,
    automated_score: Option<f64>,
) -> RenderableGrade {
    if admin_recommended {
        return RenderableGrade {
            grade: GRADE_S,
            emoji: "👑",
            label: "admin-certified",
            description: "Verified safe by an administrator's own production".to_string(),
        };
    }

    if is_verified_safe {
        return RenderableGrade {
            grade: GRADE_A,
            emoji: "✓",
            label: "admin-verified",
            description: "Confirmed safe by an administrator".to_string(),
        };
    }

    if community.count >= MIN_COMMUNITY_SAMPLE {
        let description = format!(
            "Community safety {:.1}/10 ({} reports)",
            community.score, community.count
        );
        let (grade, emoji, label) = if community.score >= 8.0 {
            (GRADE_S, "🛡️", "community-verified")
        } else if community.score >= 7.0 {
            (GRADE_A, "👍", "community-safe")
        } else if community.score >= 5.0 {
            (GRADE_B, "⚠️", "needs caution")
        } else {
            (GRADE_C, "❌", "risky")
        };
        return RenderableGrade {
            grade,
            emoji,
            label,
            description,
        };
    }

    RenderableGrade {
        grade: GRADE_UNRATED,
        emoji: "🤖",
        label: "automated reference",
        description: format!(
            "Automated score {:.1} is for reference only. Community validation is required before production.",
            automated_score.unwrap_or(0.0)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::community::{CONFIDENCE_MEDIUM, LEVEL_SAFE};

    fn community(score: f64, count: usize) -> CommunitySummary {
        CommunitySummary {
            score,
            count,
            confidence: CONFIDENCE_MEDIUM,
            deletion_count: 0,
            deletion_ratio: 0.0,
            safety_level: LEVEL_SAFE,
        }
    }

    #[test]
    fn admin_recommended_beats_everything() {
        let grade = resolve_grade(true, true, &community(1.0, 50), Some(9.9));
        assert_eq!(grade.grade, GRADE_S);
        assert_eq!(grade.label, "admin-certified");
    }

    #[test]
    fn verified_safe_beats_community() {
        let grade = resolve_grade(false, true, &community(2.0, 50), Some(9.9));
        assert_eq!(grade.grade, GRADE_A);
        assert_eq!(grade.label, "admin-verified");
    }

    #[test]
    fn community_grade_ladder() {
        assert_eq!(resolve_grade(false, false, &community(8.0, 3), None).grade, GRADE_S);
        assert_eq!(resolve_grade(false, false, &community(7.0, 3), None).grade, GRADE_A);
        assert_eq!(resolve_grade(false, false, &community(5.0, 3), None).grade, GRADE_B);
        assert_eq!(resolve_grade(false, false, &community(4.9, 3), None).grade, GRADE_C);
    }

    #[test]
    fn community_description_carries_score_and_count() {
        let grade = resolve_grade(false, false, &community(7.5, 4), None);
        assert!(grade.description.contains("7.5"));
        assert!(grade.description.contains("4 reports"));
    }

    #[test]
    fn undersampled_community_falls_back_to_unrated() {
        let grade = resolve_grade(false, false, &community(9.5, 2), Some(6.4));
        assert_eq!(grade.grade, GRADE_UNRATED);
        assert!(grade.description.contains("6.4"));
        assert!(grade.description.contains("reference only"));
    }

    #[test]
    fn no_data_at_all_is_unrated_with_zero_score() {
        let grade = resolve_grade(false, false, &CommunitySummary::empty(), None);
        assert_eq!(grade.grade, GRADE_UNRATED);
        assert!(grade.description.contains("0.0"));
    }
}
