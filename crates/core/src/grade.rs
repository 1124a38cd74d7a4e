//! Recommendation grade constants and the automated grade table.

use serde::Serialize;

/// Safe and low-competition; produce it.
pub const GRADE_S: &str = "S";
/// Good pick.
pub const GRADE_A: &str = "A";
/// Decent pick.
pub const GRADE_B: &str = "B";
/// Choose carefully.
pub const GRADE_C: &str = "C";
/// Risky.
pub const GRADE_D: &str = "D";
/// Look elsewhere.
pub const GRADE_F: &str = "F";
/// Not enough data for a trusted grade; automated score is reference only.
pub const GRADE_UNRATED: &str = "?";

/// A grade with its fixed emoji/description pair, as shown to creators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub grade: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

/// Map an automated combined score (plus its components) to a grade.
///
/// First match wins:
/// - S: combined >= 9, or safety >= 8 and competition >= 8 together
/// - A: combined >= 8
/// - B: combined >= 7
/// - C: combined >= 6
/// - D: combined >= 5
/// - F: everything else
pub fn recommendation_for(combined: f64, safety: u8, competition: u8) -> Recommendation {
    if combined >= 9.0 || (safety >= 8 && competition >= 8) {
        Recommendation {
            grade: GRADE_S,
            emoji: "🌟",
            description: "Safe with low competition",
        }
    } else if combined >= 8.0 {
        Recommendation {
            grade: GRADE_A,
            emoji: "✨",
            description: "A good title to produce",
        }
    } else if combined >= 7.0 {
        Recommendation {
            grade: GRADE_B,
            emoji: "👍",
            description: "A reasonable choice",
        }
    } else if combined >= 6.0 {
        Recommendation {
            grade: GRADE_C,
            emoji: "🤔",
            description: "Choose carefully",
        }
    } else if combined >= 5.0 {
        Recommendation {
            grade: GRADE_D,
            emoji: "⚠️",
            description: "Carries real risk",
        }
    } else {
        Recommendation {
            grade: GRADE_F,
            emoji: "❌",
            description: "Look for another title",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_combined_is_s() {
        assert_eq!(recommendation_for(9.0, 7, 7).grade, GRADE_S);
        assert_eq!(recommendation_for(9.4, 0, 0).grade, GRADE_S);
    }

    #[test]
    fn balanced_high_components_are_s() {
        // Combined below 9 but both components at 8 still earn S.
        assert_eq!(recommendation_for(8.0, 8, 8).grade, GRADE_S);
    }

    #[test]
    fn grade_ladder() {
        assert_eq!(recommendation_for(8.5, 7, 7).grade, GRADE_A);
        assert_eq!(recommendation_for(7.2, 6, 6).grade, GRADE_B);
        assert_eq!(recommendation_for(6.0, 5, 5).grade, GRADE_C);
        assert_eq!(recommendation_for(5.9, 5, 5).grade, GRADE_D);
        assert_eq!(recommendation_for(4.9, 4, 4).grade, GRADE_F);
    }

    #[test]
    fn every_grade_has_emoji_and_description() {
        for combined in [9.5, 8.5, 7.5, 6.5, 5.5, 1.0] {
            let rec = recommendation_for(combined, 5, 5);
            assert!(!rec.emoji.is_empty());
            assert!(!rec.description.is_empty());
        }
    }
}
