//! Qualification rule: decides which bucket a screened resume is filed into.
//!
//! Exactly one rule is active per process, chosen by `QUALIFICATION_RULE`.
//! Default: `PositiveCount` (any "yes" answer qualifies).

use serde::Serialize;

use crate::storage::Bucket;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum QualificationRule {
    /// Qualified when at least one screening answer was "yes".
    #[default]
    PositiveCount,
    /// Qualified when `yes / total >= ratio`. A zero total never qualifies.
    Threshold { ratio: f64 },
}

impl QualificationRule {
    pub fn is_qualified(&self, yes_count: i64, total_possible: i64) -> bool {
        match *self {
            QualificationRule::PositiveCount => yes_count > 0,
            QualificationRule::Threshold { ratio } => {
                if total_possible <= 0 {
                    return false;
                }
                yes_count as f64 / total_possible as f64 >= ratio
            }
        }
    }

    /// Destination bucket for a candidate with this score.
    pub fn destination(&self, yes_count: i64, total_possible: i64) -> Bucket {
        if self.is_qualified(yes_count, total_possible) {
            Bucket::Qualified
        } else {
            Bucket::Unqualified
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: QualificationRule = QualificationRule::Threshold { ratio: 0.6 };

    #[test]
    fn test_default_is_positive_count() {
        assert_eq!(QualificationRule::default(), QualificationRule::PositiveCount);
    }

    #[test]
    fn test_positive_count_any_yes_qualifies() {
        let rule = QualificationRule::PositiveCount;
        assert_eq!(rule.destination(1, 5), Bucket::Qualified);
        assert_eq!(rule.destination(0, 5), Bucket::Unqualified);
        assert_eq!(rule.destination(-12, 7), Bucket::Unqualified);
    }

    #[test]
    fn test_threshold_four_of_five_qualifies() {
        assert_eq!(THRESHOLD.destination(4, 5), Bucket::Qualified);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 3/5 == 0.6 exactly
        assert!(THRESHOLD.is_qualified(3, 5));
    }

    #[test]
    fn test_threshold_below_ratio_is_unqualified() {
        assert_eq!(THRESHOLD.destination(1, 5), Bucket::Unqualified);
        assert_eq!(THRESHOLD.destination(2, 5), Bucket::Unqualified);
        assert_eq!(THRESHOLD.destination(-12, 7), Bucket::Unqualified);
    }

    #[test]
    fn test_threshold_zero_total_never_qualifies() {
        assert!(!THRESHOLD.is_qualified(3, 0));
    }
}
