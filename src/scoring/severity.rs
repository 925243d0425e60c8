use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

/// Ordinal debt bucket. Variants are declared lowest first so the derived
/// ordering reads `Low < Medium < High < Critical`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const CRITICAL_THRESHOLD: u8 = 80;
    pub const HIGH_THRESHOLD: u8 = 60;
    pub const MEDIUM_THRESHOLD: u8 = 40;

    /// Inclusive lower bounds, checked from the top down.
    pub fn from_debt(debt_score: u8) -> Self {
        if debt_score >= Self::CRITICAL_THRESHOLD {
            Severity::Critical
        } else if debt_score >= Self::HIGH_THRESHOLD {
            Severity::High
        } else if debt_score >= Self::MEDIUM_THRESHOLD {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_tiers() {
        assert_eq!(Severity::from_debt(95), Severity::Critical);
        assert_eq!(Severity::from_debt(70), Severity::High);
        assert_eq!(Severity::from_debt(45), Severity::Medium);
        assert_eq!(Severity::from_debt(10), Severity::Low);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(Severity::from_debt(80), Severity::Critical);
        assert_eq!(Severity::from_debt(79), Severity::High);
        assert_eq!(Severity::from_debt(60), Severity::High);
        assert_eq!(Severity::from_debt(59), Severity::Medium);
        assert_eq!(Severity::from_debt(40), Severity::Medium);
        assert_eq!(Severity::from_debt(39), Severity::Low);
        assert_eq!(Severity::from_debt(0), Severity::Low);
        assert_eq!(Severity::from_debt(100), Severity::Critical);
    }

    #[test]
    fn test_classification_is_monotonic() {
        let mut previous = Severity::Low;
        for debt in 0..=100 {
            let current = Severity::from_debt(debt);
            assert!(current >= previous, "{debt} dropped to {current}");
            previous = current;
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Severity::Critical.to_string(), "critical");
        assert_eq!(
            serde_json::to_string(&Severity::Medium).unwrap(),
            "\"medium\""
        );
    }
}
