use super::dimensions::{Dimension, DimensionScores};

pub const MAX_DEBT: f64 = 100.0;

/// Weighted readiness across the five dimensions, in [0, 100].
pub fn weighted_readiness(scores: &DimensionScores) -> f64 {
    // Integer numerator keeps the sum exact before the single division.
    let weighted: u32 = scores
        .iter()
        .map(|(dimension, score)| u32::from(score) * dimension.weight_percent())
        .sum();
    f64::from(weighted) / 100.0
}

/// Debt is the complement of readiness: 0 is ready, 100 is not ready at all.
/// Unrounded; callers round once at the boundary.
pub fn composite_debt(scores: &DimensionScores) -> f64 {
    (MAX_DEBT - weighted_readiness(scores)).clamp(0.0, MAX_DEBT)
}

pub fn round_debt(debt: f64) -> u8 {
    debt.round().clamp(0.0, MAX_DEBT) as u8
}

/// The dimension with the lowest score, first in dimension order on ties.
pub fn weakest_dimension(scores: &DimensionScores) -> Dimension {
    scores
        .iter()
        .fold(None, |weakest: Option<(Dimension, u8)>, (dimension, score)| {
            match weakest {
                Some((_, lowest)) if lowest <= score => weakest,
                _ => Some((dimension, score)),
            }
        })
        .map(|(dimension, _)| dimension)
        .unwrap_or(Dimension::StreamingReadiness)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(score: u8) -> DimensionScores {
        DimensionScores {
            streaming_readiness: score,
            confidence_handling: score,
            error_handling: score,
            dynamic_content: score,
            interaction_patterns: score,
        }
    }

    #[test]
    fn test_uniform_scores() {
        assert_eq!(composite_debt(&uniform(100)), 0.0);
        assert_eq!(composite_debt(&uniform(0)), 100.0);
        assert_eq!(composite_debt(&uniform(50)), 50.0);
    }

    #[test]
    fn test_weighting() {
        let scores = DimensionScores {
            streaming_readiness: 30,
            ..uniform(0)
        };
        assert_eq!(weighted_readiness(&scores), 7.5);
        assert_eq!(composite_debt(&scores), 92.5);
        assert_eq!(round_debt(composite_debt(&scores)), 93);
    }

    #[test]
    fn test_streaming_outweighs_dynamic_content() {
        let streaming_only = DimensionScores {
            streaming_readiness: 100,
            ..uniform(0)
        };
        let dynamic_only = DimensionScores {
            dynamic_content: 100,
            ..uniform(0)
        };
        assert!(composite_debt(&streaming_only) < composite_debt(&dynamic_only));
    }

    #[test]
    fn test_weakest_dimension() {
        let scores = DimensionScores {
            streaming_readiness: 50,
            confidence_handling: 25,
            error_handling: 80,
            dynamic_content: 25,
            interaction_patterns: 100,
        };
        assert_eq!(weakest_dimension(&scores), Dimension::ConfidenceHandling);
    }
}
