use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use super::metrics::{
    ConfidenceHandling, DynamicContent, ErrorHandling, InteractionPatterns, MetricsRecord,
    StreamingReadiness,
};

pub const BASE_SCORE: i32 = 100;

pub const PENALTY_FIXED_HEIGHT: i32 = 30;
pub const PENALTY_OVERFLOW_HANDLING: i32 = 20;
pub const PENALTY_STREAMING: i32 = 25;
pub const PENALTY_PROGRESSIVE_RENDER: i32 = 25;

pub const PENALTY_CONFIDENCE_FLAG: i32 = 25;
pub const PENALTY_ERROR_FLAG: i32 = 20;
pub const PENALTY_PER_MISSING_ERROR_STATE: i32 = 4;
pub const PENALTY_DYNAMIC_FLAG: i32 = 25;
pub const PENALTY_INTERACTION_FLAG: i32 = 25;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    #[strum(to_string = "streaming readiness")]
    StreamingReadiness,
    #[strum(to_string = "confidence handling")]
    ConfidenceHandling,
    #[strum(to_string = "error handling")]
    ErrorHandling,
    #[strum(to_string = "dynamic content")]
    DynamicContent,
    #[strum(to_string = "interaction patterns")]
    InteractionPatterns,
}

impl Dimension {
    /// Composite weight as an integer percentage. The five add up to 100.
    pub const fn weight_percent(&self) -> u32 {
        match self {
            Self::StreamingReadiness => 25,
            Self::ConfidenceHandling => 20,
            Self::ErrorHandling => 25,
            Self::DynamicContent => 15,
            Self::InteractionPatterns => 15,
        }
    }

    pub fn weight(&self) -> f64 {
        f64::from(self.weight_percent()) / 100.0
    }

    pub fn all() -> impl Iterator<Item = Dimension> {
        Self::iter()
    }
}

fn penalize(flag_missing: bool, penalty: i32) -> i32 {
    if flag_missing {
        penalty
    } else {
        0
    }
}

fn finish(penalty: i32) -> u8 {
    // Base and every penalty are non-negative, so only the floor needs a clamp.
    (BASE_SCORE - penalty).max(0) as u8
}

pub fn score_streaming(metrics: &StreamingReadiness) -> u8 {
    finish(
        penalize(metrics.has_fixed_height, PENALTY_FIXED_HEIGHT)
            + penalize(!metrics.has_overflow_handling, PENALTY_OVERFLOW_HANDLING)
            + penalize(!metrics.supports_streaming, PENALTY_STREAMING)
            + penalize(!metrics.has_progressive_render, PENALTY_PROGRESSIVE_RENDER),
    )
}

pub fn score_confidence(metrics: &ConfidenceHandling) -> u8 {
    let flags = [
        metrics.has_confidence_indicators,
        metrics.has_hallucination_detection,
        metrics.has_ambiguity_states,
        metrics.has_verification_badges,
    ];
    finish(flags.iter().map(|f| penalize(!f, PENALTY_CONFIDENCE_FLAG)).sum())
}

pub fn score_error_handling(metrics: &ErrorHandling) -> u8 {
    let flags = [
        metrics.has_graceful_degradation,
        metrics.has_timeout_handling,
        metrics.has_circuit_breaker,
        metrics.has_human_handoff,
    ];
    let flag_penalty: i32 = flags.iter().map(|f| penalize(!f, PENALTY_ERROR_FLAG)).sum();
    let missing_states = metrics.missing_error_states() as i32;

    finish(flag_penalty + missing_states * PENALTY_PER_MISSING_ERROR_STATE)
}

pub fn score_dynamic_content(metrics: &DynamicContent) -> u8 {
    let flags = [
        metrics.handles_variable_length,
        metrics.supports_multi_modal,
        metrics.has_token_limit_management,
        metrics.supports_content_switching,
    ];
    finish(flags.iter().map(|f| penalize(!f, PENALTY_DYNAMIC_FLAG)).sum())
}

pub fn score_interaction(metrics: &InteractionPatterns) -> u8 {
    let flags = [
        metrics.has_intent_construction,
        metrics.has_refinement_journey,
        metrics.has_contextual_actions,
        metrics.has_feedback_loops,
    ];
    finish(flags.iter().map(|f| penalize(!f, PENALTY_INTERACTION_FLAG)).sum())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScores {
    pub streaming_readiness: u8,
    pub confidence_handling: u8,
    pub error_handling: u8,
    pub dynamic_content: u8,
    pub interaction_patterns: u8,
}

impl DimensionScores {
    pub fn from_metrics(metrics: &MetricsRecord) -> Self {
        Self {
            streaming_readiness: score_streaming(&metrics.streaming_readiness),
            confidence_handling: score_confidence(&metrics.confidence_handling),
            error_handling: score_error_handling(&metrics.error_handling),
            dynamic_content: score_dynamic_content(&metrics.dynamic_content),
            interaction_patterns: score_interaction(&metrics.interaction_patterns),
        }
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::StreamingReadiness => self.streaming_readiness,
            Dimension::ConfidenceHandling => self.confidence_handling,
            Dimension::ErrorHandling => self.error_handling,
            Dimension::DynamicContent => self.dynamic_content,
            Dimension::InteractionPatterns => self.interaction_patterns,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::all().map(move |d| (d, self.get(d)))
    }
}
