use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingReadiness {
    /// The only flag where `true` is the deficiency.
    pub has_fixed_height: bool,
    pub has_overflow_handling: bool,
    pub supports_streaming: bool,
    pub has_progressive_render: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceHandling {
    pub has_confidence_indicators: bool,
    pub has_hallucination_detection: bool,
    pub has_ambiguity_states: bool,
    pub has_verification_badges: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorHandling {
    pub has_graceful_degradation: bool,
    pub has_timeout_handling: bool,
    pub has_circuit_breaker: bool,
    pub has_human_handoff: bool,
    pub error_state_count: u32,
}

impl ErrorHandling {
    pub const EXPECTED_ERROR_STATES: u32 = 5;

    pub fn missing_error_states(&self) -> u32 {
        Self::EXPECTED_ERROR_STATES.saturating_sub(self.error_state_count)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicContent {
    pub handles_variable_length: bool,
    pub supports_multi_modal: bool,
    pub has_token_limit_management: bool,
    pub supports_content_switching: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionPatterns {
    pub has_intent_construction: bool,
    pub has_refinement_journey: bool,
    pub has_contextual_actions: bool,
    pub has_feedback_loops: bool,
}

/// Raw capability metrics for one component, one bundle per dimension.
///
/// `Default` is the all-absent record: every flag `false` and no error
/// states, which also means no fixed height.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRecord {
    pub streaming_readiness: StreamingReadiness,
    pub confidence_handling: ConfidenceHandling,
    pub error_handling: ErrorHandling,
    pub dynamic_content: DynamicContent,
    pub interaction_patterns: InteractionPatterns,
}

impl MetricsRecord {
    /// Every desirable capability present and the expected number of
    /// error states covered.
    pub const fn fully_ready() -> Self {
        Self {
            streaming_readiness: StreamingReadiness {
                has_fixed_height: false,
                has_overflow_handling: true,
                supports_streaming: true,
                has_progressive_render: true,
            },
            confidence_handling: ConfidenceHandling {
                has_confidence_indicators: true,
                has_hallucination_detection: true,
                has_ambiguity_states: true,
                has_verification_badges: true,
            },
            error_handling: ErrorHandling {
                has_graceful_degradation: true,
                has_timeout_handling: true,
                has_circuit_breaker: true,
                has_human_handoff: true,
                error_state_count: ErrorHandling::EXPECTED_ERROR_STATES,
            },
            dynamic_content: DynamicContent {
                handles_variable_length: true,
                supports_multi_modal: true,
                has_token_limit_management: true,
                supports_content_switching: true,
            },
            interaction_patterns: InteractionPatterns {
                has_intent_construction: true,
                has_refinement_journey: true,
                has_contextual_actions: true,
                has_feedback_loops: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_error_states() {
        let mut errors = ErrorHandling::default();
        assert_eq!(errors.missing_error_states(), 5);

        errors.error_state_count = 3;
        assert_eq!(errors.missing_error_states(), 2);

        errors.error_state_count = 12;
        assert_eq!(errors.missing_error_states(), 0);
    }

    #[test]
    fn test_json_uses_camel_case_contract() {
        let json = serde_json::to_value(MetricsRecord::fully_ready()).unwrap();
        assert_eq!(json["streamingReadiness"]["hasFixedHeight"], false);
        assert_eq!(json["errorHandling"]["errorStateCount"], 5);
        assert_eq!(json["dynamicContent"]["supportsMultiModal"], true);
    }

    #[test]
    fn test_missing_field_rejected_on_strict_parse() {
        let json = r#"{"hasFixedHeight": true, "hasOverflowHandling": false, "supportsStreaming": false}"#;
        let err = serde_json::from_str::<StreamingReadiness>(json).unwrap_err();
        assert!(err.to_string().contains("hasProgressiveRender"));
    }
}
