use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::scoring::{
    analyze, AnalyzedComponent, ComponentIdentity, ComponentType, ConfidenceHandling,
    DynamicContent, ErrorHandling, InteractionPatterns, MetricsRecord, StreamingReadiness,
};

/// Error states needed before graceful degradation is assumed.
pub const GRACEFUL_DEGRADATION_MIN_STATES: u32 = 3;
/// Error states needed before timeout handling is assumed.
pub const TIMEOUT_HANDLING_MIN_STATES: u32 = 4;

/// The reduced questionnaire for a first estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAnswers {
    pub name: String,
    pub has_fixed_height: bool,
    pub has_overflow_handling: bool,
    pub supports_streaming: bool,
    pub has_progressive_render: bool,
    pub has_confidence_ui: bool,
    pub error_state_count: u32,
    pub handles_variable_length: bool,
}

impl QuickAnswers {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            has_fixed_height: true,
            has_overflow_handling: false,
            supports_streaming: false,
            has_progressive_render: false,
            has_confidence_ui: false,
            error_state_count: 2,
            handles_variable_length: false,
        }
    }

    /// Anything not asked about is treated as absent.
    pub fn to_metrics(&self) -> MetricsRecord {
        MetricsRecord {
            streaming_readiness: StreamingReadiness {
                has_fixed_height: self.has_fixed_height,
                has_overflow_handling: self.has_overflow_handling,
                supports_streaming: self.supports_streaming,
                has_progressive_render: self.has_progressive_render,
            },
            confidence_handling: ConfidenceHandling {
                has_confidence_indicators: self.has_confidence_ui,
                ..Default::default()
            },
            error_handling: ErrorHandling {
                has_graceful_degradation: self.error_state_count >= GRACEFUL_DEGRADATION_MIN_STATES,
                has_timeout_handling: self.error_state_count >= TIMEOUT_HANDLING_MIN_STATES,
                has_circuit_breaker: false,
                has_human_handoff: false,
                error_state_count: self.error_state_count,
            },
            dynamic_content: DynamicContent {
                handles_variable_length: self.handles_variable_length,
                ..Default::default()
            },
            interaction_patterns: InteractionPatterns::default(),
        }
    }

    pub fn identity(&self, team: &str, today: NaiveDate) -> Result<ComponentIdentity, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankName);
        }

        Ok(ComponentIdentity {
            name: name.to_string(),
            component_type: ComponentType::Interactive,
            instances: 0,
            dependencies: Vec::new(),
            team: team.to_string(),
            last_modified: today,
        })
    }
}

pub fn quick_analyze(
    answers: &QuickAnswers,
    team: &str,
    today: NaiveDate,
) -> Result<AnalyzedComponent, ValidationError> {
    let identity = answers.identity(team, today)?;
    Ok(analyze(identity, &answers.to_metrics()))
}
