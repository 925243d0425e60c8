use chrono::NaiveDate;

use crate::scoring::{
    ComponentIdentity, ComponentType, ConfidenceHandling, DynamicContent, ErrorHandling,
    InteractionPatterns, MetricsRecord, StreamingReadiness,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub component_type: ComponentType,
    pub description: &'static str,
    pub metrics: MetricsRecord,
}

impl ComponentTemplate {
    pub fn identity(&self, team: &str, last_modified: NaiveDate) -> ComponentIdentity {
        ComponentIdentity {
            name: self.name.to_string(),
            component_type: self.component_type,
            instances: 0,
            dependencies: Vec::new(),
            team: team.to_string(),
            last_modified,
        }
    }
}

const NO_CONFIDENCE: ConfidenceHandling = ConfidenceHandling {
    has_confidence_indicators: false,
    has_hallucination_detection: false,
    has_ambiguity_states: false,
    has_verification_badges: false,
};

const NO_DYNAMIC_CONTENT: DynamicContent = DynamicContent {
    handles_variable_length: false,
    supports_multi_modal: false,
    has_token_limit_management: false,
    supports_content_switching: false,
};

const NO_INTERACTION: InteractionPatterns = InteractionPatterns {
    has_intent_construction: false,
    has_refinement_journey: false,
    has_contextual_actions: false,
    has_feedback_loops: false,
};

const FIXED_HEIGHT_ONLY: StreamingReadiness = StreamingReadiness {
    has_fixed_height: true,
    has_overflow_handling: false,
    supports_streaming: false,
    has_progressive_render: false,
};

pub static TEMPLATES: &[ComponentTemplate] = &[
    ComponentTemplate {
        id: "button",
        name: "Button",
        component_type: ComponentType::Interactive,
        description: "Standard button component with common patterns",
        metrics: MetricsRecord {
            streaming_readiness: FIXED_HEIGHT_ONLY,
            confidence_handling: NO_CONFIDENCE,
            error_handling: ErrorHandling {
                has_graceful_degradation: true,
                has_timeout_handling: false,
                has_circuit_breaker: false,
                has_human_handoff: false,
                error_state_count: 2,
            },
            dynamic_content: NO_DYNAMIC_CONTENT,
            interaction_patterns: NO_INTERACTION,
        },
    },
    ComponentTemplate {
        id: "modal",
        name: "Modal/Dialog",
        component_type: ComponentType::Layout,
        description: "Modal dialog for displaying content",
        metrics: MetricsRecord {
            streaming_readiness: FIXED_HEIGHT_ONLY,
            confidence_handling: NO_CONFIDENCE,
            error_handling: ErrorHandling {
                has_graceful_degradation: false,
                has_timeout_handling: false,
                has_circuit_breaker: false,
                has_human_handoff: false,
                error_state_count: 1,
            },
            dynamic_content: NO_DYNAMIC_CONTENT,
            interaction_patterns: NO_INTERACTION,
        },
    },
    ComponentTemplate {
        id: "text-input",
        name: "Text Input",
        component_type: ComponentType::Input,
        description: "Text field or input component",
        metrics: MetricsRecord {
            streaming_readiness: FIXED_HEIGHT_ONLY,
            confidence_handling: NO_CONFIDENCE,
            error_handling: ErrorHandling {
                has_graceful_degradation: false,
                has_timeout_handling: false,
                has_circuit_breaker: false,
                has_human_handoff: false,
                error_state_count: 3,
            },
            dynamic_content: NO_DYNAMIC_CONTENT,
            interaction_patterns: NO_INTERACTION,
        },
    },
    ComponentTemplate {
        id: "card",
        name: "Card",
        component_type: ComponentType::Display,
        description: "Content card for displaying information",
        metrics: MetricsRecord {
            streaming_readiness: StreamingReadiness {
                has_fixed_height: true,
                has_overflow_handling: false,
                supports_streaming: false,
                has_progressive_render: true,
            },
            confidence_handling: NO_CONFIDENCE,
            error_handling: ErrorHandling {
                has_graceful_degradation: true,
                has_timeout_handling: false,
                has_circuit_breaker: false,
                has_human_handoff: false,
                error_state_count: 2,
            },
            dynamic_content: DynamicContent {
                supports_multi_modal: true,
                ..NO_DYNAMIC_CONTENT
            },
            interaction_patterns: InteractionPatterns {
                has_contextual_actions: true,
                ..NO_INTERACTION
            },
        },
    },
    ComponentTemplate {
        id: "notification",
        name: "Notification/Toast",
        component_type: ComponentType::Feedback,
        description: "Notification or toast component",
        metrics: MetricsRecord {
            streaming_readiness: StreamingReadiness {
                has_fixed_height: false,
                has_overflow_handling: true,
                supports_streaming: false,
                has_progressive_render: false,
            },
            confidence_handling: NO_CONFIDENCE,
            error_handling: ErrorHandling {
                has_graceful_degradation: true,
                has_timeout_handling: true,
                has_circuit_breaker: false,
                has_human_handoff: false,
                error_state_count: 4,
            },
            dynamic_content: DynamicContent {
                handles_variable_length: true,
                ..NO_DYNAMIC_CONTENT
            },
            interaction_patterns: InteractionPatterns {
                has_contextual_actions: true,
                ..NO_INTERACTION
            },
        },
    },
    ComponentTemplate {
        id: "data-table",
        name: "Data Table",
        component_type: ComponentType::Display,
        description: "Table component for displaying structured data",
        metrics: MetricsRecord {
            streaming_readiness: StreamingReadiness {
                has_fixed_height: true,
                has_overflow_handling: true,
                supports_streaming: false,
                has_progressive_render: false,
            },
            confidence_handling: NO_CONFIDENCE,
            error_handling: ErrorHandling {
                has_graceful_degradation: false,
                has_timeout_handling: true,
                has_circuit_breaker: false,
                has_human_handoff: false,
                error_state_count: 3,
            },
            dynamic_content: DynamicContent {
                handles_variable_length: true,
                ..NO_DYNAMIC_CONTENT
            },
            interaction_patterns: NO_INTERACTION,
        },
    },
    ComponentTemplate {
        id: "ai-ready",
        name: "AI-Ready Component",
        component_type: ComponentType::Interactive,
        description: "Ideal component with full AI readiness",
        metrics: MetricsRecord {
            error_handling: ErrorHandling {
                error_state_count: 7,
                ..MetricsRecord::fully_ready().error_handling
            },
            ..MetricsRecord::fully_ready()
        },
    },
];

pub fn templates() -> &'static [ComponentTemplate] {
    TEMPLATES
}

pub fn find_template(id: &str) -> Option<&'static ComponentTemplate> {
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{analyze, Severity};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn analyze_template(id: &str) -> crate::scoring::AnalyzedComponent {
        let template = find_template(id).unwrap();
        analyze(template.identity("Unknown", today()), &template.metrics)
    }

    #[test]
    fn test_catalogue_ids_are_unique() {
        let mut ids: Vec<_> = templates().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
        assert_eq!(TEMPLATES.len(), 7);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(find_template("card").unwrap().name, "Card");
        assert_eq!(find_template(" Data-Table ").unwrap().id, "data-table");
        assert!(find_template("carousel").is_none());
    }

    #[test]
    fn test_button_template() {
        let result = analyze_template("button");
        assert_eq!(result.dimension_scores.streaming_readiness, 0);
        assert_eq!(result.dimension_scores.error_handling, 28);
        assert_eq!(result.debt_score, 93);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.remediation_effort, 87);
    }

    #[test]
    fn test_notification_template() {
        let result = analyze_template("notification");
        assert_eq!(result.dimension_scores.dynamic_content, 25);
        assert_eq!(result.debt_score, 66);
        assert_eq!(result.severity, Severity::High);
    }

    #[test]
    fn test_ai_ready_template() {
        let result = analyze_template("ai-ready");
        assert_eq!(result.debt_score, 0);
        assert_eq!(result.severity, Severity::Low);
        assert!(result.issues.is_empty());
        assert_eq!(result.identity.component_type, ComponentType::Interactive);
    }
}
