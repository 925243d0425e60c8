use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use super::dimensions::Dimension;
use super::metrics::MetricsRecord;
use super::severity::Severity;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum IssueKind {
    RemoveFixedHeight,
    AddOverflowHandling,
    AddStreamingState,
    AddProgressiveRender,
    AddConfidenceIndicator,
    AddHallucinationDetection,
    AddAmbiguityStates,
    AddVerificationBadges,
    AddGracefulDegradation,
    AddTimeoutHandling,
    AddCircuitBreaker,
    AddHumanHandoff,
    AddErrorState,
    AddVariableLengthHandling,
    AddMultiModalSupport,
    ImplementTokenCounter,
    AddContentSwitching,
    AddIntentConstruction,
    AddRefinementJourney,
    AddContextualActions,
    AddFeedbackLoops,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub description: String,
    pub severity: Severity,
    /// Story points.
    pub effort: u32,
    pub recommendation: String,
}

type Capability = fn(&MetricsRecord) -> bool;

#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Fires when a desirable capability is missing.
    Absent(Capability),
    /// Fires when an undesirable capability is present.
    Present(Capability),
    /// Fires while fewer than the expected error states are covered.
    MissingErrorStates,
}

impl Trigger {
    /// How many units of deficiency the rule sees; zero means no issue.
    fn deficiency(&self, metrics: &MetricsRecord) -> u32 {
        match self {
            Trigger::Absent(capability) => u32::from(!capability(metrics)),
            Trigger::Present(capability) => u32::from(capability(metrics)),
            Trigger::MissingErrorStates => metrics.error_handling.missing_error_states(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub dimension: Dimension,
    pub kind: IssueKind,
    pub trigger: Trigger,
    pub severity: Severity,
    /// Story points per unit of deficiency.
    pub effort: u32,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl Rule {
    pub fn evaluate(&self, metrics: &MetricsRecord) -> Option<Issue> {
        let deficiency = self.trigger.deficiency(metrics);
        if deficiency == 0 {
            return None;
        }

        let description = match self.trigger {
            Trigger::MissingErrorStates => self.description.replace("{n}", &deficiency.to_string()),
            _ => self.description.to_string(),
        };

        Some(Issue {
            kind: self.kind,
            description,
            severity: self.severity,
            effort: self.effort * deficiency,
            recommendation: self.recommendation.to_string(),
        })
    }
}

/// Rules in emission order: dimension order, then flag declaration order.
pub static RULES: &[Rule] = &[
    Rule {
        dimension: Dimension::StreamingReadiness,
        kind: IssueKind::RemoveFixedHeight,
        trigger: Trigger::Present(|m| m.streaming_readiness.has_fixed_height),
        severity: Severity::High,
        effort: 3,
        description: "Component has fixed height constraints",
        recommendation: "Remove fixed height, implement min-height with auto-expansion",
    },
    Rule {
        dimension: Dimension::StreamingReadiness,
        kind: IssueKind::AddOverflowHandling,
        trigger: Trigger::Absent(|m| m.streaming_readiness.has_overflow_handling),
        severity: Severity::Medium,
        effort: 2,
        description: "Missing overflow handling for dynamic content",
        recommendation: "Add overflow-y: auto with max-height constraint",
    },
    Rule {
        dimension: Dimension::StreamingReadiness,
        kind: IssueKind::AddStreamingState,
        trigger: Trigger::Absent(|m| m.streaming_readiness.supports_streaming),
        severity: Severity::Critical,
        effort: 5,
        description: "No streaming state support",
        recommendation: "Implement streaming state with progressive content reveal",
    },
    Rule {
        dimension: Dimension::StreamingReadiness,
        kind: IssueKind::AddProgressiveRender,
        trigger: Trigger::Absent(|m| m.streaming_readiness.has_progressive_render),
        severity: Severity::High,
        effort: 5,
        description: "Missing progressive rendering capability",
        recommendation: "Add skeleton states and progressive content loading",
    },
    Rule {
        dimension: Dimension::ConfidenceHandling,
        kind: IssueKind::AddConfidenceIndicator,
        trigger: Trigger::Absent(|m| m.confidence_handling.has_confidence_indicators),
        severity: Severity::Medium,
        effort: 3,
        description: "No confidence score visualization",
        recommendation: "Add visual confidence indicators (e.g., badges, colors)",
    },
    Rule {
        dimension: Dimension::ConfidenceHandling,
        kind: IssueKind::AddHallucinationDetection,
        trigger: Trigger::Absent(|m| m.confidence_handling.has_hallucination_detection),
        severity: Severity::High,
        effort: 5,
        description: "Missing hallucination detection UI",
        recommendation: "Implement warning states for low-confidence content",
    },
    Rule {
        dimension: Dimension::ConfidenceHandling,
        kind: IssueKind::AddAmbiguityStates,
        trigger: Trigger::Absent(|m| m.confidence_handling.has_ambiguity_states),
        severity: Severity::Medium,
        effort: 3,
        description: "No handling for ambiguous AI responses",
        recommendation: "Add disambiguation UI patterns",
    },
    Rule {
        dimension: Dimension::ConfidenceHandling,
        kind: IssueKind::AddVerificationBadges,
        trigger: Trigger::Absent(|m| m.confidence_handling.has_verification_badges),
        severity: Severity::Low,
        effort: 2,
        description: "Missing verification status indicators",
        recommendation: "Add badges for verified/unverified content",
    },
    Rule {
        dimension: Dimension::ErrorHandling,
        kind: IssueKind::AddGracefulDegradation,
        trigger: Trigger::Absent(|m| m.error_handling.has_graceful_degradation),
        severity: Severity::High,
        effort: 4,
        description: "No graceful degradation strategy",
        recommendation: "Implement fallback content and partial success states",
    },
    Rule {
        dimension: Dimension::ErrorHandling,
        kind: IssueKind::AddTimeoutHandling,
        trigger: Trigger::Absent(|m| m.error_handling.has_timeout_handling),
        severity: Severity::High,
        effort: 3,
        description: "Missing timeout handling",
        recommendation: "Add timeout states with retry options",
    },
    Rule {
        dimension: Dimension::ErrorHandling,
        kind: IssueKind::AddCircuitBreaker,
        trigger: Trigger::Absent(|m| m.error_handling.has_circuit_breaker),
        severity: Severity::Medium,
        effort: 5,
        description: "No circuit breaker pattern",
        recommendation: "Implement circuit breaker to prevent cascade failures",
    },
    Rule {
        dimension: Dimension::ErrorHandling,
        kind: IssueKind::AddHumanHandoff,
        trigger: Trigger::Absent(|m| m.error_handling.has_human_handoff),
        severity: Severity::Critical,
        effort: 8,
        description: "Missing human handoff mechanism",
        recommendation: "Add escalation path to human support",
    },
    Rule {
        dimension: Dimension::ErrorHandling,
        kind: IssueKind::AddErrorState,
        trigger: Trigger::MissingErrorStates,
        severity: Severity::Medium,
        effort: 2,
        description: "Missing {n} error states (need 5 minimum)",
        recommendation:
            "Add comprehensive error states (network, timeout, validation, server, rate-limit)",
    },
    Rule {
        dimension: Dimension::DynamicContent,
        kind: IssueKind::AddVariableLengthHandling,
        trigger: Trigger::Absent(|m| m.dynamic_content.handles_variable_length),
        severity: Severity::High,
        effort: 4,
        description: "Cannot handle variable-length content",
        recommendation: "Implement flexible layouts for variable content lengths",
    },
    Rule {
        dimension: Dimension::DynamicContent,
        kind: IssueKind::AddMultiModalSupport,
        trigger: Trigger::Absent(|m| m.dynamic_content.supports_multi_modal),
        severity: Severity::Medium,
        effort: 6,
        description: "No support for multiple content types",
        recommendation: "Add rendering for text, images, code, tables, etc.",
    },
    Rule {
        dimension: Dimension::DynamicContent,
        kind: IssueKind::ImplementTokenCounter,
        trigger: Trigger::Absent(|m| m.dynamic_content.has_token_limit_management),
        severity: Severity::Medium,
        effort: 5,
        description: "Missing token limit management",
        recommendation: "Add token counter with limit warnings",
    },
    Rule {
        dimension: Dimension::DynamicContent,
        kind: IssueKind::AddContentSwitching,
        trigger: Trigger::Absent(|m| m.dynamic_content.supports_content_switching),
        severity: Severity::Low,
        effort: 3,
        description: "No dynamic content switching capability",
        recommendation: "Support seamless content type transitions",
    },
    Rule {
        dimension: Dimension::InteractionPatterns,
        kind: IssueKind::AddIntentConstruction,
        trigger: Trigger::Absent(|m| m.interaction_patterns.has_intent_construction),
        severity: Severity::Medium,
        effort: 5,
        description: "Missing intent construction UI",
        recommendation: "Add guided intent building interface",
    },
    Rule {
        dimension: Dimension::InteractionPatterns,
        kind: IssueKind::AddRefinementJourney,
        trigger: Trigger::Absent(|m| m.interaction_patterns.has_refinement_journey),
        severity: Severity::Medium,
        effort: 6,
        description: "No refinement workflow",
        recommendation: "Implement iterative refinement patterns",
    },
    Rule {
        dimension: Dimension::InteractionPatterns,
        kind: IssueKind::AddContextualActions,
        trigger: Trigger::Absent(|m| m.interaction_patterns.has_contextual_actions),
        severity: Severity::Low,
        effort: 4,
        description: "Missing contextual action suggestions",
        recommendation: "Add smart action recommendations based on content",
    },
    Rule {
        dimension: Dimension::InteractionPatterns,
        kind: IssueKind::AddFeedbackLoops,
        trigger: Trigger::Absent(|m| m.interaction_patterns.has_feedback_loops),
        severity: Severity::Medium,
        effort: 4,
        description: "No user feedback mechanisms",
        recommendation: "Implement thumbs up/down and improvement suggestions",
    },
];

pub fn detect_issues(metrics: &MetricsRecord) -> Vec<Issue> {
    RULES.iter().filter_map(|rule| rule.evaluate(metrics)).collect()
}

/// Story points across all issues. Widened so long issue lists cannot wrap.
pub fn total_effort(issues: &[Issue]) -> u64 {
    issues.iter().map(|issue| u64::from(issue.effort)).sum()
}
