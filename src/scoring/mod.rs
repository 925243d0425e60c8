mod analyze;
mod composite;
mod dimensions;
mod issues;
mod metrics;
mod severity;

pub use analyze::{analyze, AnalyzedComponent, ComponentIdentity, ComponentType};
pub use composite::{composite_debt, round_debt, weakest_dimension, weighted_readiness};
pub use dimensions::{
    score_confidence, score_dynamic_content, score_error_handling, score_interaction,
    score_streaming, Dimension, DimensionScores,
};
pub use issues::{detect_issues, total_effort, Issue, IssueKind, Rule, Trigger, RULES};
pub use metrics::{
    ConfidenceHandling, DynamicContent, ErrorHandling, InteractionPatterns, MetricsRecord,
    StreamingReadiness,
};
pub use severity::Severity;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn identity() -> ComponentIdentity {
        ComponentIdentity {
            name: "Probe".into(),
            component_type: ComponentType::Display,
            instances: 1,
            dependencies: Vec::new(),
            team: "Platform".into(),
            last_modified: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        }
    }

    fn metrics_strategy() -> impl Strategy<Value = MetricsRecord> {
        (
            prop::array::uniform4(any::<bool>()),
            prop::array::uniform4(any::<bool>()),
            prop::array::uniform4(any::<bool>()),
            0u32..12,
            prop::array::uniform4(any::<bool>()),
            prop::array::uniform4(any::<bool>()),
        )
            .prop_map(|(s, c, e, count, d, i)| MetricsRecord {
                streaming_readiness: StreamingReadiness {
                    has_fixed_height: s[0],
                    has_overflow_handling: s[1],
                    supports_streaming: s[2],
                    has_progressive_render: s[3],
                },
                confidence_handling: ConfidenceHandling {
                    has_confidence_indicators: c[0],
                    has_hallucination_detection: c[1],
                    has_ambiguity_states: c[2],
                    has_verification_badges: c[3],
                },
                error_handling: ErrorHandling {
                    has_graceful_degradation: e[0],
                    has_timeout_handling: e[1],
                    has_circuit_breaker: e[2],
                    has_human_handoff: e[3],
                    error_state_count: count,
                },
                dynamic_content: DynamicContent {
                    handles_variable_length: d[0],
                    supports_multi_modal: d[1],
                    has_token_limit_management: d[2],
                    supports_content_switching: d[3],
                },
                interaction_patterns: InteractionPatterns {
                    has_intent_construction: i[0],
                    has_refinement_journey: i[1],
                    has_contextual_actions: i[2],
                    has_feedback_loops: i[3],
                },
            })
    }

    /// Every single-flag improvement, paired with the issue it clears.
    fn improvements(metrics: &MetricsRecord) -> Vec<(MetricsRecord, IssueKind)> {
        let mut out = Vec::new();
        let mut push = |edit: fn(&mut MetricsRecord), kind: IssueKind| {
            let mut improved = *metrics;
            edit(&mut improved);
            out.push((improved, kind));
        };

        push(|m| m.streaming_readiness.has_fixed_height = false, IssueKind::RemoveFixedHeight);
        push(|m| m.streaming_readiness.has_overflow_handling = true, IssueKind::AddOverflowHandling);
        push(|m| m.streaming_readiness.supports_streaming = true, IssueKind::AddStreamingState);
        push(|m| m.streaming_readiness.has_progressive_render = true, IssueKind::AddProgressiveRender);
        push(|m| m.confidence_handling.has_confidence_indicators = true, IssueKind::AddConfidenceIndicator);
        push(|m| m.confidence_handling.has_hallucination_detection = true, IssueKind::AddHallucinationDetection);
        push(|m| m.confidence_handling.has_ambiguity_states = true, IssueKind::AddAmbiguityStates);
        push(|m| m.confidence_handling.has_verification_badges = true, IssueKind::AddVerificationBadges);
        push(|m| m.error_handling.has_graceful_degradation = true, IssueKind::AddGracefulDegradation);
        push(|m| m.error_handling.has_timeout_handling = true, IssueKind::AddTimeoutHandling);
        push(|m| m.error_handling.has_circuit_breaker = true, IssueKind::AddCircuitBreaker);
        push(|m| m.error_handling.has_human_handoff = true, IssueKind::AddHumanHandoff);
        push(|m| m.dynamic_content.handles_variable_length = true, IssueKind::AddVariableLengthHandling);
        push(|m| m.dynamic_content.supports_multi_modal = true, IssueKind::AddMultiModalSupport);
        push(|m| m.dynamic_content.has_token_limit_management = true, IssueKind::ImplementTokenCounter);
        push(|m| m.dynamic_content.supports_content_switching = true, IssueKind::AddContentSwitching);
        push(|m| m.interaction_patterns.has_intent_construction = true, IssueKind::AddIntentConstruction);
        push(|m| m.interaction_patterns.has_refinement_journey = true, IssueKind::AddRefinementJourney);
        push(|m| m.interaction_patterns.has_contextual_actions = true, IssueKind::AddContextualActions);
        push(|m| m.interaction_patterns.has_feedback_loops = true, IssueKind::AddFeedbackLoops);
        out
    }

    proptest! {
        #[test]
        fn prop_scores_stay_in_range(metrics in metrics_strategy()) {
            let result = analyze(identity(), &metrics);
            for (_, score) in result.dimension_scores.iter() {
                prop_assert!(score <= 100);
            }
            prop_assert!(result.debt_score <= 100);
            let debt = composite_debt(&result.dimension_scores);
            prop_assert!((0.0..=100.0).contains(&debt));
        }

        #[test]
        fn prop_effort_matches_issue_sum(metrics in metrics_strategy()) {
            let result = analyze(identity(), &metrics);
            let sum: u64 = result.issues.iter().map(|i| u64::from(i.effort)).sum();
            prop_assert_eq!(result.remediation_effort, sum);
            prop_assert!(result.issues.iter().all(|i| i.effort > 0));
        }

        #[test]
        fn prop_analyze_is_deterministic(metrics in metrics_strategy()) {
            prop_assert_eq!(analyze(identity(), &metrics), analyze(identity(), &metrics));
        }

        #[test]
        fn prop_severity_matches_debt(metrics in metrics_strategy()) {
            let result = analyze(identity(), &metrics);
            prop_assert_eq!(result.severity, Severity::from_debt(result.debt_score));
        }

        #[test]
        fn prop_single_improvement_is_monotonic(metrics in metrics_strategy()) {
            let before = analyze(identity(), &metrics);
            for (improved, cleared) in improvements(&metrics) {
                let after = analyze(identity(), &improved);
                for (dimension, score) in after.dimension_scores.iter() {
                    prop_assert!(score >= before.dimension_scores.get(dimension));
                }
                prop_assert!(after.debt_score <= before.debt_score);
                prop_assert!(!after.issues.iter().any(|i| i.kind == cleared));
                for issue in before.issues.iter().filter(|i| i.kind != cleared) {
                    prop_assert!(after.issues.contains(issue));
                }
            }
        }

        #[test]
        fn prop_error_states_never_hurt(metrics in metrics_strategy()) {
            let mut more = metrics;
            more.error_handling.error_state_count += 1;
            let before = analyze(identity(), &metrics);
            let after = analyze(identity(), &more);
            prop_assert!(after.dimension_scores.error_handling >= before.dimension_scores.error_handling);
            prop_assert!(after.remediation_effort <= before.remediation_effort);
        }
    }
}
