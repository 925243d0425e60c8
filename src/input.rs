//! Boundary between caller-supplied drafts and the scoring engine.
//!
//! Drafts mirror form state or hand-written files: every field may be
//! missing. Validation turns a draft into a complete [`MetricsRecord`] or
//! reports the first field that is missing or invalid.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use ron::extensions::Extensions;
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::ValidationError;
use crate::scoring::{
    ComponentIdentity, ComponentType, ConfidenceHandling, DynamicContent, ErrorHandling,
    InteractionPatterns, MetricsRecord, StreamingReadiness,
};
use crate::settings::Defaults;
use crate::templates::find_template;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct StreamingDraft {
    pub has_fixed_height: Option<bool>,
    pub has_overflow_handling: Option<bool>,
    pub supports_streaming: Option<bool>,
    pub has_progressive_render: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ConfidenceDraft {
    pub has_confidence_indicators: Option<bool>,
    pub has_hallucination_detection: Option<bool>,
    pub has_ambiguity_states: Option<bool>,
    pub has_verification_badges: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ErrorDraft {
    pub has_graceful_degradation: Option<bool>,
    pub has_timeout_handling: Option<bool>,
    pub has_circuit_breaker: Option<bool>,
    pub has_human_handoff: Option<bool>,
    /// Signed so that a negative count can be reported instead of failing
    /// deep inside the parser.
    #[serde(deserialize_with = "error_state_count")]
    pub error_state_count: Option<i64>,
}

struct ErrorStateCountVisitor;

impl<'de> Visitor<'de> for ErrorStateCountVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a whole number for `errorHandling.errorStateCount`")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_i64(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }
}

fn error_state_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    deserializer.deserialize_option(ErrorStateCountVisitor)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct DynamicDraft {
    pub handles_variable_length: Option<bool>,
    pub supports_multi_modal: Option<bool>,
    pub has_token_limit_management: Option<bool>,
    pub supports_content_switching: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct InteractionDraft {
    pub has_intent_construction: Option<bool>,
    pub has_refinement_journey: Option<bool>,
    pub has_contextual_actions: Option<bool>,
    pub has_feedback_loops: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct MetricsDraft {
    pub streaming_readiness: StreamingDraft,
    pub confidence_handling: ConfidenceDraft,
    pub error_handling: ErrorDraft,
    pub dynamic_content: DynamicDraft,
    pub interaction_patterns: InteractionDraft,
}

fn pick<T>(value: Option<T>, fallback: Option<T>, path: &'static str) -> Result<T, ValidationError> {
    value.or(fallback).ok_or(ValidationError::MissingField(path))
}

impl MetricsDraft {
    /// Every field must be present.
    pub fn validate(&self) -> Result<MetricsRecord, ValidationError> {
        self.resolve(None)
    }

    /// Fields left out of the draft are taken from `base`.
    pub fn overlay(&self, base: &MetricsRecord) -> Result<MetricsRecord, ValidationError> {
        self.resolve(Some(base))
    }

    fn resolve(&self, base: Option<&MetricsRecord>) -> Result<MetricsRecord, ValidationError> {
        let s = &self.streaming_readiness;
        let bs = base.map(|b| b.streaming_readiness);
        let streaming_readiness = StreamingReadiness {
            has_fixed_height: pick(
                s.has_fixed_height,
                bs.map(|b| b.has_fixed_height),
                "streamingReadiness.hasFixedHeight",
            )?,
            has_overflow_handling: pick(
                s.has_overflow_handling,
                bs.map(|b| b.has_overflow_handling),
                "streamingReadiness.hasOverflowHandling",
            )?,
            supports_streaming: pick(
                s.supports_streaming,
                bs.map(|b| b.supports_streaming),
                "streamingReadiness.supportsStreaming",
            )?,
            has_progressive_render: pick(
                s.has_progressive_render,
                bs.map(|b| b.has_progressive_render),
                "streamingReadiness.hasProgressiveRender",
            )?,
        };

        let c = &self.confidence_handling;
        let bc = base.map(|b| b.confidence_handling);
        let confidence_handling = ConfidenceHandling {
            has_confidence_indicators: pick(
                c.has_confidence_indicators,
                bc.map(|b| b.has_confidence_indicators),
                "confidenceHandling.hasConfidenceIndicators",
            )?,
            has_hallucination_detection: pick(
                c.has_hallucination_detection,
                bc.map(|b| b.has_hallucination_detection),
                "confidenceHandling.hasHallucinationDetection",
            )?,
            has_ambiguity_states: pick(
                c.has_ambiguity_states,
                bc.map(|b| b.has_ambiguity_states),
                "confidenceHandling.hasAmbiguityStates",
            )?,
            has_verification_badges: pick(
                c.has_verification_badges,
                bc.map(|b| b.has_verification_badges),
                "confidenceHandling.hasVerificationBadges",
            )?,
        };

        let e = &self.error_handling;
        let be = base.map(|b| b.error_handling);
        let error_handling = ErrorHandling {
            has_graceful_degradation: pick(
                e.has_graceful_degradation,
                be.map(|b| b.has_graceful_degradation),
                "errorHandling.hasGracefulDegradation",
            )?,
            has_timeout_handling: pick(
                e.has_timeout_handling,
                be.map(|b| b.has_timeout_handling),
                "errorHandling.hasTimeoutHandling",
            )?,
            has_circuit_breaker: pick(
                e.has_circuit_breaker,
                be.map(|b| b.has_circuit_breaker),
                "errorHandling.hasCircuitBreaker",
            )?,
            has_human_handoff: pick(
                e.has_human_handoff,
                be.map(|b| b.has_human_handoff),
                "errorHandling.hasHumanHandoff",
            )?,
            error_state_count: match e.error_state_count {
                Some(count) => u32::try_from(count)
                    .map_err(|_| ValidationError::ErrorStateCountOutOfRange(count))?,
                None => pick(
                    None,
                    be.map(|b| b.error_state_count),
                    "errorHandling.errorStateCount",
                )?,
            },
        };

        let d = &self.dynamic_content;
        let bd = base.map(|b| b.dynamic_content);
        let dynamic_content = DynamicContent {
            handles_variable_length: pick(
                d.handles_variable_length,
                bd.map(|b| b.handles_variable_length),
                "dynamicContent.handlesVariableLength",
            )?,
            supports_multi_modal: pick(
                d.supports_multi_modal,
                bd.map(|b| b.supports_multi_modal),
                "dynamicContent.supportsMultiModal",
            )?,
            has_token_limit_management: pick(
                d.has_token_limit_management,
                bd.map(|b| b.has_token_limit_management),
                "dynamicContent.hasTokenLimitManagement",
            )?,
            supports_content_switching: pick(
                d.supports_content_switching,
                bd.map(|b| b.supports_content_switching),
                "dynamicContent.supportsContentSwitching",
            )?,
        };

        let i = &self.interaction_patterns;
        let bi = base.map(|b| b.interaction_patterns);
        let interaction_patterns = InteractionPatterns {
            has_intent_construction: pick(
                i.has_intent_construction,
                bi.map(|b| b.has_intent_construction),
                "interactionPatterns.hasIntentConstruction",
            )?,
            has_refinement_journey: pick(
                i.has_refinement_journey,
                bi.map(|b| b.has_refinement_journey),
                "interactionPatterns.hasRefinementJourney",
            )?,
            has_contextual_actions: pick(
                i.has_contextual_actions,
                bi.map(|b| b.has_contextual_actions),
                "interactionPatterns.hasContextualActions",
            )?,
            has_feedback_loops: pick(
                i.has_feedback_loops,
                bi.map(|b| b.has_feedback_loops),
                "interactionPatterns.hasFeedbackLoops",
            )?,
        };

        Ok(MetricsRecord {
            streaming_readiness,
            confidence_handling,
            error_handling,
            dynamic_content,
            interaction_patterns,
        })
    }
}

impl From<&MetricsRecord> for MetricsDraft {
    fn from(m: &MetricsRecord) -> Self {
        let s = m.streaming_readiness;
        let c = m.confidence_handling;
        let e = m.error_handling;
        let d = m.dynamic_content;
        let i = m.interaction_patterns;
        Self {
            streaming_readiness: StreamingDraft {
                has_fixed_height: Some(s.has_fixed_height),
                has_overflow_handling: Some(s.has_overflow_handling),
                supports_streaming: Some(s.supports_streaming),
                has_progressive_render: Some(s.has_progressive_render),
            },
            confidence_handling: ConfidenceDraft {
                has_confidence_indicators: Some(c.has_confidence_indicators),
                has_hallucination_detection: Some(c.has_hallucination_detection),
                has_ambiguity_states: Some(c.has_ambiguity_states),
                has_verification_badges: Some(c.has_verification_badges),
            },
            error_handling: ErrorDraft {
                has_graceful_degradation: Some(e.has_graceful_degradation),
                has_timeout_handling: Some(e.has_timeout_handling),
                has_circuit_breaker: Some(e.has_circuit_breaker),
                has_human_handoff: Some(e.has_human_handoff),
                error_state_count: Some(i64::from(e.error_state_count)),
            },
            dynamic_content: DynamicDraft {
                handles_variable_length: Some(d.handles_variable_length),
                supports_multi_modal: Some(d.supports_multi_modal),
                has_token_limit_management: Some(d.has_token_limit_management),
                supports_content_switching: Some(d.supports_content_switching),
            },
            interaction_patterns: InteractionDraft {
                has_intent_construction: Some(i.has_intent_construction),
                has_refinement_journey: Some(i.has_refinement_journey),
                has_contextual_actions: Some(i.has_contextual_actions),
                has_feedback_loops: Some(i.has_feedback_loops),
            },
        }
    }
}

/// Dependencies arrive either as a list or as the comma separated string a
/// form field produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependencies {
    List(Vec<String>),
    Csv(String),
}

impl Default for Dependencies {
    fn default() -> Self {
        Dependencies::List(Vec::new())
    }
}

impl Dependencies {
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Dependencies::List(items) => items.iter().map(String::as_str).collect(),
            Dependencies::Csv(line) => line.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ComponentSubmission {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub component_type: Option<ComponentType>,
    pub instances: Option<u32>,
    pub dependencies: Dependencies,
    pub team: Option<String>,
    pub last_modified: Option<NaiveDate>,
    /// Catalogue id whose metrics fill any field `metrics` leaves out.
    pub template: Option<String>,
    pub metrics: MetricsDraft,
}

impl ComponentSubmission {
    pub fn from_template(id: &str) -> Self {
        Self {
            template: Some(id.to_string()),
            ..Default::default()
        }
    }

    pub fn into_parts(
        self,
        today: NaiveDate,
        defaults: &Defaults,
    ) -> Result<(ComponentIdentity, MetricsRecord), ValidationError> {
        let template = match self.template.as_deref() {
            Some(id) => Some(
                find_template(id).ok_or_else(|| ValidationError::UnknownTemplate(id.to_string()))?,
            ),
            None => None,
        };

        let metrics = match template {
            Some(t) => self.metrics.overlay(&t.metrics)?,
            None => self.metrics.validate()?,
        };

        let name = self
            .name
            .or_else(|| template.map(|t| t.name.to_string()))
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or(ValidationError::BlankName)?;

        let team = self
            .team
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| defaults.team.clone());

        let component_type = self
            .component_type
            .or_else(|| template.map(|t| t.component_type))
            .unwrap_or(defaults.component_type);

        let identity = ComponentIdentity {
            name,
            component_type,
            instances: self.instances.unwrap_or(0),
            dependencies: self.dependencies.names(),
            team,
            last_modified: self.last_modified.unwrap_or(today),
        };

        Ok((identity, metrics))
    }
}

fn ron_options() -> ron::Options {
    ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

fn is_list(content: &str) -> bool {
    content.trim_start().starts_with('[')
}

/// Parses one submission or a list of them from JSON or RON text.
pub fn parse_submissions(content: &str, format: InputFormat) -> Result<Vec<ComponentSubmission>> {
    match format {
        InputFormat::Json if is_list(content) => {
            serde_json::from_str(content).context("invalid JSON submission list")
        }
        InputFormat::Json => serde_json::from_str::<ComponentSubmission>(content)
            .map(|one| vec![one])
            .context("invalid JSON submission"),
        InputFormat::Ron if is_list(content) => ron_options()
            .from_str(content)
            .context("invalid RON submission list"),
        InputFormat::Ron => ron_options()
            .from_str::<ComponentSubmission>(content)
            .map(|one| vec![one])
            .context("invalid RON submission"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Ron,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(InputFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(InputFormat::Ron),
            _ => bail!("unsupported input file {} (expected .json or .ron)", path.display()),
        }
    }
}

pub fn load_submissions(path: &Path) -> Result<Vec<ComponentSubmission>> {
    let format = InputFormat::from_path(path)?;
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_submissions(&content, format).with_context(|| format!("in {}", path.display()))
}
