use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::debug;

use super::composite::{composite_debt, round_debt};
use super::dimensions::DimensionScores;
use super::issues::{detect_issues, total_effort, Issue};
use super::metrics::MetricsRecord;
use super::severity::Severity;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ComponentType {
    #[default]
    Interactive,
    Display,
    Input,
    Layout,
    Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentIdentity {
    pub name: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub instances: u32,
    pub dependencies: Vec<String>,
    pub team: String,
    pub last_modified: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedComponent {
    #[serde(flatten)]
    pub identity: ComponentIdentity,
    pub metrics: MetricsRecord,
    pub dimension_scores: DimensionScores,
    pub debt_score: u8,
    pub severity: Severity,
    pub issues: Vec<Issue>,
    pub remediation_effort: u64,
}

impl AnalyzedComponent {
    pub fn name(&self) -> &str {
        &self.identity.name
    }
}

/// Scores, classifies and inspects one component in a single pass.
pub fn analyze(identity: ComponentIdentity, metrics: &MetricsRecord) -> AnalyzedComponent {
    let dimension_scores = DimensionScores::from_metrics(metrics);
    let debt_score = round_debt(composite_debt(&dimension_scores));
    let severity = Severity::from_debt(debt_score);
    let issues = detect_issues(metrics);
    let remediation_effort = total_effort(&issues);

    debug!(
        component = %identity.name,
        debt_score,
        %severity,
        issues = issues.len(),
        remediation_effort,
        "analyzed component"
    );

    AnalyzedComponent {
        identity,
        metrics: *metrics,
        dimension_scores,
        debt_score,
        severity,
        issues,
        remediation_effort,
    }
}
