use serde::{Deserialize, Serialize};
use std::fmt::Write;
use strum::IntoEnumIterator;

use chrono::NaiveDate;

use crate::scoring::{AnalyzedComponent, Dimension, DimensionScores, IssueKind, Severity};
use crate::settings::Report as ReportSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityComponent {
    pub name: String,
    pub debt_score: u8,
    pub remediation_effort: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveReport {
    pub total_components: usize,
    pub average_debt_score: u8,
    pub severity_counts: SeverityCounts,
    pub total_remediation_effort: u64,
    pub estimated_weeks: u64,
    pub top_issues: Vec<(IssueKind, usize)>,
    pub highest_priority: Vec<PriorityComponent>,
    pub dimension_averages: Vec<(Dimension, f64)>,
    pub recommendations: Vec<String>,
}

/// Whole sprints needed for `effort`, expressed in weeks.
pub fn estimate_weeks(effort: u64, settings: &ReportSettings) -> u64 {
    let sprint_points = settings.story_points_per_sprint.max(1);
    effort.div_ceil(sprint_points) * settings.sprint_length_weeks
}

fn average_debt(components: &[AnalyzedComponent]) -> u8 {
    if components.is_empty() {
        return 0;
    }
    let total: u64 = components.iter().map(|c| u64::from(c.debt_score)).sum();
    (total as f64 / components.len() as f64).round() as u8
}

/// Occurrences per issue kind, most frequent first. Equal counts keep the
/// order in which the kind was first seen.
fn top_issue_kinds(components: &[AnalyzedComponent], limit: usize) -> Vec<(IssueKind, usize)> {
    let mut counts: Vec<(IssueKind, usize)> = Vec::new();
    for issue in components.iter().flat_map(|c| &c.issues) {
        match counts.iter_mut().find(|(kind, _)| *kind == issue.kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((issue.kind, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

fn highest_priority(components: &[AnalyzedComponent], limit: usize) -> Vec<PriorityComponent> {
    let mut ranked: Vec<&AnalyzedComponent> = components.iter().collect();
    ranked.sort_by(|a, b| b.debt_score.cmp(&a.debt_score));
    ranked
        .into_iter()
        .take(limit)
        .map(|c| PriorityComponent {
            name: c.name().to_string(),
            debt_score: c.debt_score,
            remediation_effort: c.remediation_effort,
        })
        .collect()
}

pub fn dimension_averages(scores: &[DimensionScores]) -> Vec<(Dimension, f64)> {
    Dimension::iter()
        .map(|dimension| {
            let average = if scores.is_empty() {
                0.0
            } else {
                let total: u64 = scores.iter().map(|s| u64::from(s.get(dimension))).sum();
                total as f64 / scores.len() as f64
            };
            (dimension, average)
        })
        .collect()
}

fn recommendations(critical: usize, effort: u64, weeks: u64) -> Vec<String> {
    vec![
        format!(
            "Prioritize fixing {critical} critical components immediately to prevent production failures"
        ),
        format!("Allocate {effort} story points across {weeks} weeks for full remediation"),
        "Focus on streaming readiness - this is the most common gap across components".to_string(),
        "Implement circuit breaker patterns to prevent cascade failures".to_string(),
        "Add confidence indicators to all AI-generated content displays".to_string(),
        "Establish human handoff protocols for all AI interactions".to_string(),
    ]
}

impl ExecutiveReport {
    pub fn build(components: &[AnalyzedComponent], settings: &ReportSettings) -> Self {
        let mut severity_counts = SeverityCounts::default();
        for component in components {
            severity_counts.bump(component.severity);
        }

        let total_remediation_effort: u64 = components.iter().map(|c| c.remediation_effort).sum();
        let estimated_weeks = estimate_weeks(total_remediation_effort, settings);
        let scores: Vec<DimensionScores> = components.iter().map(|c| c.dimension_scores).collect();

        Self {
            total_components: components.len(),
            average_debt_score: average_debt(components),
            severity_counts,
            total_remediation_effort,
            estimated_weeks,
            top_issues: top_issue_kinds(components, settings.top_issue_limit),
            highest_priority: highest_priority(components, settings.top_component_limit),
            dimension_averages: dimension_averages(&scores),
            recommendations: recommendations(
                severity_counts.critical,
                total_remediation_effort,
                estimated_weeks,
            ),
        }
    }

    /// Lowest average dimension, if any component was analyzed.
    pub fn weakest_dimension(&self) -> Option<Dimension> {
        if self.total_components == 0 {
            return None;
        }
        self.dimension_averages
            .iter()
            .fold(None, |weakest: Option<(Dimension, f64)>, &(dimension, avg)| match weakest {
                Some((_, lowest)) if lowest <= avg => weakest,
                _ => Some((dimension, avg)),
            })
            .map(|(dimension, _)| dimension)
    }

    pub fn render_text(&self, generated: NaiveDate) -> String {
        let mut out = String::new();
        let _ = self.write_text(&mut out, generated);
        out
    }

    fn write_text(&self, out: &mut String, generated: NaiveDate) -> std::fmt::Result {
        writeln!(out, "AI DESIGN DEBT CALCULATOR - EXECUTIVE REPORT")?;
        writeln!(out, "Generated: {}", generated.format("%Y-%m-%d"))?;
        writeln!(out)?;

        writeln!(out, "OVERVIEW")?;
        writeln!(out, "========")?;
        writeln!(out, "Total Components Analyzed: {}", self.total_components)?;
        writeln!(out, "Average Debt Score: {}", self.average_debt_score)?;
        writeln!(
            out,
            "Total Remediation Effort: {} story points",
            self.total_remediation_effort
        )?;
        writeln!(out, "Estimated Timeline: {} weeks", self.estimated_weeks)?;
        writeln!(out)?;

        writeln!(out, "SEVERITY BREAKDOWN")?;
        writeln!(out, "==================")?;
        for severity in Severity::iter().rev() {
            let label: &'static str = severity.into();
            writeln!(
                out,
                "{}{}: {} components",
                label[..1].to_uppercase(),
                &label[1..],
                self.severity_counts.get(severity)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "TOP ISSUES")?;
        writeln!(out, "==========")?;
        for (kind, count) in &self.top_issues {
            writeln!(out, "- {kind}: {count} occurrences")?;
        }
        writeln!(out)?;

        writeln!(out, "HIGHEST PRIORITY COMPONENTS")?;
        writeln!(out, "============================")?;
        for (idx, c) in self.highest_priority.iter().enumerate() {
            writeln!(
                out,
                "{}. {} (Score: {}, Effort: {} SP)",
                idx + 1,
                c.name,
                c.debt_score,
                c.remediation_effort
            )?;
        }
        writeln!(out)?;

        writeln!(out, "RECOMMENDATIONS")?;
        writeln!(out, "===============")?;
        for (idx, r) in self.recommendations.iter().enumerate() {
            if idx + 1 == self.recommendations.len() {
                write!(out, "{}. {}", idx + 1, r)?;
            } else {
                writeln!(out, "{}. {}", idx + 1, r)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::analyze;
    use crate::settings::Settings;
    use crate::templates::{find_template, templates};
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn analyzed(ids: &[&str]) -> Vec<AnalyzedComponent> {
        ids.iter()
            .map(|id| {
                let t = find_template(id).unwrap();
                analyze(t.identity("Unknown", today()), &t.metrics)
            })
            .collect()
    }

    fn settings() -> ReportSettings {
        Settings::default().report
    }

    #[test]
    fn test_estimate_weeks() {
        let s = settings();
        assert_eq!(estimate_weeks(0, &s), 0);
        assert_eq!(estimate_weeks(1, &s), 2);
        assert_eq!(estimate_weeks(20, &s), 2);
        assert_eq!(estimate_weeks(21, &s), 4);
    }

    #[test]
    fn test_empty_report() {
        let report = ExecutiveReport::build(&[], &settings());
        assert_eq!(report.total_components, 0);
        assert_eq!(report.average_debt_score, 0);
        assert_eq!(report.estimated_weeks, 0);
        assert!(report.top_issues.is_empty());
        assert!(report.weakest_dimension().is_none());
    }

    #[test]
    fn test_report_aggregates() {
        let components = analyzed(&["button", "notification", "ai-ready"]);
        let report = ExecutiveReport::build(&components, &settings());

        assert_eq!(report.total_components, 3);
        // (93 + 66 + 0) / 3 = 53
        assert_eq!(report.average_debt_score, 53);
        assert_eq!(
            report.severity_counts,
            SeverityCounts {
                critical: 1,
                high: 1,
                medium: 0,
                low: 1,
            }
        );
        let effort: u64 = components.iter().map(|c| c.remediation_effort).sum();
        assert_eq!(report.total_remediation_effort, effort);
        assert_eq!(report.estimated_weeks, estimate_weeks(effort, &settings()));
        assert_eq!(report.highest_priority[0].name, "Button");
        assert_eq!(report.highest_priority[2].name, "AI-Ready Component");
    }

    #[test]
    fn test_top_issues_ties_keep_first_seen_order() {
        let components = analyzed(&["button", "notification"]);
        let report = ExecutiveReport::build(&components, &settings());

        assert_eq!(report.top_issues.len(), 5);
        assert_eq!(report.top_issues[0], (IssueKind::AddStreamingState, 2));
        assert_eq!(report.top_issues[1], (IssueKind::AddProgressiveRender, 2));
        assert!(report.top_issues.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_weakest_dimension_across_catalogue() {
        let components: Vec<_> = templates()
            .iter()
            .map(|t| analyze(t.identity("Unknown", today()), &t.metrics))
            .collect();
        let report = ExecutiveReport::build(&components, &settings());
        assert_eq!(
            report.weakest_dimension(),
            Some(Dimension::ConfidenceHandling)
        );
    }

    #[test]
    fn test_recommendations_interpolate_totals() {
        let components = analyzed(&["button"]);
        let report = ExecutiveReport::build(&components, &settings());

        assert_eq!(report.recommendations.len(), 6);
        assert!(report.recommendations[0].contains("1 critical components"));
        assert_eq!(
            report.recommendations[1],
            "Allocate 87 story points across 10 weeks for full remediation"
        );
    }

    #[test]
    fn test_render_text_sections() {
        let components = analyzed(&["button", "card"]);
        let text = ExecutiveReport::build(&components, &settings()).render_text(today());

        assert!(text.starts_with("AI DESIGN DEBT CALCULATOR - EXECUTIVE REPORT\nGenerated: 2025-06-02"));
        assert!(text.contains("Total Components Analyzed: 2"));
        // Card lands at 79, one point under critical.
        assert!(text.contains("Critical: 1 components"));
        assert!(text.contains("High: 1 components"));
        assert!(text.contains("Low: 0 components"));
        assert!(text.contains("- addStreamingState: 2 occurrences"));
        assert!(text.contains("1. Button (Score: 93, Effort: 87 SP)"));
        assert!(text.ends_with("6. Establish human handoff protocols for all AI interactions"));
    }
}
