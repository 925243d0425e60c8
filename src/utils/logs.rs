use console::{measure_text_width, Style};
use std::path::Path;

use crate::report::ExecutiveReport;
use crate::scoring::{AnalyzedComponent, Severity};
use crate::templates::ComponentTemplate;

pub const TREE_BRANCH: char = '\u{251C}';
pub const TREE_END: char = '\u{2514}';
pub const TREE_HORIZ: char = '\u{2500}';
pub const TREE_VERT: char = '\u{2502}';

const TREE_PREFIX_WIDTH: usize = 4;
const VALUE_COLUMN: usize = 25;

fn tree_branch() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_BRANCH, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_end() -> String {
    dim()
        .apply_to(format!("{}{}{} ", TREE_END, TREE_HORIZ, TREE_HORIZ))
        .to_string()
}

fn tree_indent() -> String {
    dim().apply_to(format!("{}   ", TREE_VERT)).to_string()
}

fn tree_blank() -> String {
    " ".repeat(TREE_PREFIX_WIDTH)
}

fn branch_for(index: usize, count: usize) -> String {
    if index + 1 == count {
        tree_end()
    } else {
        tree_branch()
    }
}

pub fn dim() -> Style {
    Style::new().dim()
}

fn blue() -> Style {
    Style::new().blue()
}

fn magenta() -> Style {
    Style::new().magenta()
}

fn cyan() -> Style {
    Style::new().cyan()
}

fn green() -> Style {
    Style::new().green()
}

fn red() -> Style {
    Style::new().red()
}

fn yellow() -> Style {
    Style::new().yellow()
}

fn bold() -> Style {
    Style::new().bold()
}

fn analysis_prefix() -> String {
    blue().apply_to("[ANALYSIS]").to_string()
}

fn report_prefix() -> String {
    magenta().apply_to("[REPORT]").to_string()
}

fn error_prefix() -> String {
    red().apply_to("[ERROR]").to_string()
}

pub fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Critical => red().bold(),
        Severity::High => yellow().bold(),
        Severity::Medium => yellow(),
        Severity::Low => green(),
    }
}

fn score_style(score: u8) -> Style {
    if score >= 75 {
        green()
    } else if score >= 40 {
        yellow()
    } else {
        red()
    }
}

pub fn pad_label(label: &str, depth: usize) -> String {
    let prefix_width = depth * TREE_PREFIX_WIDTH;
    let target_width = VALUE_COLUMN.saturating_sub(prefix_width);
    let current_width = measure_text_width(label);
    if current_width < target_width {
        format!("{}{}", label, " ".repeat(target_width - current_width))
    } else {
        format!("{} ", label)
    }
}

pub fn format_component(component: &AnalyzedComponent) -> String {
    let mut lines: Vec<String> = Vec::new();
    let identity = &component.identity;

    lines.push(format!(
        "{} {} {}",
        analysis_prefix(),
        bold().apply_to(&identity.name),
        dim().apply_to(format!(
            "({}, {} instances, team {})",
            identity.component_type, identity.instances, identity.team
        ))
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("DIMENSIONS")));
    let dimensions: Vec<_> = component.dimension_scores.iter().collect();
    for (i, (dimension, score)) in dimensions.iter().enumerate() {
        lines.push(format!(
            "{}{} {} {}",
            branch_for(i, dimensions.len()),
            pad_label(&dimension.to_string(), 1),
            score_style(*score).apply_to(format!("{score:>3}")),
            dim().apply_to(format!("x{:.2}", dimension.weight()))
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("DEBT")));
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("score", 1),
        bold().apply_to(component.debt_score)
    ));
    lines.push(format!(
        "{}{} {}",
        tree_end(),
        pad_label("severity", 1),
        severity_style(component.severity).apply_to(component.severity)
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("ISSUES")));
    if component.issues.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("none")));
    } else {
        let count = component.issues.len();
        for (i, issue) in component.issues.iter().enumerate() {
            let last = i + 1 == count;
            lines.push(format!(
                "{}{} {} {}",
                branch_for(i, count),
                severity_style(issue.severity).apply_to(format!("[{}]", issue.severity)),
                issue.description,
                dim().apply_to(format!("({} SP)", issue.effort))
            ));
            let indent = if last { tree_blank() } else { tree_indent() };
            lines.push(format!(
                "{}{}{}",
                indent,
                tree_end(),
                dim().apply_to(&issue.recommendation)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("RESULT")));
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("issues", 1),
        bold().apply_to(component.issues.len())
    ));
    lines.push(format!(
        "{}{} {}",
        tree_end(),
        pad_label("remediation", 1),
        cyan().apply_to(format!("{} SP", component.remediation_effort))
    ));

    lines.join("\n")
}

pub fn log_component(component: &AnalyzedComponent) {
    println!("{}\n", format_component(component));
}

pub fn format_report(report: &ExecutiveReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "{} {} components analyzed",
        report_prefix(),
        bold().apply_to(report.total_components)
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("OVERVIEW")));
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("average debt", 1),
        bold().apply_to(report.average_debt_score)
    ));
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("effort", 1),
        cyan().apply_to(format!("{} SP", report.total_remediation_effort))
    ));
    lines.push(format!(
        "{}{} {}",
        tree_branch(),
        pad_label("timeline", 1),
        cyan().apply_to(format!("~{} weeks", report.estimated_weeks))
    ));
    let weakest = report
        .weakest_dimension()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    lines.push(format!(
        "{}{} {}",
        tree_end(),
        pad_label("weakest dimension", 1),
        yellow().apply_to(weakest)
    ));

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("SEVERITY")));
    let severities = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];
    for (i, severity) in severities.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            branch_for(i, severities.len()),
            pad_label(&severity.to_string(), 1),
            severity_style(*severity).apply_to(report.severity_counts.get(*severity))
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("TOP ISSUES")));
    if report.top_issues.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("none")));
    }
    for (i, (kind, count)) in report.top_issues.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            branch_for(i, report.top_issues.len()),
            pad_label(&kind.to_string(), 1),
            dim().apply_to(format!("x{count}"))
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", bold().apply_to("PRIORITY")));
    if report.highest_priority.is_empty() {
        lines.push(format!("{}{}", tree_end(), dim().apply_to("none")));
    }
    for (i, c) in report.highest_priority.iter().enumerate() {
        lines.push(format!(
            "{}{} {} {}",
            branch_for(i, report.highest_priority.len()),
            pad_label(&c.name, 1),
            bold().apply_to(c.debt_score),
            dim().apply_to(format!("({} SP)", c.remediation_effort))
        ));
    }

    lines.join("\n")
}

pub fn log_report(report: &ExecutiveReport) {
    println!("{}\n", format_report(report));
}

pub fn log_report_written(path: &Path) {
    println!(
        "{} written to {}",
        report_prefix(),
        cyan().apply_to(path.display())
    );
}

pub fn log_templates(entries: &[(&ComponentTemplate, &AnalyzedComponent)]) {
    println!("{}", bold().apply_to("TEMPLATES"));
    for (i, (template, analyzed)) in entries.iter().enumerate() {
        println!(
            "{}{} {} {}",
            branch_for(i, entries.len()),
            pad_label(template.id, 1),
            severity_style(analyzed.severity).apply_to(format!("{:>3}", analyzed.debt_score)),
            dim().apply_to(template.description)
        );
    }
}

pub fn log_error(message: &str) {
    eprintln!("{} {}", error_prefix(), message);
}

pub fn log_dimmed(message: &str) {
    println!("{}", dim().apply_to(message));
}
