use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use readiness_debt::input::{load_submissions, ComponentSubmission};
use readiness_debt::report::ExecutiveReport;
use readiness_debt::scoring::{analyze, AnalyzedComponent};
use readiness_debt::settings::settings;
use readiness_debt::templates::{find_template, templates};
use readiness_debt::utils::{
    log_component, log_dimmed, log_error, log_report, log_report_written, log_templates,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn print_usage() {
    eprintln!("Usage: readiness-debt <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  analyze <source>... [--json]   Score each component and list its issues");
    eprintln!("  report <source>... [--out F]   Summarize all components in one report");
    eprintln!("  templates                      List the template catalogue");
    eprintln!();
    eprintln!("A <source> is a .json/.ron submission file or a template id.");
}

fn main() {
    dotenvy::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("readiness_debt=info".parse().expect("valid directive")),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        );
    set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        print_usage();
        process::exit(1);
    };

    let result = match command.as_str() {
        "analyze" => run_analyze(rest),
        "report" => run_report(rest),
        "templates" => run_templates(),
        "-h" | "--help" | "help" => {
            print_usage();
            Ok(())
        }
        other => Err(anyhow!("unknown command `{other}`")),
    };

    if let Err(e) = result {
        log_error(&format!("{e:#}"));
        process::exit(1);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn collect_submissions(sources: &[&String]) -> Result<Vec<ComponentSubmission>> {
    if sources.is_empty() {
        bail!("expected at least one submission file or template id");
    }

    let mut submissions = Vec::new();
    for source in sources {
        let path = Path::new(source.as_str());
        if path.is_file() {
            let loaded = load_submissions(path)?;
            info!(path = %path.display(), count = loaded.len(), "loaded submissions");
            submissions.extend(loaded);
        } else if find_template(source).is_some() {
            submissions.push(ComponentSubmission::from_template(source));
        } else {
            bail!("`{source}` is neither a readable file nor a known template");
        }
    }
    Ok(submissions)
}

fn analyze_all(sources: &[&String]) -> Result<Vec<AnalyzedComponent>> {
    let defaults = &settings().defaults;
    let today = today();

    collect_submissions(sources)?
        .into_iter()
        .enumerate()
        .map(|(idx, submission)| -> Result<AnalyzedComponent> {
            let label = submission
                .name
                .clone()
                .or_else(|| submission.template.clone())
                .unwrap_or_else(|| format!("#{}", idx + 1));
            let (identity, metrics) = submission
                .into_parts(today, defaults)
                .with_context(|| format!("invalid component {label}"))?;
            Ok(analyze(identity, &metrics))
        })
        .collect()
}

fn run_analyze(args: &[String]) -> Result<()> {
    let as_json = args.iter().any(|a| a == "--json");
    let sources: Vec<&String> = args.iter().filter(|a| *a != "--json").collect();

    let components = analyze_all(&sources)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&components)?);
        return Ok(());
    }

    for component in &components {
        log_component(component);
    }
    Ok(())
}

fn run_report(args: &[String]) -> Result<()> {
    let mut out: Option<PathBuf> = None;
    let mut sources: Vec<&String> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--out" || arg == "-o" {
            let path = iter.next().context("--out needs a file path")?;
            out = Some(PathBuf::from(path));
        } else {
            sources.push(arg);
        }
    }

    let components = analyze_all(&sources)?;
    let report = ExecutiveReport::build(&components, &settings().report);
    log_report(&report);

    if let Some(path) = out {
        fs::write(&path, report.render_text(today()))
            .with_context(|| format!("failed to write {}", path.display()))?;
        log_report_written(&path);
    }
    Ok(())
}

fn run_templates() -> Result<()> {
    let defaults = &settings().defaults;
    let today = today();

    let analyzed: Vec<AnalyzedComponent> = templates()
        .iter()
        .map(|t| analyze(t.identity(&defaults.team, today), &t.metrics))
        .collect();
    let entries: Vec<_> = templates().iter().zip(analyzed.iter()).collect();

    log_templates(&entries);
    log_dimmed("use a template id as a source for `analyze` or `report`");
    Ok(())
}
