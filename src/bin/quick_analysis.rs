use chrono::Local;
use readiness_debt::quick::{quick_analyze, QuickAnswers};
use readiness_debt::settings::settings;
use readiness_debt::utils::{log_component, log_dimmed, log_error};
use std::env;
use std::process;

fn print_usage() {
    eprintln!("Usage: quick-analysis <name> [flags]");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --no-fixed-height     Component grows with its content");
    eprintln!("  --overflow            Handles overflowing content");
    eprintln!("  --streaming           Supports streaming updates");
    eprintln!("  --progressive         Renders progressively");
    eprintln!("  --confidence-ui       Shows confidence indicators");
    eprintln!("  --variable-length     Handles variable-length content");
    eprintln!("  --error-states <n>    Number of distinct error states (default 2)");
}

fn parse_args(args: &[String]) -> Result<QuickAnswers, String> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut answers = QuickAnswers::new("");

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--no-fixed-height" => answers.has_fixed_height = false,
            "--overflow" => answers.has_overflow_handling = true,
            "--streaming" => answers.supports_streaming = true,
            "--progressive" => answers.has_progressive_render = true,
            "--confidence-ui" => answers.has_confidence_ui = true,
            "--variable-length" => answers.handles_variable_length = true,
            "--error-states" | "-e" => {
                let value = iter.next().ok_or("--error-states needs a value")?;
                answers.error_state_count = value
                    .parse()
                    .map_err(|_| format!("invalid error state count `{value}`"))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            word => name_parts.push(word),
        }
    }

    answers.name = name_parts.join(" ");
    Ok(answers)
}

fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        process::exit(1);
    }

    let answers = match parse_args(&args) {
        Ok(answers) => answers,
        Err(e) => {
            log_error(&e);
            print_usage();
            process::exit(1);
        }
    };

    let today = Local::now().date_naive();
    match quick_analyze(&answers, &settings().defaults.team, today) {
        Ok(result) => {
            log_component(&result);
            log_dimmed("└─ quick estimate: unanswered capabilities count as missing");
        }
        Err(e) => {
            log_error(&e.to_string());
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let answers = parse_args(&args(&[
            "Chat",
            "Panel",
            "--no-fixed-height",
            "--streaming",
            "--error-states",
            "4",
        ]))
        .unwrap();

        assert_eq!(answers.name, "Chat Panel");
        assert!(!answers.has_fixed_height);
        assert!(answers.supports_streaming);
        assert!(!answers.has_overflow_handling);
        assert_eq!(answers.error_state_count, 4);
    }

    #[test]
    fn test_parse_rejects_negative_count() {
        let err = parse_args(&args(&["Chat", "--error-states", "-3"])).unwrap_err();
        assert!(err.contains("-3"));
    }

    #[test]
    fn test_parse_rejects_unknown_flag() {
        assert!(parse_args(&args(&["Chat", "--fast"])).is_err());
    }
}
