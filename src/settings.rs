use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

use crate::scoring::ComponentType;

static SETTINGS: OnceLock<Settings> = OnceLock::new();

pub const DEFAULT_SETTINGS_PATH: &str = "settings.default.ron";
pub const OVERRIDE_SETTINGS_PATH: &str = "settings.ron";
pub const SETTINGS_PATH_ENV: &str = "READINESS_DEBT_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub report: Report,
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub story_points_per_sprint: u64,
    pub sprint_length_weeks: u64,
    pub top_issue_limit: usize,
    pub top_component_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    pub team: String,
    pub component_type: ComponentType,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            report: Report {
                story_points_per_sprint: 20,
                sprint_length_weeks: 2,
                top_issue_limit: 5,
                top_component_limit: 5,
            },
            defaults: Defaults {
                team: "Unknown".to_string(),
                component_type: ComponentType::Interactive,
            },
        }
    }
}

impl Settings {
    pub fn load() -> &'static Settings {
        SETTINGS.get_or_init(Self::load_from_files)
    }

    fn load_from_files() -> Settings {
        let override_path = env::var(SETTINGS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(OVERRIDE_SETTINGS_PATH));

        let settings = Self::read(Path::new(DEFAULT_SETTINGS_PATH)).unwrap_or_default();
        Self::read(&override_path).unwrap_or(settings)
    }

    fn read(path: &Path) -> Option<Settings> {
        if !path.exists() {
            return None;
        }

        let parsed = fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Self::parse(&content));

        match parsed {
            Ok(settings) => Some(settings),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
                None
            }
        }
    }

    pub fn parse(content: &str) -> anyhow::Result<Settings> {
        Ok(ron::from_str(content)?)
    }
}

pub fn settings() -> &'static Settings {
    Settings::load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.report.story_points_per_sprint, 20);
        assert_eq!(s.report.sprint_length_weeks, 2);
        assert_eq!(s.defaults.team, "Unknown");
        assert_eq!(s.defaults.component_type, ComponentType::Interactive);
    }

    #[test]
    fn test_parse_ron() {
        let content = r#"(
            report: (
                story_points_per_sprint: 30,
                sprint_length_weeks: 3,
                top_issue_limit: 3,
                top_component_limit: 10,
            ),
            defaults: (
                team: "Design Systems",
                component_type: display,
            ),
        )"#;
        let s = Settings::parse(content).unwrap();
        assert_eq!(s.report.story_points_per_sprint, 30);
        assert_eq!(s.defaults.component_type, ComponentType::Display);
    }

    #[test]
    fn test_default_file_matches_defaults() {
        let content = include_str!("../settings.default.ron");
        assert_eq!(Settings::parse(content).unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Settings::parse("(report: nope)").is_err());
    }
}
