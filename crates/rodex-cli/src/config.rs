//! Optional `.rodex.toml` configuration.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file structure for `.rodex.toml`.
///
/// Configuration files can be placed in:
/// - Project directory: `./.rodex.toml`
/// - User home directory: `~/.rodex.toml`
///
/// Precedence order (highest to lowest):
/// 1. Command-line arguments
/// 2. Project config (`./.rodex.toml`)
/// 3. User config (`~/.rodex.toml`)
/// 4. Built-in defaults
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Directory containing the documents to process.
    pub input_dir: Option<PathBuf>,
    /// Path of the pipe-delimited text export.
    pub text_output: Option<PathBuf>,
    /// Path of the spreadsheet export.
    pub xlsx_output: Option<PathBuf>,
    /// Skip the spreadsheet export entirely.
    pub no_xlsx: Option<bool>,
}

impl Config {
    /// Find and merge configuration files. A config that fails to load is
    /// reported as a warning and ignored; it never aborts the run.
    pub fn discover() -> Self {
        let user = dirs::home_dir()
            .map(|home| home.join(".rodex.toml"))
            .and_then(|path| Self::load_optional(&path));
        let project = Self::load_optional(Path::new(".rodex.toml"));
        Self::merge(user, project)
    }

    fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!(
                    "{} Failed to load config from {}: {e:#}",
                    "Warning:".yellow().bold(),
                    path.display()
                );
                None
            }
        }
    }

    /// Load configuration from a file.
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Merge two configs; later (project) values win over earlier (user).
    fn merge(user: Option<Self>, project: Option<Self>) -> Self {
        let mut merged = user.unwrap_or_default();

        if let Some(project) = project {
            if project.input_dir.is_some() {
                merged.input_dir = project.input_dir;
            }
            if project.text_output.is_some() {
                merged.text_output = project.text_output;
            }
            if project.xlsx_output.is_some() {
                merged.xlsx_output = project.xlsx_output;
            }
            if project.no_xlsx.is_some() {
                merged.no_xlsx = project.no_xlsx;
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            input_dir = "CRE"
            text_output = "out/extraction CRE.txt"
            xlsx_output = "out/extraction.xlsx"
            no_xlsx = true
            "#,
        )
        .unwrap();

        assert_eq!(config.input_dir, Some(PathBuf::from("CRE")));
        assert_eq!(config.no_xlsx, Some(true));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: Config = toml::from_str("input_dir = \"docs\"").unwrap();
        assert_eq!(config.input_dir, Some(PathBuf::from("docs")));
        assert_eq!(config.text_output, None);
        assert_eq!(config.no_xlsx, None);
    }

    #[test]
    fn test_merge_project_wins() {
        let user = Config {
            input_dir: Some(PathBuf::from("user-dir")),
            text_output: Some(PathBuf::from("user.txt")),
            ..Config::default()
        };
        let project = Config {
            input_dir: Some(PathBuf::from("project-dir")),
            ..Config::default()
        };

        let merged = Config::merge(Some(user), Some(project));
        assert_eq!(merged.input_dir, Some(PathBuf::from("project-dir")));
        // Fields the project config leaves unset fall through to the user
        // config.
        assert_eq!(merged.text_output, Some(PathBuf::from("user.txt")));
    }

    #[test]
    fn test_merge_with_nothing_loaded() {
        let merged = Config::merge(None, None);
        assert_eq!(merged, Config::default());
    }
}
