//! Configuration Management
//!
//! Optional user configuration for gcpdraw, read from
//! `<config dir>/gcpdraw/config.json`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::diagram::builder::DEFAULT_TITLE;
use crate::inventory::collector::DEFAULT_RESERVED_ROLE_PREFIX;

/// Output directory used when neither CLI nor config name one
pub const DEFAULT_OUTPUT_DIR: &str = "../output";

/// User configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Project to inventory
    #[serde(default)]
    pub project_id: Option<String>,
    /// Directory the diagram is written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Diagram title
    #[serde(default)]
    pub title: Option<String>,
    /// Roles with IDs starting with this prefix are left off the diagram
    #[serde(default)]
    pub reserved_role_prefix: Option<String>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gcpdraw").join("config.json"))
    }

    /// Load configuration from disk, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Could not read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get effective project (CLI > config > environment/gcloud default)
    pub fn effective_project(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string)
            .or_else(|| self.project_id.clone())
            .or_else(crate::gcp::auth::get_default_project)
    }

    /// Get effective output directory (CLI > config > default)
    pub fn effective_output_dir(&self, cli: Option<&Path>) -> PathBuf {
        cli.map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    /// Get effective title (CLI > config > default)
    pub fn effective_title(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    /// Get effective reserved role prefix (config > default)
    pub fn effective_reserved_role_prefix(&self) -> String {
        self.reserved_role_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_RESERVED_ROLE_PREFIX.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "project_id": "web-prod-42", "reserved_role_prefix": "sys" }"#,
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.project_id.as_deref(), Some("web-prod-42"));
        assert_eq!(config.reserved_role_prefix.as_deref(), Some("sys"));
        assert_eq!(config.output_dir, None);
        assert_eq!(config.title, None);
    }

    #[test]
    fn test_precedence() {
        let config = Config {
            project_id: Some("from-config".to_string()),
            output_dir: Some(PathBuf::from("cfg-out")),
            title: Some("Staging".to_string()),
            reserved_role_prefix: None,
        };

        assert_eq!(
            config.effective_project(Some("from-cli")).as_deref(),
            Some("from-cli")
        );
        assert_eq!(
            config.effective_project(None).as_deref(),
            Some("from-config")
        );
        assert_eq!(
            config.effective_output_dir(Some(Path::new("cli-out"))),
            PathBuf::from("cli-out")
        );
        assert_eq!(config.effective_output_dir(None), PathBuf::from("cfg-out"));
        assert_eq!(config.effective_title(None), "Staging");
        assert_eq!(config.effective_reserved_role_prefix(), "goog");

        let empty = Config::default();
        assert_eq!(empty.effective_output_dir(None), PathBuf::from("../output"));
        assert_eq!(empty.effective_title(None), DEFAULT_TITLE);
    }
}
