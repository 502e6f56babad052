//! Configuration file support for pr-vuln-gate.
//!
//! Provides YAML-based configuration through `pr-vuln-gate.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Component, Path};

use crate::application::dto::{InstallCommand, OutputStyle, Project};
use crate::shared::error::GateError;
use crate::shared::security::{validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "pr-vuln-gate.yml";

/// Deployment environment checked by `verify-environment` by default
pub const DEFAULT_ENVIRONMENT: &str = "pr-vuln-gate";

const DEFAULT_SCANNER_COMMAND: &str = "jf";
/// `--fail=false` keeps the audit exit status at 0 when it finds issues
const DEFAULT_SCANNER_ARGS: [&str; 3] = ["audit", "--format=json", "--fail=false"];

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub fail_on_security_issues: Option<bool>,
    pub output_style: Option<String>,
    pub environment: Option<String>,
    pub scanner: Option<ScannerConfig>,
    #[serde(default)]
    pub projects: Vec<ProjectConfig>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// The scanner CLI and its fixed arguments.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_SCANNER_COMMAND.to_string(),
            args: DEFAULT_SCANNER_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One project entry.
#[derive(Debug, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub working_dirs: Vec<String>,
    pub install_command: Option<String>,
    #[serde(default)]
    pub watches: Vec<String>,
    pub project_key: Option<String>,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    pub fn fail_on_security_issues(&self) -> bool {
        self.fail_on_security_issues.unwrap_or(false)
    }

    pub fn output_style(&self) -> Result<OutputStyle> {
        match &self.output_style {
            None => Ok(OutputStyle::default()),
            Some(style) => style
                .parse::<OutputStyle>()
                .map_err(|e| GateError::configuration(e).into()),
        }
    }

    pub fn environment(&self) -> &str {
        self.environment
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_ENVIRONMENT)
    }

    pub fn scanner(&self) -> ScannerConfig {
        self.scanner.clone().unwrap_or_default()
    }

    /// Projects to scan; without any entry the repository root is one project
    pub fn projects(&self) -> Vec<Project> {
        if self.projects.is_empty() {
            return vec![Project::default()];
        }

        self.projects
            .iter()
            .map(|p| Project {
                working_dirs: p.working_dirs.clone(),
                install_command: p.install_command.as_deref().and_then(InstallCommand::parse),
                watches: p.watches.clone(),
                project_key: p.project_key.clone().unwrap_or_default(),
            })
            .collect()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file", MAX_CONFIG_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if std::fs::symlink_metadata(&config_path).is_err() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    config.output_style()?;

    if let Some(scanner) = &config.scanner {
        if scanner.command.trim().is_empty() {
            return Err(GateError::configuration("scanner.command must not be empty").into());
        }
    }

    for (i, project) in config.projects.iter().enumerate() {
        for dir in &project.working_dirs {
            validate_working_dir(i, dir)?;
        }
        if project.watches.iter().any(|w| w.trim().is_empty()) {
            return Err(GateError::configuration(format!(
                "projects[{}].watches must not contain empty names",
                i
            ))
            .into());
        }
        if let Some(command) = &project.install_command {
            if command.trim().is_empty() {
                return Err(GateError::configuration(format!(
                    "projects[{}].install_command must not be blank; remove it to skip installing",
                    i
                ))
                .into());
            }
        }
    }
    Ok(())
}

/// Working directories are relative paths inside the repository.
fn validate_working_dir(project_index: usize, dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(GateError::configuration(format!(
            "projects[{}].working_dirs must not contain empty entries",
            project_index
        ))
        .into());
    }

    let escapes = Path::new(dir)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes {
        return Err(GateError::configuration(format!(
            "projects[{}].working_dirs entry '{}' must be a relative path inside the repository",
            project_index, dir
        ))
        .into());
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
    for (i, project) in config.projects.iter().enumerate() {
        for key in project.unknown_fields.keys() {
            tracing::warn!(project = i, field = %key, "Unknown project field will be ignored");
        }
    }
}
