//! Project-level configuration support
//!
//! Loads per-project configuration from `async-naming.toml` or
//! `.async-naming.json` in the configuration directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # async-naming.toml
//!
//! [rule]
//! enabled = true
//! severity = "low"  # Override default severity (info)
//!
//! [exclude]
//! paths = ["generated/", "**/Migrations/**"]
//! names = ["Main"]
//!
//! [defaults]
//! format = "text"
//! fail_on = "low"
//! ```

use crate::models::{Declaration, Severity};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "async-naming.toml";
pub const JSON_CONFIG_FILE_NAME: &str = ".async-naming.json";

/// Project-level configuration loaded from async-naming.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Convention rule settings
    #[serde(default)]
    pub rule: RuleConfig,

    /// Path and identifier exclusions
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Settings for the suffix convention rule
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RuleConfig {
    /// Whether the rule is enabled (default: true)
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Override the default severity (critical, high, medium, low, info)
    #[serde(default)]
    pub severity: Option<Severity>,
}

/// Exclusion configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ExcludeConfig {
    /// Paths/patterns whose declarations are never reported
    #[serde(default)]
    pub paths: Vec<String>,

    /// Exact identifiers that are never reported
    #[serde(default)]
    pub names: Vec<String>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, sarif)
    #[serde(default)]
    pub format: Option<String>,

    /// Fail-on severity threshold for CI
    #[serde(default)]
    pub fail_on: Option<Severity>,
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `async-naming.toml`
/// 2. `.async-naming.json`
///
/// Returns default configuration if no config file is found or the file
/// cannot be parsed.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}

impl ProjectConfig {
    /// Whether the rule is enabled (defaults to true if not specified)
    pub fn is_rule_enabled(&self) -> bool {
        self.rule.enabled.unwrap_or(true)
    }

    /// Severity override for the rule (if any)
    pub fn severity_override(&self) -> Option<Severity> {
        self.rule.severity
    }

    /// Check if a path should be excluded
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude
            .paths
            .iter()
            .any(|pattern| glob_match(pattern, &path_str))
    }

    /// Check if a declaration is excluded by name or by path
    pub fn is_excluded(&self, decl: &Declaration) -> bool {
        if self.exclude.names.iter().any(|n| n == &decl.name) {
            return true;
        }
        decl.file
            .as_deref()
            .map(|file| self.should_exclude(file))
            .unwrap_or(false)
    }
}

/// Simple glob pattern matching
pub fn glob_match(pattern: &str, path: &str) -> bool {
    // **/X/** matches if path contains X as a directory
    if pattern.starts_with("**/") && pattern.ends_with("/**") {
        let middle = pattern.trim_start_matches("**/").trim_end_matches("/**");
        return path.contains(&format!("/{}/", middle))
            || path.starts_with(&format!("{}/", middle));
    }

    if pattern.contains("**") {
        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if !prefix.is_empty() && !path.starts_with(prefix) {
                return false;
            }

            if suffix.is_empty() {
                return true;
            }
            return match suffix.split_once('*') {
                Some((before, after)) => path.contains(before) && path.ends_with(after),
                None => path.ends_with(suffix),
            };
        }
    }

    // Single * matches within a segment
    if let Some((prefix, suffix)) = pattern.split_once('*') {
        if !suffix.contains('*') {
            return path.starts_with(prefix) && path.ends_with(suffix);
        }
    }

    // "generated/" only matches "generated/foo.cs", not "src/generated/foo.cs"
    path.starts_with(pattern)
}
