//! Configuration module
//!
//! This module handles:
//! - Project-level configuration (async-naming.toml)
//! - Rule enablement and severity overrides
//! - Path and name exclusions
//! - CLI defaults

mod project_config;

pub use project_config::{
    glob_match, load_project_config, CliDefaults, ExcludeConfig, ProjectConfig, RuleConfig,
    CONFIG_FILE_NAME, JSON_CONFIG_FILE_NAME,
};
