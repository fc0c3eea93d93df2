//! Init command - write an example async-naming.toml

use anyhow::{Context, Result};
use async_naming::config::CONFIG_FILE_NAME;
use console::style;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# async-naming configuration

[rule]
# Set to false to turn the "Async" suffix check off
enabled = true
# Severity of reported names: info, low, medium, high, critical
severity = "info"

[exclude]
# Declarations in these paths are never reported
paths = ["**/Migrations/**", "**/*.g.cs"]
# Identifiers that are never reported
names = []

[defaults]
# Output format: text, json, sarif
format = "text"
# Exit with code 1 when findings at this severity or higher exist
# fail_on = "info"
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists, not overwriting",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_naming::config::{load_project_config, ProjectConfig};

    #[test]
    fn test_default_config_parses() {
        let config: ProjectConfig = toml::from_str(DEFAULT_CONFIG).expect("parse default config");
        assert!(config.is_rule_enabled());
        assert_eq!(config.exclude.paths.len(), 2);
        assert_eq!(config.defaults.format.as_deref(), Some("text"));
    }

    #[test]
    fn test_init_writes_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        run(dir.path()).expect("first init");
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
        assert!(load_project_config(dir.path()).is_rule_enabled());
        assert!(run(dir.path()).is_err());
    }
}
