//! Scan command - check a batch of host-supplied declarations

use anyhow::{Context, Result};
use async_naming::config::load_project_config;
use async_naming::detectors::default_engine;
use async_naming::input::load_inputs;
use async_naming::models::{ScanReport, Severity};
use async_naming::reporters::{self, OutputFormat};
use console::style;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Run the scan command
pub fn run(
    config_dir: &Path,
    paths: &[PathBuf],
    format: Option<String>,
    output: Option<&Path>,
    fail_on: Option<String>,
) -> Result<()> {
    let config = load_project_config(config_dir);

    // CLI flags take precedence over [defaults]
    let format = match format.or_else(|| config.defaults.format.clone()) {
        Some(f) => OutputFormat::from_str(&f)?,
        None => OutputFormat::Text,
    };
    let fail_on = match fail_on {
        Some(s) => Some(Severity::from_str(&s)?),
        None => config.defaults.fail_on,
    };

    let declarations = load_inputs(paths).context("Failed to load declarations")?;
    let findings = default_engine(config).run(&declarations)?;
    let report = ScanReport::new(findings, &declarations);

    let mut rendered = reporters::report_with_format(&report, format)?;
    let plain = output.is_some() || !console::colors_enabled();
    if format == OutputFormat::Text && plain {
        rendered = console::strip_ansi_codes(&rendered).into_owned();
    }

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{rendered}"),
    }

    check_fail_threshold(fail_on, &report)
}

/// Exit with code 1 if the fail threshold is met
fn check_fail_threshold(fail_on: Option<Severity>, report: &ScanReport) -> Result<()> {
    if let Some(threshold) = fail_on {
        if should_fail(threshold, report) {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn should_fail(threshold: Severity, report: &ScanReport) -> bool {
    report.findings_summary.at_least(threshold) > 0
}
