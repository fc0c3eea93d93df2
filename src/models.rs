//! Core data models
//!
//! Declarations come in from the host, findings go out to reporters.

use crate::convention::classify;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Generate a deterministic finding ID based on content hash.
///
/// Stable across runs so findings can be tracked, suppressed and
/// deduplicated. 16 hex characters of a SHA-256 over detector, file,
/// line and identifier.
pub fn deterministic_finding_id(detector: &str, file: &str, line: u32, name: &str) -> String {
    let input = format!("{detector}\n{file}\n{line}\n{name}");
    let digest = Sha256::digest(input.as_bytes());
    digest[..8].iter().map(|b| format!("{b:02x}")).collect()
}

/// Severity levels for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(anyhow::anyhow!(
                "Unknown severity '{}'. Valid values: info, low, medium, high, critical",
                s
            )),
        }
    }
}

/// One function or method declaration, as supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Identifier text, exactly as written
    pub name: String,
    /// Whether the declaration carries the async modifier
    #[serde(alias = "async")]
    pub is_async: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, is_async: bool) -> Self {
        Self {
            name: name.into(),
            is_async,
            file: None,
            line: None,
        }
    }

    pub fn at(mut self, file: impl Into<PathBuf>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }
}

/// A naming convention violation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Finding {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub detector: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Offending identifier
    #[serde(default)]
    pub name: String,
    /// Verdict code, e.g. `missing-suffix`
    #[serde(default)]
    pub verdict: String,
    #[serde(default)]
    pub affected_files: Vec<PathBuf>,
    #[serde(default)]
    pub line_start: Option<u32>,
    #[serde(default)]
    pub suggested_fix: Option<String>,
    #[serde(default)]
    pub suggested_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Summary of findings by severity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingsSummary {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub info: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Info => summary.info += 1,
            }
            summary.total += 1;
        }
        summary
    }

    /// Count of findings at or above `threshold`
    pub fn at_least(&self, threshold: Severity) -> usize {
        [
            (Severity::Critical, self.critical),
            (Severity::High, self.high),
            (Severity::Medium, self.medium),
            (Severity::Low, self.low),
            (Severity::Info, self.info),
        ]
        .iter()
        .filter(|(sev, _)| *sev >= threshold)
        .map(|(_, count)| count)
        .sum()
    }
}

/// Result of checking a batch of declarations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub findings: Vec<Finding>,
    pub findings_summary: FindingsSummary,
    pub total_declarations: usize,
    pub async_declarations: usize,
    /// Async declarations that follow the convention
    pub compliant: usize,
}

impl ScanReport {
    pub fn new(findings: Vec<Finding>, declarations: &[Declaration]) -> Self {
        let async_declarations = declarations.iter().filter(|d| d.is_async).count();
        let compliant = declarations
            .iter()
            .filter(|d| d.is_async && classify(d.is_async, &d.name).is_compliant())
            .count();
        Self {
            findings_summary: FindingsSummary::from_findings(&findings),
            compliant,
            total_declarations: declarations.len(),
            async_declarations,
            findings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_id_is_stable() {
        let a = deterministic_finding_id("async-suffix", "src/a.cs", 10, "DoWork");
        let b = deterministic_finding_id("async-suffix", "src/a.cs", 10, "DoWork");
        let c = deterministic_finding_id("async-suffix", "src/a.cs", 11, "DoWork");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_severity_ordering_and_parse() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Low > Severity::Info);
        assert_eq!("HIGH".parse::<Severity>().unwrap(), Severity::High);
        assert!("severe".parse::<Severity>().is_err());
    }

    #[test]
    fn test_declaration_accepts_async_alias() {
        let d: Declaration = serde_json::from_str(r#"{"name": "Run", "async": true}"#).unwrap();
        assert!(d.is_async);
        assert_eq!(d.file, None);
    }

    #[test]
    fn test_summary_at_least() {
        let findings = vec![
            Finding { severity: Severity::Info, ..Default::default() },
            Finding { severity: Severity::Medium, ..Default::default() },
        ];
        let summary = FindingsSummary::from_findings(&findings);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.at_least(Severity::Info), 2);
        assert_eq!(summary.at_least(Severity::Low), 1);
        assert_eq!(summary.at_least(Severity::High), 0);
    }

    #[test]
    fn test_report_counts() {
        let decls = vec![
            Declaration::new("RunAsync", true),
            Declaration::new("Run", true),
            Declaration::new("Stop", false),
        ];
        let findings = vec![Finding::default()];
        let report = ScanReport::new(findings, &decls);
        assert_eq!(report.total_declarations, 3);
        assert_eq!(report.async_declarations, 2);
        assert_eq!(report.compliant, 1);
    }
}
