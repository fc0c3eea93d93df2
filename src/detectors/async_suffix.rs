//! Async Suffix Detector
//!
//! Reports asynchronous declarations whose names do not end in `Async`,
//! end in the `Asycn` misspelling, or carry the token somewhere other than
//! the end.

use crate::convention::{self, classify, Verdict};
use crate::detectors::base::Detector;
use crate::models::{deterministic_finding_id, Declaration, Finding, Severity};
use anyhow::Result;
use rayon::prelude::*;
use tracing::debug;

pub struct AsyncSuffixDetector {
    severity: Severity,
}

impl AsyncSuffixDetector {
    pub fn new() -> Self {
        Self {
            severity: Severity::Info,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn build_finding(&self, decl: &Declaration, verdict: Verdict) -> Finding {
        let file = decl
            .file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        let message = verdict.message().unwrap_or(convention::TITLE);
        let suggested_name = verdict.suggested_name(&decl.name);

        let suggested_fix = match (verdict.fix_title(), &suggested_name) {
            (Some(title), Some(new_name)) => Some(format!("{title}: rename to `{new_name}`")),
            (Some(title), None) => Some(title.to_string()),
            _ => None,
        };

        Finding {
            id: deterministic_finding_id(
                self.name(),
                &file,
                decl.line.unwrap_or(0),
                &decl.name,
            ),
            detector: self.name().to_string(),
            severity: self.severity,
            title: format!("{}: {}", message, decl.name),
            description: format!(
                "Async method `{}`: {}. {}.",
                decl.name,
                message,
                verdict.fix_description().unwrap_or_default()
            ),
            name: decl.name.clone(),
            verdict: verdict.code().to_string(),
            affected_files: decl.file.iter().cloned().collect(),
            line_start: decl.line,
            suggested_fix,
            suggested_name,
            category: Some(self.category().to_string()),
        }
    }
}

impl Default for AsyncSuffixDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for AsyncSuffixDetector {
    fn name(&self) -> &'static str {
        "async-suffix"
    }

    fn description(&self) -> &'static str {
        "Detects async methods that do not follow the \"Async\" suffix naming convention"
    }

    fn category(&self) -> &'static str {
        "usage"
    }

    fn detect(&self, declarations: &[Declaration]) -> Result<Vec<Finding>> {
        let findings: Vec<Finding> = declarations
            .par_iter()
            .filter_map(|decl| match classify(decl.is_async, &decl.name) {
                Verdict::Compliant => None,
                verdict => Some(self.build_finding(decl, verdict)),
            })
            .collect();

        debug!(
            "AsyncSuffixDetector found {} findings in {} declarations",
            findings.len(),
            declarations.len()
        );
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(decls: &[Declaration]) -> Vec<Finding> {
        AsyncSuffixDetector::new().detect(decls).expect("detect")
    }

    #[test]
    fn test_compliant_and_sync_produce_nothing() {
        let findings = detect(&[
            Declaration::new("LoadAsync", true),
            Declaration::new("Load", false),
            Declaration::new("AsyncLoadAsync", true),
        ]);
        assert!(findings.is_empty());
    }

    #[test]
    fn test_missing_suffix_finding() {
        let findings = detect(&[Declaration::new("Load", true).at("src/Repo.cs", 12)]);
        assert_eq!(findings.len(), 1);

        let f = &findings[0];
        assert_eq!(f.verdict, "missing-suffix");
        assert_eq!(f.name, "Load");
        assert_eq!(f.severity, Severity::Info);
        assert_eq!(f.title, "\"Async\" postfix is absent: Load");
        assert_eq!(f.line_start, Some(12));
        assert_eq!(f.affected_files, vec![std::path::PathBuf::from("src/Repo.cs")]);
        assert_eq!(f.suggested_name.as_deref(), Some("LoadAsync"));
        assert_eq!(
            f.suggested_fix.as_deref(),
            Some("Add \"Async\" postfix: rename to `LoadAsync`")
        );
        assert_eq!(f.category.as_deref(), Some("usage"));
    }

    #[test]
    fn test_finding_detector_matches_id_source() {
        let detector = AsyncSuffixDetector::new();
        let findings = detect(&[Declaration::new("Load", true).at("src/Repo.cs", 12)]);
        let f = &findings[0];
        assert_eq!(f.detector, detector.name());
        assert_eq!(f.id, deterministic_finding_id(&f.detector, "src/Repo.cs", 12, "Load"));
        assert_eq!(f.category.as_deref(), Some(detector.category()));
    }

    #[test]
    fn test_each_violation_kind() {
        let findings = detect(&[
            Declaration::new("SaveAsycn", true),
            Declaration::new("AsyncSave", true),
            Declaration::new("Save", true),
        ]);
        let verdicts: Vec<&str> = findings.iter().map(|f| f.verdict.as_str()).collect();
        assert_eq!(verdicts, vec!["misspelled-suffix", "misplaced-suffix", "missing-suffix"]);
        assert_eq!(findings[0].title, "Wrong \"Async\" postfix: SaveAsycn");
        assert_eq!(findings[1].title, "Wrong position of the \"Async\" postfix: AsyncSave");
    }

    #[test]
    fn test_severity_override() {
        let detector = AsyncSuffixDetector::new().with_severity(Severity::High);
        let findings = detector.detect(&[Declaration::new("Run", true)]).expect("detect");
        assert_eq!(findings[0].severity, Severity::High);
    }

    #[test]
    fn test_ids_are_distinct_per_location() {
        let findings = detect(&[
            Declaration::new("Run", true).at("a.cs", 1),
            Declaration::new("Run", true).at("a.cs", 2),
        ]);
        assert_ne!(findings[0].id, findings[1].id);
    }
}
