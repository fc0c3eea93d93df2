//! Detector engine
//!
//! Applies project configuration around the registered detectors:
//! exclusions are removed before detection, severity overrides are applied
//! after, and findings are returned in a stable order.

use crate::config::ProjectConfig;
use crate::detectors::base::{Detector, DetectorResult};
use crate::models::{Declaration, Finding};
use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct DetectorEngine {
    detectors: Vec<Arc<dyn Detector>>,
    config: ProjectConfig,
}

impl DetectorEngine {
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            detectors: Vec::new(),
            config,
        }
    }

    /// Register a detector
    pub fn register(&mut self, detector: Arc<dyn Detector>) {
        debug!(
            "Registering detector: {} ({})",
            detector.name(),
            detector.description()
        );
        self.detectors.push(detector);
    }

    pub fn detector_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Registered detectors, in registration order
    pub fn detectors(&self) -> &[Arc<dyn Detector>] {
        &self.detectors
    }

    /// Run all detectors over the declarations.
    ///
    /// Findings are ordered by file, then line, then name.
    pub fn run(&self, declarations: &[Declaration]) -> Result<Vec<Finding>> {
        let start = Instant::now();

        if !self.config.is_rule_enabled() {
            info!("Naming rule disabled by config, skipping detection");
            return Ok(Vec::new());
        }

        let included: Vec<Declaration> = declarations
            .iter()
            .filter(|d| !self.config.is_excluded(d))
            .cloned()
            .collect();
        let excluded = declarations.len() - included.len();
        if excluded > 0 {
            debug!("Excluded {} declarations by config", excluded);
        }

        debug!("Running detectors: {:?}", self.detector_names());
        let mut all_findings = Vec::new();
        for detector in &self.detectors {
            let result = self.run_single_detector(detector, &included);
            if result.is_success() {
                all_findings.extend(result.findings);
            } else {
                warn!(
                    "Detector {} failed after {}ms: {}",
                    result.detector_name,
                    result.duration_ms,
                    result.error.unwrap_or_default()
                );
            }
        }

        if let Some(severity) = self.config.severity_override() {
            for finding in &mut all_findings {
                finding.severity = severity;
            }
        }

        all_findings.sort_by(|a, b| {
            a.affected_files
                .first()
                .cmp(&b.affected_files.first())
                .then(a.line_start.cmp(&b.line_start))
                .then_with(|| a.name.cmp(&b.name))
        });

        info!(
            "Detection complete: {} findings in {} declarations ({:?})",
            all_findings.len(),
            included.len(),
            start.elapsed()
        );
        Ok(all_findings)
    }

    fn run_single_detector(
        &self,
        detector: &Arc<dyn Detector>,
        declarations: &[Declaration],
    ) -> DetectorResult {
        let name = detector.name().to_string();
        let start = Instant::now();

        debug!("Running detector: {}", name);

        match detector.detect(declarations) {
            Ok(findings) => {
                let duration = start.elapsed().as_millis() as u64;
                debug!(
                    "Detector {} found {} findings in {}ms",
                    name,
                    findings.len(),
                    duration
                );
                DetectorResult::success(name, findings, duration)
            }
            Err(e) => {
                let duration = start.elapsed().as_millis() as u64;
                DetectorResult::failure(name, e.to_string(), duration)
            }
        }
    }
}
