//! Base detector trait and types
//!
//! - `Detector` trait that all detectors must implement
//! - `DetectorResult` for capturing execution results

use crate::models::{Declaration, Finding};
use anyhow::Result;

/// Result from running a single detector
#[derive(Debug, Clone)]
pub struct DetectorResult {
    /// Name of the detector that produced these results
    pub detector_name: String,
    /// Findings produced by the detector
    pub findings: Vec<Finding>,
    /// Execution time in milliseconds
    pub duration_ms: u64,
    /// Error message if the detector failed
    pub error: Option<String>,
}

impl DetectorResult {
    pub fn success(detector_name: String, findings: Vec<Finding>, duration_ms: u64) -> Self {
        Self {
            detector_name,
            findings,
            duration_ms,
            error: None,
        }
    }

    pub fn failure(detector_name: String, error: String, duration_ms: u64) -> Self {
        Self {
            detector_name,
            findings: Vec::new(),
            duration_ms,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Trait for declaration-level detectors
///
/// Detectors receive the declarations the host handed over (name, async
/// flag, location) and return findings. They never see source text.
pub trait Detector: Send + Sync {
    /// Unique kebab-case identifier, e.g. "async-suffix"
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Run detection over a batch of declarations
    fn detect(&self, declarations: &[Declaration]) -> Result<Vec<Finding>>;

    /// Category of issues this detector finds, copied onto its findings
    fn category(&self) -> &'static str;
}
