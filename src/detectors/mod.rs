//! Naming convention detectors
//!
//! ```text
//! declarations ──▶ DetectorEngine ──▶ Detector::detect ──▶ findings
//!                  (exclusions,        (AsyncSuffixDetector)
//!                   severity override)
//! ```

mod async_suffix;
mod base;
mod engine;

pub use async_suffix::AsyncSuffixDetector;
pub use base::{Detector, DetectorResult};
pub use engine::DetectorEngine;

use crate::config::ProjectConfig;
use std::sync::Arc;

/// Build an engine with every built-in detector registered
pub fn default_engine(config: ProjectConfig) -> DetectorEngine {
    let mut engine = DetectorEngine::new(config);
    engine.register(Arc::new(AsyncSuffixDetector::new()));
    engine
}
