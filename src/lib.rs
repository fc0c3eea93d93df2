//! async-naming - checks async function names against the "Async" suffix
//! convention.
//!
//! The decision logic lives in [`convention::classify`]; everything else
//! feeds it declarations and turns its verdicts into reports.

pub mod config;
pub mod convention;
pub mod detectors;
pub mod input;
pub mod models;
pub mod reporters;

pub use convention::{classify, Verdict};
