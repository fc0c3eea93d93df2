//! JSON reporter
//!
//! Outputs the full ScanReport as pretty-printed JSON.

use crate::models::ScanReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["total_declarations"], 3);
        assert_eq!(parsed["async_declarations"], 2);
        assert_eq!(parsed["compliant"], 1);
        assert_eq!(parsed["findings"][0]["verdict"], "missing-suffix");
        assert_eq!(parsed["findings"][0]["suggested_name"], "LoadAsync");
    }

    #[test]
    fn test_json_empty_findings() {
        let mut report = test_report();
        report.findings.clear();
        report.findings_summary = Default::default();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["findings"].as_array().expect("findings array").len(), 0);
    }
}
