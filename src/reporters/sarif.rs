//! SARIF 2.1.0 reporter for GitHub Code Scanning and VS Code integration
//!
//! Reference: https://docs.oasis-open.org/sarif/sarif/v2.1.0/sarif-v2.1.0.html

use crate::convention::{self, Verdict};
use crate::models::{Finding, ScanReport, Severity};
use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";

/// Map severity to SARIF level
fn severity_to_sarif_level(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low | Severity::Info => "note",
    }
}

// ============================================================================
// SARIF Data Structures
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
    invocations: Vec<SarifInvocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    name: String,
    short_description: SarifMessage,
    full_description: SarifMessage,
    help: SarifMessage,
    default_configuration: SarifConfiguration,
    properties: SarifRuleProperties,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifConfiguration {
    level: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRuleProperties {
    category: String,
    tags: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: String,
    message: SarifMessage,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<SarifLocation>,
    partial_fingerprints: HashMap<String, String>,
    properties: SarifResultProperties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fixes: Vec<SarifFix>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<SarifRegion>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactLocation {
    uri: String,
    uri_base_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifInvocation {
    execution_successful: bool,
    end_time_utc: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResultProperties {
    severity: String,
    verdict: String,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifFix {
    description: SarifMessage,
}

// ============================================================================
// Implementation
// ============================================================================

/// Render report as SARIF 2.1.0 JSON
pub fn render(report: &ScanReport) -> Result<String> {
    let sarif = build_sarif(report);
    Ok(serde_json::to_string_pretty(&sarif)?)
}

fn build_sarif(report: &ScanReport) -> SarifReport {
    SarifReport {
        schema: SARIF_SCHEMA.to_string(),
        version: SARIF_VERSION.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules: Verdict::VIOLATIONS.iter().map(build_rule).collect(),
                },
            },
            results: report.findings.iter().map(build_result).collect(),
            invocations: vec![SarifInvocation {
                execution_successful: true,
                end_time_utc: Utc::now().to_rfc3339(),
            }],
        }],
    }
}

/// One rule per violation kind, all under the `AsyncConvention` diagnostic
fn build_rule(verdict: &Verdict) -> SarifRule {
    SarifRule {
        id: verdict.rule_id(),
        name: format!("{verdict:?}"),
        short_description: SarifMessage {
            text: verdict.message().unwrap_or(convention::TITLE).to_string(),
        },
        full_description: SarifMessage {
            text: format!(
                "{}. {}.",
                convention::TITLE,
                verdict.fix_description().unwrap_or_default()
            ),
        },
        help: SarifMessage {
            text: verdict.fix_title().unwrap_or_default().to_string(),
        },
        default_configuration: SarifConfiguration {
            level: severity_to_sarif_level(&Severity::default()).to_string(),
        },
        properties: SarifRuleProperties {
            category: convention::CATEGORY.to_string(),
            tags: vec!["naming".to_string(), "async".to_string()],
        },
    }
}

/// Rule id for a finding's verdict code
fn rule_id_for(finding: &Finding) -> String {
    Verdict::VIOLATIONS
        .iter()
        .find(|v| v.code() == finding.verdict)
        .map(Verdict::rule_id)
        .unwrap_or_else(|| convention::DIAGNOSTIC_ID.to_string())
}

fn build_result(finding: &Finding) -> SarifResult {
    let locations: Vec<SarifLocation> = finding
        .affected_files
        .iter()
        .map(|file| SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: file.display().to_string().replace('\\', "/"),
                    uri_base_id: "%SRCROOT%".to_string(),
                },
                region: finding.line_start.map(|start_line| SarifRegion { start_line }),
            },
        })
        .collect();

    let mut partial_fingerprints = HashMap::new();
    partial_fingerprints.insert("asyncNaming/v1".to_string(), finding.id.clone());

    let fixes: Vec<SarifFix> = finding
        .suggested_fix
        .iter()
        .map(|fix| SarifFix {
            description: SarifMessage { text: fix.clone() },
        })
        .collect();

    SarifResult {
        rule_id: rule_id_for(finding),
        level: severity_to_sarif_level(&finding.severity).to_string(),
        message: SarifMessage {
            text: finding.title.clone(),
        },
        locations,
        partial_fingerprints,
        properties: SarifResultProperties {
            severity: finding.severity.to_string(),
            verdict: finding.verdict.clone(),
            name: finding.name.clone(),
            suggested_name: finding.suggested_name.clone(),
        },
        fixes,
    }
}
