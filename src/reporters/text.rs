//! Text (terminal) reporter with colors and formatting

use crate::models::{Finding, ScanReport, Severity};
use anyhow::Result;

/// Severity colors
fn severity_color(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "\x1b[31m", // Red
        Severity::High => "\x1b[91m",     // Light red
        Severity::Medium => "\x1b[33m",   // Yellow
        Severity::Low => "\x1b[34m",      // Blue
        Severity::Info => "\x1b[90m",     // Gray
    }
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity tag
fn severity_tag(severity: &Severity) -> &'static str {
    match severity {
        Severity::Critical => "[C]",
        Severity::High => "[H]",
        Severity::Medium => "[M]",
        Severity::Low => "[L]",
        Severity::Info => "[I]",
    }
}

/// Render report as formatted terminal output
pub fn render(report: &ScanReport) -> Result<String> {
    let mut out = String::new();

    out.push_str(&format!("\n{BOLD}Async Naming Check{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Declarations: {}  Async: {}  Compliant: {}\n\n",
        report.total_declarations, report.async_declarations, report.compliant
    ));

    let fs = &report.findings_summary;
    out.push_str(&format!("{BOLD}FINDINGS{RESET} ({} total)\n", fs.total));

    if report.findings.is_empty() {
        let unreported = report.async_declarations.saturating_sub(report.compliant);
        if unreported == 0 {
            out.push_str(&format!(
                "  {DIM}All async declarations follow the \"Async\" suffix convention.{RESET}\n"
            ));
        } else {
            out.push_str(&format!(
                "  {DIM}No findings reported, but {unreported} async declaration(s) do not follow \
                 the convention (rule disabled or excluded by config).{RESET}\n"
            ));
        }
        return Ok(out);
    }

    out.push_str(&format!(
        "{DIM}  #   SEV   LOCATION                  NAME                      SUGGESTION{RESET}\n"
    ));
    out.push_str(&format!(
        "{DIM}  ─────────────────────────────────────────────────────────────────────────{RESET}\n"
    ));

    for (i, finding) in report.findings.iter().enumerate() {
        let sev_c = severity_color(&finding.severity);
        let sev_tag = severity_tag(&finding.severity);

        out.push_str(&format!(
            "  {DIM}{:>3}{RESET}  {sev_c}{}{RESET}  {DIM}{:<24}{RESET}  {:<24}  {}\n",
            i + 1,
            sev_tag,
            format_file_location(finding),
            truncate(&finding.name, 24),
            finding.suggested_name.as_deref().unwrap_or("")
        ));
        out.push_str(&format!(
            "            {DIM}{}{RESET}\n",
            finding.title.split(':').next().unwrap_or(&finding.title)
        ));
    }
    out.push('\n');

    Ok(out)
}

// Truncate by chars to avoid splitting UTF-8 sequences
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}

fn format_file_location(finding: &Finding) -> String {
    let Some(file) = finding.affected_files.first() else {
        return "-".to_string();
    };
    let file_str = file.display().to_string();
    let short_file = if file_str.chars().count() > 20 {
        let skip = file_str.chars().count() - 17;
        format!("...{}", file_str.chars().skip(skip).collect::<String>())
    } else {
        file_str
    };
    match finding.line_start {
        Some(line) => format!("{}:{}", short_file, line),
        None => short_file,
    }
}
