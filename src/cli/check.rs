//! Check command - classify a single identifier

use anyhow::Result;
use async_naming::convention::{classify, Verdict};
use console::style;
use serde::Serialize;

#[derive(Serialize)]
struct CheckOutput<'a> {
    name: &'a str,
    is_async: bool,
    verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fix: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggested_name: Option<String>,
}

/// Run the check command
pub fn run(name: &str, is_async: bool, format: &str) -> Result<()> {
    let verdict = classify(is_async, name);
    tracing::debug!("{:?} (async: {}) -> {}", name, is_async, verdict);

    let output = CheckOutput {
        name,
        is_async,
        verdict,
        message: verdict.message(),
        fix: verdict.fix_title(),
        suggested_name: verdict.suggested_name(name),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_text(&output));
    }
    Ok(())
}

fn render_text(output: &CheckOutput<'_>) -> String {
    if output.verdict.is_compliant() {
        let reason = if output.is_async {
            "follows the \"Async\" suffix convention"
        } else {
            "not async, convention does not apply"
        };
        return format!(
            "{} {}: {} ({})\n",
            style("✓").green(),
            style(output.name).bold(),
            output.verdict,
            reason
        );
    }

    let mut out = format!(
        "{} {}: {}\n",
        style("✗").yellow(),
        style(output.name).bold(),
        style(output.verdict).yellow()
    );
    if let Some(message) = output.message {
        out.push_str(&format!("  {}\n", message));
    }
    if let Some(fix) = output.fix {
        out.push_str(&format!("  Fix: {}\n", fix));
    }
    if let Some(suggested) = &output.suggested_name {
        out.push_str(&format!("  Suggested name: {}\n", style(suggested).cyan()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_for(name: &str, is_async: bool) -> String {
        let verdict = classify(is_async, name);
        render_text(&CheckOutput {
            name,
            is_async,
            verdict,
            message: verdict.message(),
            fix: verdict.fix_title(),
            suggested_name: verdict.suggested_name(name),
        })
    }

    #[test]
    fn test_text_for_violation() {
        let text = console::strip_ansi_codes(&output_for("LoadAsycn", true)).to_string();
        assert!(text.contains("LoadAsycn: misspelled-suffix"));
        assert!(text.contains("Wrong \"Async\" postfix"));
        assert!(text.contains("Fix: Replace to \"Async\""));
        assert!(text.contains("Suggested name: LoadAsync"));
    }

    #[test]
    fn test_text_for_sync_declaration() {
        let text = console::strip_ansi_codes(&output_for("Load", false)).to_string();
        assert!(text.contains("Load: compliant"));
        assert!(text.contains("not async"));
    }
}
