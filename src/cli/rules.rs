//! Rules command - list detectors and the rule ids they report under

use anyhow::Result;
use async_naming::config::ProjectConfig;
use async_naming::convention::Verdict;
use async_naming::detectors::default_engine;
use console::style;
use serde_json::{json, Value};

/// Run the rules command
pub fn run(format: &str) -> Result<()> {
    let listing = list_rules();
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", render_text(&listing));
    }
    Ok(())
}

fn list_rules() -> Value {
    let engine = default_engine(ProjectConfig::default());
    let detectors: Vec<Value> = engine
        .detectors()
        .iter()
        .map(|d| {
            json!({
                "name": d.name(),
                "description": d.description(),
                "category": d.category()
            })
        })
        .collect();

    let rules: Vec<Value> = Verdict::VIOLATIONS
        .iter()
        .map(|v| {
            json!({
                "id": v.rule_id(),
                "verdict": v.code(),
                "message": v.message(),
                "fix": v.fix_title()
            })
        })
        .collect();

    json!({
        "detectors": detectors,
        "rules": rules
    })
}

fn render_text(listing: &Value) -> String {
    let mut out = format!("{}\n", style("Detectors").bold());
    for d in listing["detectors"].as_array().into_iter().flatten() {
        out.push_str(&format!(
            "  {} [{}]\n    {}\n",
            style(d["name"].as_str().unwrap_or_default()).cyan(),
            d["category"].as_str().unwrap_or_default(),
            d["description"].as_str().unwrap_or_default()
        ));
    }

    out.push_str(&format!("\n{}\n", style("Rules").bold()));
    for r in listing["rules"].as_array().into_iter().flatten() {
        out.push_str(&format!(
            "  {}\n    {} (fix: {})\n",
            style(r["id"].as_str().unwrap_or_default()).cyan(),
            r["message"].as_str().unwrap_or_default(),
            r["fix"].as_str().unwrap_or_default()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_includes_detector_and_rules() {
        let listing = list_rules();
        assert_eq!(listing["detectors"][0]["name"], "async-suffix");
        assert_eq!(listing["detectors"][0]["category"], "usage");
        let ids: Vec<&str> = listing["rules"]
            .as_array()
            .expect("rules")
            .iter()
            .map(|r| r["id"].as_str().expect("id"))
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains(&"AsyncConvention/missing-suffix"));
    }

    #[test]
    fn test_text_listing() {
        let text = console::strip_ansi_codes(&render_text(&list_rules())).to_string();
        assert!(text.contains("async-suffix [usage]"));
        assert!(text.contains("AsyncConvention/misplaced-suffix"));
        assert!(text.contains("fix: Move \"Async\" to the end of the method name"));
    }
}
