use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use crate::model::DashboardData;

pub const DATA_GLOBAL: &str = "window.DASHBOARD_DATA";

/// Strips the `window.DASHBOARD_DATA = ...;` assignment if present and returns
/// the JSON body.
pub fn json_body(raw: &str) -> Result<&str> {
    let wrapper = Regex::new(r"(?s)^\s*window\.DASHBOARD_DATA\s*=\s*(.*?)\s*;?\s*$")
        .context("failed to compile data script regex")?;

    let body = match wrapper.captures(raw).and_then(|captures| captures.get(1)) {
        Some(found) => found.as_str(),
        None => raw.trim(),
    };

    Ok(body)
}

pub fn parse_dataset(raw: &str) -> Result<DashboardData> {
    let body = json_body(raw)?;
    serde_json::from_str(body).context("failed to parse dashboard data")
}

/// Returns `None` when the data file does not exist, which the page reports
/// as missing data rather than a parse failure.
pub fn load_dataset(path: &Path) -> Result<Option<DashboardData>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };

    if json_body(&raw)?.is_empty() {
        return Ok(None);
    }

    let data = parse_dataset(&raw).with_context(|| format!("failed to load {}", path.display()))?;
    Ok(Some(data))
}

/// Serializes a dataset into the script form loaded by the page.
pub fn data_script<T: Serialize>(value: &T) -> Result<String> {
    let json =
        serde_json::to_string_pretty(value).context("failed to serialize dashboard data")?;
    Ok(format!("{DATA_GLOBAL} = {json};\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{data_script, json_body, load_dataset, parse_dataset};
    use crate::util::{scratch_dir, write_text};

    fn sample_dataset() -> serde_json::Value {
        json!({
            "meta": {"title": "t", "generated_at": "2025-12-25 23:57", "caveat": "c"},
            "quality_gate": {"metrics": [
                {"label": "Total Queue", "value": 4052, "desc": "d"},
                {"label": "Parsed OK", "value": "94.2%", "desc": "d"}
            ]},
            "polarity_overview": {"chart_data": [], "text": {"observation": "o", "interpretation": "i", "caveat": "c"}},
            "opportunity_map": {"chart_data": [], "text": {"takeaway": "t", "interpretation": "i", "caveat": "c"}},
            "market_pain": {"chart_data": [], "text": {"observation": "o", "interpretation": "i", "caveat": "c"}},
            "golden_nugget": {"chart_data": [], "text": {"observation": "o", "interpretation": "i", "caveat": "c"}},
            "context_analysis": {"chart_data": [], "text": {"observation": "o", "interpretation": "i", "caveat": "c"}},
            "seasonality": {"chart_data": [], "text": {"observation": "o", "interpretation": "i", "caveat": "c"}},
            "action_plan": {"ice": [], "spec": [], "cards": [], "text": {"observation": "o", "interpretation": "i", "caveat": "c"}},
            "evidence": {"samples": [{"id": "PILLING", "quotes": ["q"]}], "text": {"observation": "o", "interpretation": "i", "caveat": "c"}}
        })
    }

    #[test]
    fn json_body_strips_script_assignment() {
        let raw = "window.DASHBOARD_DATA = {\n  \"a\": 1\n};\n";
        assert_eq!(json_body(raw).expect("body"), "{\n  \"a\": 1\n}");

        let bare = "  {\"a\": 1}\n";
        assert_eq!(json_body(bare).expect("body"), "{\"a\": 1}");
    }

    #[test]
    fn parse_dataset_accepts_plain_json_and_script_forms() {
        let value = sample_dataset();
        let plain = serde_json::to_string(&value).expect("json");
        let script = data_script(&value).expect("script");

        let from_plain = parse_dataset(&plain).expect("plain json should parse");
        let from_script = parse_dataset(&script).expect("script form should parse");

        assert_eq!(from_plain.meta.generated_at, "2025-12-25 23:57");
        assert_eq!(from_script.quality_gate.metrics.len(), 2);
        assert!(from_script.glossary.is_none());
        assert_eq!(from_plain.opportunity_map.text.headline(), "t");
    }

    #[test]
    fn data_script_keeps_korean_text_unescaped() {
        let script = data_script(&serde_json::json!({"kr": "자극"})).expect("script");
        assert!(script.starts_with("window.DASHBOARD_DATA = {"));
        assert!(script.contains("자극"));
        assert!(script.ends_with("};\n"));
    }

    #[test]
    fn parse_dataset_reports_missing_sections() {
        let error = parse_dataset("{\"meta\": {\"title\": \"t\", \"generated_at\": \"x\"}}")
            .expect_err("incomplete dataset should fail");
        assert!(
            format!("{error:#}").contains("quality_gate"),
            "unexpected error: {error:#}"
        );
    }

    #[test]
    fn load_dataset_treats_absent_file_as_missing() {
        let dir = scratch_dir("load_absent");
        let loaded = load_dataset(&dir.join("dashboard_data.js")).expect("absent file is not an error");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_dataset_treats_empty_bodies_as_missing() {
        let dir = scratch_dir("load_empty");

        let blank = dir.join("blank.js");
        write_text(&blank, "  \n\t\n").expect("write blank");
        assert!(load_dataset(&blank).expect("blank file").is_none());

        let empty_wrapper = dir.join("empty_wrapper.js");
        write_text(&empty_wrapper, "window.DASHBOARD_DATA = ;\n").expect("write wrapper");
        assert!(load_dataset(&empty_wrapper).expect("empty wrapper").is_none());
    }

    #[test]
    fn load_dataset_reports_malformed_file_with_path() {
        let dir = scratch_dir("load_malformed");
        let path = dir.join("dashboard_data.js");
        write_text(&path, "window.DASHBOARD_DATA = {\"meta\": };\n").expect("write malformed");

        let error = load_dataset(&path).expect_err("malformed data should fail");
        let message = format!("{error:#}");
        assert!(message.contains(&path.display().to_string()), "unexpected error: {message}");
        assert!(message.contains("failed to parse dashboard data"));
    }

    #[test]
    fn load_dataset_reads_script_form_from_disk() {
        let dir = scratch_dir("load_ok");
        let path = dir.join("dashboard_data.js");
        write_text(&path, &data_script(&sample_dataset()).expect("script")).expect("write data");

        let data = load_dataset(&path).expect("load").expect("dataset present");
        assert_eq!(data.evidence.samples[0].id, "PILLING");
    }
}
