use std::fs;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::info;

use crate::cli::BundleArgs;
use crate::dataset::{data_script, json_body};
use crate::model::DashboardData;
use crate::util::{sha256_file, write_text};

/// Wraps a JSON dataset into the script form the page loads. Input that is
/// already wrapped is accepted and re-emitted.
pub fn bundle_script(raw: &str) -> Result<String> {
    let body = json_body(raw)?;
    if body.is_empty() {
        bail!("dataset input is empty");
    }

    let value: Value = serde_json::from_str(body).context("failed to parse dataset json")?;
    serde_json::from_value::<DashboardData>(value.clone())
        .context("dataset json does not match the dashboard layout")?;

    data_script(&value)
}

pub fn run(args: BundleArgs) -> Result<()> {
    info!(input = %args.input.display(), output = %args.output.display(), "bundle requested");

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let script = bundle_script(&raw)
        .with_context(|| format!("failed to bundle {}", args.input.display()))?;

    write_text(&args.output, &script)?;
    info!(
        path = %args.output.display(),
        bytes = script.len(),
        sha256 = %sha256_file(&args.output)?,
        "wrote dashboard data script"
    );

    Ok(())
}
