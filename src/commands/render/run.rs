use anyhow::{Result, bail};
use tracing::{error, info, warn};

use super::html::missing_data_document;
use super::markdown::render_markdown;
use super::page::{RenderOptions, render_page};
use super::selection::{SHOW_ALL, context_pairs, opportunity_points};
use crate::cli::RenderArgs;
use crate::dataset::load_dataset;
use crate::model::{RenderManifest, RenderPaths, SectionCounts};
use crate::util::{now_utc_string, sha256_file, write_json_pretty, write_text};

const MISSING_DATA_TITLE: &str = "Suncream Unmet Needs Analysis";

pub fn run(args: RenderArgs) -> Result<()> {
    let page_path = args.out_dir.join("index.html");
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| args.out_dir.join("render_manifest.json"));

    info!(data = %args.data.display(), out_dir = %args.out_dir.display(), "render requested");

    let Some(data) = load_dataset(&args.data)? else {
        error!(path = %args.data.display(), "dashboard data missing");
        write_text(&page_path, &missing_data_document(MISSING_DATA_TITLE))?;
        write_json_pretty(
            &manifest_path,
            &RenderManifest {
                manifest_version: 1,
                generated_at: now_utc_string(),
                report_generated_at: None,
                status: "missing_data".to_string(),
                source_sha256: None,
                context_min_n: args.context_min_n,
                paths: RenderPaths {
                    data_path: args.data.display().to_string(),
                    page_path: page_path.display().to_string(),
                    markdown_path: None,
                },
                counts: SectionCounts::default(),
                warnings: vec!["dashboard data missing".to_string()],
            },
        )?;
        bail!(
            "dashboard data not found at {}; wrote placeholder page to {}",
            args.data.display(),
            page_path.display()
        );
    };

    let context_min_n = args.context_min_n;
    let options = RenderOptions {
        context_min_n,
        echarts_src: args.echarts_src.clone(),
        evidence_filter: args.evidence_filter.clone(),
    };

    let mut warnings = Vec::new();
    if options.evidence_filter != SHOW_ALL
        && !data
            .evidence
            .samples
            .iter()
            .any(|sample| sample.id == options.evidence_filter)
    {
        warn!(filter = %options.evidence_filter, "evidence filter matches no sample");
        warnings.push(format!("evidence filter {} matches no sample", options.evidence_filter));
    }
    if context_pairs(&data.context_analysis.chart_data, context_min_n).is_empty() {
        warn!(min_n = context_min_n, "no context pairs meet the minimum sample size");
        warnings.push(format!("no context pairs with n>={context_min_n}"));
    }
    if opportunity_points(&data.opportunity_map.chart_data).is_empty() {
        warn!("opportunity map has no points above the sample threshold");
        warnings.push("opportunity map is empty".to_string());
    }

    let page = render_page(&data, &options)?;
    write_text(&page_path, &page.html)?;
    info!(path = %page_path.display(), charts = page.charts.len(), "wrote dashboard page");

    let markdown_path = if args.markdown {
        let path = args.out_dir.join("summary.md");
        write_text(&path, &render_markdown(&data, context_min_n))?;
        info!(path = %path.display(), "wrote markdown summary");
        Some(path)
    } else {
        None
    };

    let counts = SectionCounts::of(&data);
    let manifest = RenderManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        report_generated_at: Some(data.meta.generated_at.clone()),
        status: "rendered".to_string(),
        source_sha256: Some(sha256_file(&args.data)?),
        context_min_n,
        paths: RenderPaths {
            data_path: args.data.display().to_string(),
            page_path: page_path.display().to_string(),
            markdown_path: markdown_path.map(|path| path.display().to_string()),
        },
        counts,
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote render manifest");
    info!(
        evidence_samples = manifest.counts.evidence_samples,
        context_rows = manifest.counts.context_rows,
        warnings = manifest.warnings.len(),
        "render completed"
    );

    Ok(())
}
