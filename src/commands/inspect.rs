use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::cli::InspectArgs;
use crate::commands::render::charts::context_pair_label;
use crate::commands::render::selection::{context_pairs, opportunity_points, season_aspects};
use crate::dataset::load_dataset;
use crate::model::SectionCounts;
use crate::util::sha256_file;

pub fn run(args: InspectArgs) -> Result<()> {
    info!(data = %args.data.display(), "inspect requested");

    let Some(data) = load_dataset(&args.data)? else {
        bail!("dashboard data not found at {}", args.data.display());
    };

    info!(
        title = %data.meta.title,
        generated_at = %data.meta.generated_at,
        sha256 = %sha256_file(&args.data)?,
        "loaded dashboard data"
    );

    let counts = SectionCounts::of(&data);
    info!(
        quality_metrics = counts.quality_metrics,
        polarity_rows = counts.polarity_rows,
        opportunity_rows = counts.opportunity_rows,
        market_pain_rows = counts.market_pain_rows,
        golden_nugget_rows = counts.golden_nugget_rows,
        context_rows = counts.context_rows,
        season_rows = counts.season_rows,
        ice_rows = counts.ice_rows,
        spec_rows = counts.spec_rows,
        need_cards = counts.need_cards,
        evidence_samples = counts.evidence_samples,
        glossary_entries = counts.glossary_entries,
        "section row counts"
    );
    if data.glossary.is_none() {
        warn!("dataset has no glossary");
    }

    let kept: Vec<&str> = opportunity_points(&data.opportunity_map.chart_data)
        .iter()
        .map(|row| row.aspect.as_str())
        .collect();
    info!(
        kept = kept.len(),
        dropped = data.opportunity_map.chart_data.len() - kept.len(),
        aspects = %kept.join(","),
        "opportunity points"
    );

    let min_n = args.context_min_n;
    let pairs = context_pairs(&data.context_analysis.chart_data, min_n);
    if pairs.is_empty() {
        warn!(min_n, "no context pairs meet the minimum sample size");
    }
    for (rank, row) in pairs.iter().enumerate() {
        info!(
            rank = rank + 1,
            pair = %context_pair_label(row),
            n_reviews = row.n_reviews,
            unmet = row.unmet_like_cnt,
            "context pair"
        );
    }

    let aspects = season_aspects(&data.seasonality.chart_data);
    info!(count = aspects.len(), aspects = %aspects.join(","), "season aspects");

    Ok(())
}
