use super::selection::{context_pairs, opportunity_points, season_aspects, season_count};
use crate::labels::{aspect_label, short_label};
use crate::model::{DashboardData, NarrativeText};

fn push_text(md: &mut String, text: &NarrativeText) {
    md.push_str(&format!("- 핵심 관찰: {}\n", text.headline().trim()));
    md.push_str(&format!("- 해석: {}\n", text.interpretation.trim()));
    md.push_str(&format!("- 확인 필요: {}\n\n", text.caveat.trim()));
}

/// Escapes the one character that breaks a pipe table cell.
fn cell(raw: &str) -> String {
    raw.replace('|', "\\|")
}

/// Print-friendly companion of the page: the same sections as text and
/// tables, charts reduced to their top rows.
pub fn render_markdown(data: &DashboardData, context_min_n: u32) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", data.meta.title.trim()));
    md.push_str(&format!("생성일: {}\n\n", data.meta.generated_at));
    if !data.meta.caveat.is_empty() {
        md.push_str(&format!("> {}\n\n", data.meta.caveat.trim()));
    }

    md.push_str("## Quality Gate\n");
    for metric in &data.quality_gate.metrics {
        md.push_str(&format!("- **{}**: {}\n", metric.label, metric.value));
    }
    md.push('\n');

    if !data.action_plan.cards.is_empty() {
        md.push_str("## Top Needs\n");
        for (idx, card) in data.action_plan.cards.iter().enumerate() {
            md.push_str(&format!(
                "{}. **{}** ({}): {} (Repeat {}, Unmet {})\n",
                idx + 1,
                card.name,
                card.id,
                card.desc,
                card.stats.repeat,
                card.stats.unmet
            ));
        }
        md.push('\n');
    }

    md.push_str("## Polarity by Bucket\n");
    md.push_str("| Bucket | Met | Mixed | Unmet | Unknown |\n|---|---|---|---|---|\n");
    for row in &data.polarity_overview.chart_data {
        md.push_str(&format!(
            "| {} | {:.1}% | {:.1}% | {:.1}% | {:.1}% |\n",
            cell(&row.bucket),
            row.met_rate * 100.0,
            row.mixed_rate * 100.0,
            row.unmet_rate * 100.0,
            row.unknown_rate * 100.0
        ));
    }
    md.push('\n');
    push_text(&mut md, &data.polarity_overview.text);

    md.push_str("## Opportunity Map\n");
    md.push_str("| Aspect | Repeat Rate | Unmet Volume | Goods |\n|---|---|---|---|\n");
    for row in opportunity_points(&data.opportunity_map.chart_data) {
        md.push_str(&format!(
            "| {} | {:.1}% | {} | {} |\n",
            cell(&aspect_label(&row.aspect)),
            row.goods_repeat_rate * 100.0,
            row.reviews_unmet_like_cnt,
            row.goods_cnt_any
        ));
    }
    md.push('\n');
    push_text(&mut md, &data.opportunity_map.text);

    md.push_str("## Market Pain (Low Rating)\n");
    md.push_str("| Aspect | Unmet | n | Rate |\n|---|---|---|---|\n");
    for row in &data.market_pain.chart_data {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(&aspect_label(&row.aspect)),
            row.unmet_like_cnt,
            row.n_items,
            cell(&row.unmet_like_rate_pct)
        ));
    }
    md.push('\n');
    push_text(&mut md, &data.market_pain.text);

    md.push_str("## Golden Nugget\n");
    md.push_str("| Aspect | Unmet+Mixed | Met | n |\n|---|---|---|---|\n");
    for row in &data.golden_nugget.chart_data {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(&aspect_label(&row.aspect)),
            row.unmet_accumulated(),
            row.met_cnt,
            row.n_items
        ));
    }
    md.push('\n');
    push_text(&mut md, &data.golden_nugget.text);

    md.push_str(&format!("## Context (n>={context_min_n})\n"));
    for row in context_pairs(&data.context_analysis.chart_data, context_min_n) {
        md.push_str(&format!(
            "- {} - {}: {}\n",
            row.context_tag,
            short_label(&aspect_label(&row.aspect)),
            row.unmet_like_cnt
        ));
    }
    md.push('\n');
    push_text(&mut md, &data.context_analysis.text);

    md.push_str("## Seasonality\n");
    md.push_str("| Aspect | Summer | Winter |\n|---|---|---|\n");
    let season_rows = &data.seasonality.chart_data;
    for aspect in season_aspects(season_rows) {
        md.push_str(&format!(
            "| {} | {} | {} |\n",
            cell(short_label(&aspect_label(aspect))),
            season_count(season_rows, aspect, "summer"),
            season_count(season_rows, aspect, "winter")
        ));
    }
    md.push('\n');
    push_text(&mut md, &data.seasonality.text);

    md.push_str("## Action Plan (ICE)\n");
    md.push_str("| Needs | Task | I | C | E | Score | Note |\n|---|---|---|---|---|---|---|\n");
    for row in &data.action_plan.ice {
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | **{}** | {} |\n",
            cell(short_label(&aspect_label(&row.needs))),
            cell(&row.name),
            row.impact,
            row.confidence,
            row.ease,
            row.score,
            cell(&row.note)
        ));
    }
    md.push('\n');
    if !data.action_plan.spec.is_empty() {
        md.push_str("| Requirement | Aspect | Context | KPI | Test |\n|---|---|---|---|---|\n");
        for row in &data.action_plan.spec {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&row.req),
                cell(&aspect_label(&row.aspect)),
                cell(&row.context),
                cell(&row.kpi),
                cell(&row.test)
            ));
        }
        md.push('\n');
    }
    push_text(&mut md, &data.action_plan.text);

    md.push_str("## Evidence\n");
    for sample in &data.evidence.samples {
        md.push_str(&format!("### {}\n", aspect_label(&sample.id)));
        for quote in &sample.quotes {
            md.push_str(&format!("- \"{}\"\n", quote));
        }
        md.push('\n');
    }
    push_text(&mut md, &data.evidence.text);

    if let Some(glossary) = &data.glossary {
        md.push_str("## Glossary\n");
        for entry in glossary {
            md.push_str(&format!("- **{}** ({}): {}\n", entry.term, entry.kr, entry.desc));
        }
    }

    md
}
