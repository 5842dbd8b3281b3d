use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

use super::cards::{render_glossary, render_need_cards, render_quality_cards, render_text_block};
use super::charts::{
    context_option, golden_nugget_option, market_pain_option, opportunity_option, polarity_option,
    season_option,
};
use super::evidence::{render_evidence_cards, render_filter_options};
use super::html::{PageParts, document, escape_html};
use super::selection::{CONTEXT_PAIR_LIMIT, MIN_N_PATTERN, NO_CONTEXT_TAG, SHOW_ALL};
use super::tables::{golden_nugget_rows, ice_rows, market_pain_rows, spec_rows, table};
use crate::cli::{DEFAULT_CONTEXT_MIN_N, DEFAULT_ECHARTS_SRC};
use crate::labels::label_table;
use crate::model::{ContextRow, DashboardData, NarrativeText};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub context_min_n: u32,
    pub echarts_src: String,
    /// Evidence id selected in the dropdown when the page loads.
    pub evidence_filter: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            context_min_n: DEFAULT_CONTEXT_MIN_N,
            echarts_src: DEFAULT_ECHARTS_SRC.to_string(),
            evidence_filter: SHOW_ALL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html: String,
    /// Chart options keyed by container id.
    pub charts: BTreeMap<&'static str, Value>,
}

#[derive(Debug, Serialize)]
struct ContextRuntime<'a> {
    rows: Vec<ContextRuntimeRow<'a>>,
    default_min_n: u32,
    min_n_pattern: &'static str,
    max_min_n: u32,
    limit: usize,
    excluded_tag: &'static str,
}

#[derive(Debug, Serialize)]
struct ContextRuntimeRow<'a> {
    context_tag: &'a str,
    aspect: &'a str,
    n_reviews: u64,
    unmet_like_cnt: u64,
}

#[derive(Debug, Serialize)]
struct PageRuntime<'a> {
    labels: BTreeMap<&'static str, &'static str>,
    context: ContextRuntime<'a>,
}

pub fn chart_options(data: &DashboardData, options: &RenderOptions) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("chart-polarity", polarity_option(&data.polarity_overview.chart_data)),
        ("chart-opportunity", opportunity_option(&data.opportunity_map.chart_data)),
        ("chart-pain", market_pain_option(&data.market_pain.chart_data)),
        ("chart-golden", golden_nugget_option(&data.golden_nugget.chart_data)),
        (
            "chart-context",
            context_option(&data.context_analysis.chart_data, options.context_min_n),
        ),
        ("chart-season", season_option(&data.seasonality.chart_data)),
    ])
}

fn runtime_payload<'a>(rows: &'a [ContextRow]) -> PageRuntime<'a> {
    // Only labels the page can actually ask for.
    let keys: BTreeSet<&str> = rows.iter().map(|row| row.aspect.as_str()).collect();
    let labels = label_table().filter(|(key, _)| keys.contains(key)).collect();

    PageRuntime {
        labels,
        context: ContextRuntime {
            rows: rows
                .iter()
                .map(|row| ContextRuntimeRow {
                    context_tag: &row.context_tag,
                    aspect: &row.aspect,
                    n_reviews: row.n_reviews,
                    unmet_like_cnt: row.unmet_like_cnt,
                })
                .collect(),
            default_min_n: DEFAULT_CONTEXT_MIN_N,
            min_n_pattern: MIN_N_PATTERN,
            max_min_n: u32::MAX,
            limit: CONTEXT_PAIR_LIMIT,
            excluded_tag: NO_CONTEXT_TAG,
        },
    }
}

fn section(id: &str, heading: &str, content: &str, text_id: &str, text: &NarrativeText) -> String {
    format!(
        r#"
    <section id="{id}">
        <h2>{heading}</h2>
        {content}
        <div class="text-block" id="{text_id}">{text_block}</div>
    </section>"#,
        text_block = render_text_block(text),
    )
}

fn chart_div(id: &str) -> String {
    format!(r#"<div class="chart" id="{id}"></div>"#)
}

fn render_body(data: &DashboardData, options: &RenderOptions) -> String {
    let mut body = String::new();

    body.push_str(&format!(
        r#"
<div class="container">
    <header>
        <h1>{title}</h1>
        <div>
            <div>생성일: <span id="report-date">{generated_at}</span></div>
            <div class="caveat">{caveat}</div>
        </div>
    </header>

    <section id="quality-gate">
        <h2>데이터 품질 (Quality Gate)</h2>
        <div class="cards" id="quality-gate-cards">{quality}</div>
    </section>

    <section id="top5">
        <h2>Top 5 미충족 니즈</h2>
        <div class="cards" id="top5-cards">{top5}</div>
    </section>"#,
        title = escape_html(&data.meta.title),
        generated_at = escape_html(&data.meta.generated_at),
        caveat = escape_html(&data.meta.caveat),
        quality = render_quality_cards(&data.quality_gate.metrics),
        top5 = render_need_cards(&data.action_plan.cards),
    ));

    body.push_str(&section(
        "polarity",
        "1. 평점 버킷별 감정 분포 (Trust Signal)",
        &chart_div("chart-polarity"),
        "text-polarity",
        &data.polarity_overview.text,
    ));
    body.push_str(&section(
        "opportunity",
        "2. 기회 지도 (Opportunity Map)",
        &chart_div("chart-opportunity"),
        "text-opportunity",
        &data.opportunity_map.text,
    ));
    body.push_str(&section(
        "pain",
        "3. 시장의 고통 (Low Rating Pain)",
        &format!(
            "{}\n        {}",
            chart_div("chart-pain"),
            table(
                "table-pain",
                &["속성", "Unmet 건수", "표본 수", "Unmet 비율"],
                &market_pain_rows(&data.market_pain.chart_data),
            )
        ),
        "text-pain",
        &data.market_pain.text,
    ));
    body.push_str(&section(
        "golden",
        "4. 골든 너겟 (4점 리뷰의 아쉬움)",
        &format!(
            "{}\n        {}",
            chart_div("chart-golden"),
            table(
                "table-golden",
                &["속성", "Unmet+Mixed", "Met", "표본 수"],
                &golden_nugget_rows(&data.golden_nugget.chart_data),
            )
        ),
        "text-golden",
        &data.golden_nugget.text,
    ));
    body.push_str(&section(
        "context",
        "5. 사용 상황별 불만 (Context)",
        &format!(
            r#"<div class="controls">
            <label for="ctx-min-n">최소 리뷰 수 (n ≥)</label>
            <input type="number" id="ctx-min-n" min="1" value="{min_n}">
        </div>
        {chart}"#,
            min_n = options.context_min_n,
            chart = chart_div("chart-context"),
        ),
        "text-context",
        &data.context_analysis.text,
    ));
    body.push_str(&section(
        "season",
        "6. 계절성 (Summer vs Winter)",
        &chart_div("chart-season"),
        "text-season",
        &data.seasonality.text,
    ));
    body.push_str(&section(
        "action",
        "7. 실행 계획 (Action Plan)",
        &format!(
            "{}\n        {}",
            table(
                "table-ice",
                &["니즈", "과제", "Impact", "Confidence", "Ease", "ICE", "비고"],
                &ice_rows(&data.action_plan.ice),
            ),
            table(
                "table-spec",
                &["요구 스펙", "속성", "상황", "KPI", "검증 방법"],
                &spec_rows(&data.action_plan.spec),
            )
        ),
        "text-action",
        &data.action_plan.text,
    ));
    body.push_str(&section(
        "evidence",
        "8. 고객의 목소리 (Evidence)",
        &format!(
            r#"<div class="controls">
            <select id="evidence-filter">{filter_options}</select>
        </div>
        <div id="evidence-container">{cards}</div>"#,
            filter_options = render_filter_options(&data.evidence.samples, &options.evidence_filter),
            cards = render_evidence_cards(&data.evidence.samples, &options.evidence_filter),
        ),
        "text-evidence",
        &data.evidence.text,
    ));

    body.push_str(&format!(
        r#"
    <section id="glossary">
        <h2>용어 사전 (Glossary)</h2>
        <div class="glossary-grid" id="glossary-grid">{glossary}</div>
    </section>
</div>"#,
        glossary = render_glossary(data.glossary.as_deref()),
    ));

    body
}

/// Renders the full page. Output depends only on `data` and `options`.
pub fn render_page(data: &DashboardData, options: &RenderOptions) -> Result<RenderedPage> {
    let charts = chart_options(data, options);
    let charts_json =
        serde_json::to_string(&charts).context("failed to serialize chart options")?;
    let runtime_json = serde_json::to_string(&runtime_payload(&data.context_analysis.chart_data))
        .context("failed to serialize page runtime data")?;
    let body = render_body(data, options);

    let html = document(&PageParts {
        title: &data.meta.title,
        body: &body,
        charts_json: &charts_json,
        runtime_json: &runtime_json,
        echarts_src: &options.echarts_src,
    });

    Ok(RenderedPage { html, charts })
}
