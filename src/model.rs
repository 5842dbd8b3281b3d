use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub meta: ReportMeta,
    pub quality_gate: QualityGate,
    pub polarity_overview: Section<PolarityRow>,
    pub opportunity_map: Section<OpportunityRow>,
    pub market_pain: Section<BucketAspectRow>,
    pub golden_nugget: Section<BucketAspectRow>,
    pub context_analysis: Section<ContextRow>,
    pub seasonality: Section<SeasonRow>,
    pub action_plan: ActionPlan,
    pub evidence: Evidence,
    #[serde(default)]
    pub glossary: Option<Vec<GlossaryEntry>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub title: String,
    pub generated_at: String,
    #[serde(default)]
    pub caveat: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityGate {
    pub metrics: Vec<QualityMetric>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetric {
    pub label: String,
    pub value: MetricValue,
    #[serde(default)]
    pub desc: String,
}

/// Stat card values arrive either as raw counts or as pre-formatted strings
/// such as `"94.2%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section<R> {
    pub chart_data: Vec<R>,
    pub text: NarrativeText,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub takeaway: Option<String>,
    #[serde(default)]
    pub interpretation: String,
    #[serde(default)]
    pub caveat: String,
}

impl NarrativeText {
    pub fn headline(&self) -> &str {
        self.observation
            .as_deref()
            .or(self.takeaway.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolarityRow {
    pub bucket: String,
    pub met_cnt: u64,
    pub unmet_cnt: u64,
    pub mixed_cnt: u64,
    pub unknown_cnt: u64,
    pub n_items: u64,
    pub met_rate: f64,
    pub unmet_rate: f64,
    pub mixed_rate: f64,
    pub unknown_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityRow {
    pub aspect: String,
    pub goods_cnt_any: u64,
    pub reviews_any_cnt: u64,
    pub goods_cnt_unmet_like: u64,
    pub reviews_unmet_like_cnt: u64,
    pub goods_repeat_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_kr: Option<String>,
}

/// Per-bucket aspect row shared by the market-pain and golden-nugget sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketAspectRow {
    pub bucket: String,
    pub aspect: String,
    pub n_items: u64,
    pub met_cnt: u64,
    pub unmet_cnt: u64,
    pub mixed_cnt: u64,
    pub unknown_cnt: u64,
    pub unmet_like_cnt: u64,
    pub unmet_like_rate: f64,
    #[serde(default)]
    pub unmet_like_rate_pct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmet_acc: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_kr: Option<String>,
}

impl BucketAspectRow {
    /// Unmet plus mixed mentions; upstream ships it precomputed for the
    /// golden-nugget bucket only.
    pub fn unmet_accumulated(&self) -> u64 {
        self.unmet_acc.unwrap_or(self.unmet_cnt + self.mixed_cnt)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextRow {
    pub context_tag: String,
    pub aspect: String,
    pub n_reviews: u64,
    pub unmet_like_cnt: u64,
    pub met_like_cnt: u64,
    pub unmet_like_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_kr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRow {
    pub season: String,
    pub aspect: String,
    pub n_reviews: u64,
    pub unmet_like_cnt: u64,
    pub met_like_cnt: u64,
    pub unmet_like_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_kr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub ice: Vec<IceRow>,
    pub spec: Vec<SpecRow>,
    pub cards: Vec<NeedCard>,
    pub text: NarrativeText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceRow {
    pub needs: String,
    pub name: String,
    pub impact: u32,
    pub confidence: u32,
    pub ease: u32,
    pub score: u32,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecRow {
    pub req: String,
    pub aspect: String,
    pub context: String,
    pub kpi: String,
    pub test: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeedCard {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub stats: NeedStats,
    pub reqs: Vec<String>,
    #[serde(default)]
    pub tests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeedStats {
    pub repeat: String,
    pub unmet: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    pub samples: Vec<EvidenceSample>,
    pub text: NarrativeText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceSample {
    pub id: String,
    pub quotes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub kr: String,
    pub desc: String,
}

/// Row counts per section, recorded in the render manifest and logged by
/// `inspect`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SectionCounts {
    pub quality_metrics: usize,
    pub polarity_rows: usize,
    pub opportunity_rows: usize,
    pub market_pain_rows: usize,
    pub golden_nugget_rows: usize,
    pub context_rows: usize,
    pub season_rows: usize,
    pub ice_rows: usize,
    pub spec_rows: usize,
    pub need_cards: usize,
    pub evidence_samples: usize,
    pub glossary_entries: usize,
}

impl SectionCounts {
    pub fn of(data: &DashboardData) -> Self {
        Self {
            quality_metrics: data.quality_gate.metrics.len(),
            polarity_rows: data.polarity_overview.chart_data.len(),
            opportunity_rows: data.opportunity_map.chart_data.len(),
            market_pain_rows: data.market_pain.chart_data.len(),
            golden_nugget_rows: data.golden_nugget.chart_data.len(),
            context_rows: data.context_analysis.chart_data.len(),
            season_rows: data.seasonality.chart_data.len(),
            ice_rows: data.action_plan.ice.len(),
            spec_rows: data.action_plan.spec.len(),
            need_cards: data.action_plan.cards.len(),
            evidence_samples: data.evidence.samples.len(),
            glossary_entries: data.glossary.as_ref().map_or(0, Vec::len),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderPaths {
    pub data_path: String,
    pub page_path: String,
    pub markdown_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub report_generated_at: Option<String>,
    pub status: String,
    pub source_sha256: Option<String>,
    pub context_min_n: u32,
    pub paths: RenderPaths,
    pub counts: SectionCounts,
    pub warnings: Vec<String>,
}
