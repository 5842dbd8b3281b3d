use serde_json::{Value, json};

use super::selection::{
    context_pairs, is_highlighted, opportunity_points, season_aspects, season_count, symbol_size,
};
use crate::labels::{aspect_label, label_or_key, short_label};
use crate::model::{BucketAspectRow, ContextRow, OpportunityRow, PolarityRow, SeasonRow};

pub const COLOR_MET: &str = "#27ae60";
pub const COLOR_MIXED: &str = "#f39c12";
pub const COLOR_UNMET: &str = "#c0392b";
pub const COLOR_UNKNOWN: &str = "#bdc3c7";
pub const COLOR_NEUTRAL: &str = "#3498db";
pub const COLOR_CONTEXT: &str = "#8e44ad";
pub const COLOR_SUMMER: &str = "#e74c3c";
pub const COLOR_WINTER: &str = "#3498db";

// Formatter tokens resolved to functions by the page runtime.
pub const FMT_PERCENT_AXIS: &str = "fmt:percentAxis";
pub const FMT_PERCENT_LABEL: &str = "fmt:percentLabel";
pub const FMT_SHORT_LABEL: &str = "fmt:shortLabel";
pub const FMT_POLARITY_TOOLTIP: &str = "fmt:polarityTooltip";
pub const FMT_OPPORTUNITY_TOOLTIP: &str = "fmt:opportunityTooltip";
pub const FMT_POINT_NAME: &str = "fmt:pointName";

fn shadow_tooltip() -> Value {
    json!({ "trigger": "axis", "axisPointer": { "type": "shadow" } })
}

fn contained_grid(bottom: &str) -> Value {
    json!({ "left": "3%", "right": "4%", "bottom": bottom, "containLabel": true })
}

fn stacked_bar(name: &str, data: Vec<Value>, color: &str) -> Value {
    json!({ "name": name, "type": "bar", "stack": "total", "data": data, "color": color })
}

/// Horizontal 100% stacked bar of polarity shares per sampling bucket.
pub fn polarity_option(rows: &[PolarityRow]) -> Value {
    let buckets: Vec<&str> = rows.iter().map(|row| row.bucket.as_str()).collect();
    let rates = |pick: fn(&PolarityRow) -> f64| -> Vec<Value> {
        rows.iter().map(|row| json!(pick(row))).collect()
    };

    let mut tooltip = shadow_tooltip();
    tooltip["formatter"] = json!(FMT_POLARITY_TOOLTIP);

    json!({
        "tooltip": tooltip,
        "legend": { "bottom": 0 },
        "grid": contained_grid("10%"),
        "xAxis": { "type": "value", "max": 1, "axisLabel": { "formatter": FMT_PERCENT_AXIS } },
        "yAxis": { "type": "category", "data": buckets },
        "series": [
            stacked_bar("Met", rates(|row| row.met_rate), COLOR_MET),
            stacked_bar("Mixed", rates(|row| row.mixed_rate), COLOR_MIXED),
            stacked_bar("Unmet", rates(|row| row.unmet_rate), COLOR_UNMET),
            stacked_bar("Unknown", rates(|row| row.unknown_rate), COLOR_UNKNOWN),
        ],
    })
}

pub fn opportunity_point(row: &OpportunityRow) -> Value {
    let color = if is_highlighted(&row.aspect) {
        COLOR_UNMET
    } else {
        COLOR_NEUTRAL
    };

    json!({
        "value": [row.goods_repeat_rate, row.reviews_unmet_like_cnt, row.goods_cnt_any],
        "name": aspect_label(&row.aspect),
        "aspect": row.aspect,
        "display": label_or_key(&row.aspect),
        "symbolSize": symbol_size(row.goods_cnt_any),
        "itemStyle": { "color": color, "opacity": 0.7 },
    })
}

/// Repeatability vs unmet volume scatter; bubble area tracks product count.
pub fn opportunity_option(rows: &[OpportunityRow]) -> Value {
    let points: Vec<Value> = opportunity_points(rows)
        .into_iter()
        .map(opportunity_point)
        .collect();

    json!({
        "tooltip": { "formatter": FMT_OPPORTUNITY_TOOLTIP },
        "xAxis": {
            "name": "Repeatability (반복성)",
            "type": "value",
            "axisLabel": { "formatter": FMT_PERCENT_AXIS },
        },
        "yAxis": { "name": "Unmet Volume (규모)", "type": "value" },
        "series": [{
            "type": "scatter",
            "data": points,
            "label": {
                "show": true,
                "formatter": FMT_POINT_NAME,
                "position": "top",
                "fontSize": 10,
            },
        }],
    })
}

fn category_labels<'a>(aspects: impl Iterator<Item = &'a str>) -> Vec<String> {
    aspects.map(aspect_label).collect()
}

pub fn market_pain_option(rows: &[BucketAspectRow]) -> Value {
    let labels = category_labels(rows.iter().map(|row| row.aspect.as_str()));
    let rates: Vec<f64> = rows.iter().map(|row| row.unmet_like_rate).collect();

    json!({
        "title": { "text": "Top 10 Unmet Rate", "left": "center" },
        "tooltip": shadow_tooltip(),
        "grid": contained_grid("3%"),
        "xAxis": {
            "type": "category",
            "data": labels,
            "axisLabel": { "interval": 0, "rotate": 30, "formatter": FMT_SHORT_LABEL },
        },
        "yAxis": { "type": "value", "axisLabel": { "formatter": FMT_PERCENT_AXIS } },
        "series": [{
            "data": rates,
            "type": "bar",
            "color": COLOR_UNMET,
            "label": { "show": true, "position": "top", "formatter": FMT_PERCENT_LABEL },
        }],
    })
}

pub fn golden_nugget_option(rows: &[BucketAspectRow]) -> Value {
    let labels = category_labels(rows.iter().map(|row| row.aspect.as_str()));
    let unmet: Vec<Value> = rows.iter().map(|row| json!(row.unmet_accumulated())).collect();
    let met: Vec<Value> = rows.iter().map(|row| json!(row.met_cnt)).collect();

    json!({
        "title": { "text": "Unmet vs Met Volume", "left": "center" },
        "tooltip": shadow_tooltip(),
        "legend": { "bottom": 0 },
        "xAxis": {
            "type": "category",
            "data": labels,
            "axisLabel": { "rotate": 30, "formatter": FMT_SHORT_LABEL },
        },
        "yAxis": { "type": "value" },
        "series": [
            stacked_bar("Unmet+Mix", unmet, COLOR_MIXED),
            stacked_bar("Met", met, COLOR_MET),
        ],
    })
}

pub fn context_pair_label(row: &ContextRow) -> String {
    format!(
        "{} - {}",
        row.context_tag,
        short_label(&aspect_label(&row.aspect))
    )
}

pub fn context_title(min_n: u32) -> String {
    format!("Top Context Pairs (n>={min_n})")
}

/// Top context/aspect pairs as horizontal bars, largest on top.
pub fn context_option(rows: &[ContextRow], min_n: u32) -> Value {
    let pairs = context_pairs(rows, min_n);
    let labels: Vec<String> = pairs.iter().rev().map(|row| context_pair_label(row)).collect();
    let counts: Vec<u64> = pairs.iter().rev().map(|row| row.unmet_like_cnt).collect();

    json!({
        "title": { "text": context_title(min_n), "left": "center" },
        "tooltip": shadow_tooltip(),
        "grid": contained_grid("3%"),
        "xAxis": { "type": "value" },
        "yAxis": { "type": "category", "data": labels },
        "series": [{
            "type": "bar",
            "data": counts,
            "color": COLOR_CONTEXT,
            "label": { "show": true, "position": "right" },
        }],
    })
}

/// Summer vs winter unmet volume for the heaviest seasonal aspects.
pub fn season_option(rows: &[SeasonRow]) -> Value {
    let aspects = season_aspects(rows);
    let labels: Vec<String> = aspects
        .iter()
        .map(|aspect| short_label(&aspect_label(aspect)).to_string())
        .collect();
    let summer: Vec<u64> = aspects
        .iter()
        .map(|aspect| season_count(rows, aspect, "summer"))
        .collect();
    let winter: Vec<u64> = aspects
        .iter()
        .map(|aspect| season_count(rows, aspect, "winter"))
        .collect();

    json!({
        "tooltip": shadow_tooltip(),
        "legend": { "bottom": 0 },
        "xAxis": { "type": "category", "data": labels },
        "yAxis": { "type": "value" },
        "series": [
            { "name": "Summer", "type": "bar", "data": summer, "color": COLOR_SUMMER },
            { "name": "Winter", "type": "bar", "data": winter, "color": COLOR_WINTER },
        ],
    })
}
