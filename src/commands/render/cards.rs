use super::html::escape_html;
use crate::model::{GlossaryEntry, NarrativeText, NeedCard, QualityMetric};

/// Summary block under each section. Narrative strings are authored upstream
/// and may carry inline markup, so they are inserted verbatim.
pub fn render_text_block(text: &NarrativeText) -> String {
    format!(
        r#"
        <h4>💡 요약</h4>
        <p><strong>핵심 관찰:</strong> {observation}</p>
        <p><strong>해석:</strong> {interpretation}</p>
        <div class="caveat">※ 확인 필요: {caveat}</div>
    "#,
        observation = text.headline(),
        interpretation = text.interpretation,
        caveat = text.caveat,
    )
}

pub fn render_quality_cards(metrics: &[QualityMetric]) -> String {
    metrics
        .iter()
        .map(|metric| {
            format!(
                r#"
        <div class="stat-card">
            <span class="val">{value}</span>
            <span class="label">{label}</span>
        </div>
    "#,
                value = escape_html(&metric.value.to_string()),
                label = escape_html(&metric.label),
            )
        })
        .collect()
}

pub fn render_need_cards(cards: &[NeedCard]) -> String {
    let mut out = String::new();

    for (idx, card) in cards.iter().enumerate() {
        let reqs: String = card
            .reqs
            .iter()
            .map(|req| format!("<li>{}</li>", escape_html(req)))
            .collect();

        out.push_str(&format!(
            r#"
        <div class="needs-card">
            <h3>{rank}. {name} <small>({id})</small></h3>
            <div class="desc">{desc}</div>
            <div style="font-size:0.8em; margin-bottom:5px;">
                <strong>Repeat:</strong> {repeat} | <strong>Unmet:</strong> {unmet}
            </div>
            <ul>{reqs}</ul>
        </div>
    "#,
            rank = idx + 1,
            name = escape_html(&card.name),
            id = escape_html(&card.id),
            desc = escape_html(&card.desc),
            repeat = escape_html(&card.stats.repeat),
            unmet = escape_html(&card.stats.unmet),
        ));
    }

    out
}

/// Empty when the dataset carries no glossary.
pub fn render_glossary(entries: Option<&[GlossaryEntry]>) -> String {
    let Some(entries) = entries else {
        return String::new();
    };

    entries
        .iter()
        .map(|entry| {
            format!(
                r#"
        <div class="glossary-card">
            <h5>{term}</h5>
            <div class="krname">{kr}</div>
            <div class="desc">{desc}</div>
        </div>
    "#,
                term = escape_html(&entry.term),
                kr = escape_html(&entry.kr),
                desc = escape_html(&entry.desc),
            )
        })
        .collect()
}
