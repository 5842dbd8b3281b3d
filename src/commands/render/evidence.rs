use super::html::escape_html;
use super::selection::{SHOW_ALL, evidence_visibility};
use crate::labels::aspect_label;
use crate::model::EvidenceSample;

pub const SHOW_ALL_LABEL: &str = "전체 보기";

fn selected_attr(selected: bool) -> &'static str {
    if selected { " selected" } else { "" }
}

/// Dropdown options: "show all" first, then one per sample in input order.
pub fn render_filter_options(samples: &[EvidenceSample], selected: &str) -> String {
    let mut out = format!(
        r#"<option value="{SHOW_ALL}"{}>{SHOW_ALL_LABEL}</option>"#,
        selected_attr(selected == SHOW_ALL)
    );
    for sample in samples {
        out.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(&sample.id),
            selected_attr(sample.id == selected),
            escape_html(&aspect_label(&sample.id)),
        ));
    }
    out
}

/// Cards hidden by the current dropdown selection are emitted with
/// `display:none`; the page script toggles the same property.
pub fn render_evidence_cards(samples: &[EvidenceSample], selected: &str) -> String {
    let visible = evidence_visibility(samples.iter().map(|sample| sample.id.as_str()), selected);

    samples
        .iter()
        .zip(visible)
        .map(|(sample, visible)| {
            let quotes: String = sample
                .quotes
                .iter()
                .map(|quote| format!("<li>\"{}\"</li>", escape_html(quote)))
                .collect();

            format!(
                r#"
        <div class="evidence-card" data-id="{id}" style="display:{display}">
            <h4>{label}</h4>
            <ul>{quotes}</ul>
        </div>
    "#,
                id = escape_html(&sample.id),
                label = escape_html(&aspect_label(&sample.id)),
                display = if visible { "block" } else { "none" },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<EvidenceSample> {
        vec![
            EvidenceSample {
                id: "IRRITATION".to_string(),
                quotes: vec!["바르자마자 따가워요".to_string(), "피부가 뒤집어졌어요".to_string()],
            },
            EvidenceSample {
                id: "CUSTOM".to_string(),
                quotes: Vec::new(),
            },
        ]
    }

    #[test]
    fn filter_options_start_with_show_all() {
        let html = render_filter_options(&samples(), SHOW_ALL);
        assert!(html.starts_with("<option value=\"ALL\" selected>전체 보기</option>"));
        assert!(html.contains("<option value=\"IRRITATION\">자극/따가움 (IRRITATION)</option>"));
        assert!(html.ends_with("<option value=\"CUSTOM\">CUSTOM</option>"));
        assert_eq!(html.matches("<option").count(), 3);
    }

    #[test]
    fn evidence_cards_carry_ids_and_quoted_items() {
        let html = render_evidence_cards(&samples(), SHOW_ALL);
        assert!(html.contains("<div class=\"evidence-card\" data-id=\"IRRITATION\" style=\"display:block\">"));
        assert!(html.contains("<h4>자극/따가움 (IRRITATION)</h4>"));
        assert!(html.contains("<li>\"바르자마자 따가워요\"</li><li>\"피부가 뒤집어졌어요\"</li>"));
        assert!(html.contains("<div class=\"evidence-card\" data-id=\"CUSTOM\" style=\"display:block\">"));
        assert!(html.contains("<ul></ul>"));
    }

    #[test]
    fn selecting_one_id_hides_the_other_cards() {
        let html = render_evidence_cards(&samples(), "CUSTOM");
        assert!(html.contains("data-id=\"IRRITATION\" style=\"display:none\""));
        assert!(html.contains("data-id=\"CUSTOM\" style=\"display:block\""));
        assert_eq!(html.matches("display:block").count(), 1);

        let options = render_filter_options(&samples(), "CUSTOM");
        assert!(options.starts_with("<option value=\"ALL\">전체 보기</option>"));
        assert!(options.contains("<option value=\"CUSTOM\" selected>CUSTOM</option>"));
        assert_eq!(options.matches(" selected").count(), 1);
    }

    #[test]
    fn unknown_selection_hides_every_card() {
        let html = render_evidence_cards(&samples(), "SCENT");
        assert_eq!(html.matches("display:none").count(), 2);
        assert!(!html.contains("display:block"));
    }
}
