use super::html::escape_html;
use crate::labels::{aspect_label, short_label};
use crate::model::{BucketAspectRow, IceRow, SpecRow};

pub fn market_pain_rows(rows: &[BucketAspectRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "\n        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n    ",
                escape_html(&aspect_label(&row.aspect)),
                row.unmet_like_cnt,
                row.n_items,
                escape_html(&row.unmet_like_rate_pct),
            )
        })
        .collect()
}

pub fn golden_nugget_rows(rows: &[BucketAspectRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "\n        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n    ",
                escape_html(&aspect_label(&row.aspect)),
                row.unmet_accumulated(),
                row.met_cnt,
                row.n_items,
            )
        })
        .collect()
}

pub fn ice_rows(rows: &[IceRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                r#"
        <tr>
            <td><strong>{needs}</strong></td>
            <td>{name}</td>
            <td>{impact}</td>
            <td>{confidence}</td>
            <td>{ease}</td>
            <td><strong>{score}</strong></td>
            <td>{note}</td>
        </tr>
    "#,
                needs = escape_html(short_label(&aspect_label(&row.needs))),
                name = escape_html(&row.name),
                impact = row.impact,
                confidence = row.confidence,
                ease = row.ease,
                score = row.score,
                note = escape_html(&row.note),
            )
        })
        .collect()
}

pub fn spec_rows(rows: &[SpecRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                r#"
        <tr>
            <td>{req}</td>
            <td>{aspect}</td>
            <td>{context}</td>
            <td>{kpi}</td>
            <td>{test}</td>
        </tr>
    "#,
                req = escape_html(&row.req),
                aspect = escape_html(&aspect_label(&row.aspect)),
                context = escape_html(&row.context),
                kpi = escape_html(&row.kpi),
                test = escape_html(&row.test),
            )
        })
        .collect()
}

/// `<table>` with a fixed header and pre-rendered body rows.
pub fn table(id: &str, headers: &[&str], body_rows: &str) -> String {
    let header_cells: String = headers
        .iter()
        .map(|header| format!("<th>{}</th>", escape_html(header)))
        .collect();

    format!(
        r#"<table id="{id}">
            <thead><tr>{header_cells}</tr></thead>
            <tbody>{body_rows}</tbody>
        </table>"#
    )
}
