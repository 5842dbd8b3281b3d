//! Page shell, stylesheet and browser runtime for the rendered dashboard.
//!
//! The runtime only initializes charts from the embedded option documents,
//! resolves `fmt:*` formatter tokens, re-ranks context pairs when the
//! minimum-sample input changes, and toggles evidence cards. Everything else
//! is rendered ahead of time.

pub const MISSING_DATA_BANNER: &str =
    "<h1 style='color:red'>Data Missing. Run build script.</h1>";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// JSON placed inside a `<script>` element must not close it early.
pub fn script_safe_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub struct PageParts<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub charts_json: &'a str,
    pub runtime_json: &'a str,
    pub echarts_src: &'a str,
}

pub fn document(parts: &PageParts<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
    <script src="{echarts_src}"></script>
</head>
<body>
{body}
    <script type="application/json" id="dashboard-charts">{charts}</script>
    <script type="application/json" id="dashboard-runtime">{runtime}</script>
    <script>{js}</script>
</body>
</html>
"#,
        title = escape_html(parts.title),
        css = inline_css(),
        echarts_src = escape_html(parts.echarts_src),
        body = parts.body,
        charts = script_safe_json(parts.charts_json),
        runtime = script_safe_json(parts.runtime_json),
        js = inline_javascript(),
    )
}

/// Page emitted when the dataset could not be found.
pub fn missing_data_document(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
    {banner}
    </div>
    <script>console.error("DASHBOARD_DATA missing!");</script>
</body>
</html>
"#,
        title = escape_html(title),
        css = inline_css(),
        banner = MISSING_DATA_BANNER,
    )
}

fn inline_css() -> &'static str {
    r#"
body { font-family: "Pretendard", "Apple SD Gothic Neo", "Malgun Gothic", sans-serif; margin: 0; background: #f5f6fa; color: #2c3e50; }
.container { max-width: 1200px; margin: 0 auto; padding: 24px; }
header { display: flex; justify-content: space-between; align-items: baseline; border-bottom: 2px solid #2c3e50; margin-bottom: 24px; }
header .caveat { font-size: 0.85em; color: #7f8c8d; }
section { background: #fff; border-radius: 8px; padding: 20px; margin-bottom: 24px; box-shadow: 0 1px 3px rgba(0,0,0,0.08); }
h2 { margin-top: 0; }
.cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; }
.stat-card { background: #ecf0f1; border-radius: 6px; padding: 12px; text-align: center; }
.stat-card .val { display: block; font-size: 1.8em; font-weight: bold; }
.stat-card .label { font-size: 0.85em; color: #7f8c8d; }
.needs-card { border: 1px solid #dfe6e9; border-radius: 6px; padding: 12px; }
.needs-card h3 { margin: 0 0 6px; font-size: 1.05em; }
.needs-card .desc { color: #636e72; margin-bottom: 6px; }
.chart { width: 100%; height: 420px; }
.text-block { background: #fdfefe; border-left: 4px solid #3498db; padding: 8px 14px; margin-top: 12px; }
.text-block h4 { margin: 4px 0; }
.caveat { font-size: 0.85em; color: #e67e22; }
table { width: 100%; border-collapse: collapse; margin-top: 12px; font-size: 0.9em; }
th, td { border-bottom: 1px solid #ecf0f1; padding: 6px 8px; text-align: left; }
th { background: #f8f9f9; }
.controls { margin-bottom: 8px; }
.evidence-card { border-left: 4px solid #c0392b; padding: 4px 12px; margin-bottom: 12px; }
.glossary-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 12px; }
.glossary-card { border: 1px solid #dfe6e9; border-radius: 6px; padding: 10px; }
.glossary-card h5 { margin: 0; font-size: 1em; }
.glossary-card .krname { color: #2980b9; margin: 4px 0; }
.glossary-card .desc { font-size: 0.85em; color: #636e72; }
@media print { .controls { display: none; } section { break-inside: avoid; box-shadow: none; } }
"#
}

fn inline_javascript() -> &'static str {
    r#"
(function () {
    const SHOW_ALL = "ALL";
    const runtime = JSON.parse(document.getElementById("dashboard-runtime").textContent);
    const chartOptions = JSON.parse(document.getElementById("dashboard-charts").textContent);
    const charts = {};

    function getLabel(key) {
        const name = runtime.labels[key];
        return name ? `${name} (${key})` : key;
    }
    function shortLabel(value) {
        return String(value).split("(")[0].trim();
    }

    const FORMATTERS = {
        percentAxis: v => (v * 100) + "%",
        percentLabel: p => (p.value * 100).toFixed(1) + "%",
        shortLabel: v => shortLabel(v),
        pointName: p => p.data.display,
        polarityTooltip: params => {
            let res = params[0].name + "<br/>";
            params.forEach(p => {
                res += `${p.seriesName}: ${(p.value * 100).toFixed(1)}%<br/>`;
            });
            return res;
        },
        opportunityTooltip: params => `<b>${params.data.name}</b><br/>
            Repeat Rate: ${(params.value[0] * 100).toFixed(1)}%<br/>
            Unmet Vol: ${params.value[1]}<br/>
            Goods Cnt: ${params.value[2]}`
    };

    function resolveFormatters(node) {
        if (Array.isArray(node)) {
            node.forEach(resolveFormatters);
        } else if (node && typeof node === "object") {
            Object.keys(node).forEach(key => {
                const value = node[key];
                if (key === "formatter" && typeof value === "string" && value.startsWith("fmt:")) {
                    node[key] = FORMATTERS[value.slice(4)] || value;
                } else {
                    resolveFormatters(value);
                }
            });
        }
    }

    function effectiveMinN(raw) {
        const ctx = runtime.context;
        const match = new RegExp(ctx.min_n_pattern).exec(String(raw));
        const parsed = match ? Number(match[1]) : 0;
        return parsed > 0 && parsed <= ctx.max_min_n ? parsed : ctx.default_min_n;
    }

    function contextPairs(minN) {
        return runtime.context.rows
            .filter(d => d.n_reviews >= minN && d.context_tag !== runtime.context.excluded_tag)
            .sort((a, b) => b.unmet_like_cnt - a.unmet_like_cnt)
            .slice(0, runtime.context.limit);
    }

    function renderContext() {
        const chart = charts["chart-context"];
        const input = document.getElementById("ctx-min-n");
        if (!chart || !input) return;
        const minN = effectiveMinN(input.value);
        const pairs = contextPairs(minN);
        chart.setOption({
            title: { text: `Top Context Pairs (n>=${minN})` },
            yAxis: { data: pairs.map(d => `${d.context_tag} - ${shortLabel(getLabel(d.aspect))}`).reverse() },
            series: [{ data: pairs.map(d => d.unmet_like_cnt).reverse() }]
        });
    }

    function filterEvidence() {
        const selected = document.getElementById("evidence-filter").value;
        document.querySelectorAll(".evidence-card").forEach(item => {
            item.style.display = (selected === SHOW_ALL || item.dataset.id === selected) ? "block" : "none";
        });
    }

    document.addEventListener("DOMContentLoaded", () => {
        if (typeof echarts === "undefined") {
            console.error("echarts failed to load; charts are not rendered");
        } else {
            Object.keys(chartOptions).forEach(id => {
                const el = document.getElementById(id);
                if (!el) return;
                const option = chartOptions[id];
                resolveFormatters(option);
                charts[id] = echarts.init(el);
                charts[id].setOption(option);
            });
            window.addEventListener("resize", () => Object.values(charts).forEach(c => c.resize()));
        }

        const minInput = document.getElementById("ctx-min-n");
        if (minInput) minInput.addEventListener("change", renderContext);
        const evidenceSelect = document.getElementById("evidence-filter");
        if (evidenceSelect) evidenceSelect.addEventListener("change", filterEvidence);
    });
})();
"#
}
