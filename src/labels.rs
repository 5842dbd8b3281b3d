/// Korean display names for aspect keys and a few context keys.
const ASPECT_LABELS: &[(&str, &str)] = &[
    ("IRRITATION", "자극/따가움"),
    ("OILINESS", "유분/피지"),
    ("DRYNESS", "건조/속당김"),
    ("PILLING", "밀림/때처럼 밀림"),
    ("TONEUP", "톤업(자연스러움)"),
    ("WHITECAST", "백탁/회끼/동동 뜸"),
    ("EYE_STING", "눈시림"),
    ("FLAKING", "각질 부각/들뜸"),
    ("LONGEVITY", "지속력(시간 지나면 무너짐)"),
    ("TEXTURE_HEAVY", "무거운 사용감/답답함"),
    ("ABSORPTION", "흡수/겉돎"),
    ("TROUBLE", "트러블/뒤집어짐"),
    ("SCENT", "향"),
    ("MOISTURE", "보습"),
    ("STICKINESS", "끈적임"),
    ("SPREADABILITY", "발림성"),
    ("STAINING", "묻어남"),
    ("ALL", "전체"),
    ("OTHER", "기타"),
    ("TEXTURE", "제형"),
    ("COOLING", "쿨링감"),
    ("WATERPROOF", "워터프루프"),
    ("CLEANSING", "세정력"),
];

pub fn korean_name(key: &str) -> Option<&'static str> {
    ASPECT_LABELS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, name)| *name)
}

/// `"<korean> (<KEY>)"` for known keys, the bare key otherwise.
pub fn aspect_label(key: &str) -> String {
    match korean_name(key) {
        Some(name) => format!("{name} ({key})"),
        None => key.to_string(),
    }
}

/// Korean name alone, or the key when it has none.
pub fn label_or_key(key: &str) -> &str {
    korean_name(key).unwrap_or(key)
}

/// Text before the first `(`, trailing space trimmed. Compact axis ticks use
/// this, so names that themselves contain a parenthesis are cut there too.
pub fn short_label(label: &str) -> &str {
    label.split('(').next().unwrap_or(label).trim_end()
}

/// Label pairs exported to the page runtime so slider re-renders use the
/// same table.
pub fn label_table() -> impl Iterator<Item = (&'static str, &'static str)> {
    ASPECT_LABELS.iter().copied()
}
