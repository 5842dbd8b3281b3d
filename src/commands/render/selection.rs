use crate::cli::DEFAULT_CONTEXT_MIN_N;
use crate::model::{ContextRow, OpportunityRow, SeasonRow};

pub const OPPORTUNITY_MIN_GOODS: u64 = 10;
pub const HIGHLIGHTED_ASPECTS: [&str; 5] = ["IRRITATION", "OILINESS", "PILLING", "DRYNESS", "TONEUP"];
pub const NO_CONTEXT_TAG: &str = "NONE_RULE";
pub const CONTEXT_PAIR_LIMIT: usize = 15;
pub const SEASON_MIN_UNMET: u64 = 10;
pub const SEASON_ASPECT_LIMIT: usize = 8;
pub const SHOW_ALL: &str = "ALL";

/// Aspects mentioned for at least `OPPORTUNITY_MIN_GOODS` products, in input
/// order.
pub fn opportunity_points(rows: &[OpportunityRow]) -> Vec<&OpportunityRow> {
    rows.iter()
        .filter(|row| row.goods_cnt_any >= OPPORTUNITY_MIN_GOODS)
        .collect()
}

pub fn is_highlighted(aspect: &str) -> bool {
    HIGHLIGHTED_ASPECTS.contains(&aspect)
}

/// Scatter symbol diameter grows with the square root of the product count.
pub fn symbol_size(goods_cnt_any: u64) -> f64 {
    (goods_cnt_any as f64).sqrt() * 5.0
}

/// Minimum-sample rule shared by `--context-min-n` and the page input: leading
/// ASCII digits after optional whitespace, read as a `u32`. No digits, zero,
/// or an out-of-range number all mean the default. The page script applies
/// `MIN_N_PATTERN` with the same bounds.
pub fn effective_min_n(input: &str) -> u32 {
    let digits: String = input
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    match digits.parse::<u32>() {
        Ok(value) if value > 0 => value,
        _ => DEFAULT_CONTEXT_MIN_N,
    }
}

pub const MIN_N_PATTERN: &str = r"^\s*([0-9]+)";

/// Context/aspect pairs with enough reviews, excluding untagged reviews,
/// ranked by unmet volume. Ties keep input order.
pub fn context_pairs(rows: &[ContextRow], min_n: u32) -> Vec<&ContextRow> {
    let mut pairs: Vec<&ContextRow> = rows
        .iter()
        .filter(|row| row.n_reviews >= u64::from(min_n) && row.context_tag != NO_CONTEXT_TAG)
        .collect();

    pairs.sort_by(|a, b| b.unmet_like_cnt.cmp(&a.unmet_like_cnt));
    pairs.truncate(CONTEXT_PAIR_LIMIT);
    pairs
}

/// Distinct aspects of the heaviest seasonal rows, highest unmet volume
/// first.
pub fn season_aspects(rows: &[SeasonRow]) -> Vec<&str> {
    let mut heavy: Vec<&SeasonRow> = rows
        .iter()
        .filter(|row| row.unmet_like_cnt > SEASON_MIN_UNMET)
        .collect();
    heavy.sort_by(|a, b| b.unmet_like_cnt.cmp(&a.unmet_like_cnt));

    let mut aspects: Vec<&str> = Vec::with_capacity(SEASON_ASPECT_LIMIT);
    for row in heavy {
        if aspects.len() == SEASON_ASPECT_LIMIT {
            break;
        }
        if !aspects.contains(&row.aspect.as_str()) {
            aspects.push(&row.aspect);
        }
    }

    aspects
}

/// Unmet count of the first row for `(aspect, season)`, or 0.
pub fn season_count(rows: &[SeasonRow], aspect: &str, season: &str) -> u64 {
    rows.iter()
        .find(|row| row.aspect == aspect && row.season == season)
        .map_or(0, |row| row.unmet_like_cnt)
}

/// Which evidence items stay visible for the selected dropdown value.
pub fn evidence_visibility<'a>(
    item_ids: impl IntoIterator<Item = &'a str>,
    selected: &str,
) -> Vec<bool> {
    item_ids
        .into_iter()
        .map(|id| selected == SHOW_ALL || id == selected)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opportunity(aspect: &str, goods: u64) -> OpportunityRow {
        OpportunityRow {
            aspect: aspect.to_string(),
            goods_cnt_any: goods,
            reviews_any_cnt: goods * 4,
            goods_cnt_unmet_like: goods / 2,
            reviews_unmet_like_cnt: goods,
            goods_repeat_rate: 0.5,
            aspect_kr: None,
        }
    }

    fn context(tag: &str, aspect: &str, n_reviews: u64, unmet: u64) -> ContextRow {
        ContextRow {
            context_tag: tag.to_string(),
            aspect: aspect.to_string(),
            n_reviews,
            unmet_like_cnt: unmet,
            met_like_cnt: n_reviews.saturating_sub(unmet),
            unmet_like_rate: unmet as f64 / n_reviews as f64,
            aspect_kr: None,
        }
    }

    fn season(season: &str, aspect: &str, unmet: u64) -> SeasonRow {
        SeasonRow {
            season: season.to_string(),
            aspect: aspect.to_string(),
            n_reviews: unmet * 2 + 1,
            unmet_like_cnt: unmet,
            met_like_cnt: unmet + 1,
            unmet_like_rate: 0.4,
            aspect_kr: None,
        }
    }

    #[test]
    fn opportunity_points_drop_rows_below_sample_threshold() {
        let rows = vec![
            opportunity("IRRITATION", 140),
            opportunity("STAINING", 9),
            opportunity("COOLING", 10),
            opportunity("OTHER", 0),
        ];

        let kept: Vec<&str> = opportunity_points(&rows)
            .into_iter()
            .map(|row| row.aspect.as_str())
            .collect();
        assert_eq!(kept, vec!["IRRITATION", "COOLING"]);
    }

    #[test]
    fn highlight_set_and_symbol_size() {
        assert!(is_highlighted("PILLING"));
        assert!(!is_highlighted("WHITECAST"));
        assert!((symbol_size(100) - 50.0).abs() < f64::EPSILON);
        assert!(symbol_size(0).abs() < f64::EPSILON);
    }

    #[test]
    fn effective_min_n_falls_back_to_default() {
        assert_eq!(effective_min_n("35"), 35);
        assert_eq!(effective_min_n(" 42abc"), 42);
        assert_eq!(effective_min_n("007"), 7);
        assert_eq!(effective_min_n("0"), DEFAULT_CONTEXT_MIN_N);
        assert_eq!(effective_min_n("abc"), DEFAULT_CONTEXT_MIN_N);
        assert_eq!(effective_min_n(""), DEFAULT_CONTEXT_MIN_N);
    }

    #[test]
    fn effective_min_n_rejects_signs_and_overflow() {
        assert_eq!(effective_min_n("+5"), DEFAULT_CONTEXT_MIN_N);
        assert_eq!(effective_min_n("-5"), DEFAULT_CONTEXT_MIN_N);
        assert_eq!(effective_min_n("4294967295"), u32::MAX);
        assert_eq!(effective_min_n("4294967296"), DEFAULT_CONTEXT_MIN_N);
    }

    #[test]
    fn page_pattern_agrees_with_effective_min_n() {
        let pattern = regex::Regex::new(MIN_N_PATTERN).expect("pattern");
        let via_pattern = |raw: &str| {
            pattern
                .captures(raw)
                .and_then(|captures| captures[1].parse::<u64>().ok())
                .filter(|value| *value > 0 && *value <= u64::from(u32::MAX))
                .map_or(DEFAULT_CONTEXT_MIN_N, |value| value as u32)
        };

        for raw in ["35", " 42abc", "007", "0", "abc", "", "+5", "-5", "4294967295", "4294967296"] {
            assert_eq!(via_pattern(raw), effective_min_n(raw), "input {raw:?}");
        }
    }

    #[test]
    fn context_pairs_filter_sort_and_cap() {
        let mut rows = vec![
            context("NONE_RULE", "IRRITATION", 375, 287),
            context("SUMMER", "IRRITATION", 417, 191),
            context("BEFORE_MAKEUP", "PILLING", 19, 18),
            context("SUMMER", "OILINESS", 20, 40),
        ];
        for idx in 0..20 {
            rows.push(context("WINTER", "DRYNESS", 100, idx));
        }

        let pairs = context_pairs(&rows, 20);
        assert_eq!(pairs.len(), CONTEXT_PAIR_LIMIT);
        assert!(pairs.iter().all(|row| row.context_tag != NO_CONTEXT_TAG));
        assert!(pairs.iter().all(|row| row.n_reviews >= 20));
        assert_eq!(pairs[0].unmet_like_cnt, 191);
        assert_eq!(pairs[1].unmet_like_cnt, 40);
        assert!(pairs.windows(2).all(|w| w[0].unmet_like_cnt >= w[1].unmet_like_cnt));

        // The 13 largest WINTER rows fill the rest: 19 down to 7.
        assert_eq!(pairs[CONTEXT_PAIR_LIMIT - 1].unmet_like_cnt, 7);
    }

    #[test]
    fn context_pairs_respect_raised_threshold() {
        let rows = vec![
            context("SUMMER", "IRRITATION", 417, 191),
            context("SUMMER", "OILINESS", 80, 60),
        ];
        let pairs = context_pairs(&rows, 100);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].aspect, "IRRITATION");
    }

    #[test]
    fn season_aspects_are_distinct_top_ranked() {
        let rows = vec![
            season("summer", "OILINESS", 120),
            season("winter", "DRYNESS", 90),
            season("summer", "IRRITATION", 100),
            season("winter", "OILINESS", 95),
            season("fall", "SCENT", 10),
            season("fall", "TONEUP", 11),
        ];

        assert_eq!(
            season_aspects(&rows),
            vec!["OILINESS", "IRRITATION", "DRYNESS", "TONEUP"]
        );
    }

    #[test]
    fn season_aspects_cap_at_limit() {
        let rows: Vec<SeasonRow> = (0..12)
            .map(|idx| season("summer", &format!("ASPECT_{idx}"), 20 + idx))
            .collect();

        let aspects = season_aspects(&rows);
        assert_eq!(aspects.len(), SEASON_ASPECT_LIMIT);
        assert_eq!(aspects[0], "ASPECT_11");
        assert_eq!(aspects[SEASON_ASPECT_LIMIT - 1], "ASPECT_4");
    }

    #[test]
    fn context_ties_keep_input_order() {
        let rows = vec![
            context("SUMMER", "PILLING", 100, 50),
            context("WINTER", "DRYNESS", 100, 80),
            context("BEFORE_MAKEUP", "PILLING", 100, 50),
            context("SUMMER", "OILINESS", 100, 50),
        ];

        let order: Vec<(&str, &str)> = context_pairs(&rows, 20)
            .into_iter()
            .map(|row| (row.context_tag.as_str(), row.aspect.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("WINTER", "DRYNESS"),
                ("SUMMER", "PILLING"),
                ("BEFORE_MAKEUP", "PILLING"),
                ("SUMMER", "OILINESS"),
            ]
        );
    }

    #[test]
    fn context_ties_at_the_cut_keep_earliest_rows() {
        let rows: Vec<ContextRow> = (0..20)
            .map(|idx| context("SUMMER", &format!("ASPECT_{idx}"), 100, 30))
            .collect();

        let pairs = context_pairs(&rows, 20);
        assert_eq!(pairs.len(), CONTEXT_PAIR_LIMIT);
        assert_eq!(pairs[0].aspect, "ASPECT_0");
        assert_eq!(pairs[CONTEXT_PAIR_LIMIT - 1].aspect, "ASPECT_14");
    }

    #[test]
    fn season_ties_keep_input_order() {
        let rows = vec![
            season("winter", "DRYNESS", 40),
            season("summer", "OILINESS", 60),
            season("summer", "TONEUP", 40),
            season("winter", "IRRITATION", 40),
            season("summer", "DRYNESS", 40),
        ];

        assert_eq!(
            season_aspects(&rows),
            vec!["OILINESS", "DRYNESS", "TONEUP", "IRRITATION"]
        );
    }

    #[test]
    fn season_count_defaults_to_zero() {
        let rows = vec![season("summer", "OILINESS", 120)];
        assert_eq!(season_count(&rows, "OILINESS", "summer"), 120);
        assert_eq!(season_count(&rows, "OILINESS", "winter"), 0);
    }

    #[test]
    fn evidence_visibility_matches_selection() {
        let ids = ["IRRITATION", "OILINESS", "PILLING"];
        assert_eq!(
            evidence_visibility(ids, "OILINESS"),
            vec![false, true, false]
        );
        assert_eq!(evidence_visibility(ids, SHOW_ALL), vec![true, true, true]);
        assert_eq!(evidence_visibility(ids, "SCENT"), vec![false, false, false]);
    }
}
