//! Series classification: which release family a listing belongs to.

use std::sync::LazyLock;

use crate::normalize::normalize_text;
use crate::rules::RuleTable;

/// Sentinel returned when no series rule matches.
pub const UNKNOWN_SERIES: &str = "Unknown Series";

/// Sub-series precede their parent series. The "151" family collects every
/// known spelling of the same release in one rule.
const SERIES_RULES: &[(&str, &[&str])] = &[
    ("Mega Evolution - Ascended Heroes", &[r"\bascended heroes\b"]),
    ("Mega Evolution - Phantasmal Flames", &[r"\bphantasmal flames\b"]),
    ("Mega Evolution - Perfect Order", &[r"\bperfect order\b"]),
    ("Mega Evolution", &[r"\bmega evolutions?\b"]),
    ("Crown Zenith", &[r"\bcrown zenith\b"]),
    ("Prismatic Evolutions", &[r"\bprismatic evolutions?\b"]),
    (
        "Scarlet & Violet 151",
        &[
            r"\bpok[eé]mon\b.*\b151\b",
            r"\b151\b.*\bpok[eé]mon\b",
            r"\bpok[eé]mon\s*151\b",
            r"\bsv\s*:?[\s\-_]*151\b",
            r"\bsv151\b",
            r"\bscarlet\s*&\s*violet\s*:?\s*151\b",
            r"\bscarlet\s*and\s*violet\s*:?\s*151\b",
            r"\bscarlet\s+violet\s*:?\s*151\b",
            r"\bs\s*&\s*v\s*:?[\s\-_]*151\b",
            r"\bs&v\s*:?[\s\-_]*151\b",
            r"\bs/v\s*151\b",
        ],
    ),
];

static SERIES_TABLE: LazyLock<RuleTable> = LazyLock::new(|| RuleTable::compile(SERIES_RULES));

/// Returns the canonical series for `text`, or [`UNKNOWN_SERIES`].
#[must_use]
pub fn detect_series(text: &str) -> &'static str {
    SERIES_TABLE
        .first_match(&normalize_text(text))
        .map_or(UNKNOWN_SERIES, |(_, label)| label)
}

/// Picks the most specific series implied by a storefront's matched queries.
///
/// Each query is classified on its own; the result with the lowest rule index
/// wins, so `["mega evolution", "ascended heroes"]` yields the sub-series.
#[must_use]
pub fn series_hint_from_matches<S: AsRef<str>>(matched: &[S]) -> &'static str {
    matched
        .iter()
        .filter_map(|q| SERIES_TABLE.first_match(&normalize_text(q.as_ref())))
        .min_by_key(|(idx, _)| *idx)
        .map_or(UNKNOWN_SERIES, |(_, label)| label)
}

/// `true` when `series` is a concrete label rather than absent/unknown.
#[must_use]
pub fn is_known_series(series: Option<&str>) -> bool {
    series.is_some_and(|s| !s.trim().is_empty() && s != UNKNOWN_SERIES)
}

/// All canonical series labels in priority order.
pub fn series_labels() -> impl Iterator<Item = &'static str> {
    SERIES_TABLE.labels()
}

/// Priority of a canonical series label; lower is more specific.
#[must_use]
pub fn series_rank(label: &str) -> Option<usize> {
    SERIES_TABLE.rank_of(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        assert_eq!(series_labels().count(), SERIES_RULES.len());
    }

    #[test]
    fn empty_text_is_unknown() {
        assert_eq!(detect_series(""), UNKNOWN_SERIES);
    }

    #[test]
    fn unrelated_text_is_unknown() {
        assert_eq!(detect_series("Magic the Gathering Bloomburrow"), UNKNOWN_SERIES);
    }

    #[test]
    fn sub_series_beats_parent_series() {
        assert_eq!(
            detect_series("Mega Evolution Ascended Heroes ETB"),
            "Mega Evolution - Ascended Heroes"
        );
        assert_eq!(
            detect_series("Pokemon Mega Evolution: Phantasmal Flames Booster Bundle"),
            "Mega Evolution - Phantasmal Flames"
        );
        assert_eq!(
            detect_series("Mega Evolutions Perfect Order Booster Box"),
            "Mega Evolution - Perfect Order"
        );
    }

    #[test]
    fn parent_series_alone() {
        assert_eq!(detect_series("Mega Evolutions Booster Box"), "Mega Evolution");
    }

    #[test]
    fn prismatic_singular_and_plural() {
        assert_eq!(detect_series("Prismatic Evolution ETB"), "Prismatic Evolutions");
        assert_eq!(detect_series("PRISMATIC EVOLUTIONS tin"), "Prismatic Evolutions");
    }

    #[test]
    fn crown_zenith() {
        assert_eq!(detect_series("Crown Zenith Booster Bundle"), "Crown Zenith");
    }

    #[test]
    fn the_151_spelling_family_collapses_to_one_series() {
        let spellings = [
            "Pokémon TCG: Scarlet & Violet 151 Elite Trainer Box",
            "Pokemon 151 Booster Bundle",
            "151 Pokemon Mini Tin",
            "Pokémon151 Binder Collection",
            "SV 151 Booster Box",
            "SV: 151 Blister",
            "sv-151 ultra premium collection",
            "sv_151 booster pack",
            "SV151 ETB",
            "Scarlet and Violet 151 ETB",
            "Scarlet Violet 151 Poster Collection",
            "S & V 151 Bundle",
            "S&V: 151 Tin",
            "s&v-151 display",
            "S/V 151 Collection",
        ];
        for s in spellings {
            assert_eq!(detect_series(s), "Scarlet & Violet 151", "failed for {s:?}");
        }
    }

    #[test]
    fn bare_151_without_context_is_unknown() {
        assert_eq!(detect_series("Sleeves 151 pack"), UNKNOWN_SERIES);
    }

    #[test]
    fn repeated_calls_are_stable() {
        let title = "Scarlet & Violet 151 Ultra Premium Collection";
        let first = detect_series(title);
        for _ in 0..5 {
            assert_eq!(detect_series(title), first);
        }
    }

    #[test]
    fn hint_from_matches_prefers_most_specific() {
        assert_eq!(
            series_hint_from_matches(&["mega evolution", "ascended heroes"]),
            "Mega Evolution - Ascended Heroes"
        );
    }

    #[test]
    fn hint_from_matches_unknown_when_empty_or_unrecognised() {
        let empty: [&str; 0] = [];
        assert_eq!(series_hint_from_matches(&empty), UNKNOWN_SERIES);
        assert_eq!(series_hint_from_matches(&["sleeves"]), UNKNOWN_SERIES);
    }

    #[test]
    fn hint_from_matches_accepts_owned_strings() {
        let matched = vec!["s/v 151".to_string()];
        assert_eq!(series_hint_from_matches(&matched), "Scarlet & Violet 151");
    }

    #[test]
    fn is_known_series_rejects_sentinel_and_blank() {
        assert!(!is_known_series(None));
        assert!(!is_known_series(Some(UNKNOWN_SERIES)));
        assert!(!is_known_series(Some("  ")));
        assert!(is_known_series(Some("Crown Zenith")));
    }

    #[test]
    fn series_rank_orders_sub_series_first() {
        let sub = series_rank("Mega Evolution - Ascended Heroes").unwrap();
        let parent = series_rank("Mega Evolution").unwrap();
        assert!(sub < parent);
    }
}
