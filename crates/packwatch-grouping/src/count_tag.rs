//! Multiplier annotations such as `8x` or `36 packs`.
//!
//! A single booster pack and a 36-pack booster box share series and type;
//! the count tag keeps them in separate groups.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize_text;

static TIMES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,3})\s*x\b").expect("valid times regex"));

static PACKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\s*(?:booster\s*packs|packs)\b").expect("valid packs regex")
});

static ALL_N_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:alle|all)\s*(\d{1,3})\b").expect("valid all-n regex"));

static N_TINS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\s*(?:mini\s*tins?|tins?)\b").expect("valid tins regex")
});

static PACK_OF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:pack|case)\s*of\s*(\d{1,3})\b").expect("valid pack-of regex"));

fn first_number(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extracts the first multiplier annotation from `text`.
///
/// Tried in order: `<n>x`, `<n> packs` / `<n> booster packs`, then on display
/// listings `all <n>` / `alle <n>` or `<n> tins`, and finally `pack of <n>` /
/// `case of <n>`.
#[must_use]
pub fn detect_count_tag(text: &str) -> Option<String> {
    let normalized = normalize_text(text);
    if normalized.is_empty() {
        return None;
    }

    if let Some(n) = first_number(&TIMES_RE, &normalized) {
        return Some(format!("{n}x"));
    }
    if let Some(n) = first_number(&PACKS_RE, &normalized) {
        return Some(format!("{n} packs"));
    }
    if normalized.contains("display") {
        let display_count = first_number(&ALL_N_RE, &normalized)
            .or_else(|| first_number(&N_TINS_RE, &normalized));
        if let Some(n) = display_count {
            return Some(format!("{n}x"));
        }
    }
    first_number(&PACK_OF_RE, &normalized).map(|n| format!("{n}x"))
}
