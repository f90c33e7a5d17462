//! Text canonicalisation shared by every classifier.

use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not a word character, whitespace, `&`, `-` or `/`.
static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s&\-/]+").expect("valid punctuation regex"));

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Canonicalises free text for pattern matching and key building.
///
/// Lower-cases, folds the Danish vowels (`æ` → `ae`, `ø` → `oe`, `å` → `aa`),
/// turns en/em dashes into `-`, replaces every other punctuation run with a
/// space, collapses whitespace and trims. `/` survives so that spellings such
/// as `"s/v 151"` stay recognisable.
///
/// Total and idempotent: `normalize_text(&normalize_text(t)) == normalize_text(t)`.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let folded = lower
        .replace('æ', "ae")
        .replace('ø', "oe")
        .replace('å', "aa")
        .replace(['\u{2013}', '\u{2014}'], "-");
    let stripped = PUNCT_RE.replace_all(&folded, " ");
    WS_RE.replace_all(&stripped, " ").trim().to_string()
}
