//! Character/variant themes on trainer boxes, e.g. `"... ETB (Glaceon)"`.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize_text;
use crate::product_type::is_elite_trainer_box_family;

static PHRASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:elite trainer box|etb)\b").expect("valid theme phrase regex"));

static PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]*)\)").expect("valid theme paren regex"));

/// A candidate containing any of these describes packaging, not a theme.
static RETAIL_NOISE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:case|kort|cards?|\d{1,3}\s*x|\d{1,3}\s*(?:booster\s*)?packs?|scarlet|violet|prismatic|evolutions?)\b")
        .expect("valid retail noise regex")
});

static TOKEN_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-/]+").expect("valid token split regex"));

static MODEL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{1,3}\d{1,3}$").expect("valid model code regex"));

const THEME_STOPWORDS: &[&str] = &[
    "pokemon",
    "center",
    "plus",
    "elite",
    "trainer",
    "box",
    "etb",
    "english",
    "sealed",
    "preorder",
    "pre-order",
    "pre",
    "order",
    "edition",
    "limited",
    "new",
    "promo",
    "for",
    "forudbestil",
    "forudbestilling",
    "forudbestilles",
    "mega",
    "evolution",
    "evolutions",
    "case",
    "kort",
    "card",
    "cards",
    "scarlet",
    "violet",
    "prismatic",
    "pokemonkort",
    "tcg",
    "inkl",
    "inklusive",
    "with",
    "booster",
    "boosters",
    "pack",
    "packs",
];

/// Extracts a theme from a trainer-box title.
///
/// Returns `None` unless `product_type` is in the trainer-box family. The text
/// trailing "elite trainer box"/"etb" outside any parentheses is tried first,
/// then each parenthesised group after the phrase. A candidate carrying retail
/// noise is skipped as a whole.
#[must_use]
pub fn detect_theme(title: &str, product_type: &str) -> Option<String> {
    if !is_elite_trainer_box_family(product_type) {
        return None;
    }

    let lowered = title.to_lowercase();
    let phrase = PHRASE_RE.find(&lowered)?;
    let tail = &lowered[phrase.end()..];

    let trailing = normalize_text(&PAREN_RE.replace_all(tail, " "));
    let trailing = trailing.trim_start_matches(|c: char| c == '-' || c.is_whitespace());
    let parenthesised = PAREN_RE
        .captures_iter(tail)
        .filter_map(|caps| caps.get(1))
        .map(|m| normalize_text(m.as_str()));

    std::iter::once(trailing.to_string())
        .chain(parenthesised)
        .filter(|candidate| !candidate.is_empty() && !RETAIL_NOISE_RE.is_match(candidate))
        .find_map(|candidate| first_theme_token(&candidate))
}

fn first_theme_token(candidate: &str) -> Option<String> {
    TOKEN_SPLIT_RE
        .split(candidate.trim())
        .filter(|tok| !tok.is_empty())
        .find(|tok| is_theme_token(tok))
        .map(title_case)
}

fn is_theme_token(tok: &str) -> bool {
    !tok.chars().all(|c| c.is_ascii_digit())
        && !THEME_STOPWORDS.contains(&tok)
        && tok.chars().count() >= 3
        && !MODEL_CODE_RE.is_match(tok)
}

/// Upper-cases every letter that follows a non-letter.
fn title_case(tok: &str) -> String {
    let mut out = String::with_capacity(tok.len());
    let mut prev_is_letter = false;
    for c in tok.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out.replace('-', " ")
}
