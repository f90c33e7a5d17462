//! Detection of individual-card listings that must never be grouped.
//!
//! Biased toward flagging: an ambiguous listing is excluded rather than risk
//! pricing a single card as a sealed product.

use std::sync::LazyLock;

use regex::Regex;

/// Card-number notation such as `[sv1-123]`.
static CARD_NO_BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[[a-z0-9\-]{2,}\]").expect("valid card number regex"));

/// Condition strings like `"English / Near Mint / Holo"`.
static SLASHY_CONDITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:english|near mint|reverse|holo)\b.*/").expect("valid slashy condition regex")
});

/// Card number with a set total, e.g. `#098/198`.
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\s*\d{1,3}\s*/\s*\d{1,3}\b").expect("valid set number regex"));

const RARITY_WORDS: &[&str] = &[
    "common",
    "uncommon",
    "rare",
    "double rare",
    "ultra rare",
    "secret rare",
    "illustration rare",
    "art rare",
    "holo",
    "reverse holo",
    "reverse-holo",
    "reverseholo",
];

const CONDITION_WORDS: &[&str] = &[
    "near mint",
    "nm",
    "lp",
    "mp",
    "hp",
    "played",
    "damaged",
    "english / near mint",
    "reverse-holo normal",
];

/// Whole-word match over the rarity and condition vocabulary.
static VOCABULARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = RARITY_WORDS
        .iter()
        .chain(CONDITION_WORDS)
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternatives})\b")).expect("valid card vocabulary regex")
});

static PAREN_RARITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?:common|uncommon|rare)\)").expect("valid paren rarity regex"));

/// Whether `text` describes a single collectible card rather than a sealed product.
#[must_use]
pub fn looks_like_single_card(text: &str) -> bool {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return false;
    }

    CARD_NO_BRACKET_RE.is_match(&lowered)
        || CARD_NUMBER_RE.is_match(&lowered)
        || SLASHY_CONDITION_RE.is_match(&lowered)
        || VOCABULARY_RE.is_match(&lowered)
        || PAREN_RARITY_RE.is_match(&lowered)
}
