//! Listing screen applied by every storefront before an offer is emitted.

use std::fmt;

use crate::single_card::looks_like_single_card;

const BANNED_LANGUAGE_WORDS: &[&str] = &[
    "japanese", "japansk", "korean", "koreansk", "chinese", "kinesisk", "german", "tysk", "french",
    "fransk",
];

const BANNED_GRADED_WORDS: &[&str] = &["psa", "bgs", "cgc", "graded", "slab"];

const REQUIRED_SEALED_WORDS: &[&str] = &[
    "booster",
    "box",
    "bundle",
    "collection",
    "elite trainer",
    "etb",
    "tin",
    "blister",
    "display",
    "sticker",
    "poster",
    "figure",
    "pin",
    "premium",
];

/// Why a listing was dropped before grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NoQueryMatch,
    BannedLanguage,
    Graded,
    SingleCard,
    NotSealed,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RejectReason::NoQueryMatch => "no_query_match",
            RejectReason::BannedLanguage => "banned_language",
            RejectReason::Graded => "graded",
            RejectReason::SingleCard => "single_card",
            RejectReason::NotSealed => "not_sealed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screening {
    /// The listing is a sealed product of interest; carries the queries it matched.
    Accepted { matched_queries: Vec<String> },
    Rejected(RejectReason),
}

/// Queries (lowercased) contained in the lowercased `text`, in query order.
#[must_use]
pub fn matched_queries<S: AsRef<str>>(text: &str, queries: &[S]) -> Vec<String> {
    let lowered = text.to_lowercase();
    queries
        .iter()
        .map(|q| q.as_ref().trim().to_lowercase())
        .filter(|q| !q.is_empty() && lowered.contains(q.as_str()))
        .collect()
}

/// Screens one listing.
///
/// `full_text` is the title, body and product-type/category text joined;
/// query matching and the second single-card check run over it. Language,
/// grading and sealed-word checks only look at the title.
#[must_use]
pub fn screen_listing<S: AsRef<str>>(title: &str, full_text: &str, queries: &[S]) -> Screening {
    let matched = matched_queries(full_text, queries);
    if matched.is_empty() {
        return Screening::Rejected(RejectReason::NoQueryMatch);
    }
    match reject_reason(title, full_text) {
        Some(reason) => Screening::Rejected(reason),
        None => Screening::Accepted {
            matched_queries: matched,
        },
    }
}

/// Runs every check except query matching.
///
/// Used directly by sources whose listing pages are already scoped to a series.
#[must_use]
pub fn reject_reason(title: &str, full_text: &str) -> Option<RejectReason> {
    let title_lower = title.to_lowercase();
    if contains_any(&title_lower, BANNED_LANGUAGE_WORDS) {
        return Some(RejectReason::BannedLanguage);
    }
    if contains_any(&title_lower, BANNED_GRADED_WORDS) {
        return Some(RejectReason::Graded);
    }
    if looks_like_single_card(title) || looks_like_single_card(full_text) {
        return Some(RejectReason::SingleCard);
    }
    if !contains_any(&title_lower, REQUIRED_SEALED_WORDS) {
        return Some(RejectReason::NotSealed);
    }
    None
}

fn contains_any(haystack: &str, words: &[&str]) -> bool {
    words.iter().any(|w| haystack.contains(w))
}
