//! Sealed-product format classification.

use std::sync::LazyLock;

use crate::normalize::normalize_text;
use crate::rules::RuleTable;

/// Generic label used when no format rule matches. The offer is still grouped.
pub const SEALED_PRODUCT: &str = "Sealed Product";

const TYPE_RULES: &[(&str, &[&str])] = &[
    (
        "Ultra Premium Collection",
        &[r"\bultra premium collection\b", r"\bupc\b"],
    ),
    (
        "Pokemon Center ETB Plus",
        &[
            r"\bpokemon center\b.*\betb\b",
            r"\bpokemon center\b.*\belite trainer box\b",
            r"\betb\b.*\bplus\b",
            r"\belite trainer box\b.*\bplus\b",
        ],
    ),
    ("Elite Trainer Box", &[r"\belite trainer box\b", r"\betb\b"]),
    ("Booster Box", &[r"\bbooster box\b"]),
    ("Booster Bundle", &[r"\bbooster bundle\b"]),
    ("Booster Pack", &[r"\bbooster pack\b", r"\b1\s*pack\b"]),
    (
        "Mini Tin Display",
        &[r"\bmini tin\b.*\bdisplay\b", r"\btin\b.*\bdisplay\b"],
    ),
    ("Mini Tin", &[r"\bmini tin\b"]),
    ("Tin", &[r"\btin\b"]),
    ("Premium Poster Collection", &[r"\bpremium poster collection\b"]),
    ("Premium Figure Collection", &[r"\bpremium figure collection\b"]),
    ("Special Collection", &[r"\bspecial collection\b"]),
    (
        "Pin Collection Blister",
        &[r"\bpin collection\b.*\bblister\b", r"\bpin collection blister\b"],
    ),
    ("Tech Sticker Collection", &[r"\btech sticker collection\b"]),
    ("Sticker Collection", &[r"\bsticker collection\b"]),
    (
        "Blister 3-Pack",
        &[r"\bblister\b.*\b3\s*pack\b", r"\b3\s*pack\b", r"\bblister 3\b"],
    ),
    ("Blister", &[r"\bblister\b"]),
    ("Collection", &[r"\bcollection\b"]),
    ("Bundle", &[r"\bbundle\b"]),
    ("Box", &[r"\bbox\b"]),
];

static TYPE_TABLE: LazyLock<RuleTable> = LazyLock::new(|| RuleTable::compile(TYPE_RULES));

/// Returns the product format for `text`, or [`SEALED_PRODUCT`].
#[must_use]
pub fn detect_type(text: &str) -> &'static str {
    TYPE_TABLE
        .first_match(&normalize_text(text))
        .map_or(SEALED_PRODUCT, |(_, label)| label)
}

/// Whether `product_type` belongs to the trainer-box family that carries themes.
#[must_use]
pub fn is_elite_trainer_box_family(product_type: &str) -> bool {
    product_type.contains("ETB") || product_type.contains("Elite Trainer Box")
}
