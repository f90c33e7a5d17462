//! Merge identity and display name for a sealed product.

use serde::Serialize;

use crate::count_tag::detect_count_tag;
use crate::normalize::normalize_text;
use crate::product_type::detect_type;
use crate::series::{detect_series, is_known_series, UNKNOWN_SERIES};
use crate::theme::detect_theme;

/// Every component derived for one listing title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub series: String,
    pub product_type: &'static str,
    pub count_tag: Option<String>,
    pub theme: Option<String>,
    pub group_key: String,
    pub canonical_name: String,
}

/// Classifies a listing into series, type, count tag and theme.
///
/// A known `series_hint` is trusted as-is. Otherwise the series comes from the
/// title, and `extra_text` is consulted only if the title alone is unknown.
/// Type, count tag and theme always come from the title.
#[must_use]
pub fn classify(title: &str, extra_text: Option<&str>, series_hint: Option<&str>) -> Classification {
    let series = match series_hint {
        Some(hint) if is_known_series(Some(hint)) => hint.to_string(),
        _ => resolve_series(title, extra_text).to_string(),
    };
    let product_type = detect_type(title);
    let count_tag = detect_count_tag(title);
    let theme = detect_theme(title, product_type);

    let canonical_name = canonical_name(&series, product_type, count_tag.as_deref(), theme.as_deref());
    let group_key = group_key(&series, product_type, count_tag.as_deref(), theme.as_deref());

    Classification {
        series,
        product_type,
        count_tag,
        theme,
        group_key,
        canonical_name,
    }
}

/// Returns `(group_key, canonical_name)` for a listing.
#[must_use]
pub fn build_group_key_and_name(
    title: &str,
    extra_text: Option<&str>,
    series_hint: Option<&str>,
) -> (String, String) {
    let c = classify(title, extra_text, series_hint);
    (c.group_key, c.canonical_name)
}

fn resolve_series(title: &str, extra_text: Option<&str>) -> &'static str {
    let from_title = detect_series(title);
    if from_title != UNKNOWN_SERIES {
        return from_title;
    }
    match extra_text {
        Some(extra) if !extra.trim().is_empty() => detect_series(extra),
        _ => UNKNOWN_SERIES,
    }
}

fn canonical_name(series: &str, product_type: &str, count_tag: Option<&str>, theme: Option<&str>) -> String {
    let mut name = format!("{series}: {product_type}");
    if let Some(count) = count_tag {
        name.push_str(&format!(" ({count})"));
    }
    if let Some(theme) = theme {
        name.push_str(&format!(" - {theme}"));
    }
    name
}

fn group_key(series: &str, product_type: &str, count_tag: Option<&str>, theme: Option<&str>) -> String {
    [
        normalize_text(series),
        normalize_text(product_type),
        normalize_text(count_tag.unwrap_or_default()),
        normalize_text(theme.unwrap_or_default()),
    ]
    .join("|")
}

#[cfg(test)]
#[path = "group_key_test.rs"]
mod tests;
