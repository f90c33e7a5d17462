//! Extraction helpers for category and product pages.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::html_text::{decode_html, strip_html};

static PRODUCT_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href=["']([^"']*?/shop/[^"']+?p\.html(?:\?[^"']*)?)["']"#)
        .expect("valid product href regex")
});

static PRODUCT_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/shop/.+p\.html(?:\?.*)?$").expect("valid product path regex"));

static OG_TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+property=["']og:title["'][^>]+content=["']([^"']+)["']"#)
        .expect("valid og:title regex")
});

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1>").expect("valid h1 regex"));

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>").expect("valid title regex"));

/// A Danish-formatted amount followed by `DKK` shortly after the word "pris".
static LABELLED_PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)pris.{0,200}?(\d{1,3}(?:\.\d{3})*,\d{2})\s*DKK").expect("valid labelled price regex")
});

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,3}(?:\.\d{3})*,\d{2})\s*DKK").expect("valid price regex")
});

const SOLD_OUT_MARKERS: &[&str] = &[
    "udsolgt",
    "ikke på lager",
    "not available",
    "sold out",
    "ikke tilgængelig",
];

/// Absolute product-page URLs linked from a category page, deduplicated in page order.
pub(crate) fn extract_product_urls(category_html: &str, origin: &reqwest::Url) -> Vec<String> {
    let mut seen = HashSet::new();
    PRODUCT_HREF_RE
        .captures_iter(category_html)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| origin.join(decode_html(m.as_str()).trim()).ok())
        .map(|url| url.to_string())
        .filter(|url| PRODUCT_PATH_RE.is_match(url))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Product title from `og:title`, then `<h1>`, then `<title>`.
pub(crate) fn extract_title(product_html: &str) -> Option<String> {
    let og = OG_TITLE_RE
        .captures(product_html)
        .and_then(|caps| caps.get(1))
        .map(|m| decode_html(m.as_str()));
    let h1 = || {
        H1_RE
            .captures(product_html)
            .and_then(|caps| caps.get(1))
            .map(|m| strip_html(m.as_str()))
    };
    let title = || {
        TITLE_RE
            .captures(product_html)
            .and_then(|caps| caps.get(1))
            .map(|m| strip_html(m.as_str()))
    };

    og.filter(|t| !t.is_empty())
        .or_else(|| h1().filter(|t| !t.is_empty()))
        .or_else(|| title().filter(|t| !t.is_empty()))
}

/// Parses `"1.299,95"` into `1299.95`.
fn parse_danish_amount(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.replace('.', "").replace(',', ".")).ok()
}

/// Price near the "pris" label, else the first `DKK` amount in the page text.
pub(crate) fn extract_price(product_html: &str) -> Option<Decimal> {
    if let Some(price) = LABELLED_PRICE_RE
        .captures(product_html)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_danish_amount(m.as_str()))
    {
        return Some(price);
    }

    let text = strip_html(product_html);
    PRICE_RE
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| parse_danish_amount(m.as_str()))
}

/// Stock status from the visible page text.
///
/// Only an explicit sold-out marker makes a product unavailable.
pub(crate) fn extract_available(product_html: &str) -> bool {
    let text = strip_html(product_html).to_lowercase();
    !SOLD_OUT_MARKERS.iter().any(|m| text.contains(m))
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
