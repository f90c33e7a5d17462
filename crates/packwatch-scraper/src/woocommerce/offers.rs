//! Price parsing and offer conversion for Store API products.

use std::str::FromStr;

use packwatch_core::RawOffer;
use packwatch_grouping::{detect_series, is_known_series, screen_listing, series_hint_from_matches, Screening};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::html_text::strip_html;
use crate::woocommerce::types::{WooPrices, WooProduct};

const DEFAULT_MINOR_UNIT: u32 = 2;

fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn minor_unit(prices: &WooPrices) -> u32 {
    match prices.currency_minor_unit.as_ref() {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .unwrap_or(DEFAULT_MINOR_UNIT)
}

/// Parses a Store API price block.
///
/// Integer strings are minor units scaled by `currency_minor_unit`; anything
/// else is read as a decimal with `,` accepted as the separator. Returns
/// `None` when no price field is usable.
pub(crate) fn parse_store_price(prices: &WooPrices) -> Option<Decimal> {
    let raw = value_text(prices.price.as_ref())
        .or_else(|| value_text(prices.regular_price.as_ref()))
        .or_else(|| value_text(prices.sale_price.as_ref()))?;

    if raw.chars().all(|c| c.is_ascii_digit()) {
        let minor_units: i64 = raw.parse().ok()?;
        let scale = minor_unit(prices);
        if scale > 28 {
            return None;
        }
        return Some(Decimal::new(minor_units, scale).normalize());
    }

    Decimal::from_str(&raw.replace(',', ".")).ok()
}

/// Screens one Store API product and converts it to an offer.
pub(crate) fn product_offer(
    product: &WooProduct,
    base: &str,
    shop_slug: &str,
    queries: &[String],
) -> Option<RawOffer> {
    let title = product.name.trim();
    if title.is_empty() {
        return None;
    }

    let description = [product.description.as_deref(), product.short_description.as_deref()]
        .into_iter()
        .flatten()
        .map(strip_html)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let category_text = product
        .categories
        .iter()
        .map(|c| c.name.trim())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let full_text = format!("{title} {description} {category_text}");

    let matched = match screen_listing(title, &full_text, queries) {
        Screening::Accepted { matched_queries } => matched_queries,
        Screening::Rejected(reason) => {
            tracing::debug!(shop = shop_slug, title, %reason, "listing screened out");
            return None;
        }
    };

    let Some(price) = product.prices.as_ref().and_then(parse_store_price) else {
        tracing::debug!(shop = shop_slug, title, "skipping product without a usable price");
        return None;
    };
    if price.is_sign_negative() {
        return None;
    }

    let mut hint = series_hint_from_matches(&matched);
    if !is_known_series(Some(hint)) {
        hint = detect_series(&full_text);
    }

    let url = product
        .permalink
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(base)
        .to_string();

    Some(RawOffer {
        title: title.to_string(),
        body_text: description,
        product_type_text: category_text,
        price,
        available: product.is_in_stock,
        url,
        shop_source: shop_slug.to_string(),
        series_hint: is_known_series(Some(hint)).then(|| hint.to_string()),
    })
}
