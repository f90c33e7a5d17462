//! Conversion of Shopify products into screened offers.

use std::str::FromStr;

use packwatch_core::RawOffer;
use packwatch_grouping::{
    is_known_series, looks_like_single_card, screen_listing, series_hint_from_matches, Screening,
};
use rust_decimal::Decimal;

use crate::html_text::strip_html;
use crate::shopify::types::ShopifyProduct;

const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Screens one product and emits an offer per purchasable variant.
///
/// Variants with unparsable or negative prices are skipped individually.
pub(crate) fn product_offers(
    product: &ShopifyProduct,
    origin: &str,
    shop_slug: &str,
    queries: &[String],
) -> Vec<RawOffer> {
    let title = product.title.trim();
    let body_text = product.body_html.as_deref().map(strip_html).unwrap_or_default();
    let product_type_text = product.product_type.as_deref().unwrap_or_default().trim();
    let full_text = format!("{title} {body_text} {product_type_text}");

    let matched = match screen_listing(title, &full_text, queries) {
        Screening::Accepted { matched_queries } => matched_queries,
        Screening::Rejected(reason) => {
            tracing::debug!(shop = shop_slug, title, %reason, "listing screened out");
            return Vec::new();
        }
    };

    let hint = series_hint_from_matches(&matched);
    let series_hint = is_known_series(Some(hint)).then(|| hint.to_string());
    let url = format!("{}/products/{}", origin.trim_end_matches('/'), product.handle);

    product
        .variants
        .iter()
        .filter_map(|variant| {
            let Ok(price) = Decimal::from_str(variant.price.trim()) else {
                tracing::debug!(
                    shop = shop_slug,
                    variant_id = variant.id,
                    price = %variant.price,
                    "skipping variant with unparsable price"
                );
                return None;
            };
            if price.is_sign_negative() {
                return None;
            }

            let variant_name = variant.title.trim();
            let name = if variant_name.is_empty() || variant_name == DEFAULT_VARIANT_TITLE {
                title.to_string()
            } else {
                let name = format!("{title} {variant_name}");
                if looks_like_single_card(&name) {
                    tracing::debug!(shop = shop_slug, name, "skipping single-card variant");
                    return None;
                }
                name
            };

            Some(RawOffer {
                title: name,
                body_text: body_text.clone(),
                product_type_text: product_type_text.to_string(),
                price,
                available: variant.available,
                url: url.clone(),
                shop_source: shop_slug.to_string(),
                series_hint: series_hint.clone(),
            })
        })
        .collect()
}
