//! The storefront capability trait and the registry built from `shops.yaml`.

use std::future::Future;
use std::pin::Pin;

use packwatch_core::{Platform, RawOffer, ShopConfig, ShopsFile};
use packwatch_grouping::DEFAULT_QUERIES;

use crate::client::StorefrontClient;
use crate::error::ScraperError;
use crate::html_category::HtmlCategorySource;
use crate::settings::ScraperSettings;
use crate::shopify::ShopifySource;
use crate::woocommerce::WooCommerceSource;

pub type OfferFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<RawOffer>, ScraperError>> + Send + 'a>>;

/// One storefront that can be scanned for sealed-product offers.
///
/// Implementations own their HTTP client and retry policy. A failing scan
/// only affects that storefront's result.
pub trait OfferSource: Send + Sync {
    /// Shop slug, also used as `RawOffer::shop_source`.
    fn name(&self) -> &str;

    fn platform(&self) -> Platform;

    fn produce_offers(&self) -> OfferFuture<'_>;
}

/// The shop's query override, or [`DEFAULT_QUERIES`].
#[must_use]
pub fn effective_queries(shop: &ShopConfig) -> Vec<String> {
    match &shop.queries {
        Some(queries) => queries
            .iter()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
            .collect(),
        None => DEFAULT_QUERIES.iter().map(|q| (*q).to_string()).collect(),
    }
}

/// Builds the source for a single shop.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidShopUrl`] if the shop's domain/base URL is
/// unusable, or [`ScraperError::Http`] if the HTTP client cannot be built.
pub fn build_source(shop: &ShopConfig, settings: &ScraperSettings) -> Result<Box<dyn OfferSource>, ScraperError> {
    let client = StorefrontClient::new(settings)?;
    let slug = shop.slug();
    let queries = effective_queries(shop);
    let missing_url = || ScraperError::InvalidShopUrl {
        shop_url: shop.name.clone(),
        reason: format!("{} shop has no domain or base_url", shop.platform),
    };

    let source: Box<dyn OfferSource> = match shop.platform {
        Platform::Shopify => {
            let origin = shop.origin().ok_or_else(missing_url)?;
            Box::new(ShopifySource::new(slug, origin, queries, client))
        }
        Platform::Woocommerce => match (shop.base_url.as_deref(), shop.domain.as_deref()) {
            (Some(base), domain) => Box::new(WooCommerceSource::with_bases(
                slug,
                domain.unwrap_or(base).to_string(),
                vec![base.to_string()],
                queries,
                client,
            )),
            (None, Some(domain)) => Box::new(WooCommerceSource::new(slug, domain, queries, client)),
            (None, None) => return Err(missing_url()),
        },
        Platform::HtmlCategory => {
            let origin = shop.origin().ok_or_else(missing_url)?;
            Box::new(HtmlCategorySource::new(
                slug,
                &origin,
                shop.pages.clone(),
                queries,
                client,
            )?)
        }
    };
    Ok(source)
}

/// Explicit registry: one source per enabled shop, in file order.
///
/// `only` restricts the registry to the shop with that slug.
///
/// # Errors
///
/// Propagates the first [`build_source`] failure.
pub fn build_sources(
    shops: &ShopsFile,
    settings: &ScraperSettings,
    only: Option<&str>,
) -> Result<Vec<Box<dyn OfferSource>>, ScraperError> {
    shops
        .enabled()
        .filter(|shop| only.is_none_or(|slug| shop.slug() == slug))
        .map(|shop| build_source(shop, settings))
        .collect()
}
