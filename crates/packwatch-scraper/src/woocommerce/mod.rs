//! WooCommerce storefronts via the public Store API.
//!
//! Shops expose the API under different paths depending on permalink
//! settings and whether the apex domain redirects to `www`, so every
//! base/endpoint pair is probed until one answers with a JSON array.

mod offers;
pub mod types;

use packwatch_core::{Platform, RawOffer};
use serde_json::Value;

use crate::client::StorefrontClient;
use crate::error::ScraperError;
use crate::source::{OfferFuture, OfferSource};
use types::WooProduct;

const ENDPOINTS: [&str; 2] = ["/wp-json/wc/store/products", "/?rest_route=/wc/store/products"];

const PER_PAGE: u32 = 100;

/// Safety stop, roughly 6000 products.
pub(crate) const MAX_PAGES: u32 = 60;

pub struct WooCommerceSource {
    slug: String,
    domain: String,
    bases: Vec<String>,
    queries: Vec<String>,
    client: StorefrontClient,
}

impl WooCommerceSource {
    /// Probes `https://{domain}` then `https://www.{domain}`.
    #[must_use]
    pub fn new(slug: String, domain: &str, queries: Vec<String>, client: StorefrontClient) -> Self {
        let domain = domain.trim().trim_end_matches('/').to_string();
        let bases = vec![format!("https://{domain}"), format!("https://www.{domain}")];
        Self::with_bases(slug, domain, bases, queries, client)
    }

    /// Probes exactly the given bases, in order.
    #[must_use]
    pub fn with_bases(
        slug: String,
        domain: String,
        bases: Vec<String>,
        queries: Vec<String>,
        client: StorefrontClient,
    ) -> Self {
        let bases = bases
            .into_iter()
            .map(|b| b.trim_end_matches('/').to_string())
            .collect();
        Self {
            slug,
            domain,
            bases,
            queries,
            client,
        }
    }

    fn page_url(base: &str, endpoint: &str, page: u32) -> String {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{base}{endpoint}{separator}per_page={PER_PAGE}&page={page}")
    }

    /// Fetches one page, returning `None` when the body is not a JSON array.
    async fn fetch_page(&self, url: &str) -> Result<Option<Vec<Value>>, ScraperError> {
        match self.client.get_json::<Value>(url).await? {
            Value::Array(items) => Ok(Some(items)),
            _ => Ok(None),
        }
    }

    /// Finds the first base/endpoint pair whose first page is a JSON array.
    async fn discover(&self) -> Result<(String, &'static str, Vec<Value>), ScraperError> {
        for base in &self.bases {
            for endpoint in ENDPOINTS {
                let url = Self::page_url(base, endpoint, 1);
                match self.fetch_page(&url).await {
                    Ok(Some(items)) => return Ok((base.clone(), endpoint, items)),
                    Ok(None) => {
                        tracing::debug!(shop = %self.slug, url, "store API answered without a product array");
                    }
                    Err(e) => {
                        tracing::debug!(shop = %self.slug, url, error = %e, "store API probe failed");
                    }
                }
            }
        }
        Err(ScraperError::NoStoreApi {
            domain: self.domain.clone(),
        })
    }

    /// Collects raw product records from every page of the discovered endpoint.
    ///
    /// A failure after the first page stops pagination and keeps what was
    /// already fetched.
    async fn fetch_all_products(&self) -> Result<(String, Vec<WooProduct>), ScraperError> {
        let (base, endpoint, first_page) = self.discover().await?;
        let mut products = decode_products(&self.slug, first_page);
        let mut page_was_empty = products.is_empty();

        let mut page = 2;
        while !page_was_empty && page <= MAX_PAGES {
            self.client.pause().await;
            let url = Self::page_url(&base, endpoint, page);
            match self.fetch_page(&url).await {
                Ok(Some(items)) => {
                    page_was_empty = items.is_empty();
                    products.extend(decode_products(&self.slug, items));
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(shop = %self.slug, page, error = %e, "store API page failed, keeping earlier pages");
                    break;
                }
            }
            page += 1;
        }

        Ok((base, products))
    }

    async fn scan(&self) -> Result<Vec<RawOffer>, ScraperError> {
        let (base, products) = self.fetch_all_products().await?;
        let offers: Vec<RawOffer> = products
            .iter()
            .filter_map(|p| offers::product_offer(p, &base, &self.slug, &self.queries))
            .collect();
        tracing::info!(
            shop = %self.slug,
            base,
            products = products.len(),
            offers = offers.len(),
            "woocommerce scan complete"
        );
        Ok(offers)
    }
}

/// Decodes each record on its own so one malformed product cannot sink a page.
fn decode_products(shop: &str, items: Vec<Value>) -> Vec<WooProduct> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<WooProduct>(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::debug!(shop, error = %e, "skipping malformed store API product");
                None
            }
        })
        .collect()
}

impl OfferSource for WooCommerceSource {
    fn name(&self) -> &str {
        &self.slug
    }

    fn platform(&self) -> Platform {
        Platform::Woocommerce
    }

    fn produce_offers(&self) -> OfferFuture<'_> {
        Box::pin(self.scan())
    }
}
