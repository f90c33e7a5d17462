//! Shopify storefronts via the public `products.json` endpoint.

mod offers;
pub mod types;

use packwatch_core::{Platform, RawOffer};

use crate::client::StorefrontClient;
use crate::error::ScraperError;
use crate::source::{OfferFuture, OfferSource};
use types::{ShopifyProduct, ShopifyProductsResponse};

/// Maximum number of pages to fetch before returning an error.
///
/// Guards against stores that ignore `page` and return the same products forever.
pub(crate) const MAX_PAGES: usize = 100;

/// Products requested per page; Shopify's upper bound.
const PAGE_LIMIT: u32 = 250;

pub struct ShopifySource {
    slug: String,
    origin: String,
    queries: Vec<String>,
    client: StorefrontClient,
}

impl ShopifySource {
    /// `origin` is the store root, e.g. `"https://matraws.dk"`.
    #[must_use]
    pub fn new(slug: String, origin: String, queries: Vec<String>, client: StorefrontClient) -> Self {
        Self {
            slug,
            origin: origin.trim_end_matches('/').to_string(),
            queries,
            client,
        }
    }

    fn page_url(&self, page: usize) -> String {
        format!("{}/products.json?limit={PAGE_LIMIT}&page={page}", self.origin)
    }

    /// Fetches every product page until the store returns an empty page.
    ///
    /// All-or-nothing: a failing page discards earlier pages and returns the error.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`StorefrontClient::get_json`] and returns
    /// [`ScraperError::PaginationLimit`] after [`MAX_PAGES`] non-empty pages.
    pub async fn fetch_all_products(&self) -> Result<Vec<ShopifyProduct>, ScraperError> {
        let mut all_products = Vec::new();

        for page in 1..=MAX_PAGES {
            if page > 1 {
                self.client.pause().await;
            }
            let response: ShopifyProductsResponse = self.client.get_json(&self.page_url(page)).await?;
            if response.products.is_empty() {
                return Ok(all_products);
            }
            tracing::debug!(shop = %self.slug, page, count = response.products.len(), "fetched products page");
            all_products.extend(response.products);
        }

        Err(ScraperError::PaginationLimit {
            shop_url: self.origin.clone(),
            max_pages: MAX_PAGES,
        })
    }

    async fn scan(&self) -> Result<Vec<RawOffer>, ScraperError> {
        let products = self.fetch_all_products().await?;
        let offers: Vec<RawOffer> = products
            .iter()
            .flat_map(|p| offers::product_offers(p, &self.origin, &self.slug, &self.queries))
            .collect();
        tracing::info!(
            shop = %self.slug,
            products = products.len(),
            offers = offers.len(),
            "shopify scan complete"
        );
        Ok(offers)
    }
}

impl OfferSource for ShopifySource {
    fn name(&self) -> &str {
        &self.slug
    }

    fn platform(&self) -> Platform {
        Platform::Shopify
    }

    fn produce_offers(&self) -> OfferFuture<'_> {
        Box::pin(self.scan())
    }
}
