//! Shops without a JSON catalogue, scraped from series category pages.
//!
//! Each configured page lists the products of one series, so the page's
//! `series_hint` is attached to every offer found through it.

mod parse;

use std::collections::HashSet;

use packwatch_core::{CategoryPage, Platform, RawOffer};
use packwatch_grouping::reject_reason;

use crate::client::StorefrontClient;
use crate::error::ScraperError;
use crate::source::{OfferFuture, OfferSource};

pub struct HtmlCategorySource {
    slug: String,
    origin: reqwest::Url,
    pages: Vec<CategoryPage>,
    queries: Vec<String>,
    client: StorefrontClient,
}

impl HtmlCategorySource {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidShopUrl`] if `origin` is not an absolute URL.
    pub fn new(
        slug: String,
        origin: &str,
        pages: Vec<CategoryPage>,
        queries: Vec<String>,
        client: StorefrontClient,
    ) -> Result<Self, ScraperError> {
        let origin = reqwest::Url::parse(origin).map_err(|e| ScraperError::InvalidShopUrl {
            shop_url: origin.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            slug,
            origin,
            pages,
            queries,
            client,
        })
    }

    /// Pages whose markers intersect the configured queries, in config order.
    fn selected_pages(&self) -> Vec<&CategoryPage> {
        let queries: HashSet<String> = self
            .queries
            .iter()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
            .collect();
        self.pages
            .iter()
            .filter(|page| {
                page.query_markers
                    .iter()
                    .any(|m| queries.contains(&m.trim().to_lowercase()))
            })
            .collect()
    }

    /// Fetches one product page and turns it into an offer, if it qualifies.
    async fn product_offer(&self, url: &str, series_hint: &str) -> Result<Option<RawOffer>, ScraperError> {
        let html = self.client.get_text(url).await?;

        let Some(title) = parse::extract_title(&html) else {
            tracing::debug!(shop = %self.slug, url, "product page has no title");
            return Ok(None);
        };
        if let Some(reason) = reject_reason(&title, &title) {
            tracing::debug!(shop = %self.slug, title, %reason, "listing screened out");
            return Ok(None);
        }
        let Some(price) = parse::extract_price(&html).filter(|p| p.is_sign_positive() && !p.is_zero()) else {
            tracing::debug!(shop = %self.slug, title, "skipping product without a positive price");
            return Ok(None);
        };

        Ok(Some(RawOffer {
            title,
            body_text: String::new(),
            product_type_text: String::new(),
            price,
            available: parse::extract_available(&html),
            url: url.to_owned(),
            shop_source: self.slug.clone(),
            series_hint: Some(series_hint.to_owned()),
        }))
    }

    async fn scan(&self) -> Result<Vec<RawOffer>, ScraperError> {
        let pages = self.selected_pages();
        let mut offers = Vec::new();
        let mut seen_urls = HashSet::new();
        let mut failed_pages = 0usize;
        let mut last_error = None;

        for page in &pages {
            let category_html = match self.client.get_text(&page.url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(shop = %self.slug, url = %page.url, error = %e, "category page failed");
                    failed_pages += 1;
                    last_error = Some(e);
                    continue;
                }
            };

            let product_urls = parse::extract_product_urls(&category_html, &self.origin);
            tracing::debug!(
                shop = %self.slug,
                series = %page.series_hint,
                count = product_urls.len(),
                "found product links"
            );

            for url in product_urls {
                // The first page listing a product decides its series hint.
                if !seen_urls.insert(url.clone()) {
                    continue;
                }
                self.client.pause().await;
                match self.product_offer(&url, &page.series_hint).await {
                    Ok(Some(offer)) => offers.push(offer),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!(shop = %self.slug, url, error = %e, "product page failed");
                    }
                }
            }
        }

        if !pages.is_empty() && failed_pages == pages.len() {
            return Err(ScraperError::AllPagesFailed {
                shop: self.slug.clone(),
                last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
            });
        }

        tracing::info!(
            shop = %self.slug,
            pages = pages.len(),
            offers = offers.len(),
            "category scan complete"
        );
        Ok(offers)
    }
}

impl OfferSource for HtmlCategorySource {
    fn name(&self) -> &str {
        &self.slug
    }

    fn platform(&self) -> Platform {
        Platform::HtmlCategory
    }

    fn produce_offers(&self) -> OfferFuture<'_> {
        Box::pin(self.scan())
    }
}
