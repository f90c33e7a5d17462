//! Storefront collaborators that turn shop catalogues into screened offers.

pub mod client;
pub mod error;
pub mod html_category;
mod html_text;
pub(crate) mod rate_limit;
pub mod settings;
pub mod shopify;
pub mod source;
pub mod woocommerce;

pub use client::StorefrontClient;
pub use error::ScraperError;
pub use html_category::HtmlCategorySource;
pub use settings::ScraperSettings;
pub use shopify::ShopifySource;
pub use source::{build_source, build_sources, effective_queries, OfferFuture, OfferSource};
pub use woocommerce::WooCommerceSource;
