//! Shopify response types for the public `products.json` endpoint.
//!
//! Only the fields the offer pipeline reads are modelled; serde ignores the
//! rest (images, tags, options, vendor).
//!
//! ### `body_html` / `product_type`
//! Both may be `null`, absent, or an empty string.
//!
//! ### `price` on variants
//! Always a decimal string (`"449.95"`), never a number.
//!
//! ### `available` on variants
//! Absent on some older themes; we default to `true`.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ShopifyProductsResponse {
    #[serde(default)]
    pub products: Vec<ShopifyProduct>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyProduct {
    pub id: i64,
    pub title: String,
    /// URL slug; the storefront page is `{origin}/products/{handle}`.
    pub handle: String,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
}

#[derive(Debug, Deserialize)]
pub struct ShopifyVariant {
    pub id: i64,
    /// `"Default Title"` for single-variant products.
    #[serde(default)]
    pub title: String,
    pub price: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}
