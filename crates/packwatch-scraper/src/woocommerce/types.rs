//! WooCommerce Store API (`/wc/store/products`) response types.
//!
//! ### `prices`
//! `price` is usually an integer string in minor units (`"49900"` with
//! `currency_minor_unit: 2`), but some plugins emit decimal strings or bare
//! numbers, so the raw values are kept as `serde_json::Value`.
//!
//! ### `is_in_stock`
//! Absent on some catalogue-only shops; treated as out of stock.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct WooProduct {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub categories: Vec<WooCategory>,
    #[serde(default)]
    pub prices: Option<WooPrices>,
    #[serde(default)]
    pub is_in_stock: bool,
}

#[derive(Debug, Deserialize)]
pub struct WooCategory {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct WooPrices {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub regular_price: Option<Value>,
    #[serde(default)]
    pub sale_price: Option<Value>,
    #[serde(default)]
    pub currency_minor_unit: Option<Value>,
}
