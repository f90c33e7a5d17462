use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Storefront technology a shop runs on; selects the scanner implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Shopify,
    Woocommerce,
    HtmlCategory,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Shopify => write!(f, "shopify"),
            Platform::Woocommerce => write!(f, "woocommerce"),
            Platform::HtmlCategory => write!(f, "html_category"),
        }
    }
}

/// One category listing scraped by an `html_category` shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPage {
    /// Series every product on this page belongs to.
    pub series_hint: String,
    pub url: String,
    /// The page is only scanned when one of these intersects the shop's queries.
    #[serde(default)]
    pub query_markers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    pub name: String,
    pub platform: Platform,
    /// Bare host, e.g. `"spilforsyningen.dk"`. Required for Shopify and WooCommerce.
    #[serde(default)]
    pub domain: Option<String>,
    /// Absolute origin for HTML shops, e.g. `"https://epicpanda.dk"`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Overrides the default query list when present.
    #[serde(default)]
    pub queries: Option<Vec<String>>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub pages: Vec<CategoryPage>,
}

fn default_enabled() -> bool {
    true
}

impl ShopConfig {
    /// Generate a URL-safe slug from the shop name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' || c == '_' || c == '.' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Storefront origin (`https://host`) derived from `base_url` or `domain`.
    #[must_use]
    pub fn origin(&self) -> Option<String> {
        if let Some(base) = self.base_url.as_deref() {
            return Some(base.trim_end_matches('/').to_string());
        }
        self.domain
            .as_deref()
            .map(|d| format!("https://{}", d.trim().trim_end_matches('/')))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShopsFile {
    pub shops: Vec<ShopConfig>,
}

impl ShopsFile {
    /// Shops with `enabled: true`, in file order.
    pub fn enabled(&self) -> impl Iterator<Item = &ShopConfig> {
        self.shops.iter().filter(|s| s.enabled)
    }
}

/// Load and validate the shop registry from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_shops(path: &Path) -> Result<ShopsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ShopsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_shops(&content)
}

/// Parse and validate a shop registry from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_shops(content: &str) -> Result<ShopsFile, ConfigError> {
    let shops_file: ShopsFile = serde_yaml::from_str(content)?;
    validate_shops(&shops_file)?;
    Ok(shops_file)
}

fn validate_shops(shops_file: &ShopsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for shop in &shops_file.shops {
        if shop.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "shop name must be non-empty".to_string(),
            ));
        }

        match shop.platform {
            Platform::Shopify | Platform::Woocommerce => {
                if shop.domain.as_deref().is_none_or(|d| d.trim().is_empty()) {
                    return Err(ConfigError::Validation(format!(
                        "shop '{}' uses {} and needs a domain",
                        shop.name, shop.platform
                    )));
                }
            }
            Platform::HtmlCategory => {
                if shop.origin().is_none() {
                    return Err(ConfigError::Validation(format!(
                        "shop '{}' uses html_category and needs a base_url or domain",
                        shop.name
                    )));
                }
                if shop.pages.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "shop '{}' uses html_category but lists no pages",
                        shop.name
                    )));
                }
            }
        }

        if let Some(queries) = &shop.queries {
            if queries.iter().all(|q| q.trim().is_empty()) {
                return Err(ConfigError::Validation(format!(
                    "shop '{}' overrides queries with an empty list",
                    shop.name
                )));
            }
        }

        let lower_name = shop.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate shop name: '{}'",
                shop.name
            )));
        }

        let slug = shop.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate shop slug: '{}' (from shop '{}')",
                slug, shop.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "shops_test.rs"]
mod tests;
