use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced listing emitted by a storefront scanner.
///
/// Immutable once emitted; the grouping stage consumes each offer exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOffer {
    /// Display title as the storefront shows it, including any variant suffix.
    pub title: String,
    /// Free-text description (HTML stripped or raw), empty when the shop has none.
    pub body_text: String,
    /// Product-type or category text, empty when absent.
    pub product_type_text: String,
    /// Non-negative price in the store currency (DKK).
    pub price: Decimal,
    pub available: bool,
    pub url: String,
    /// Slug of the shop that produced the offer, e.g. `"spilforsyningen"`.
    pub shop_source: String,
    /// Series pre-detected by the scanner from its query matches, if any.
    pub series_hint: Option<String>,
}

impl RawOffer {
    /// Extended grouping text used as a second chance for series detection.
    ///
    /// Returns `None` when both the body and the product type are blank.
    #[must_use]
    pub fn grouping_text(&self) -> Option<String> {
        let joined = format!("{} {}", self.body_text.trim(), self.product_type_text.trim());
        let joined = joined.trim();
        if joined.is_empty() {
            None
        } else {
            Some(joined.to_string())
        }
    }
}

/// The representative offer picked for one product group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenOffer {
    pub price: Decimal,
    pub shop_label: String,
    pub available: bool,
    pub url: String,
}

impl From<&RawOffer> for ChosenOffer {
    fn from(offer: &RawOffer) -> Self {
        Self {
            price: offer.price,
            shop_label: offer.shop_source.clone(),
            available: offer.available,
            url: offer.url.clone(),
        }
    }
}
