//! Flat log of every grouped offer seen in a run.

use packwatch_grouping::ProductGroup;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferLogEntry {
    pub run_id: Uuid,
    pub group_key: String,
    pub canonical_name: String,
    pub title: String,
    pub shop: String,
    pub price: Decimal,
    pub available: bool,
    pub url: String,
}

impl OfferLogEntry {
    /// One entry per offer, in group order then offer order.
    #[must_use]
    pub fn from_groups(run_id: Uuid, groups: &[ProductGroup]) -> Vec<Self> {
        groups
            .iter()
            .flat_map(|group| {
                group.offers.iter().map(move |offer| Self {
                    run_id,
                    group_key: group.group_key.clone(),
                    canonical_name: group.canonical_name.clone(),
                    title: offer.title.clone(),
                    shop: offer.shop_source.clone(),
                    price: offer.price,
                    available: offer.available,
                    url: offer.url.clone(),
                })
            })
            .collect()
    }
}
