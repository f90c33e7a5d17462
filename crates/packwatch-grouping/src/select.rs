//! Price-selection policy over finished product groups.

use std::collections::BTreeMap;
use std::fmt;

use packwatch_core::{ChosenOffer, RawOffer};
use serde::{Deserialize, Serialize};

use crate::aggregate::ProductGroup;

/// Which offer represents a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Lowest price regardless of stock.
    CheapestOverall,
    /// Lowest price among in-stock offers; groups with none in stock are omitted.
    CheapestInStock,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 2] = [SelectionMode::CheapestOverall, SelectionMode::CheapestInStock];
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::CheapestOverall => write!(f, "cheapest_overall"),
            SelectionMode::CheapestInStock => write!(f, "cheapest_in_stock"),
        }
    }
}

/// Picks one representative offer per group, keyed by canonical name.
///
/// Ties on price are broken by shop, then URL.
#[must_use]
pub fn select_offers(groups: &[ProductGroup], mode: SelectionMode) -> BTreeMap<String, ChosenOffer> {
    groups
        .iter()
        .filter_map(|group| {
            cheapest(group, mode).map(|offer| (group.canonical_name.clone(), ChosenOffer::from(offer)))
        })
        .collect()
}

fn cheapest(group: &ProductGroup, mode: SelectionMode) -> Option<&RawOffer> {
    group
        .offers
        .iter()
        .filter(|o| match mode {
            SelectionMode::CheapestOverall => true,
            SelectionMode::CheapestInStock => o.available,
        })
        .min_by(|a, b| {
            a.price
                .cmp(&b.price)
                .then_with(|| a.shop_source.cmp(&b.shop_source))
                .then_with(|| a.url.cmp(&b.url))
        })
}
