//! Single-writer merge of classified offers into product groups.

use std::collections::BTreeMap;

use packwatch_core::RawOffer;
use serde::Serialize;

use crate::group_key::build_group_key_and_name;
use crate::single_card::looks_like_single_card;

/// All offers for one logical product within a scan run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductGroup {
    pub group_key: String,
    pub canonical_name: String,
    pub offers: Vec<RawOffer>,
}

impl ProductGroup {
    /// Whether any offer in the group is in stock.
    #[must_use]
    pub fn any_available(&self) -> bool {
        self.offers.iter().any(|o| o.available)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The offer was keyed and merged; `new_group` is true for the first offer of a key.
    Grouped { group_key: String, new_group: bool },
    /// The title looks like a single card and never reached the key builder.
    SingleCard,
}

/// Accumulates offers from every storefront of one run.
///
/// Owned by the aggregating caller; scanners hand their offers over and the
/// accumulator is drained exactly once with [`OfferAccumulator::finish`].
#[derive(Debug, Default)]
pub struct OfferAccumulator {
    groups: BTreeMap<String, ProductGroup>,
    skipped_single_cards: usize,
}

impl OfferAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies `offer` and merges it into its group.
    pub fn ingest(&mut self, offer: RawOffer) -> IngestOutcome {
        if looks_like_single_card(&offer.title) {
            tracing::debug!(
                shop = %offer.shop_source,
                title = %offer.title,
                "skipping single card at grouping"
            );
            self.skipped_single_cards += 1;
            return IngestOutcome::SingleCard;
        }

        let extra = offer.grouping_text();
        let (group_key, canonical_name) =
            build_group_key_and_name(&offer.title, extra.as_deref(), offer.series_hint.as_deref());

        let mut new_group = false;
        let group = self.groups.entry(group_key.clone()).or_insert_with(|| {
            new_group = true;
            ProductGroup {
                group_key: group_key.clone(),
                canonical_name: canonical_name.clone(),
                offers: Vec::new(),
            }
        });
        if canonical_name < group.canonical_name {
            group.canonical_name = canonical_name;
        }
        group.offers.push(offer);

        IngestOutcome::Grouped {
            group_key,
            new_group,
        }
    }

    /// Ingests every offer from one storefront batch.
    pub fn extend<I>(&mut self, offers: I)
    where
        I: IntoIterator<Item = RawOffer>,
    {
        for offer in offers {
            self.ingest(offer);
        }
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn skipped_single_cards(&self) -> usize {
        self.skipped_single_cards
    }

    /// Drains the accumulator into groups sorted by key.
    ///
    /// Offers inside each group are ordered by price, then shop, then title,
    /// so the result is independent of ingestion order.
    #[must_use]
    pub fn finish(self) -> Vec<ProductGroup> {
        self.groups
            .into_values()
            .map(|mut group| {
                group.offers.sort_by(|a, b| {
                    a.price
                        .cmp(&b.price)
                        .then_with(|| a.shop_source.cmp(&b.shop_source))
                        .then_with(|| a.title.cmp(&b.title))
                        .then_with(|| a.url.cmp(&b.url))
                });
                group
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use super::*;

    fn offer(title: &str, shop: &str, price: &str, available: bool) -> RawOffer {
        RawOffer {
            title: title.to_string(),
            body_text: String::new(),
            product_type_text: String::new(),
            price: Decimal::from_str(price).unwrap(),
            available,
            url: format!("https://{shop}.dk/products/x"),
            shop_source: shop.to_string(),
            series_hint: None,
        }
    }

    #[test]
    fn merges_same_product_from_different_shops() {
        let mut acc = OfferAccumulator::new();
        let first = acc.ingest(offer("Mega Evolution Ascended Heroes ETB", "matraws", "499.95", true));
        let second = acc.ingest(offer(
            "Mega Evolution: Ascended Heroes Elite Trainer Box",
            "spilforsyningen",
            "479.00",
            false,
        ));

        let IngestOutcome::Grouped { group_key: a, new_group: true } = first else {
            panic!("expected new group, got {first:?}");
        };
        let IngestOutcome::Grouped { group_key: b, new_group: false } = second else {
            panic!("expected merge, got {second:?}");
        };
        assert_eq!(a, b);

        let groups = acc.finish();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].offers.len(), 2);
        assert_eq!(groups[0].offers[0].shop_source, "spilforsyningen");
        assert_eq!(
            groups[0].canonical_name,
            "Mega Evolution - Ascended Heroes: Elite Trainer Box"
        );
    }

    #[test]
    fn single_cards_never_reach_grouping() {
        let mut acc = OfferAccumulator::new();
        let outcome = acc.ingest(offer("SV1 #098/198 Illustration Rare Pikachu", "matraws", "25", true));
        assert_eq!(outcome, IngestOutcome::SingleCard);
        assert_eq!(acc.skipped_single_cards(), 1);
        assert_eq!(acc.group_count(), 0);
        assert!(acc.finish().is_empty());
    }

    #[test]
    fn series_hint_is_used_for_keying() {
        let mut acc = OfferAccumulator::new();
        let mut o = offer("Elite Trainer Box", "epicpanda", "399", true);
        o.series_hint = Some("Prismatic Evolutions".to_string());
        acc.ingest(o);
        let groups = acc.finish();
        assert_eq!(groups[0].canonical_name, "Prismatic Evolutions: Elite Trainer Box");
    }

    #[test]
    fn body_text_resolves_series_when_title_cannot() {
        let mut acc = OfferAccumulator::new();
        let mut o = offer("Booster Bundle", "andcards", "229", true);
        o.body_text = "Booster bundle fra Crown Zenith".to_string();
        acc.ingest(o);
        assert_eq!(acc.finish()[0].canonical_name, "Crown Zenith: Booster Bundle");
    }

    #[test]
    fn result_is_independent_of_ingestion_order() {
        let offers = vec![
            offer("Crown Zenith ETB", "b-shop", "400", true),
            offer("Crown Zenith Elite Trainer Box", "a-shop", "400", true),
            offer("Crown Zenith Booster Bundle", "c-shop", "199", false),
            offer("Crown Zenith ETB", "a-shop", "350", false),
        ];

        let mut forward = OfferAccumulator::new();
        forward.extend(offers.clone());
        let mut backward = OfferAccumulator::new();
        backward.extend(offers.into_iter().rev());

        assert_eq!(forward.finish(), backward.finish());
    }

    #[test]
    fn groups_sorted_by_key_and_offers_by_price() {
        let mut acc = OfferAccumulator::new();
        acc.extend([
            offer("Scarlet & Violet 151 Booster Bundle", "x", "300", true),
            offer("Crown Zenith Tin", "y", "150", true),
            offer("Scarlet & Violet 151 Booster Bundle", "z", "250", true),
        ]);
        let groups = acc.finish();
        let keys: Vec<&str> = groups.iter().map(|g| g.group_key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "crown zenith|tin||",
                "scarlet & violet 151|booster bundle||"
            ]
        );
        let prices: Vec<String> = groups[1].offers.iter().map(|o| o.price.to_string()).collect();
        assert_eq!(prices, vec!["250", "300"]);
    }

    #[test]
    fn any_available_reflects_offers() {
        let mut acc = OfferAccumulator::new();
        acc.ingest(offer("Crown Zenith Tin", "y", "150", false));
        let groups = acc.finish();
        assert!(!groups[0].any_available());
    }
}
