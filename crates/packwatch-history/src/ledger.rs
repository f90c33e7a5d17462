//! Dated price ledgers, one per selection mode.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use packwatch_core::ChosenOffer;
use packwatch_grouping::SelectionMode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::offer_log::OfferLogEntry;

/// One day's selected price for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
    pub shop: String,
}

/// Product name to its price points, oldest first.
pub type Ledger = BTreeMap<String, Vec<PricePoint>>;

/// Everything persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(default)]
    pub ledgers: BTreeMap<SelectionMode, Ledger>,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
    /// Raw offers of the most recent run only.
    #[serde(default)]
    pub last_run_offers: Vec<OfferLogEntry>,
}

/// Result of recording one product's price for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceUpdate {
    pub name: String,
    pub price: Decimal,
    pub shop: String,
    /// Median of every other recorded day plus today.
    pub median: Decimal,
    /// Today's price is strictly below the median.
    pub is_deal: bool,
}

impl PriceUpdate {
    /// Push-notification text for a deal.
    #[must_use]
    pub fn deal_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PriceUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Deal: {} → {} kr ({}) | median: {:.2}",
            self.name, self.price, self.shop, self.median
        )
    }
}

/// Median of `prices`; the mean of the two middle values for even counts.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn median(prices: &[Decimal]) -> Option<Decimal> {
    let mut sorted = prices.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    match sorted.len() {
        0 => None,
        n if n % 2 == 1 => Some(sorted[mid]),
        _ => Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO),
    }
}

impl PriceHistory {
    #[must_use]
    pub fn ledger(&self, mode: SelectionMode) -> Option<&Ledger> {
        self.ledgers.get(&mode)
    }

    /// Price points recorded for `name` under `mode`, oldest first.
    #[must_use]
    pub fn points(&self, mode: SelectionMode, name: &str) -> &[PricePoint] {
        self.ledgers
            .get(&mode)
            .and_then(|ledger| ledger.get(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Writes `date`'s selected price for every product and reports deals.
    ///
    /// A point already recorded for the same date is replaced, so re-running
    /// on one day never counts that day twice in the median.
    pub fn record_run(
        &mut self,
        date: NaiveDate,
        mode: SelectionMode,
        selections: &BTreeMap<String, ChosenOffer>,
    ) -> Vec<PriceUpdate> {
        let ledger = self.ledgers.entry(mode).or_default();

        selections
            .iter()
            .map(|(name, chosen)| {
                let points = ledger.entry(name.clone()).or_default();
                points.retain(|p| p.date != date);

                let mut prices: Vec<Decimal> = points.iter().map(|p| p.price).collect();
                prices.push(chosen.price);
                let median_price = median(&prices).unwrap_or(chosen.price);

                points.push(PricePoint {
                    date,
                    price: chosen.price,
                    shop: chosen.shop_label.clone(),
                });
                points.sort_by_key(|p| p.date);

                PriceUpdate {
                    name: name.clone(),
                    price: chosen.price,
                    shop: chosen.shop_label.clone(),
                    median: median_price,
                    is_deal: chosen.price < median_price,
                }
            })
            .collect()
    }

    /// Replaces the offer log with this run's offers and stamps `last_run`.
    pub fn record_offers(&mut self, at: DateTime<Utc>, offers: Vec<OfferLogEntry>) {
        self.last_run = Some(at);
        self.last_run_offers = offers;
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
