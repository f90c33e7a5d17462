//! The `scan` command: fan out over storefronts, group, select, record, notify.
//!
//! Per-shop failures are logged and skipped rather than propagated so a
//! single broken storefront does not abort the run. History is loaded once
//! and saved once per run.

use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use packwatch_core::{AppConfig, ChosenOffer, RawOffer};
use packwatch_grouping::{select_offers, OfferAccumulator, ProductGroup, SelectionMode};
use packwatch_history::{HistoryStore, JsonFileStore, OfferLogEntry, PriceHistory, PriceUpdate};
use packwatch_notify::PushoverClient;
use packwatch_scraper::{build_sources, OfferSource, ScraperSettings};
use uuid::Uuid;

/// Offers gathered from every source that succeeded.
pub(crate) struct CollectedOffers {
    pub offers: Vec<RawOffer>,
    pub succeeded_shops: usize,
    pub failed_shops: usize,
}

/// Runs `produce_offers` on every source, at most `max_concurrent` at a time.
///
/// # Errors
///
/// Returns an error only when every source failed.
pub(crate) async fn collect_offers(
    sources: &[Box<dyn OfferSource>],
    max_concurrent: usize,
) -> anyhow::Result<CollectedOffers> {
    let results: Vec<_> = stream::iter(sources)
        .map(|source| async move { (source.name(), source.produce_offers().await) })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut offers = Vec::new();
    let mut failed_shops = 0usize;
    for (shop, outcome) in results {
        match outcome {
            Ok(shop_offers) => {
                tracing::info!(shop, count = shop_offers.len(), "shop scanned");
                offers.extend(shop_offers);
            }
            Err(e) => {
                tracing::error!(shop, error = %e, "shop scan failed");
                failed_shops += 1;
            }
        }
    }

    if failed_shops > 0 {
        tracing::warn!(failed_shops, total_shops = sources.len(), "some shops failed during scan");
    }
    if !sources.is_empty() && failed_shops == sources.len() {
        anyhow::bail!("all {failed_shops} shops failed to scan");
    }

    Ok(CollectedOffers {
        offers,
        succeeded_shops: sources.len() - failed_shops,
        failed_shops,
    })
}

/// Groups offers by merge key.
pub(crate) fn group_offers(offers: Vec<RawOffer>) -> (Vec<ProductGroup>, usize) {
    let mut accumulator = OfferAccumulator::new();
    accumulator.extend(offers);
    let skipped = accumulator.skipped_single_cards();
    (accumulator.finish(), skipped)
}

pub(crate) fn select_all(groups: &[ProductGroup]) -> BTreeMap<SelectionMode, BTreeMap<String, ChosenOffer>> {
    SelectionMode::ALL
        .into_iter()
        .map(|mode| (mode, select_offers(groups, mode)))
        .collect()
}

/// Writes both ledgers and the offer log; returns the in-stock deals.
pub(crate) fn record_history(
    history: &mut PriceHistory,
    groups: &[ProductGroup],
    selections: &BTreeMap<SelectionMode, BTreeMap<String, ChosenOffer>>,
    run_id: Uuid,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> Vec<PriceUpdate> {
    let mut deals = Vec::new();
    for (&mode, selected) in selections {
        let updates = history.record_run(today, mode, selected);
        tracing::debug!(%mode, products = updates.len(), "ledger updated");
        if mode == SelectionMode::CheapestInStock {
            deals.extend(updates.into_iter().filter(|u| u.is_deal));
        }
    }
    history.record_offers(now, OfferLogEntry::from_groups(run_id, groups));
    deals
}

/// Sends one push per deal; returns how many were accepted.
pub(crate) async fn notify_deals(client: Option<&PushoverClient>, deals: &[PriceUpdate]) -> usize {
    let Some(client) = client else {
        if !deals.is_empty() {
            tracing::warn!(deals = deals.len(), "pushover credentials not set, skipping notifications");
        }
        return 0;
    };

    let mut sent = 0usize;
    for deal in deals {
        match client.send(&deal.deal_message()).await {
            Ok(()) => sent += 1,
            Err(e) => tracing::error!(product = %deal.name, error = %e, "failed to send deal notification"),
        }
    }
    sent
}

pub(crate) async fn run_scan(config: &AppConfig, shop_filter: Option<&str>, dry_run: bool) -> anyhow::Result<()> {
    let shops = packwatch_core::load_shops(&config.shops_path)
        .with_context(|| format!("failed to load shops from {}", config.shops_path.display()))?;
    let settings = ScraperSettings::from(config);
    let sources = build_sources(&shops, &settings, shop_filter).context("failed to build storefront sources")?;

    if sources.is_empty() {
        match shop_filter {
            Some(slug) => anyhow::bail!("shop '{slug}' not found or not enabled"),
            None => anyhow::bail!("no enabled shops in {}", config.shops_path.display()),
        }
    }

    tracing::info!(shops = sources.len(), dry_run, "starting scan");
    let collected = collect_offers(&sources, config.scraper_max_concurrent_shops).await?;
    let offer_count = collected.offers.len();
    let (groups, skipped) = group_offers(collected.offers);
    let selections = select_all(&groups);

    if dry_run {
        for (name, chosen) in selections.get(&SelectionMode::CheapestInStock).into_iter().flatten() {
            println!("{name}: {} kr ({})", chosen.price, chosen.shop_label);
        }
        println!(
            "dry-run: {} shops ok, {} failed, {offer_count} offers, {} groups, {skipped} single cards skipped",
            collected.succeeded_shops,
            collected.failed_shops,
            groups.len()
        );
        return Ok(());
    }

    let store = JsonFileStore::new(&config.history_path);
    let mut history = store.load().context("failed to load price history")?;
    let run_id = Uuid::new_v4();
    let deals = record_history(
        &mut history,
        &groups,
        &selections,
        run_id,
        Utc::now(),
        Local::now().date_naive(),
    );
    store.save(&history).context("failed to save price history")?;

    let client = config
        .pushover
        .clone()
        .map(|creds| PushoverClient::new(creds, config.scraper_request_timeout_secs))
        .transpose()
        .context("failed to build pushover client")?;
    let sent = notify_deals(client.as_ref(), &deals).await;

    let updated = selections.values().map(BTreeMap::len).max().unwrap_or(0);
    println!(
        "scan {run_id}: {} shops ok, {} failed, {offer_count} offers, {} groups, {updated} products updated",
        collected.succeeded_shops,
        collected.failed_shops,
        groups.len()
    );
    println!("deals: {}, notifications sent: {sent}", deals.len());
    Ok(())
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
