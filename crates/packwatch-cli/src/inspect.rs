//! `classify`, `shops` and `series` inspection commands.

use packwatch_core::{AppConfig, ShopsFile};
use packwatch_grouping::{classify, looks_like_single_card, reject_reason, series_labels, series_rank};

/// Human-readable report of how one title is screened and grouped.
pub(crate) fn describe_listing(title: &str, extra: Option<&str>, series_hint: Option<&str>) -> Vec<String> {
    let c = classify(title, extra, series_hint);
    let series = match series_rank(&c.series) {
        Some(rank) => format!("{} (rank {rank})", c.series),
        None => c.series.clone(),
    };
    let screen = reject_reason(title, &[title, extra.unwrap_or_default()].join(" "))
        .map_or_else(|| "accepted".to_string(), |reason| format!("rejected ({reason})"));

    vec![
        format!("single card:    {}", looks_like_single_card(title)),
        format!("screen:         {screen}"),
        format!("series:         {series}"),
        format!("type:           {}", c.product_type),
        format!("count tag:      {}", c.count_tag.as_deref().unwrap_or("-")),
        format!("theme:          {}", c.theme.as_deref().unwrap_or("-")),
        format!("group key:      {}", c.group_key),
        format!("canonical name: {}", c.canonical_name),
    ]
}

pub(crate) fn run_classify(
    title: &str,
    extra: Option<&str>,
    series_hint: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let mut value = serde_json::to_value(classify(title, extra, series_hint))?;
        value["single_card"] = serde_json::Value::Bool(looks_like_single_card(title));
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        for line in describe_listing(title, extra, series_hint) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One line per configured shop, disabled shops included.
pub(crate) fn describe_shops(shops: &ShopsFile) -> Vec<String> {
    shops
        .shops
        .iter()
        .map(|shop| {
            let queries = shop
                .queries
                .as_ref()
                .map_or_else(|| "default queries".to_string(), |q| format!("{} queries", q.len()));
            let status = if shop.enabled { "enabled" } else { "disabled" };
            format!(
                "{:<20} {:<14} {:<9} {}",
                shop.slug(),
                shop.platform.to_string(),
                status,
                queries
            )
        })
        .collect()
}

pub(crate) fn run_shops(config: &AppConfig) -> anyhow::Result<()> {
    let shops = packwatch_core::load_shops(&config.shops_path)?;
    for line in describe_shops(&shops) {
        println!("{line}");
    }
    println!("{} shops, {} enabled", shops.shops.len(), shops.enabled().count());
    Ok(())
}

/// Series labels in matching order; earlier labels win over later ones.
pub(crate) fn describe_series() -> Vec<String> {
    series_labels()
        .enumerate()
        .map(|(rank, label)| format!("{rank:>3}  {label}"))
        .collect()
}

pub(crate) fn run_series() {
    for line in describe_series() {
        println!("{line}");
    }
}
