use std::str::FromStr;

use super::*;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

fn chosen(price: &str, shop: &str) -> ChosenOffer {
    ChosenOffer {
        price: dec(price),
        shop_label: shop.to_string(),
        available: true,
        url: format!("https://{shop}.dk/products/etb"),
    }
}

fn selections(entries: &[(&str, &str, &str)]) -> BTreeMap<String, ChosenOffer> {
    entries
        .iter()
        .map(|(name, price, shop)| ((*name).to_string(), chosen(price, shop)))
        .collect()
}

const ETB: &str = "Crown Zenith: Elite Trainer Box";

#[test]
fn median_odd_even_and_empty() {
    assert_eq!(median(&[]), None);
    assert_eq!(median(&[dec("400")]), Some(dec("400")));
    assert_eq!(median(&[dec("500"), dec("400"), dec("450")]), Some(dec("450")));
    assert_eq!(median(&[dec("400"), dec("500")]), Some(dec("450")));
    assert_eq!(
        median(&[dec("399.95"), dec("449.95"), dec("500"), dec("300")]),
        Some(dec("424.95"))
    );
}

#[test]
fn first_observation_is_never_a_deal() {
    let mut history = PriceHistory::default();
    let updates = history.record_run(
        day(1),
        SelectionMode::CheapestInStock,
        &selections(&[(ETB, "449.95", "matraws")]),
    );

    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].median, dec("449.95"));
    assert!(!updates[0].is_deal);
    assert_eq!(history.points(SelectionMode::CheapestInStock, ETB).len(), 1);
}

#[test]
fn price_below_median_is_a_deal() {
    let mut history = PriceHistory::default();
    let mode = SelectionMode::CheapestInStock;
    history.record_run(day(1), mode, &selections(&[(ETB, "500", "matraws")]));
    history.record_run(day(2), mode, &selections(&[(ETB, "480", "andcards")]));
    let updates = history.record_run(day(3), mode, &selections(&[(ETB, "399.95", "epicpanda")]));

    let update = &updates[0];
    assert_eq!(update.median, dec("480"));
    assert!(update.is_deal);
    assert_eq!(
        update.deal_message(),
        "Deal: Crown Zenith: Elite Trainer Box → 399.95 kr (epicpanda) | median: 480.00"
    );
}

#[test]
fn price_equal_to_median_is_not_a_deal() {
    let mut history = PriceHistory::default();
    let mode = SelectionMode::CheapestOverall;
    history.record_run(day(1), mode, &selections(&[(ETB, "450", "matraws")]));
    let updates = history.record_run(day(2), mode, &selections(&[(ETB, "450", "matraws")]));
    assert!(!updates[0].is_deal);
}

#[test]
fn same_day_rerun_replaces_the_point() {
    let mut history = PriceHistory::default();
    let mode = SelectionMode::CheapestInStock;
    history.record_run(day(1), mode, &selections(&[(ETB, "500", "matraws")]));
    history.record_run(day(2), mode, &selections(&[(ETB, "300", "andcards")]));
    let updates = history.record_run(day(2), mode, &selections(&[(ETB, "450", "andcards")]));

    let points = history.points(mode, ETB);
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].price, dec("450"));
    assert_eq!(updates[0].median, dec("475"));
    assert!(updates[0].is_deal);
}

#[test]
fn points_stay_in_date_order() {
    let mut history = PriceHistory::default();
    let mode = SelectionMode::CheapestInStock;
    history.record_run(day(5), mode, &selections(&[(ETB, "500", "matraws")]));
    history.record_run(day(3), mode, &selections(&[(ETB, "400", "matraws")]));

    let dates: Vec<NaiveDate> = history.points(mode, ETB).iter().map(|p| p.date).collect();
    assert_eq!(dates, vec![day(3), day(5)]);
}

#[test]
fn modes_keep_separate_ledgers() {
    let mut history = PriceHistory::default();
    history.record_run(
        day(1),
        SelectionMode::CheapestOverall,
        &selections(&[(ETB, "399", "matraws")]),
    );
    history.record_run(
        day(1),
        SelectionMode::CheapestInStock,
        &selections(&[(ETB, "449", "andcards")]),
    );

    assert_eq!(history.points(SelectionMode::CheapestOverall, ETB)[0].shop, "matraws");
    assert_eq!(history.points(SelectionMode::CheapestInStock, ETB)[0].shop, "andcards");
    assert!(history.points(SelectionMode::CheapestInStock, "Unknown").is_empty());
}

#[test]
fn record_offers_replaces_previous_log() {
    let mut history = PriceHistory::default();
    let at = DateTime::parse_from_rfc3339("2026-03-01T06:00:00Z").unwrap().with_timezone(&Utc);
    let entry = OfferLogEntry {
        run_id: uuid::Uuid::nil(),
        group_key: "crown zenith|elite trainer box||".to_string(),
        canonical_name: ETB.to_string(),
        title: "Crown Zenith Elite Trainer Box".to_string(),
        shop: "matraws".to_string(),
        price: dec("449.95"),
        available: true,
        url: "https://matraws.dk/products/cz-etb".to_string(),
    };

    history.record_offers(at, vec![entry.clone(), entry.clone()]);
    history.record_offers(at, vec![entry]);

    assert_eq!(history.last_run, Some(at));
    assert_eq!(history.last_run_offers.len(), 1);
}

#[test]
fn history_serializes_with_mode_keys() {
    let mut history = PriceHistory::default();
    history.record_run(
        day(1),
        SelectionMode::CheapestInStock,
        &selections(&[(ETB, "449.95", "matraws")]),
    );
    let json = serde_json::to_value(&history).unwrap();
    assert_eq!(
        json["ledgers"]["cheapest_in_stock"][ETB][0]["price"],
        serde_json::json!("449.95")
    );
    assert_eq!(json["ledgers"]["cheapest_in_stock"][ETB][0]["date"], "2026-03-01");
}
