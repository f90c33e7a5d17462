//! Integration tests for `HtmlCategorySource` crawling a mock shop.

use std::str::FromStr;

use packwatch_core::CategoryPage;
use rust_decimal::Decimal;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use packwatch_scraper::{HtmlCategorySource, OfferSource, ScraperError, ScraperSettings, StorefrontClient};

fn client() -> StorefrontClient {
    let settings = ScraperSettings {
        request_timeout_secs: 5,
        user_agent: "packwatch-test/0.1".to_string(),
        max_retries: 0,
        retry_backoff_base_secs: 0,
        inter_request_delay_ms: 0,
    };
    StorefrontClient::new(&settings).expect("client")
}

fn page(server: &MockServer, hint: &str, slug: &str, marker: &str) -> CategoryPage {
    CategoryPage {
        series_hint: hint.to_string(),
        url: format!("{}/shop/{slug}", server.uri()),
        query_markers: vec![marker.to_string()],
    }
}

fn source(server: &MockServer, pages: Vec<CategoryPage>, queries: &[&str]) -> HtmlCategorySource {
    HtmlCategorySource::new(
        "epicpanda".to_string(),
        &server.uri(),
        pages,
        queries.iter().map(|q| (*q).to_string()).collect(),
        client(),
    )
    .expect("valid origin")
}

async fn serve(server: &MockServer, route: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(server)
        .await;
}

const CROWN_ZENITH_CATEGORY: &str = r#"
<ul>
  <li><a href="/shop/crown-zenith-etb-101p.html">Elite Trainer Box</a></li>
  <li><a href="/shop/crown-zenith-tin-102p.html">Tin</a></li>
  <li><a href="/shop/pikachu-vmax-gg30-103p.html">Pikachu</a></li>
  <li><a href="/shop/crown-zenith-etb-101p.html">again</a></li>
</ul>
"#;

#[tokio::test]
async fn crawls_category_and_product_pages() {
    let server = MockServer::start().await;
    serve(&server, "/shop/crown-zenith-1c1.html", CROWN_ZENITH_CATEGORY).await;
    serve(
        &server,
        "/shop/crown-zenith-etb-101p.html",
        r#"<meta property="og:title" content="Crown Zenith Elite Trainer Box">
           <div class="price">Pris: 449,95 DKK</div><p>På lager</p>"#,
    )
    .await;
    serve(
        &server,
        "/shop/crown-zenith-tin-102p.html",
        "<h1>Crown Zenith Tin</h1><div>Pris 1.029,00 DKK</div><p>Udsolgt</p>",
    )
    .await;
    serve(
        &server,
        "/shop/pikachu-vmax-gg30-103p.html",
        "<h1>Pikachu VMAX GG30 Secret Rare</h1><div>Pris 299,00 DKK</div>",
    )
    .await;

    let pages = vec![page(&server, "Crown Zenith", "crown-zenith-1c1.html", "crown zenith")];
    let offers = source(&server, pages, &["crown zenith"]).produce_offers().await.expect("scan");

    assert_eq!(offers.len(), 2);
    let etb = &offers[0];
    assert_eq!(etb.title, "Crown Zenith Elite Trainer Box");
    assert_eq!(etb.price, Decimal::from_str("449.95").unwrap());
    assert!(etb.available);
    assert_eq!(etb.series_hint.as_deref(), Some("Crown Zenith"));
    assert_eq!(etb.url, format!("{}/shop/crown-zenith-etb-101p.html", server.uri()));

    let tin = &offers[1];
    assert_eq!(tin.title, "Crown Zenith Tin");
    assert_eq!(tin.price, Decimal::from_str("1029.00").unwrap());
    assert!(!tin.available);
}

#[tokio::test]
async fn pages_without_matching_markers_are_not_fetched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let pages = vec![page(&server, "Perfect Order", "perfect-order-9c1.html", "perfect order")];
    let offers = source(&server, pages, &["crown zenith"]).produce_offers().await.expect("scan");
    assert!(offers.is_empty());
}

#[tokio::test]
async fn failing_product_page_is_skipped() {
    let server = MockServer::start().await;
    serve(&server, "/shop/crown-zenith-1c1.html", CROWN_ZENITH_CATEGORY).await;
    serve(
        &server,
        "/shop/crown-zenith-tin-102p.html",
        "<h1>Crown Zenith Tin</h1><div>Pris 129,95 DKK</div>",
    )
    .await;

    let pages = vec![page(&server, "Crown Zenith", "crown-zenith-1c1.html", "crown zenith")];
    let offers = source(&server, pages, &["crown zenith"]).produce_offers().await.expect("scan");
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].title, "Crown Zenith Tin");
}

#[tokio::test]
async fn every_category_page_failing_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let pages = vec![
        page(&server, "Crown Zenith", "crown-zenith-1c1.html", "crown zenith"),
        page(&server, "Scarlet & Violet 151", "151-2c1.html", "pokemon 151"),
    ];
    let result = source(&server, pages, &["crown zenith", "pokemon 151"])
        .produce_offers()
        .await;
    assert!(
        matches!(result, Err(ScraperError::AllPagesFailed { ref shop, .. }) if shop == "epicpanda"),
        "got {result:?}"
    );
}

#[test]
fn relative_origin_is_rejected() {
    let result = HtmlCategorySource::new(
        "epicpanda".to_string(),
        "epicpanda.dk",
        Vec::new(),
        Vec::new(),
        client(),
    );
    assert!(matches!(result, Err(ScraperError::InvalidShopUrl { .. })));
}
