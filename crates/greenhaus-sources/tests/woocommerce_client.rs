//! Integration tests for `WooCommerceClient` against a `wiremock` Store API.

use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use greenhaus_sources::{ClientOptions, SourceError, WooCommerceClient, WooCredentials};

const PRODUCTS_PATH: &str = "/wp-json/wc/store/v1/products";

fn options(max_retries: u32) -> ClientOptions {
    ClientOptions {
        timeout_secs: 5,
        user_agent: "greenhaus-test/0.1".to_owned(),
        max_retries,
        backoff_base_secs: 0,
    }
}

fn test_client(server: &MockServer) -> WooCommerceClient {
    WooCommerceClient::new(&server.uri(), None, &options(0))
        .expect("failed to build test WooCommerceClient")
}

fn woo_product(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("CBD Tincture {id}"),
        "description": "<p>Full spectrum.</p>",
        "prices": {"price": "4500", "currency_code": "USD", "currency_minor_unit": 2},
        "images": [{"src": "https://woo.test/tincture.jpg", "alt": ""}],
        "categories": [{"name": "Oils", "slug": "oils"}],
        "attributes": [{"name": "CBD", "terms": [{"name": "1000mg"}]}]
    })
}

fn page_of(ids: std::ops::RangeInclusive<i64>) -> serde_json::Value {
    serde_json::Value::Array(ids.map(woo_product).collect())
}

#[tokio::test]
async fn fetch_all_products_reads_single_short_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(1..=3)))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_all_products(10)
        .await
        .expect("short page should load");

    assert_eq!(products.len(), 3);
    assert_eq!(products[0].name, "CBD Tincture 1");
    assert_eq!(
        products[0].prices.as_ref().map(|p| p.price.as_str()),
        Some("4500")
    );
}

#[tokio::test]
async fn fetch_all_products_follows_total_pages_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_of(1..=2))
                .insert_header("X-WP-TotalPages", "2"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_of(3..=3))
                .insert_header("X-WP-TotalPages", "2"),
        )
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_all_products(2)
        .await
        .expect("two pages should load");

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn fetch_all_products_without_header_stops_on_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(1..=2)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_all_products(2)
        .await
        .expect("should stop on empty page");

    assert_eq!(products.len(), 2);
}

#[tokio::test]
async fn fetch_all_products_sends_basic_auth_when_credentials_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(header_exists("authorization"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(1..=1)))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = WooCredentials {
        consumer_key: "ck_test".to_owned(),
        consumer_secret: "cs_test".to_owned(),
    };
    let client = WooCommerceClient::new(&server.uri(), Some(credentials), &options(0))
        .expect("client");

    let products = client.fetch_all_products(10).await.expect("should load");
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn fetch_all_products_propagates_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_all_products(10).await;

    assert!(
        matches!(result, Err(SourceError::NotFound { .. })),
        "expected SourceError::NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_propagates_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "oops"})))
        .mount(&server)
        .await;

    let result = test_client(&server).fetch_all_products(10).await;

    assert!(
        matches!(result, Err(SourceError::Deserialize { .. })),
        "expected SourceError::Deserialize, got: {result:?}"
    );
}

#[tokio::test]
async fn fetch_all_products_retries_after_500_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_of(5..=5)))
        .mount(&server)
        .await;

    let client = WooCommerceClient::new(&server.uri(), None, &options(1)).expect("client");
    let products = client.fetch_all_products(10).await.expect("500 is retried");

    assert_eq!(products[0].id, 5);
}

#[tokio::test]
async fn fetch_products_page_reports_total_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_of(1..=1))
                .insert_header("X-WP-TotalPages", "7"),
        )
        .mount(&server)
        .await;

    let (products, total_pages) = test_client(&server)
        .fetch_products_page(1, 1)
        .await
        .expect("page should load");

    assert_eq!(products.len(), 1);
    assert_eq!(total_pages, Some(7));
}

#[tokio::test]
async fn malformed_record_is_skipped_without_ending_pagination() {
    let server = MockServer::start().await;

    // Page 1 is full (2 of 2) even though one record cannot be decoded.
    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            woo_product(1),
            {"name": "No id", "images": [{"alt": "missing src"}]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(PRODUCTS_PATH))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "categories": [{"slug": "oils"}], "images": [{"alt": ""}]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client(&server)
        .fetch_all_products(2)
        .await
        .expect("malformed record should be skipped");

    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(products[1].name, "");
}
