//! Integration tests for `AdminClient` against a local `wiremock` server.
//!
//! Covers both API surfaces: the REST `orders.json` search and the GraphQL
//! `orders(query:)` search, plus the diagnostic probes and error mapping.

use gleura_core::AdminApiSurface;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gleura_shopify::{AdminClient, DiagnosticsProbe, ShopifyError};

const ORDERS_PATH: &str = "/admin/api/2025-01/orders.json";
const GRAPHQL_PATH: &str = "/admin/api/2025-01/graphql.json";

fn test_client(server: &MockServer, surface: AdminApiSurface) -> AdminClient {
    AdminClient::new(
        &server.uri(),
        "shpat_test",
        "2025-01",
        surface,
        5,
        "gleura-test/0.1",
    )
    .expect("failed to build test AdminClient")
}

// ---------------------------------------------------------------------------
// REST surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rest_search_sends_token_and_name_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .and(query_param("name", "#1001"))
        .and(query_param("status", "any"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{ "name": "#1001", "phone": "9876543210" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orders = test_client(&server, AdminApiSurface::Rest)
        .search_orders("#1001")
        .await
        .expect("search should succeed");

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].display_name(), "#1001");
}

#[tokio::test]
async fn rest_search_returns_empty_vec_for_no_matches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "orders": [] })))
        .mount(&server)
        .await;

    let orders = test_client(&server, AdminApiSurface::Rest)
        .search_orders("#404")
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn rest_search_maps_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = test_client(&server, AdminApiSurface::Rest)
        .search_orders("#1001")
        .await
        .unwrap_err();

    assert!(
        matches!(err, ShopifyError::UnexpectedStatus { status: 401, .. }),
        "expected UnexpectedStatus(401), got: {err:?}"
    );
    assert_eq!(err.status(), Some(401));
    assert!(!err.is_unavailable());
}

#[tokio::test]
async fn rest_search_reports_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server, AdminApiSurface::Rest)
        .search_orders("#1001")
        .await
        .unwrap_err();
    assert!(
        matches!(err, ShopifyError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn slow_upstream_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "orders": [] }))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = AdminClient::new(
        &server.uri(),
        "shpat_test",
        "2025-01",
        AdminApiSurface::Rest,
        1,
        "gleura-test/0.1",
    )
    .unwrap();

    let err = client.search_orders("#1001").await.unwrap_err();
    assert!(err.is_unavailable(), "expected a timeout, got: {err:?}");
}

// ---------------------------------------------------------------------------
// GraphQL surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn graphql_search_unwraps_connection_nodes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", "shpat_test"))
        .and(body_partial_json(json!({
            "variables": { "q": "name:\"#1001\" status:any" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "orders": { "edges": [
                { "node": { "name": "#1001", "customer": { "phone": "+919876543210" } } }
            ] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let orders = test_client(&server, AdminApiSurface::GraphQl)
        .search_orders("#1001")
        .await
        .unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(
        orders[0].path("customer.phone"),
        Some(&json!("+919876543210"))
    );
}

#[tokio::test]
async fn graphql_errors_array_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Access denied for orders field." }]
        })))
        .mount(&server)
        .await;

    let err = test_client(&server, AdminApiSurface::GraphQl)
        .search_orders("#1001")
        .await
        .unwrap_err();

    match err {
        ShopifyError::GraphQl { messages, .. } => {
            assert_eq!(messages, vec!["Access denied for orders field.".to_owned()]);
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn diagnostics_collect_recent_orders_and_scopes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .and(query_param("fields", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "orders": [{ "name": "#1003" }, { "name": "#1002" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/oauth/access_scopes.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_scopes": [{ "handle": "read_orders" }, { "handle": "read_products" }]
        })))
        .mount(&server)
        .await;

    let diagnostics = test_client(&server, AdminApiSurface::Rest)
        .collect_diagnostics()
        .await;

    assert_eq!(
        diagnostics.recent_orders,
        Some(vec!["#1003".to_owned(), "#1002".to_owned()])
    );
    assert_eq!(diagnostics.can_read_orders(), Some(true));
}

#[tokio::test]
async fn diagnostics_swallow_probe_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ORDERS_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    // access_scopes.json is not mounted: wiremock answers 404.
    let diagnostics = test_client(&server, AdminApiSurface::Rest)
        .collect_diagnostics()
        .await;

    assert_eq!(diagnostics.recent_orders, None);
    assert_eq!(diagnostics.access_scopes, None);
    assert_eq!(
        diagnostics.summary(),
        "recent orders: unknown; access scopes: unknown"
    );
}
