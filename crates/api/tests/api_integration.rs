//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use api::AppState;
use api::config::Config;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::DocumentId;
use document_store::InMemoryDocumentStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    setup_with_store().0
}

fn setup_with_store() -> (axum::Router, InMemoryDocumentStore) {
    let store = InMemoryDocumentStore::new();
    let state = AppState::new(Some(store.clone()), Config::default());
    (api::create_app(state, get_metrics_handle()), store)
}

fn setup_without_store() -> axum::Router {
    let state: Arc<AppState<InMemoryDocumentStore>> = AppState::new(None, Config::default());
    api::create_app(state, get_metrics_handle())
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create_product(app: &axum::Router, body: serde_json::Value) -> String {
    let (status, json) = send(app, post_json("/api/products", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    json.as_str().unwrap().to_string()
}

async fn list_names(app: &axum::Router, uri: &str) -> Vec<String> {
    let (status, json) = send(app, get(uri)).await;
    assert_eq!(status, StatusCode::OK);
    json.as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_liveness_messages() {
    let app = setup();

    let (status, json) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Crafty API is running");

    let (status, json) = send(&app, get("/api/hello")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Hello from the backend API!");
}

#[tokio::test]
async fn test_create_and_get_product() {
    let app = setup();

    let id = create_product(
        &app,
        serde_json::json!({
            "name": "Terracotta Vase",
            "price": 1299,
            "category": "Ceramics"
        }),
    )
    .await;
    assert!(!id.is_empty());

    let (status, product) = send(&app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["id"], id.as_str());
    assert_eq!(product["name"], "Terracotta Vase");
    assert_eq!(product["price"], 1299.0);
    assert_eq!(product["category"], "Ceramics");
    assert_eq!(product["in_stock"], true);
    assert_eq!(product["description"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_create_and_get_every_field() {
    let app = setup();
    let input = serde_json::json!({
        "name": "Warli Painting",
        "description": "Tribal art on canvas",
        "price": 2499.5,
        "category": "Art",
        "location": "Maharashtra",
        "image": "https://example.com/warli.jpg",
        "in_stock": false
    });

    let id = create_product(&app, input.clone()).await;
    let (status, product) = send(&app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["id"], id.as_str());
    for field in [
        "name",
        "description",
        "price",
        "category",
        "location",
        "image",
        "in_stock",
    ] {
        assert_eq!(product[field], input[field], "field {field}");
    }
}

#[tokio::test]
async fn test_create_accepts_lax_payload() {
    let app = setup();

    let id = create_product(
        &app,
        serde_json::json!({
            "_id": "caller-chosen",
            "name": "Clay Lamp",
            "price": "350",
            "category": "Home",
            "in_stock": "false"
        }),
    )
    .await;
    assert_ne!(id, "caller-chosen");

    let (status, product) = send(&app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["price"], 350.0);
    assert_eq!(product["in_stock"], false);
}

#[tokio::test]
async fn test_get_malformed_id_is_bad_request() {
    let app = setup();

    let (status, json) = send(&app, get("/api/products/not-an-id")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid product id");
}

#[tokio::test]
async fn test_get_nonexistent_product() {
    let app = setup();
    let missing = DocumentId::new();

    let (status, json) = send(&app, get(&format!("/api/products/{missing}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Product not found");
}

#[tokio::test]
async fn test_create_invalid_payload() {
    let app = setup();

    let (status, json) = send(
        &app,
        post_json(
            "/api/products",
            serde_json::json!({"price": -5, "category": "Art"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fields: Vec<_> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "price"]);
}

#[tokio::test]
async fn test_create_malformed_json() {
    let app = setup();

    let request = Request::builder()
        .method("POST")
        .uri("/api/products")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().is_some());
}

#[tokio::test]
async fn test_search_filters() {
    let app = setup();
    let (status, json) = send(&app, post_empty("/api/seed")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, 6);

    assert_eq!(
        list_names(&app, "/api/products?category=ceramics").await,
        vec!["Terracotta Vase", "Blue Pottery Bowl"]
    );
    assert_eq!(
        list_names(&app, "/api/products?q=JAIPUR").await,
        vec!["Block-Printed Dupatta", "Blue Pottery Bowl"]
    );
    assert_eq!(
        list_names(&app, "/api/products?min_price=1500&max_price=2000").await,
        vec!["Block-Printed Dupatta", "Phulkari Shawl"]
    );
    assert_eq!(
        list_names(&app, "/api/products?q=textiles&max_price=1600").await,
        vec!["Block-Printed Dupatta"]
    );
    assert!(
        list_names(&app, "/api/products?category=ceram")
            .await
            .is_empty()
    );
    assert_eq!(list_names(&app, "/api/products?limit=2").await.len(), 2);
}

#[tokio::test]
async fn test_search_limit_bounds() {
    let app = setup();

    let (status, _) = send(&app, get("/api/products?limit=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/products?limit=101")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = send(&app, get("/api/products?limit=100")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_rejects_bad_prices() {
    let app = setup();

    let (status, json) = send(&app, get("/api/products?min_price=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"][0]["field"], "min_price");

    let (status, _) = send(&app, get("/api/products?max_price=cheap")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_limit_100_caps_results() {
    let (app, _) = setup_with_store();
    for i in 0..105 {
        create_product(
            &app,
            serde_json::json!({"name": format!("Item {i}"), "price": i, "category": "Home"}),
        )
        .await;
    }

    assert_eq!(list_names(&app, "/api/products?limit=100").await.len(), 100);
    assert_eq!(list_names(&app, "/api/products").await.len(), 40);
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let (app, store) = setup_with_store();

    let (_, first) = send(&app, post_empty("/api/seed")).await;
    let (_, second) = send(&app, post_empty("/api/seed")).await;

    assert_eq!(first, 6);
    assert_eq!(second, 0);
    assert_eq!(store.count(catalog::PRODUCT_COLLECTION).await, 6);
}

#[tokio::test]
async fn test_list_projects_legacy_documents() {
    let (app, store) = setup_with_store();
    let body = serde_json::json!({"name": "Old Listing", "price": "350"});
    store
        .insert_raw(catalog::PRODUCT_COLLECTION, body.as_object().cloned().unwrap())
        .await;

    let (status, json) = send(&app, get("/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["price"], 350.0);
    assert_eq!(json[0]["category"], "");
    assert_eq!(json[0]["in_stock"], true);
}

#[tokio::test]
async fn test_store_endpoints_without_database() {
    let app = setup_without_store();

    for request in [
        get("/api/products"),
        get(&format!("/api/products/{}", DocumentId::new())),
        post_json(
            "/api/products",
            serde_json::json!({"name": "Vase", "price": 1, "category": "Ceramics"}),
        ),
        post_empty("/api/seed"),
    ] {
        let (status, json) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Database not available");
    }
}

#[tokio::test]
async fn test_create_validates_before_needing_database() {
    let app = setup_without_store();

    let (status, json) = send(
        &app,
        post_json("/api/products", serde_json::json!({"category": "Art"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"][0]["field"], "name");
}

#[tokio::test]
async fn test_diagnostics_without_database() {
    let app = setup_without_store();

    let (status, json) = send(&app, get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["backend"], "Running");
    assert_eq!(json["database"], "Not initialized");
    assert_eq!(json["connection_status"], "Not Connected");
    assert_eq!(json["database_url"], "Not Set");
    assert_eq!(json["collections"], serde_json::json!([]));
}

#[tokio::test]
async fn test_diagnostics_with_database() {
    let app = setup();
    send(&app, post_empty("/api/seed")).await;

    let (status, json) = send(&app, get("/test")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["database"], "Connected & Working");
    assert_eq!(json["connection_status"], "Connected");
    assert_eq!(json["collections"], serde_json::json!(["product"]));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();
    send(&app, get("/api/products")).await;

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
}
