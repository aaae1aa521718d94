//! End-to-end dispatch through the stock app.

use axum::http::{Method, StatusCode};
use route_chain::config::{parse_config, RouterConfig};
use serde_json::json;

mod common;

use common::{send, stock_app};

fn configured() -> RouterConfig {
    parse_config(
        r#"
        [[access.rules]]
        prefix = "/admin"
        api_key = "letmein"

        [stores]
        names = ["primary", "archive", "admin"]
        default = "primary"

        [[stores.mounts]]
        prefix = "/archive"
        store = "archive"

        [[stores.mounts]]
        prefix = "/admin"
        store = "admin"
        "#,
    )
    .unwrap()
}

#[tokio::test]
async fn test_item_round_trip_in_default_store() {
    let app = stock_app(RouterConfig::default());

    let created = send(&app, Method::PUT, "/items/42", None, Some(json!({"title": "answer"}))).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.json(), json!({"id": "42", "store": "primary"}));

    let replaced = send(&app, Method::PUT, "/items/42", None, Some(json!({"title": "again"}))).await;
    assert_eq!(replaced.status, StatusCode::OK);

    let fetched = send(&app, Method::GET, "/items/42", None, None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["document"], json!({"title": "again"}));

    let deleted = send(&app, Method::DELETE, "/items/42", None, None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = send(&app, Method::GET, "/items/42", None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body, "Item not found");
}

#[tokio::test]
async fn test_non_numeric_id_is_not_routed() {
    let app = stock_app(RouterConfig::default());

    let reply = send(&app, Method::GET, "/items/abc", None, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body, "No matching route found");
}

#[tokio::test]
async fn test_unregistered_method_is_not_found() {
    let app = stock_app(RouterConfig::default());
    let reply = send(&app, Method::PATCH, "/items/1", None, None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mount_prefix_selects_store() {
    let app = stock_app(configured());

    send(&app, Method::PUT, "/archive/items/7", None, Some(json!("old"))).await;
    send(&app, Method::PUT, "/items/7", None, Some(json!("new"))).await;

    let archived = send(&app, Method::GET, "/archive/items/7", None, None).await;
    assert_eq!(archived.json()["store"], "archive");
    assert_eq!(archived.json()["document"], "old");

    let current = send(&app, Method::GET, "/items/7", None, None).await;
    assert_eq!(current.json()["store"], "primary");
    assert_eq!(current.json()["document"], "new");
}

#[tokio::test]
async fn test_access_control_short_circuits() {
    let app = stock_app(configured());

    let denied = send(&app, Method::PUT, "/admin/items/1", None, Some(json!({}))).await;
    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);

    let allowed = send(
        &app,
        Method::PUT,
        "/admin/items/1",
        Some("Bearer letmein"),
        Some(json!({"role": "root"})),
    )
    .await;
    assert_eq!(allowed.status, StatusCode::CREATED);
    assert_eq!(allowed.json()["store"], "admin");

    // The denied write never reached the store.
    let fetched = send(&app, Method::GET, "/admin/items/1", Some("Bearer letmein"), None).await;
    assert_eq!(fetched.json()["document"], json!({"role": "root"}));
}

#[tokio::test]
async fn test_invalid_json_body() {
    let app = stock_app(RouterConfig::default());
    let reply = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(reply.json()["service"], "route-chain");

    let request = axum::http::Request::builder()
        .method(Method::PUT)
        .uri("/items/1")
        .body(axum::body::Body::from("not json"))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_store_selected() {
    let mut config = RouterConfig::default();
    config.stores.default = None;
    let app = stock_app(config);

    let reply = send(&app, Method::GET, "/items/1", None, None).await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_request_id_assigned_and_propagated() {
    let app = stock_app(RouterConfig::default());
    let reply = send(&app, Method::GET, "/stores", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!({"stores": ["primary"]}));
    let id = reply.request_id.expect("x-request-id missing");
    assert!(uuid_like(&id));
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = RouterConfig::default();
    config.limits.max_body_bytes = 16;
    let app = stock_app(config);

    let reply = send(&app, Method::PUT, "/items/1", None, Some(json!({"padding": "x".repeat(64)}))).await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
}

fn uuid_like(id: &str) -> bool {
    id.len() == 36 && id.chars().filter(|c| *c == '-').count() == 4
}
