//! HTTP boundary tests
//!
//! Serves the real router on an ephemeral port and drives it with an HTTP
//! client, covering webhook authentication and the `{success, message?}`
//! envelope for expected failures.

mod common;

use common::test_db;
use storefront_server::api;
use storefront_server::core::{Config, ServerState};

fn test_config(environment: &str, webhook_secret: Option<&str>) -> Config {
    Config {
        work_dir: "/tmp/storefront-test".to_string(),
        http_port: 0,
        environment: environment.to_string(),
        order_cache_ttl_secs: 300,
        notify_endpoint: None,
        asset_endpoint: None,
        webhook_secret: webhook_secret.map(str::to_string),
    }
}

/// Serve the full router on an ephemeral port, returning its base URL
async fn spawn_app(config: Config) -> String {
    let db = test_db().await;
    let router = api::router(ServerState::with_db(config, db));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn user_created_event(clerk_id: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "user.created",
        "data": {
            "id": clerk_id,
            "email_addresses": [{"email_address": format!("{clerk_id}@example.com")}],
            "first_name": "Jo",
            "last_name": "Doe"
        }
    })
}

#[tokio::test]
async fn test_webhook_fails_closed_in_production_without_secret() {
    let base = spawn_app(test_config("production", None)).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/api/webhooks/identity"))
        .json(&user_created_event("clerk_prod"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_webhook_requires_matching_secret() {
    let base = spawn_app(test_config("development", Some("s3cret"))).await;
    let client = reqwest::Client::new();
    let url = format!("{base}/api/webhooks/identity");

    let resp = client
        .post(&url)
        .header("x-webhook-secret", "wrong")
        .json(&user_created_event("clerk_a"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    let resp = client
        .post(&url)
        .header("x-webhook-secret", "s3cret")
        .json(&user_created_event("clerk_a"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    // The synced user can now be addressed by the cart API
    let resp = client
        .get(format!("{base}/api/cart?clerkId=clerk_a"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_cart_reports_expected_failures_in_the_envelope() {
    let base = spawn_app(test_config("development", None)).await;
    let client = reqwest::Client::new();

    // Unknown user is an expected condition: HTTP 200, success false
    let resp = client
        .get(format!("{base}/api/cart?clerkId=clerk_ghost"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("clerk_ghost"));
}
