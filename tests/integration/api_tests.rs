//! API integration tests
//!
//! Require a running server with a reachable database.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

async fn create_book(client: &Client, body: Value) -> Value {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn delete_book(client: &Client, id: i64) -> StatusCode {
    client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready_check() {
    let response = Client::new()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let response = Client::new()
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_book_lifecycle() {
    let client = Client::new();

    let created = create_book(
        &client,
        json!({"title": "Dune", "numPages": 412, "author": "Herbert", "rating": 4.5}),
    )
    .await;
    let id = created["id"].as_i64().expect("No book ID");
    assert_eq!(created["title"], "Dune");

    let fetched: Value = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(fetched, created);

    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .json(&json!({"title": "Dune", "numPages": 412, "author": "Frank Herbert", "rating": 5}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(updated["id"], id);
    assert_eq!(updated["author"], "Frank Herbert");

    assert_eq!(delete_book(&client, id).await, StatusCode::NO_CONTENT);
    assert_eq!(delete_book(&client, id).await, StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_create_invalid_book() {
    let response = Client::new()
        .post(format!("{}/books", BASE_URL))
        .json(&json!({"title": "", "numPages": -5, "author": "Nobody", "rating": 9}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"]["title"].is_string());
    assert!(body["errors"]["numPages"].is_string());
    assert!(body["errors"]["rating"].is_string());
    assert!(body["errors"].get("author").is_none());
}

#[tokio::test]
#[ignore]
async fn test_invalid_book_id() {
    let response = Client::new()
        .get(format!("{}/books/not-a-number", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_update_missing_book() {
    let response = Client::new()
        .put(format!("{}/books/{}", BASE_URL, i32::MAX))
        .json(&json!({"title": "Ghost", "numPages": 1, "author": "Nobody", "rating": 1}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
