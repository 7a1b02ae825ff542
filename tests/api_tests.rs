//! API integration tests.
//!
//! These run against a live server instance (`cargo run`) on the default
//! port, with a clean database for repeatable assertions.

use chrono::{Duration, Local, NaiveDateTime};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:9090";

fn fmt(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

fn in_hours(hours: i64) -> String {
    fmt(Local::now().naive_local() + Duration::hours(hours))
}

fn unique_email(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}@example.com", tag, nanos)
}

/// Helper to sign up a user and return its id
async fn signup(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({
            "name": name,
            "email": unique_email(name)
        }))
        .send()
        .await
        .expect("Failed to send signup request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse signup response");
    body["id"].as_i64().expect("No user ID")
}

/// Helper to list an item for the given owner
async fn list_item(client: &Client, owner_id: i64, name: &str) -> i64 {
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header("X-Sharer-User-Id", owner_id)
        .json(&json!({
            "name": name,
            "description": format!("{} in good condition", name),
            "available": true
        }))
        .send()
        .await
        .expect("Failed to send item request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse item response");
    body["id"].as_i64().expect("No item ID")
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
async fn test_booking_lifecycle() {
    let client = Client::new();
    let owner = signup(&client, "owner").await;
    let booker = signup(&client, "booker").await;
    let item = list_item(&client, owner, "Pressure washer").await;

    // Booker reserves the item
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("X-Sharer-User-Id", booker)
        .json(&json!({
            "itemId": item,
            "start": in_hours(1),
            "end": in_hours(24)
        }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse booking response");
    assert_eq!(body["status"], "WAITING");
    assert_eq!(body["item"]["id"].as_i64(), Some(item));
    assert_eq!(body["booker"]["id"].as_i64(), Some(booker));
    let booking = body["id"].as_i64().expect("No booking ID");

    // Owner approves
    let response = client
        .patch(format!("{}/bookings/{}?approved=true", BASE_URL, booking))
        .header("X-Sharer-User-Id", owner)
        .send()
        .await
        .expect("Failed to send approval");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse approval response");
    assert_eq!(body["status"], "APPROVED");
    assert_eq!(body["id"].as_i64(), Some(booking));

    // A second decision is rejected whatever the flag says
    let response = client
        .patch(format!("{}/bookings/{}?approved=false", BASE_URL, booking))
        .header("X-Sharer-User-Id", owner)
        .send()
        .await
        .expect("Failed to send second decision");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error body");
    assert!(body["description"].as_str().unwrap_or_default().contains("already"));

    // A stranger may not view the booking
    let stranger = signup(&client, "stranger").await;
    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, booking))
        .header("X-Sharer-User-Id", stranger)
        .send()
        .await
        .expect("Failed to send fetch");

    assert_eq!(response.status(), 400);

    // The booker sees it in the unfiltered listing
    let response = client
        .get(format!("{}/bookings?state=ALL", BASE_URL))
        .header("X-Sharer-User-Id", booker)
        .send()
        .await
        .expect("Failed to send listing request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse listing");
    assert!(body.as_array().map(|a| !a.is_empty()).unwrap_or(false));
}

#[tokio::test]
#[ignore]
async fn test_booking_preconditions() {
    let client = Client::new();
    let owner = signup(&client, "owner").await;
    let item = list_item(&client, owner, "Chainsaw").await;

    // Owner cannot book their own item
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("X-Sharer-User-Id", owner)
        .json(&json!({
            "itemId": item,
            "start": in_hours(1),
            "end": in_hours(24)
        }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 400);

    // Unknown caller is a 404
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("X-Sharer-User-Id", 999_999_999)
        .json(&json!({
            "itemId": item,
            "start": in_hours(1),
            "end": in_hours(24)
        }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 404);

    // Inverted period is a 400
    let booker = signup(&client, "booker").await;
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("X-Sharer-User-Id", booker)
        .json(&json!({
            "itemId": item,
            "start": in_hours(24),
            "end": in_hours(1)
        }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_comment_after_completed_rental() {
    let client = Client::new();
    let owner = signup(&client, "owner").await;
    let renter = signup(&client, "renter").await;
    let item = list_item(&client, owner, "Carpet cleaner").await;

    // Commenting without any rental is rejected
    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item))
        .header("X-Sharer-User-Id", renter)
        .json(&json!({ "text": "Never used it" }))
        .send()
        .await
        .expect("Failed to send comment");

    assert_eq!(response.status(), 400);

    // The server only requires start < end, so a finished rental can be
    // recorded directly against it
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("X-Sharer-User-Id", renter)
        .json(&json!({
            "itemId": item,
            "start": in_hours(-48),
            "end": in_hours(-24)
        }))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/items/{}/comment", BASE_URL, item))
        .header("X-Sharer-User-Id", renter)
        .json(&json!({ "text": "Left the carpet spotless" }))
        .send()
        .await
        .expect("Failed to send comment");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse comment");
    assert_eq!(body["authorName"], "renter");
    assert_eq!(body["itemId"].as_i64(), Some(item));

    // The comment shows up on the item detail view
    let response = client
        .get(format!("{}/items/{}", BASE_URL, item))
        .header("X-Sharer-User-Id", renter)
        .send()
        .await
        .expect("Failed to fetch item");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse item");
    let comments = body["comments"].as_array().expect("No comments array");
    assert!(!comments.is_empty());
    // Booking references are hidden from non-owners
    assert!(body["lastBooking"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_search_finds_available_items() {
    let client = Client::new();
    let owner = signup(&client, "owner").await;
    list_item(&client, owner, "Sewing machine").await;

    let response = client
        .get(format!("{}/items/search?text=sewing", BASE_URL))
        .header("X-Sharer-User-Id", owner)
        .send()
        .await
        .expect("Failed to send search");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse search results");
    assert!(body.as_array().map(|a| !a.is_empty()).unwrap_or(false));
}

#[tokio::test]
#[ignore]
async fn test_request_with_answers() {
    let client = Client::new();
    let requester = signup(&client, "requester").await;
    let supplier = signup(&client, "supplier").await;

    let response = client
        .post(format!("{}/requests", BASE_URL))
        .header("X-Sharer-User-Id", requester)
        .json(&json!({ "description": "Looking for a telescope" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse request");
    let request_id = body["id"].as_i64().expect("No request ID");

    // Supplier answers by listing a matching item
    let response = client
        .post(format!("{}/items", BASE_URL))
        .header("X-Sharer-User-Id", supplier)
        .json(&json!({
            "name": "Telescope",
            "description": "130mm reflector",
            "available": true,
            "requestId": request_id
        }))
        .send()
        .await
        .expect("Failed to send item");

    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/requests/{}", BASE_URL, request_id))
        .header("X-Sharer-User-Id", requester)
        .send()
        .await
        .expect("Failed to fetch request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse request detail");
    let answers = body["items"].as_array().expect("No items array");
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["name"], "Telescope");
}

#[tokio::test]
#[ignore]
async fn test_user_crud_and_conflicts() {
    let client = Client::new();
    let email = unique_email("crud");

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "Crud", "email": email }))
        .send()
        .await
        .expect("Failed to send signup");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse user");
    let user_id = body["id"].as_i64().expect("No user ID");

    // Duplicate email conflicts
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "name": "Copycat", "email": email }))
        .send()
        .await
        .expect("Failed to send duplicate signup");

    assert_eq!(response.status(), 409);

    // Partial update ignores blank fields
    let response = client
        .patch(format!("{}/users/{}", BASE_URL, user_id))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .expect("Failed to send update");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse update");
    assert_eq!(body["name"], "Crud");

    // Delete twice; both succeed
    for _ in 0..2 {
        let response = client
            .delete(format!("{}/users/{}", BASE_URL, user_id))
            .send()
            .await
            .expect("Failed to send delete");
        assert_eq!(response.status(), 204);
    }

    let response = client
        .get(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send fetch");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_missing_identity_header() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Bad request");
}
