//! User registration and lookup over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use cartwright_integration_tests::{PASSWORD, TestContext};

#[tokio::test]
async fn create_user_returns_id_and_username_only() {
    let ctx = TestContext::new();

    let user = ctx.register("Sarah").await;

    assert_eq!(user["username"], "Sarah");
    assert!(user["id"].as_i64().unwrap() > 0);
    let keys: Vec<&String> = user.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 2, "unexpected fields in {user}");
}

#[tokio::test]
async fn created_user_has_empty_cart() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let response = ctx.remove_from_cart("Sarah", 1, 1).await;

    assert_eq!(response.status, StatusCode::OK);
    let cart = response.json();
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], "0.00");
}

#[tokio::test]
async fn mismatched_confirmation_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .post_json(
            "/api/user/create",
            &json!({
                "username": "Sarah",
                "password": PASSWORD,
                "confirmPassword": "17sara8",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body.is_empty());
    assert_eq!(ctx.get("/api/user/Sarah").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn short_password_is_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .post_json(
            "/api/user/create",
            &json!({
                "username": "Sarah",
                "password": "sara7",
                "confirmPassword": "sara7",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let response = ctx
        .post_json(
            "/api/user/create",
            &json!({
                "username": "Sarah",
                "password": "different1",
                "confirmPassword": "different1",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn find_by_username_and_id() {
    let ctx = TestContext::new();
    let created = ctx.register("Sarah").await;
    let id = created["id"].as_i64().unwrap();

    let by_name = ctx.get("/api/user/Sarah").await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert_eq!(by_name.json(), created);

    let by_id = ctx.get(&format!("/api/user/id/{id}")).await;
    assert_eq!(by_id.status, StatusCode::OK);
    assert_eq!(by_id.json(), created);
}

#[tokio::test]
async fn unknown_user_is_not_found_with_empty_body() {
    let ctx = TestContext::new();

    let response = ctx.get("/api/user/Lati").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());

    assert_eq!(ctx.get("/api/user/id/42").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn password_never_appears_in_responses() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let response = ctx.get("/api/user/Sarah").await;
    let body = String::from_utf8(response.body).unwrap();

    assert!(!body.contains(PASSWORD));
    assert!(!body.contains("password"));
}

#[tokio::test]
async fn reserved_characters_are_found_when_percent_encoded() {
    let ctx = TestContext::new();
    ctx.register("sarah/connor").await;

    let response = ctx.get("/api/user/sarah%2Fconnor").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "sarah/connor");
}
