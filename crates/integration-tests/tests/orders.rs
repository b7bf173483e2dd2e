//! Order submission and history over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::json;

use cartwright_integration_tests::TestContext;

#[tokio::test]
async fn submit_copies_cart_into_order() {
    let ctx = TestContext::new();
    let user = ctx.register("Sarah").await;
    ctx.add_to_cart("Sarah", 1, 1).await;

    let response = ctx.post_empty("/api/order/submit/Sarah").await;

    assert_eq!(response.status, StatusCode::OK);
    let order = response.json();
    assert_eq!(order["userId"], user["id"]);
    assert_eq!(order["total"], "2.99");
    assert_eq!(order["items"].as_array().unwrap().len(), 1);
    assert_eq!(order["items"][0]["id"], 1);
}

#[tokio::test]
async fn order_is_unaffected_by_later_cart_changes() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;
    ctx.add_to_cart("Sarah", 1, 1).await;
    ctx.post_empty("/api/order/submit/Sarah").await;

    ctx.remove_from_cart("Sarah", 1, 1).await;
    ctx.add_to_cart("Sarah", 2, 3).await;

    let history = ctx.get("/api/order/history/Sarah").await.json();
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["total"], "2.99");
    assert_eq!(history[0]["items"][0]["name"], "Round Widget");
}

#[tokio::test]
async fn submit_leaves_cart_in_place() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;
    ctx.add_to_cart("Sarah", 2, 2).await;
    ctx.post_empty("/api/order/submit/Sarah").await;

    let cart = ctx.remove_from_cart("Sarah", 1, 0).await.json();
    assert_eq!(cart["total"], "3.98");
}

#[tokio::test]
async fn submitting_empty_cart_gives_empty_order() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let order = ctx.post_empty("/api/order/submit/Sarah").await.json();

    assert_eq!(order["items"], json!([]));
    assert_eq!(order["total"], "0.00");
}

#[tokio::test]
async fn history_lists_only_this_users_orders_in_order() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;
    ctx.register("Lati").await;

    ctx.add_to_cart("Sarah", 1, 1).await;
    let first = ctx.post_empty("/api/order/submit/Sarah").await.json();
    ctx.add_to_cart("Lati", 2, 1).await;
    ctx.post_empty("/api/order/submit/Lati").await;
    ctx.add_to_cart("Sarah", 2, 1).await;
    let second = ctx.post_empty("/api/order/submit/Sarah").await.json();

    let response = ctx.get("/api/order/history/Sarah").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([first, second]));
}

#[tokio::test]
async fn history_of_new_user_is_empty() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let response = ctx.get("/api/order/history/Sarah").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let ctx = TestContext::new();

    let submit = ctx.post_empty("/api/order/submit/Nobody").await;
    assert_eq!(submit.status, StatusCode::NOT_FOUND);
    assert!(submit.body.is_empty());

    let history = ctx.get("/api/order/history/Nobody").await;
    assert_eq!(history.status, StatusCode::NOT_FOUND);
    assert!(history.body.is_empty());
}
