//! Cart mutation over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use cartwright_api::db::UserRepository;
use cartwright_core::{ItemId, Price};
use cartwright_integration_tests::TestContext;

fn item_ids(cart: &Value) -> Vec<i64> {
    cart["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn add_to_cart_returns_updated_cart() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let response = ctx.add_to_cart("Sarah", 1, 1).await;

    assert_eq!(response.status, StatusCode::OK);
    let cart = response.json();
    assert_eq!(item_ids(&cart), vec![1]);
    assert_eq!(cart["total"], "2.99");
}

#[tokio::test]
async fn quantity_appends_copies_and_totals_add_up() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    ctx.add_to_cart("Sarah", 1, 2).await;
    let cart = ctx.add_to_cart("Sarah", 2, 1).await.json();

    assert_eq!(item_ids(&cart), vec![1, 1, 2]);
    assert_eq!(cart["total"], "7.97");
}

#[tokio::test]
async fn cart_changes_are_persisted() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let returned = ctx.add_to_cart("Sarah", 2, 2).await.json();
    ctx.remove_from_cart("Sarah", 2, 1).await;

    let stored = ctx
        .store
        .find_by_username("Sarah")
        .await
        .unwrap()
        .unwrap()
        .cart;
    assert_eq!(stored.id.as_i64(), returned["id"].as_i64().unwrap());
    assert_eq!(stored.quantity_of(ItemId::new(2)), 1);
    assert_eq!(stored.total(), Price::from_cents(199));
}

#[tokio::test]
async fn rejected_add_leaves_stored_cart_alone() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;
    ctx.add_to_cart("Sarah", 1, 1).await;

    ctx.add_to_cart("Sarah", 1, 1001).await;
    ctx.add_to_cart("Sarah", 99, 1).await;

    let user = ctx.store.find_by_username("Sarah").await.unwrap().unwrap();
    assert_eq!(user.cart.len(), 1);
}

#[tokio::test]
async fn remove_from_cart_recomputes_total() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;
    ctx.add_to_cart("Sarah", 1, 2).await;
    ctx.add_to_cart("Sarah", 2, 1).await;

    let response = ctx.remove_from_cart("Sarah", 1, 1).await;

    assert_eq!(response.status, StatusCode::OK);
    let cart = response.json();
    assert_eq!(item_ids(&cart), vec![1, 2]);
    assert_eq!(cart["total"], "4.98");
}

#[tokio::test]
async fn removing_more_than_present_is_not_an_error() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;
    ctx.add_to_cart("Sarah", 1, 1).await;

    let response = ctx.remove_from_cart("Sarah", 1, 5).await;

    assert_eq!(response.status, StatusCode::OK);
    let cart = response.json();
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], "0.00");
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let ctx = TestContext::new();

    let add = ctx.add_to_cart("Nobody", 1, 1).await;
    assert_eq!(add.status, StatusCode::NOT_FOUND);
    assert!(add.body.is_empty());

    let remove = ctx.remove_from_cart("Nobody", 1, 1).await;
    assert_eq!(remove.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_item_is_not_found_and_cart_untouched() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;
    ctx.add_to_cart("Sarah", 2, 1).await;

    assert_eq!(
        ctx.add_to_cart("Sarah", 99, 1).await.status,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        ctx.remove_from_cart("Sarah", 99, 1).await.status,
        StatusCode::NOT_FOUND
    );

    let cart = ctx.remove_from_cart("Sarah", 1, 0).await.json();
    assert_eq!(item_ids(&cart), vec![2]);
}

#[tokio::test]
async fn quantity_over_limit_is_bad_request() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let response = ctx.add_to_cart("Sarah", 1, 1001).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_quantity_is_rejected_by_the_extractor() {
    let ctx = TestContext::new();
    ctx.register("Sarah").await;

    let response = ctx
        .post_json(
            "/api/cart/addToCart",
            &json!({ "username": "Sarah", "itemId": 1, "quantity": -1 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}
