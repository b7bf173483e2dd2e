//! Integration tests for Cartwright.
//!
//! Tests drive the full router (middleware included) in-process with
//! `tower::ServiceExt::oneshot`, against an in-memory store seeded with the
//! starter catalog. No database or running server is needed.
//!
//! `tests/postgres.rs` exercises the `PostgreSQL` repositories directly and
//! only runs when `DATABASE_URL` is set.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cartwright-integration-tests
//! DATABASE_URL=postgres://localhost/cartwright_test cargo test -p cartwright-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use cartwright_api::config::DEFAULT_MIN_PASSWORD_LENGTH;
use cartwright_api::db::MemoryStore;
use cartwright_api::services::{PasswordHashError, PasswordHasher};
use cartwright_api::state::{AppState, Repositories};
use cartwright_core::{NewItem, Price};

/// Password used by [`TestContext::register`].
pub const PASSWORD: &str = "17sara7";

/// Hasher that tags the plaintext instead of running Argon2, which is too
/// slow for unoptimized test builds.
struct TaggingHasher;

impl PasswordHasher for TaggingHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("test${password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("test$") == Some(password)
    }
}

/// A response with its body already collected.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// A router over a fresh in-memory store.
pub struct TestContext {
    router: Router,
    pub store: MemoryStore,
}

impl TestContext {
    /// Catalog holds Round Widget (id 1, 2.99) and Square Widget (id 2, 1.99).
    #[must_use]
    pub fn new() -> Self {
        let store = MemoryStore::with_items([
            NewItem {
                name: "Round Widget".to_string(),
                description: "A widget that is round".to_string(),
                price: Price::from_cents(299),
            },
            NewItem {
                name: "Square Widget".to_string(),
                description: "A widget that is square".to_string(),
                price: Price::from_cents(199),
            },
        ]);
        let state = AppState::new(
            Repositories::in_memory(&store),
            Box::new(TaggingHasher),
            DEFAULT_MIN_PASSWORD_LENGTH,
        );

        Self {
            router: cartwright_api::app(state),
            store,
        }
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// GET `uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// POST `body` as JSON to `uri`.
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST with no body.
    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Register `username` with [`PASSWORD`], asserting success.
    pub async fn register(&self, username: &str) -> Value {
        let response = self
            .post_json(
                "/api/user/create",
                &serde_json::json!({
                    "username": username,
                    "password": PASSWORD,
                    "confirmPassword": PASSWORD,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "registering {username}");
        response.json()
    }

    /// Add to `username`'s cart and return the raw response.
    pub async fn add_to_cart(&self, username: &str, item_id: i64, quantity: u32) -> TestResponse {
        self.post_json(
            "/api/cart/addToCart",
            &serde_json::json!({
                "username": username,
                "itemId": item_id,
                "quantity": quantity,
            }),
        )
        .await
    }

    /// Remove from `username`'s cart and return the raw response.
    pub async fn remove_from_cart(
        &self,
        username: &str,
        item_id: i64,
        quantity: u32,
    ) -> TestResponse {
        self.post_json(
            "/api/cart/removeFromCart",
            &serde_json::json!({
                "username": username,
                "itemId": item_id,
                "quantity": quantity,
            }),
        )
        .await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
