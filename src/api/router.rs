use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::domain::cart::MockCartStore;
    use crate::domain::{CartStore, Product, UserId};
    use crate::infrastructure::auth::{JwtConfig, JwtService};
    use crate::infrastructure::cart_store::InMemoryCartStore;
    use crate::infrastructure::catalog::InMemoryCatalog;
    use crate::infrastructure::services::{CartService, CartSettings};

    const SECRET: &str = "router-test-secret";

    fn jwt() -> JwtService {
        JwtService::new(JwtConfig::new(SECRET, 1))
    }

    fn token(user: i64) -> String {
        jwt().generate(UserId::new(user).unwrap()).unwrap()
    }

    fn catalog() -> Arc<InMemoryCatalog> {
        Arc::new(
            InMemoryCatalog::new()
                .with_product(
                    Product::new("SKU-1", "Mug", 10.0)
                        .with_image_url("https://img.example.com/mug.png")
                        .with_stock(10),
                )
                .with_product(Product::new("SKU-2", "Pen", 1.5).with_stock(100)),
        )
    }

    fn state_with_store<S: CartStore + 'static>(store: Arc<S>) -> AppState {
        let service = CartService::new(
            store,
            catalog(),
            CartSettings::new(Duration::from_secs(3600)),
        );

        AppState::new(Arc::new(service), Arc::new(jwt()))
    }

    fn app() -> Router {
        create_router_with_state(state_with_store(Arc::new(InMemoryCartStore::new())))
    }

    fn request(method: Method, uri: &str, user: Option<i64>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(user)));
        }

        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    #[tokio::test]
    async fn test_health_and_live() {
        let app = app();

        let (status, body) = send(&app, request(Method::GET, "/health", None, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, _) = send(&app, request(Method::GET, "/live", None, None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_with_healthy_store() {
        let (status, body) = send(&app(), request(Method::GET, "/ready", None, None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"][0]["name"], "cart_store");
    }

    #[tokio::test]
    async fn test_ready_with_failing_store() {
        let app = create_router_with_state(state_with_store(Arc::new(
            MockCartStore::new().with_error("connection refused"),
        )));

        let (status, body) = send(&app, request(Method::GET, "/ready", None, None)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }

    #[tokio::test]
    async fn test_cart_requires_token() {
        let (status, body) = send(&app(), request(Method::GET, "/v1/cart", None, None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["type"], "authentication_error");
    }

    #[tokio::test]
    async fn test_cart_rejects_foreign_token() {
        let foreign = JwtService::new(JwtConfig::new("other-secret", 1))
            .generate(UserId::new(1).unwrap())
            .unwrap();

        let req = Request::builder()
            .uri("/v1/cart")
            .header(header::AUTHORIZATION, format!("Bearer {}", foreign))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(&app(), req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let (status, body) = send(&app(), request(Method::GET, "/v1/cart", Some(1), None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"items": [], "total_price": 0.0, "total_items": 0}));
    }

    #[tokio::test]
    async fn test_cart_lifecycle() {
        let app = app();

        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/v1/cart/items",
                Some(7),
                Some(json!({"sku": "SKU-1", "quantity": 2})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["sku"], "SKU-1");
        assert_eq!(body["item"]["item_total_price"], 20.0);

        let (status, body) = send(
            &app,
            request(
                Method::PUT,
                "/v1/cart/items/SKU-1",
                Some(7),
                Some(json!({"quantity": 5})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["item"]["quantity"], 5);
        assert_eq!(body["item"]["item_total_price"], 50.0);

        let (status, body) = send(&app, request(Method::GET, "/v1/cart", Some(7), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_price"], 50.0);
        assert_eq!(body["total_items"], 5);
        assert_eq!(body["items"][0]["name"], "Mug");

        let (status, _) = send(
            &app,
            request(Method::DELETE, "/v1/cart/items/SKU-1", Some(7), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, request(Method::GET, "/v1/cart", Some(7), None)).await;
        assert_eq!(body["items"], json!([]));
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let app = app();

        send(
            &app,
            request(
                Method::POST,
                "/v1/cart/items",
                Some(3),
                Some(json!({"sku": "SKU-2", "quantity": 1})),
            ),
        )
        .await;

        let (status, _) = send(&app, request(Method::DELETE, "/v1/cart", Some(3), None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, request(Method::DELETE, "/v1/cart", Some(3), None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, request(Method::GET, "/v1/cart", Some(3), None)).await;
        assert_eq!(body["total_items"], 0);
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let app = app();

        let cases = [
            (
                request(
                    Method::POST,
                    "/v1/cart/items",
                    Some(1),
                    Some(json!({"sku": "SKU-1", "quantity": 0})),
                ),
                StatusCode::BAD_REQUEST,
                "invalid_quantity",
            ),
            (
                request(
                    Method::POST,
                    "/v1/cart/items",
                    Some(1),
                    Some(json!({"sku": " ", "quantity": 1})),
                ),
                StatusCode::BAD_REQUEST,
                "invalid_sku",
            ),
            (
                request(
                    Method::POST,
                    "/v1/cart/items",
                    Some(1),
                    Some(json!({"sku": "SKU-404", "quantity": 1})),
                ),
                StatusCode::NOT_FOUND,
                "product_not_found",
            ),
            (
                request(
                    Method::POST,
                    "/v1/cart/items",
                    Some(1),
                    Some(json!({"sku": "SKU-1", "quantity": 11})),
                ),
                StatusCode::CONFLICT,
                "insufficient_stock",
            ),
            (
                request(
                    Method::PUT,
                    "/v1/cart/items/SKU-2",
                    Some(1),
                    Some(json!({"quantity": 1})),
                ),
                StatusCode::NOT_FOUND,
                "item_not_found",
            ),
        ];

        for (req, expected_status, expected_code) in cases {
            let (status, body) = send(&app, req).await;

            assert_eq!(status, expected_status, "code {}", expected_code);
            assert_eq!(body["error"]["code"], expected_code);
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/v1/cart/items")
            .header(header::AUTHORIZATION, format!("Bearer {}", token(1)))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"sku\": "))
            .unwrap();

        let (status, body) = send(&app(), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_json");
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let app = create_router_with_state(state_with_store(Arc::new(
            MockCartStore::new().with_error("redis://internal-host refused"),
        )));

        let (status, body) = send(&app, request(Method::GET, "/v1/cart", Some(1), None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "store_unavailable");
        assert!(!body.to_string().contains("internal-host"));
    }

    #[tokio::test]
    async fn test_users_do_not_share_carts() {
        let app = app();

        send(
            &app,
            request(
                Method::POST,
                "/v1/cart/items",
                Some(10),
                Some(json!({"sku": "SKU-1", "quantity": 1})),
            ),
        )
        .await;

        let (_, body) = send(&app, request(Method::GET, "/v1/cart", Some(11), None)).await;
        assert_eq!(body["total_items"], 0);
    }
}
