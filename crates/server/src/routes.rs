use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::{CartRepository, ProductRepository};

use crate::openapi;

pub mod cart;
pub mod products;

/// Shared handler state: the two stores behind their repository traits.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub cart: Arc<dyn CartRepository>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = Health)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok".into() })
}

/// Build the full application router: health, OpenAPI document, catalog and cart.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/products", get(products::list_products).post(products::create_product))
        .route(
            "/api/products/:id",
            get(products::get_product)
                .patch(products::patch_product)
                .delete(products::delete_product),
        )
        .route("/api/cart", get(cart::get_cart))
        .route("/api/cart/add", post(cart::add_to_cart))
        .route("/api/cart/remove/:product_id", delete(cart::remove_from_cart));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use service::{CartStore, ProductStore};
    use tower::ServiceExt;

    fn app() -> (Router, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("server_routes_{}", uuid::Uuid::new_v4()));
        let state = AppState {
            products: Arc::new(ProductStore::new(dir.join("products.json"))),
            cart: Arc::new(CartStore::new(dir.join("cart.json"))),
        };
        (build_router(state, CorsLayer::new()), dir)
    }

    #[tokio::test]
    async fn health_ok() -> anyhow::Result<()> {
        let (app, _) = app();
        let res = app.oneshot(Request::get("/health").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert_eq!(body["status"], "ok");
        Ok(())
    }

    #[tokio::test]
    async fn empty_catalog_is_404_with_message() -> anyhow::Result<()> {
        let (app, _) = app();
        let res = app.oneshot(Request::get("/api/products").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert_eq!(body["error"], "No products found.");
        Ok(())
    }

    #[tokio::test]
    async fn post_accepts_pascal_case_body() -> anyhow::Result<()> {
        let (app, dir) = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"Id": 12, "Name": "Lamp", "Price": 20.0}"#))?;
        let res = app.clone().oneshot(req).await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(res.headers()[header::LOCATION], "/api/products/12");

        let res = app.oneshot(Request::get("/api/products/12").body(Body::empty())?).await?;
        let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert_eq!(body["name"], "Lamp");
        assert_eq!(body["price"], 20.0);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn post_without_json_content_type_is_415() -> anyhow::Result<()> {
        let (app, _) = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .body(Body::from(r#"{"id": 1}"#))?;
        let res = app.oneshot(req).await?;
        assert_eq!(res.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        Ok(())
    }

    #[tokio::test]
    async fn post_with_null_string_field_is_created() -> anyhow::Result<()> {
        let (app, dir) = app();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id": 3, "name": "Mug", "image": null, "description": null}"#))?;
        let res = app.clone().oneshot(req).await?;
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = app.oneshot(Request::get("/api/products").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert_eq!(body[0]["name"], "Mug");
        assert_eq!(body[0]["image"], "");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn non_numeric_ids_get_json_errors() -> anyhow::Result<()> {
        let (app, _) = app();
        let requests = [
            Request::get("/api/products/abc").body(Body::empty())?,
            Request::delete("/api/products/abc").body(Body::empty())?,
            Request::delete("/api/cart/remove/abc").body(Body::empty())?,
            Request::post("/api/cart/add?productId=abc").body(Body::empty())?,
            Request::post("/api/cart/add").body(Body::empty())?,
        ];
        for req in requests {
            let uri = req.uri().clone();
            let res = app.clone().oneshot(req).await?;
            assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
            assert!(body["error"].is_string(), "{uri}: {body}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn write_to_malformed_catalog_is_500_and_keeps_file() -> anyhow::Result<()> {
        let (app, dir) = app();
        tokio::fs::create_dir_all(&dir).await?;
        let broken = br#"[{"id": 1, "name": "Keep"},"#;
        tokio::fs::write(dir.join("products.json"), broken).await?;

        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/products")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id": 2, "name": "New"}"#))?;
        let res = app.oneshot(req).await?;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert!(body["error"].is_string());
        assert_eq!(tokio::fs::read(dir.join("products.json")).await?, broken.to_vec());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() -> anyhow::Result<()> {
        let (app, _) = app();
        let res = app.oneshot(Request::get("/api-docs/openapi.json").body(Body::empty())?).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(&to_bytes(res.into_body(), usize::MAX).await?)?;
        assert!(doc["paths"]["/api/products/{id}"].is_object());
        assert!(doc["paths"]["/api/cart/add"].is_object());
        assert!(doc["components"]["schemas"]["Health"].is_object());
        Ok(())
    }
}
