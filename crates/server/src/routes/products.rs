use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::WithRejection;
use models::{Product, ProductPatch};

use crate::errors::JsonApiError;
use crate::extract::CaseInsensitiveJson;
use crate::routes::AppState;

#[utoipa::path(get, path = "/api/products", tag = "products", responses((status = 200, description = "OK", body = [Product]), (status = 404, description = "Catalog empty")))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, JsonApiError> {
    let products = state.products.list().await?;
    if products.is_empty() {
        return Err(JsonApiError::not_found("No products found."));
    }
    Ok(Json(products))
}

#[utoipa::path(get, path = "/api/products/{id}", tag = "products", params(("id" = i32, Path, description = "Product id")), responses((status = 200, description = "OK", body = Product), (status = 404, description = "Not Found")))]
pub async fn get_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<Json<Product>, JsonApiError> {
    match state.products.get_by_id(id).await? {
        Some(product) => Ok(Json(product)),
        None => Err(JsonApiError::not_found(format!("product {id} not found"))),
    }
}

#[utoipa::path(post, path = "/api/products", tag = "products", request_body = Product, responses((status = 201, description = "Created", body = Product)))]
pub async fn create_product(
    State(state): State<AppState>,
    CaseInsensitiveJson(product): CaseInsensitiveJson<Product>,
) -> Result<impl IntoResponse, JsonApiError> {
    let stored = state.products.add(product).await?;
    let location = format!("/api/products/{}", stored.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(stored)))
}

#[utoipa::path(patch, path = "/api/products/{id}", tag = "products", params(("id" = i32, Path, description = "Product id")), request_body = ProductPatch, responses((status = 204, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn patch_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
    CaseInsensitiveJson(patch): CaseInsensitiveJson<ProductPatch>,
) -> Result<StatusCode, JsonApiError> {
    match state.products.patch(id, patch).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(JsonApiError::not_found(format!("product {id} not found"))),
    }
}

/// Always 204: deleting an unknown id is a no-op.
#[utoipa::path(delete, path = "/api/products/{id}", tag = "products", params(("id" = i32, Path, description = "Product id")), responses((status = 204, description = "Deleted")))]
pub async fn delete_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
