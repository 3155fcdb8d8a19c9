use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use models::Cart;
use serde::Deserialize;
use service::cart::add_from_catalog;

use crate::errors::JsonApiError;
use crate::routes::AppState;

#[derive(Deserialize, Debug)]
pub struct AddToCartQuery {
    #[serde(rename = "productId")]
    pub product_id: i32,
}

#[utoipa::path(get, path = "/api/cart", tag = "cart", responses((status = 200, description = "OK", body = Cart)))]
pub async fn get_cart(State(state): State<AppState>) -> Result<Json<Cart>, JsonApiError> {
    Ok(Json(state.cart.get().await?))
}

#[utoipa::path(post, path = "/api/cart/add", tag = "cart", params(("productId" = i32, Query, description = "Catalog product id")), responses((status = 204, description = "Added"), (status = 404, description = "Unknown product")))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<AddToCartQuery>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    add_from_catalog(state.products.as_ref(), state.cart.as_ref(), query.product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(delete, path = "/api/cart/remove/{productId}", tag = "cart", params(("productId" = i32, Path, description = "Product id")), responses((status = 204, description = "Removed or absent")))]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    WithRejection(Path(product_id), _): WithRejection<Path<i32>, JsonApiError>,
) -> Result<StatusCode, JsonApiError> {
    state.cart.remove_item(product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
