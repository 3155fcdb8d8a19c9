use axum::Json;
use common::types::Health;
use models::{Cart, Product, ProductPatch};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::products::create_product,
        crate::routes::products::patch_product,
        crate::routes::products::delete_product,
        crate::routes::cart::get_cart,
        crate::routes::cart::add_to_cart,
        crate::routes::cart::remove_from_cart,
    ),
    components(
        schemas(
            Health,
            Product,
            ProductPatch,
            Cart,
        )
    ),
    tags(
        (name = "health"),
        (name = "products", description = "Product catalog"),
        (name = "cart", description = "Shared shopping cart"),
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
