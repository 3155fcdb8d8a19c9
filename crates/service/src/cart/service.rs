use models::Product;

use crate::cart::repository::CartRepository;
use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Copy the catalog product `product_id` into the cart.
/// Fails with `NotFound` when the catalog has no such product.
pub async fn add_from_catalog(
    catalog: &dyn ProductRepository,
    cart: &dyn CartRepository,
    product_id: i32,
) -> Result<Product, ServiceError> {
    let product = catalog
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("product"))?;
    cart.add_item(product.clone()).await?;
    Ok(product)
}
