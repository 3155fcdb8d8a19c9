use async_trait::async_trait;
use models::{Cart, Product};

use crate::errors::ServiceError;

/// Trait abstraction for the single shared cart.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get(&self) -> Result<Cart, ServiceError>;
    /// Append unconditionally, even when an item with the same id is present.
    async fn add_item(&self, product: Product) -> Result<(), ServiceError>;
    /// Remove the first item with `product_id`; `false` when absent.
    async fn remove_item(&self, product_id: i32) -> Result<bool, ServiceError>;
}
