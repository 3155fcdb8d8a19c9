use async_trait::async_trait;
use models::{Product, ProductPatch};

use crate::errors::ServiceError;

/// Trait abstraction for catalog storage.
/// Lookups are by `id`, first match wins; ids are not required to be unique.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, ServiceError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError>;
    /// Append without any uniqueness check; returns the stored product.
    async fn add(&self, product: Product) -> Result<Product, ServiceError>;
    /// Full overwrite of the record matching `product.id`; `false` when absent.
    async fn update(&self, product: Product) -> Result<bool, ServiceError>;
    /// Sparse merge onto the record matching `id`; `None` when absent.
    async fn patch(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, ServiceError>;
    /// Remove the record matching `id`; `false` when absent.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}
