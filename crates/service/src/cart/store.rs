use std::path::PathBuf;

use async_trait::async_trait;
use models::{Cart, Product};
use tracing::info;

use crate::cart::repository::CartRepository;
use crate::errors::ServiceError;
use crate::storage::{JsonFileStore, Mutation};

/// File storage for the cart: a JSON object `{"items": [...]}`.
pub struct CartStore {
    store: JsonFileStore<Cart>,
}

impl CartStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { store: JsonFileStore::new(path) }
    }

    pub async fn get(&self) -> Result<Cart, ServiceError> {
        self.store.load().await
    }

    pub async fn add_item(&self, product: Product) -> Result<(), ServiceError> {
        let (id, name) = (product.id, product.name.clone());
        self.store
            .mutate(move |cart| {
                cart.add(product);
                Mutation::Write(())
            })
            .await?;
        info!(product_id = id, %name, "added to cart");
        Ok(())
    }

    pub async fn remove_item(&self, product_id: i32) -> Result<bool, ServiceError> {
        let removed = self
            .store
            .mutate(|cart| {
                if cart.remove_first(product_id) {
                    Mutation::Write(true)
                } else {
                    Mutation::Skip(false)
                }
            })
            .await?;
        if removed {
            info!(product_id, "removed from cart");
        }
        Ok(removed)
    }
}

#[async_trait]
impl CartRepository for CartStore {
    async fn get(&self) -> Result<Cart, ServiceError> { self.get().await }
    async fn add_item(&self, product: Product) -> Result<(), ServiceError> { self.add_item(product).await }
    async fn remove_item(&self, product_id: i32) -> Result<bool, ServiceError> { self.remove_item(product_id).await }
}
