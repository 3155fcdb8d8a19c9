use std::path::PathBuf;

use async_trait::async_trait;
use models::{Product, ProductPatch};
use tracing::info;

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;
use crate::storage::{JsonFileStore, Mutation};

/// File storage for the catalog: a JSON array of products.
pub struct ProductStore {
    store: JsonFileStore<Vec<Product>>,
}

impl ProductStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { store: JsonFileStore::new(path) }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.store.load().await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let products = self.store.load().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    pub async fn add(&self, product: Product) -> Result<Product, ServiceError> {
        let stored = product.clone();
        self.store
            .mutate(move |list| {
                list.push(product);
                Mutation::Write(())
            })
            .await?;
        info!(product_id = stored.id, name = %stored.name, "product added");
        Ok(stored)
    }

    pub async fn update(&self, product: Product) -> Result<bool, ServiceError> {
        let id = product.id;
        let found = self
            .store
            .mutate(|list| match list.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => {
                    existing.overwrite_from(&product);
                    Mutation::Write(true)
                }
                None => Mutation::Skip(false),
            })
            .await?;
        if found {
            info!(product_id = id, "product updated");
        }
        Ok(found)
    }

    pub async fn patch(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, ServiceError> {
        let updated = self
            .store
            .mutate(|list| match list.iter_mut().find(|p| p.id == id) {
                Some(existing) => {
                    patch.apply(existing);
                    Mutation::Write(Some(existing.clone()))
                }
                None => Mutation::Skip(None),
            })
            .await?;
        if let Some(p) = &updated {
            info!(product_id = id, name = %p.name, "product updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let removed = self
            .store
            .mutate(|list| match list.iter().position(|p| p.id == id) {
                Some(idx) => {
                    list.remove(idx);
                    Mutation::Write(true)
                }
                None => Mutation::Skip(false),
            })
            .await?;
        if removed {
            info!(product_id = id, "product deleted");
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn list(&self) -> Result<Vec<Product>, ServiceError> { self.list().await }
    async fn get_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> { self.get_by_id(id).await }
    async fn add(&self, product: Product) -> Result<Product, ServiceError> { self.add(product).await }
    async fn update(&self, product: Product) -> Result<bool, ServiceError> { self.update(product).await }
    async fn patch(&self, id: i32, patch: ProductPatch) -> Result<Option<Product>, ServiceError> { self.patch(id, patch).await }
    async fn delete(&self, id: i32) -> Result<bool, ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("svc_products_{}.json", Uuid::new_v4()))
    }

    fn product(id: i32, name: &str) -> Product {
        Product {
            id,
            code: format!("C-{id}"),
            name: name.into(),
            description: format!("{name} description"),
            image: format!("{id}.png"),
            category: "Misc".into(),
            price: 9.99,
            quantity: 5,
            internal_reference: format!("REF-{id}"),
            shell_id: 3,
            inventory_status: "INSTOCK".into(),
            rating: 4,
            created_at: 1_718_000_000_000,
            updated_at: 1_718_000_000_000,
        }
    }

    #[tokio::test]
    async fn add_then_get_returns_equal_product() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::new(&tmp);
        let widget = product(1, "Widget");

        store.add(widget.clone()).await?;
        assert_eq!(store.get_by_id(1).await?, Some(widget));
        assert_eq!(store.get_by_id(2).await?, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn list_round_trips_in_order() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::new(&tmp);
        let products: Vec<Product> = (1..=5).rev().map(|i| product(i, &format!("P{i}"))).collect();
        for p in &products {
            store.add(p.clone()).await?;
        }

        // reload through a fresh store to ensure persistence
        let reloaded = ProductStore::new(&tmp).list().await?;
        assert_eq!(reloaded, products);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_ids_allowed_and_first_wins() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::new(&tmp);
        store.add(product(1, "First")).await?;
        store.add(product(1, "Second")).await?;

        assert_eq!(store.list().await?.len(), 2);
        assert_eq!(store.get_by_id(1).await?.map(|p| p.name), Some("First".to_string()));

        assert!(store.delete(1).await?);
        assert_eq!(store.get_by_id(1).await?.map(|p| p.name), Some("Second".to_string()));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_is_noop() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::new(&tmp);
        store.add(product(1, "Widget")).await?;
        store.add(product(2, "Gadget")).await?;

        assert!(!store.delete(42).await?);
        assert_eq!(store.list().await?.len(), 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_every_field() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::new(&tmp);
        store.add(product(1, "Widget")).await?;

        let mut replacement = product(1, "Renamed");
        replacement.price = 1.5;
        replacement.inventory_status = "OUTOFSTOCK".into();
        assert!(store.update(replacement.clone()).await?);
        assert_eq!(store.get_by_id(1).await?, Some(replacement));

        // unknown id: nothing written
        assert!(!store.update(product(9, "Ghost")).await?);
        assert_eq!(store.list().await?.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn patch_price_only_leaves_other_fields() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        let store = ProductStore::new(&tmp);
        let before = product(1, "Widget");
        store.add(before.clone()).await?;

        let patched = store
            .patch(1, ProductPatch { price: Some(19.5), ..Default::default() })
            .await?
            .expect("product exists");
        assert_eq!(patched.price, 19.5);

        let stored = store.get_by_id(1).await?.expect("product exists");
        assert_eq!(serde_json::to_value(&stored)?["price"], serde_json::json!(19.5));
        let mut expected = before;
        expected.price = 19.5;
        assert_eq!(stored, expected);

        assert_eq!(store.patch(7, ProductPatch::default()).await?, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn malformed_file_lists_empty() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, b"[{\"id\": 1,").await?;
        let store = ProductStore::new(&tmp);
        assert!(store.list().await?.is_empty());
        assert_eq!(store.get_by_id(1).await?, None);

        let res = store.add(Product { name: "New".into(), ..Default::default() }).await;
        assert!(matches!(res, Err(ServiceError::Malformed { .. })));
        assert_eq!(tokio::fs::read(&tmp).await?, b"[{\"id\": 1,".to_vec());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn null_string_fields_keep_the_catalog_intact() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, br#"[{"id": 1, "name": "Keep", "image": null}, {"id": 2, "name": "Other", "code": null}]"#)
            .await?;
        let store = ProductStore::new(&tmp);
        assert_eq!(store.list().await?.len(), 2);
        assert_eq!(store.get_by_id(1).await?.map(|p| p.image), Some(String::new()));

        store.add(Product { name: "Third".into(), ..Default::default() }).await?;
        let names: Vec<String> = store.list().await?.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Keep", "Other", "Third"]);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn reads_pascal_case_documents() -> Result<(), anyhow::Error> {
        let tmp = tmp_path();
        tokio::fs::write(&tmp, br#"[{"Id": 4, "Name": "Legacy", "Price": 2.5, "InventoryStatus": "INSTOCK"}]"#).await?;
        let store = ProductStore::new(&tmp);
        let p = store.get_by_id(4).await?.expect("legacy product");
        assert_eq!(p.name, "Legacy");
        assert_eq!(p.price, 2.5);
        assert_eq!(p.inventory_status, "INSTOCK");

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
