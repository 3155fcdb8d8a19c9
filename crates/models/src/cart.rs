use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::keys::CanonicalKeys;
use crate::product::Product;

/// The single shared cart. Items are copies of catalog products, duplicates allowed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Cart {
    pub items: Vec<Product>,
}

impl CanonicalKeys for Cart {
    const KEYS: &'static [&'static str] = &[
        "items",
        "id",
        "code",
        "name",
        "description",
        "image",
        "category",
        "price",
        "quantity",
        "internalReference",
        "shellId",
        "inventoryStatus",
        "rating",
        "createdAt",
        "updatedAt",
    ];
}

impl Cart {
    /// Append unconditionally; no merge with an existing line of the same id.
    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Remove the first line with `product_id`; returns whether one was removed.
    pub fn remove_first(&mut self, product_id: i32) -> bool {
        match self.items.iter().position(|p| p.id == product_id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }
}
