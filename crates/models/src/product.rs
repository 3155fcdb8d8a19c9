use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::keys::CanonicalKeys;

/// Catalog entry. Missing fields decode to their defaults, `null` strings to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: i32,
    #[serde(deserialize_with = "null_as_empty")]
    pub code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub image: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub category: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(deserialize_with = "null_as_empty")]
    pub internal_reference: String,
    pub shell_id: i32,
    #[serde(deserialize_with = "null_as_empty")]
    pub inventory_status: String,
    pub rating: i32,
    /// Epoch millis.
    pub created_at: i64,
    /// Epoch millis.
    pub updated_at: i64,
}

/// String fields accept `null` and read it as empty.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CanonicalKeys for Product {
    const KEYS: &'static [&'static str] = &[
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

impl CanonicalKeys for Vec<Product> {
    const KEYS: &'static [&'static str] = Product::KEYS;
}

/// Sparse update payload: `None` (absent or `null`) leaves the stored value as is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub internal_reference: Option<String>,
    pub shell_id: Option<i32>,
    pub inventory_status: Option<String>,
    pub rating: Option<i32>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

impl CanonicalKeys for ProductPatch {
    const KEYS: &'static [&'static str] = Product::KEYS;
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

impl ProductPatch {
    /// Assign every present field onto `product`. The id is never touched.
    pub fn apply(self, product: &mut Product) {
        set(&mut product.code, self.code);
        set(&mut product.name, self.name);
        set(&mut product.description, self.description);
        set(&mut product.image, self.image);
        set(&mut product.category, self.category);
        set(&mut product.price, self.price);
        set(&mut product.quantity, self.quantity);
        set(&mut product.internal_reference, self.internal_reference);
        set(&mut product.shell_id, self.shell_id);
        set(&mut product.inventory_status, self.inventory_status);
        set(&mut product.rating, self.rating);
        set(&mut product.created_at, self.created_at);
        set(&mut product.updated_at, self.updated_at);
    }
}

impl Product {
    /// Full overwrite of every field except `id` from `other`.
    pub fn overwrite_from(&mut self, other: &Product) {
        let id = self.id;
        *self = other.clone();
        self.id = id;
    }
}
