//! Service layer: file-backed catalog and cart stores.
//! - `storage` holds the generic JSON document store.
//! - `product` and `cart` expose repository traits plus their file implementations.
//! - Every operation re-reads its file; nothing is cached between calls.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod product;
pub mod cart;

pub use cart::{CartRepository, CartStore};
pub use product::{ProductRepository, ProductStore};
